use lostfound_core::config::IndexSettings;
use lostfound_core::traits::ItemIndexer;
use lostfound_core::types::{Category, ItemKind, ItemRecord};
use lostfound_index::{HashIndex, ItemIndex};

fn record(id: &str, name: &str, category: Category, description: &str) -> ItemRecord {
    ItemRecord::new(id, name, category, ItemKind::Lost).unwrap().with_description(description)
}

#[test]
fn bucket_assignment_is_deterministic_and_case_insensitive() {
    let a: HashIndex<()> = HashIndex::new();
    let b: HashIndex<()> = HashIndex::new();
    for key in ["wallet", "Student ID Card", "sports equipment", "ÄrmelJacke"] {
        assert_eq!(a.bucket_of(key), b.bucket_of(key));
        assert_eq!(a.bucket_of(key), a.bucket_of(&key.to_uppercase()));
        assert!(a.bucket_of(key) < a.table_size());
    }
}

#[test]
fn insert_then_search_round_trip() {
    let mut index = HashIndex::new();
    index.insert("iphone 13", "item-1");
    index.insert("electronics", "item-1");
    index.insert("keys", "item-2");

    assert_eq!(index.search("iphone 13"), Some(&"item-1"));
    assert_eq!(index.search("IPHONE 13"), Some(&"item-1"));
    assert_eq!(index.search("Keys"), Some(&"item-2"));
    assert_eq!(index.search("wallet"), None);
    assert_eq!(index.len(), 3);
}

#[test]
fn every_key_survives_repeated_growth() {
    let mut index = HashIndex::with_size(2);
    let keys: Vec<String> = (0..200).map(|i| format!("item-{i}")).collect();
    let mut last_size = index.table_size();
    for (i, key) in keys.iter().enumerate() {
        index.insert(key.clone(), i);
        if index.len() as f64 > 0.75 * last_size as f64 {
            assert!(index.table_size() > last_size, "table grows once the load factor is crossed");
        }
        last_size = index.table_size();
        assert!(index.load_factor() <= 0.75);
    }
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(index.search(key), Some(&i));
    }
    assert_eq!(index.len(), keys.len());
}

#[test]
fn growth_follows_configured_load_factor() {
    let mut index = HashIndex::with_settings(&IndexSettings { initial_size: 10, max_load_factor: 0.5 });
    for key in ["a", "b", "c", "d", "e"] {
        index.insert(key, ());
    }
    assert_eq!(index.table_size(), 10);
    index.insert("f", ());
    assert_eq!(index.table_size(), 20);
}

#[test]
fn delete_reports_whether_anything_was_removed() {
    let mut index = HashIndex::new();
    index.insert("wallet", 1);

    assert!(!index.delete("umbrella"));
    assert_eq!(index.len(), 1);

    assert!(index.delete("WALLET"));
    assert_eq!(index.len(), 0);
    assert_eq!(index.search("wallet"), None);
    assert!(!index.delete("wallet"));
}

#[test]
fn partial_search_scans_all_keys_and_keeps_duplicates() {
    let mut index = HashIndex::new();
    index.insert("black smartphone", "found-4");
    index.insert("smartphone case", "found-4");
    index.insert("phone charger", "found-6");
    index.insert("keys", "found-5");

    let mut hits = index.search_partial("PHONE");
    hits.sort();
    assert_eq!(hits, vec![&"found-4", &"found-4", &"found-6"]);
    assert!(index.search_partial("umbrella").is_empty());
}

#[test]
fn stats_describe_chains() {
    let mut index = HashIndex::with_size(50);
    index.insert("wallet", ());
    index.insert("keys", ());
    let stats = index.stats();
    assert_eq!(stats.table_size, 50);
    assert_eq!(stats.count, 2);
    assert_eq!(stats.max_chain_length, 1);
    assert_eq!(stats.empty_buckets, 48);
    assert!((stats.load_factor - 0.04).abs() < 1e-12);
    assert!((stats.utilization_percent - 4.0).abs() < 1e-9);
}

#[test]
fn item_index_shares_keys_between_records() {
    let mut index = ItemIndex::new();
    let brown = record("1", "Wallet", Category::Accessories, "Brown leather wallet");
    let black = record("2", "wallet", Category::Accessories, "Black wallet and cards");
    index.index(&brown);
    index.index(&black);

    assert_eq!(index.lookup("wallet"), vec!["1", "2"]);
    assert_eq!(index.lookup("accessories"), vec!["1", "2"]);
    assert_eq!(index.lookup("leather"), vec!["1"]);
    assert!(index.lookup("and").is_empty(), "short words are not keys");

    index.index(&brown);
    assert_eq!(index.lookup("wallet"), vec!["1", "2"], "re-indexing does not duplicate ids");
}

#[test]
fn item_index_remove_drops_emptied_keys() {
    let mut index = ItemIndex::new();
    let brown = record("1", "Wallet", Category::Accessories, "Brown leather wallet");
    let black = record("2", "wallet", Category::Accessories, "Black wallet and cards");
    index.index(&brown);
    index.index(&black);
    let keys_before = index.key_count();

    // wallet, accessories, brown, leather
    assert_eq!(index.remove(&brown), 4);
    assert_eq!(index.lookup("wallet"), vec!["2"]);
    assert!(index.lookup("leather").is_empty());
    assert_eq!(index.key_count(), keys_before - 2);

    assert_eq!(index.remove(&brown), 0, "second removal touches nothing");
}

#[test]
fn item_index_partial_lookup_returns_ids() {
    let mut index = ItemIndex::new();
    index.index(&record("1", "iPhone 13", Category::Electronics, "Black iPhone with blue case"));
    index.index(&record("4", "Black Smartphone", Category::Electronics, "Found near library entrance"));

    let mut ids = index.lookup_partial("phone");
    ids.sort();
    ids.dedup();
    assert_eq!(ids, vec!["1", "4"]);
    assert!(index.delete_key("electronics"));
    assert!(index.lookup("electronics").is_empty());
}
