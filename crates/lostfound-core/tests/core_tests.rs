use std::fs;
use tempfile::TempDir;

use lostfound_core::config::{expand_path, Config, HistorySettings, IndexSettings, MatchSettings};
use lostfound_core::error::Error;
use lostfound_core::item_loader::ItemLoader;
use lostfound_core::types::{Category, ItemKind, ItemRecord};

const SAMPLE: &str = r#"[
  {"id": "1", "name": "iPhone 13", "category": "Electronics",
   "description": "Black iPhone 13 with blue protective case", "color": "Black",
   "type": "lost", "createdAt": "2025-01-15T10:00:00Z"},
  {"id": "4", "name": "Black Smartphone", "category": "electronics",
   "description": "Found near the library entrance", "color": "Black",
   "kind": "found", "createdAt": "2025-01-16T09:30:00Z"}
]"#;

#[test]
fn load_single_file_accepts_type_alias_and_lowercase_category() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("items.json");
    fs::write(&file, SAMPLE).unwrap();

    let records = ItemLoader::new().load_path(&file).expect("load");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind(), ItemKind::Lost);
    assert_eq!(records[1].kind(), ItemKind::Found);
    assert_eq!(records[1].category(), Category::Electronics);
    assert!(records[0].created_at() < records[1].created_at());
}

#[test]
fn load_directory_limited_two_files_limit_one() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("a.json"), SAMPLE).unwrap();
    fs::write(dir.join("b.json"), r#"[{"id": "9", "name": "Keys", "category": "Keys", "kind": "found"}]"#).unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let loader = ItemLoader::new();
    assert_eq!(loader.load_path(dir).expect("load all").len(), 3);

    let limited = loader.load_path_limited(dir, 1).expect("load limited");
    assert_eq!(limited.len(), 2, "only a.json is read");
}

#[test]
fn load_rejects_blank_names_and_unknown_categories() {
    let tmp = TempDir::new().unwrap();
    let blank = tmp.path().join("blank.json");
    fs::write(&blank, r#"[{"id": "1", "name": "  ", "category": "Keys", "kind": "lost"}]"#).unwrap();
    assert!(matches!(ItemLoader::new().load_path(&blank), Err(Error::Json(_))));

    let unknown = tmp.path().join("unknown.json");
    fs::write(&unknown, r#"[{"id": "1", "name": "Kite", "category": "Toys", "kind": "lost"}]"#).unwrap();
    assert!(matches!(ItemLoader::new().load_path(&unknown), Err(Error::Json(_))));
}

#[test]
fn load_missing_path_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope");
    assert!(matches!(ItemLoader::new().load_path(&missing), Err(Error::NotFound(_))));
}

#[test]
fn record_constructor_validates_and_kind_is_fixed() {
    assert!(matches!(
        ItemRecord::new("1", "", Category::Keys, ItemKind::Lost),
        Err(Error::InvalidRecord(_))
    ));
    assert!(matches!(
        ItemRecord::new(" ", "Keys", Category::Keys, ItemKind::Lost),
        Err(Error::InvalidRecord(_))
    ));

    let record = ItemRecord::new("1", "Wallet", Category::Accessories, ItemKind::Found)
        .unwrap()
        .with_color("Brown");
    assert_eq!(record.kind().opposite(), ItemKind::Lost);
    assert_eq!(record.color(), "Brown");
    assert_eq!(record.description(), "");
}

#[test]
fn category_round_trips_through_its_label() {
    for category in Category::ALL {
        let parsed: Category = category.label().to_uppercase().parse().unwrap();
        assert_eq!(parsed, category);
    }
    let json = serde_json::to_string(&Category::SportsEquipment).unwrap();
    assert_eq!(json, "\"Sports Equipment\"");
}

#[test]
fn config_defaults_and_overrides() {
    let defaults = Config::from_toml_str("").unwrap().settings().unwrap();
    assert_eq!(defaults.matching, MatchSettings::default());
    assert_eq!(defaults.index, IndexSettings::default());
    assert_eq!(defaults.index.initial_size, 50);
    assert_eq!(defaults.history, HistorySettings { capacity: 50 });

    let tuned = Config::from_toml_str("[matching]\nthreshold = 0.6\n[index]\ninitial_size = 8\n").unwrap();
    let settings = tuned.settings().unwrap();
    assert!((settings.matching.threshold - 0.6).abs() < 1e-12);
    assert!((settings.matching.name_weight - 0.5).abs() < 1e-12);
    assert_eq!(settings.index.initial_size, 8);
    let threshold: f64 = tuned.get("matching.threshold").unwrap();
    assert!((threshold - 0.6).abs() < 1e-12);
}

#[test]
fn config_rejects_out_of_range_values() {
    assert!(matches!(
        Config::from_toml_str("[matching]\nthreshold = 1.5\n"),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        Config::from_toml_str("[index]\ninitial_size = 0\n"),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        Config::from_toml_str("[history]\ncapacity = 0\n"),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn expand_path_substitutes_env_vars() {
    std::env::set_var("LOSTFOUND_TEST_ITEMS", "/srv/board");
    assert_eq!(expand_path("${LOSTFOUND_TEST_ITEMS}/items.json"), std::path::PathBuf::from("/srv/board/items.json"));
    assert_eq!(expand_path("demo_data/items.json"), std::path::PathBuf::from("demo_data/items.json"));
}
