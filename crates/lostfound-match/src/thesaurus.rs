//! Static synonym table for everyday lost-and-found vocabulary.

/// A key and the terms it maps to.
pub type SynonymEntry = (&'static str, &'static [&'static str]);

const BUILTIN: &[SynonymEntry] = &[
    ("airpods", &["earbuds", "headphones", "tws", "earphones"]),
    ("earbuds", &["earphones", "headphones", "airpods"]),
    ("headphones", &["headset", "earphones", "earbuds"]),
    ("phone", &["smartphone", "mobile", "cellphone", "iphone", "android"]),
    ("iphone", &["phone", "smartphone", "mobile", "apple"]),
    ("laptop", &["notebook", "macbook", "computer", "chromebook"]),
    ("tablet", &["ipad", "kindle"]),
    ("charger", &["adapter", "cable", "powerbank"]),
    ("wallet", &["purse", "billfold", "cardholder"]),
    ("bag", &["backpack", "rucksack", "handbag", "satchel", "tote"]),
    ("keys", &["key", "keychain", "keyring", "fob"]),
    ("id", &["card", "identification", "license", "passport"]),
    ("glasses", &["spectacles", "eyeglasses", "sunglasses", "shades"]),
    ("watch", &["smartwatch", "wristwatch"]),
    ("bottle", &["flask", "tumbler", "thermos"]),
    ("jacket", &["coat", "hoodie", "sweater", "sweatshirt"]),
    ("umbrella", &["parasol"]),
    ("book", &["textbook", "novel", "notebook"]),
    ("ball", &["football", "basketball", "volleyball"]),
    ("necklace", &["chain", "pendant", "jewelry"]),
    ("ring", &["band", "jewelry"]),
];

/// Lower-cases and trims a term.
pub fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Bidirectional lookup over a fixed `term -> related terms` table.
///
/// Stateless; every query scans the table, which stays small.
#[derive(Debug, Clone, Copy)]
pub struct SynonymThesaurus {
    entries: &'static [SynonymEntry],
}

impl Default for SynonymThesaurus {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SynonymThesaurus {
    pub fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    /// Uses a caller-supplied table. Keys and terms must already be
    /// lower-case.
    pub fn with_entries(entries: &'static [SynonymEntry]) -> Self {
        Self { entries }
    }

    /// Terms mapped directly from `term`, empty when it is not a key.
    pub fn related(&self, term: &str) -> &'static [&'static str] {
        let term = normalize(term);
        self.related_normalized(&term)
    }

    fn related_normalized(&self, term: &str) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(key, _)| *key == term)
            .map(|(_, terms)| *terms)
            .unwrap_or(&[])
    }

    /// Equal after normalization, listed in either term's mapped set, or one
    /// a non-empty substring of the other.
    pub fn are_synonyms(&self, a: &str, b: &str) -> bool {
        let a = normalize(a);
        let b = normalize(b);
        if a == b {
            return true;
        }
        if a.is_empty() || b.is_empty() {
            return false;
        }
        self.related_normalized(&a).contains(&b.as_str())
            || self.related_normalized(&b).contains(&a.as_str())
            || a.contains(&b)
            || b.contains(&a)
    }

    /// The word itself, its mapped terms, then every key whose set contains
    /// the word together with that key's set. First occurrence order, no
    /// duplicates.
    pub fn get_synonyms(&self, word: &str) -> Vec<String> {
        let word = normalize(word);
        let mut closure = vec![word.clone()];
        for term in self.related_normalized(&word) {
            push_unique(&mut closure, term);
        }
        for (key, terms) in self.entries {
            if terms.contains(&word.as_str()) {
                push_unique(&mut closure, key);
                for term in *terms {
                    push_unique(&mut closure, term);
                }
            }
        }
        closure
    }
}

fn push_unique(closure: &mut Vec<String>, term: &str) {
    if !closure.iter().any(|t| t == term) {
        closure.push(term.to_string());
    }
}
