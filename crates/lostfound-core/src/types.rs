//! Domain types shared by the index, the matcher and the board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub type ItemId = String;

/// Closed set of item categories offered on the board.
///
/// Serialized as its display label (`"Sports Equipment"`); parsing is
/// case-insensitive and ignores surrounding whitespace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Electronics,
    Documents,
    Accessories,
    Keys,
    Clothing,
    Books,
    SportsEquipment,
    PersonalItems,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Documents,
        Category::Accessories,
        Category::Keys,
        Category::Clothing,
        Category::Books,
        Category::SportsEquipment,
        Category::PersonalItems,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Documents => "Documents",
            Category::Accessories => "Accessories",
            Category::Keys => "Keys",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::SportsEquipment => "Sports Equipment",
            Category::PersonalItems => "Personal Items",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownCategory(wanted.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

/// Which side of the board a report belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[serde(alias = "Lost")]
    Lost,
    #[serde(alias = "Found")]
    Found,
}

impl ItemKind {
    /// The kind a report of this kind is matched against.
    pub fn opposite(self) -> Self {
        match self {
            ItemKind::Lost => ItemKind::Found,
            ItemKind::Found => ItemKind::Lost,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Lost => "lost",
            ItemKind::Found => "found",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One reported item.
///
/// Fields are private so that `kind` and `id` cannot change once a record
/// exists; every constructor, including deserialization, runs `validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawItemRecord")]
pub struct ItemRecord {
    id: ItemId,
    name: String,
    category: Category,
    description: String,
    color: String,
    kind: ItemKind,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItemRecord {
    id: ItemId,
    name: String,
    category: Category,
    #[serde(default)]
    description: String,
    #[serde(default)]
    color: String,
    #[serde(alias = "type")]
    kind: ItemKind,
    #[serde(default = "Utc::now", alias = "created_at")]
    created_at: DateTime<Utc>,
}

impl TryFrom<RawItemRecord> for ItemRecord {
    type Error = Error;

    fn try_from(raw: RawItemRecord) -> Result<Self> {
        let record = Self {
            id: raw.id,
            name: raw.name,
            category: raw.category,
            description: raw.description,
            color: raw.color,
            kind: raw.kind,
            created_at: raw.created_at,
        };
        record.validate()?;
        Ok(record)
    }
}

impl ItemRecord {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        category: Category,
        kind: ItemKind,
    ) -> Result<Self> {
        let record = Self {
            id: id.into(),
            name: name.into(),
            category,
            description: String::new(),
            color: String::new(),
            kind,
            created_at: Utc::now(),
        };
        record.validate()?;
        Ok(record)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Id and name must be non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidRecord("item id must not be empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRecord(format!("item '{}' has an empty name", self.id)));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A scored candidate produced by a match query.
///
/// `score` is the combined confidence in `[0, 1]`; the sub-scores are kept
/// so callers can explain why a pair was proposed.
#[derive(Debug, Clone, Serialize)]
pub struct MatchCandidate<'a> {
    pub record: &'a ItemRecord,
    pub score: f64,
    pub name_score: f64,
    pub desc_score: f64,
    pub color_score: f64,
    pub category_match: bool,
}
