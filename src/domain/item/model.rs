//! Catalog item domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Stored discriminator of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Book,
    Cd,
    Dvd,
    BoardGame,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [Self::Book, Self::Cd, Self::Dvd, Self::BoardGame];

    /// Value stored in the `kind` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Cd => "cd",
            Self::Dvd => "dvd",
            Self::BoardGame => "board_game",
        }
    }

    /// Resolve a user-facing type name, accepting the aliases used in routes
    /// and API payloads. Case-insensitive.
    pub fn from_alias(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "book" => Some(Self::Book),
            "cd" => Some(Self::Cd),
            "dvd" => Some(Self::Dvd),
            "board_game" | "boardgame" | "game" => Some(Self::BoardGame),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    pub language: Option<String>,
    pub publisher: Option<String>,
    /// Number of pages
    pub length: Option<i32>,
    /// Dimensions or file size
    pub size: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CdDetails {
    pub primary_artist: Option<String>,
    pub publisher: Option<String>,
    pub duration_minutes: Option<i32>,
    pub track_list: Option<Vec<String>>,
    pub genre: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DvdDetails {
    pub director: Option<String>,
    pub main_actors: Option<String>,
    pub genre: Option<String>,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardGameDetails {
    pub author_note: Option<String>,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub genre: Option<String>,
}

/// Type-specific attributes, keyed by the discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemDetails {
    Book(BookDetails),
    Cd(CdDetails),
    Dvd(DvdDetails),
    BoardGame(BoardGameDetails),
}

impl ItemDetails {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Book(_) => ItemKind::Book,
            Self::Cd(_) => ItemKind::Cd,
            Self::Dvd(_) => ItemKind::Dvd,
            Self::BoardGame(_) => ItemKind::BoardGame,
        }
    }
}

/// Attributes shared by every media type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFields {
    pub title: String,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    /// ISBN, barcode, etc.
    pub external_id: Option<String>,
    pub external_url: Option<String>,
    pub image_url: Option<String>,
}

/// Trimmed, non-empty, unique tag names in sorted order.
///
/// Storage backends return tags in this shape so that results do not
/// depend on insertion order.
pub fn normalize_tags<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = names
        .into_iter()
        .map(|n| n.as_ref().trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// A catalog item not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub fields: ItemFields,
    pub details: ItemDetails,
    pub authors: Vec<String>,
    pub genres: Vec<String>,
}

impl NewItem {
    pub fn new(title: impl Into<String>, details: ItemDetails) -> Self {
        Self {
            fields: ItemFields {
                title: title.into(),
                ..Default::default()
            },
            details,
            authors: Vec::new(),
            genres: Vec::new(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }
}

/// A persisted catalog item
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i32,
    pub fields: ItemFields,
    pub details: ItemDetails,
    pub authors: Vec<String>,
    pub genres: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn from_new(id: i32, new: NewItem) -> Self {
        let now = Utc::now();
        Self {
            id,
            fields: new.fields,
            details: new.details,
            authors: new.authors,
            genres: new.genres,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    pub fn title(&self) -> &str {
        &self.fields.title
    }
}
