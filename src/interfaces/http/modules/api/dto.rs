//! JSON API DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::catalog::ItemDraft;
use crate::domain::item::Item;

/// Create an item. Attributes that do not belong to `type` are ignored.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    /// `book` (default), `cd`, `dvd`, `board_game`, `boardgame` or `game`
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    /// Defaults to "Untitled"
    #[validate(length(max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    #[validate(length(max = 128))]
    pub external_id: Option<String>,
    #[validate(url)]
    pub external_url: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,

    pub language: Option<String>,
    pub publisher: Option<String>,
    #[validate(range(min = 0))]
    pub length: Option<i32>,
    pub size: Option<String>,

    #[serde(alias = "artist")]
    pub primary_artist: Option<String>,
    #[validate(range(min = 0))]
    pub duration_minutes: Option<i32>,
    pub track_list: Option<Vec<String>>,
    pub genre: Option<String>,

    pub director: Option<String>,
    pub main_actors: Option<String>,

    #[serde(alias = "author")]
    pub author_note: Option<String>,
    #[validate(range(min = 1))]
    pub min_players: Option<i32>,
    #[validate(range(min = 1))]
    pub max_players: Option<i32>,

    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl From<CreateItemRequest> for ItemDraft {
    fn from(req: CreateItemRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            publication_date: req.publication_date,
            external_id: req.external_id,
            external_url: req.external_url,
            image_url: req.image_url,
            language: req.language,
            publisher: req.publisher,
            length: req.length,
            size: req.size,
            primary_artist: req.primary_artist,
            duration_minutes: req.duration_minutes,
            track_list: req.track_list,
            genre: req.genre,
            director: req.director,
            main_actors: req.main_actors,
            author_note: req.author_note,
            min_players: req.min_players,
            max_players: req.max_players,
            authors: req.authors,
            genres: req.genres,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedItemResponse {
    pub id: i32,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub authors: Vec<String>,
    pub genres: Vec<String>,
}

impl From<Item> for CreatedItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            item_type: item.kind().as_str().to_string(),
            title: item.fields.title,
            authors: item.authors,
            genres: item.genres,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_accepted() {
        let req: CreateItemRequest = serde_json::from_value(serde_json::json!({
            "type": "game",
            "author": "Klaus Teuber",
            "min_players": 3,
        }))
        .unwrap();
        assert_eq!(req.item_type.as_deref(), Some("game"));
        assert_eq!(req.author_note.as_deref(), Some("Klaus Teuber"));
        assert!(req.authors.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn invalid_values_fail_validation() {
        let req = CreateItemRequest {
            external_url: Some("not a url".into()),
            min_players: Some(0),
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("external_url"));
        assert!(fields.contains_key("min_players"));
    }
}
