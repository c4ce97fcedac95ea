//! Item DTOs shared by the page, listing and JSON API routes

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::catalog::type_label;
use crate::domain::item::{Item, ItemDetails, ItemKind};

/// Item with its common attributes, tag names and type-specific fields.
///
/// The type-specific fields are flattened next to the common ones and
/// `type` carries the stored discriminator.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub external_id: Option<String>,
    pub external_url: Option<String>,
    pub image_url: Option<String>,
    pub authors: Vec<String>,
    pub genres: Vec<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: ItemDetails,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.fields.title,
            description: item.fields.description,
            publication_date: item.fields.publication_date,
            external_id: item.fields.external_id,
            external_url: item.fields.external_url,
            image_url: item.fields.image_url,
            authors: item.authors,
            genres: item.genres,
            details: item.details,
        }
    }
}

/// A creatable/listable item type and where its pages live
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TypeLink {
    #[serde(rename = "type")]
    pub item_type: String,
    pub label: String,
    pub list_url: String,
    pub new_url: String,
}

impl From<ItemKind> for TypeLink {
    fn from(kind: ItemKind) -> Self {
        Self {
            item_type: kind.as_str().to_string(),
            label: type_label(kind.as_str()),
            list_url: format!("/items/type/{}", kind.as_str()),
            new_url: format!("/items/new/{}", kind.as_str()),
        }
    }
}

pub fn all_type_links() -> Vec<TypeLink> {
    ItemKind::ALL.into_iter().map(TypeLink::from).collect()
}

/// Landing page: newest items and the available types
#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub recent: Vec<ItemDto>,
    pub types: Vec<TypeLink>,
}

/// Types that can be created, with their form routes
#[derive(Debug, Serialize, ToSchema)]
pub struct NewItemChoices {
    pub types: Vec<TypeLink>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{CdDetails, NewItem};

    #[test]
    fn details_are_flattened_with_type_tag() {
        let mut new = NewItem::new(
            "Kind of Blue",
            ItemDetails::Cd(CdDetails {
                primary_artist: Some("Miles Davis".into()),
                track_list: Some(vec!["So What".into()]),
                ..Default::default()
            }),
        );
        new.genres = vec!["Jazz".into()];
        let json = serde_json::to_value(ItemDto::from(Item::from_new(4, new))).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["type"], "cd");
        assert_eq!(json["primary_artist"], "Miles Davis");
        assert_eq!(json["track_list"][0], "So What");
        assert_eq!(json["genres"][0], "Jazz");
        assert!(json["duration_minutes"].is_null());
    }

    #[test]
    fn type_links_use_stored_discriminator() {
        let link = TypeLink::from(ItemKind::BoardGame);
        assert_eq!(link.item_type, "board_game");
        assert_eq!(link.label, "Board game");
        assert_eq!(link.list_url, "/items/type/board_game");
        assert_eq!(link.new_url, "/items/new/board_game");
    }
}
