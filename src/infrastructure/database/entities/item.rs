//! Item entity for database
//!
//! One row per catalog item. `kind` is the discriminator used for listing
//! filters; `details` holds the type-specific payload as tagged JSON.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Stored discriminator (`book`, `cd`, `dvd`, `board_game`)
    pub kind: String,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub publication_date: Option<Date>,

    /// ISBN, barcode, etc.
    pub external_id: Option<String>,

    pub external_url: Option<String>,

    pub image_url: Option<String>,

    /// Type-specific attributes
    pub details: Json,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_author::Entity")]
    ItemAuthor,

    #[sea_orm(has_many = "super::item_genre::Entity")]
    ItemGenre,
}

impl Related<super::item_author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemAuthor.def()
    }
}

impl Related<super::item_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemGenre.def()
    }
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        super::item_author::Relation::Author.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::item_author::Relation::Item.def().rev())
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::item_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::item_genre::Relation::Item.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
