//! Author entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_author::Entity")]
    ItemAuthor,
}

impl Related<super::item_author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemAuthor.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        super::item_author::Relation::Item.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::item_author::Relation::Author.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
