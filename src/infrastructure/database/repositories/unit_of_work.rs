//! Transaction-scoped writes for one item and its tags
//!
//! Every mutation of an item (row, authors, genres) goes through a single
//! [`UnitOfWork`] and is either committed as a whole or rolled back when the
//! unit is dropped.

use std::collections::HashMap;

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::infrastructure::database::entities::{author, genre, item_author, item_genre};

pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self {
            txn: db.begin().await?,
        })
    }

    pub fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    /// Id of the author called `name`, inserting it if it does not exist.
    pub async fn author_id(&self, name: &str) -> Result<i32, DbErr> {
        author::Entity::insert(author::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        })
        .on_conflict(OnConflict::column(author::Column::Name).do_nothing().to_owned())
        .exec_without_returning(&self.txn)
        .await?;

        author::Entity::find()
            .filter(author::Column::Name.eq(name))
            .one(&self.txn)
            .await?
            .map(|a| a.id)
            .ok_or_else(|| DbErr::RecordNotFound(format!("author '{}'", name)))
    }

    /// Id of the genre called `name`, inserting it if it does not exist.
    pub async fn genre_id(&self, name: &str) -> Result<i32, DbErr> {
        genre::Entity::insert(genre::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        })
        .on_conflict(OnConflict::column(genre::Column::Name).do_nothing().to_owned())
        .exec_without_returning(&self.txn)
        .await?;

        genre::Entity::find()
            .filter(genre::Column::Name.eq(name))
            .one(&self.txn)
            .await?
            .map(|g| g.id)
            .ok_or_else(|| DbErr::RecordNotFound(format!("genre '{}'", name)))
    }

    /// Make `authors` and `genres` the complete tag set of `item_id`.
    ///
    /// Names are expected to be normalized (trimmed, unique).
    pub async fn replace_tags(
        &self,
        item_id: i32,
        authors: &[String],
        genres: &[String],
    ) -> Result<(), DbErr> {
        self.clear_tags(item_id).await?;

        for name in authors {
            let author_id = self.author_id(name).await?;
            item_author::Entity::insert(item_author::ActiveModel {
                item_id: Set(item_id),
                author_id: Set(author_id),
            })
            .exec_without_returning(&self.txn)
            .await?;
        }

        for name in genres {
            let genre_id = self.genre_id(name).await?;
            item_genre::Entity::insert(item_genre::ActiveModel {
                item_id: Set(item_id),
                genre_id: Set(genre_id),
            })
            .exec_without_returning(&self.txn)
            .await?;
        }

        debug!(
            item_id,
            authors = authors.len(),
            genres = genres.len(),
            "Item tags replaced"
        );
        Ok(())
    }

    pub async fn clear_tags(&self, item_id: i32) -> Result<(), DbErr> {
        item_author::Entity::delete_many()
            .filter(item_author::Column::ItemId.eq(item_id))
            .exec(&self.txn)
            .await?;
        item_genre::Entity::delete_many()
            .filter(item_genre::Column::ItemId.eq(item_id))
            .exec(&self.txn)
            .await?;
        Ok(())
    }
}

/// Author and genre names per item id, each list sorted by name
#[derive(Debug, Default)]
pub struct TagIndex {
    pub authors: HashMap<i32, Vec<String>>,
    pub genres: HashMap<i32, Vec<String>>,
}

impl TagIndex {
    /// Load the tags of all `item_ids` with one query per tag kind.
    pub async fn load<C: ConnectionTrait>(conn: &C, item_ids: &[i32]) -> Result<Self, DbErr> {
        let mut index = Self::default();
        if item_ids.is_empty() {
            return Ok(index);
        }

        let authors = item_author::Entity::find()
            .filter(item_author::Column::ItemId.is_in(item_ids.iter().copied()))
            .find_also_related(author::Entity)
            .order_by_asc(author::Column::Name)
            .all(conn)
            .await?;
        for (link, author) in authors {
            if let Some(author) = author {
                index.authors.entry(link.item_id).or_default().push(author.name);
            }
        }

        let genres = item_genre::Entity::find()
            .filter(item_genre::Column::ItemId.is_in(item_ids.iter().copied()))
            .find_also_related(genre::Entity)
            .order_by_asc(genre::Column::Name)
            .all(conn)
            .await?;
        for (link, genre) in genres {
            if let Some(genre) = genre {
                index.genres.entry(link.item_id).or_default().push(genre.name);
            }
        }

        Ok(index)
    }

    pub fn take(&mut self, item_id: i32) -> (Vec<String>, Vec<String>) {
        (
            self.authors.remove(&item_id).unwrap_or_default(),
            self.genres.remove(&item_id).unwrap_or_default(),
        )
    }
}
