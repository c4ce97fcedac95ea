//! SeaORM implementation of ItemRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::{debug, info};

use super::unit_of_work::{TagIndex, UnitOfWork};
use crate::domain::item::{normalize_tags, Item, ItemDetails, ItemFields, ItemRepository, NewItem};
use crate::domain::pagination::{CursorKey, KeyBound, QueryPlan, SortField, SortOrder};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::item;
use crate::shared::errors::InfraError;

pub struct SeaOrmItemRepository {
    db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach tags to a batch of rows, keeping the row order.
    async fn hydrate(&self, models: Vec<item::Model>) -> DomainResult<Vec<Item>> {
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut tags = TagIndex::load(&self.db, &ids).await.map_err(db_err)?;

        models
            .into_iter()
            .map(|model| {
                let (authors, genres) = tags.take(model.id);
                model_to_domain(model, authors, genres)
            })
            .collect()
    }
}

fn db_err(e: DbErr) -> DomainError {
    InfraError::Database(e).into()
}

fn model_to_domain(
    model: item::Model,
    authors: Vec<String>,
    genres: Vec<String>,
) -> DomainResult<Item> {
    let details: ItemDetails =
        serde_json::from_value(model.details).map_err(InfraError::Serialization)?;

    Ok(Item {
        id: model.id,
        fields: ItemFields {
            title: model.title,
            description: model.description,
            publication_date: model.publication_date,
            external_id: model.external_id,
            external_url: model.external_url,
            image_url: model.image_url,
        },
        details,
        authors,
        genres,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn details_json(details: &ItemDetails) -> DomainResult<serde_json::Value> {
    Ok(serde_json::to_value(details).map_err(InfraError::Serialization)?)
}

/// Strict `(title, id)` or `id` bound as a SQL condition.
///
/// The tuple comparison is expanded to `title > t OR (title = t AND id > i)`
/// so it does not depend on row-value support.
fn bound_condition(bound: &KeyBound) -> Condition {
    let after = matches!(bound, KeyBound::After(_));
    match bound.key() {
        CursorKey::Id { id } => {
            let cmp = if after {
                item::Column::Id.gt(*id)
            } else {
                item::Column::Id.lt(*id)
            };
            Condition::all().add(cmp)
        }
        CursorKey::Title { title, id } => {
            let (title_cmp, id_cmp) = if after {
                (item::Column::Title.gt(title.as_str()), item::Column::Id.gt(*id))
            } else {
                (item::Column::Title.lt(title.as_str()), item::Column::Id.lt(*id))
            };
            Condition::any().add(title_cmp).add(
                Condition::all()
                    .add(item::Column::Title.eq(title.as_str()))
                    .add(id_cmp),
            )
        }
    }
}

fn apply_order(query: Select<item::Entity>, plan: &QueryPlan) -> Select<item::Entity> {
    let order = match plan.scan_order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };
    match plan.sort {
        SortField::Id => query.order_by(item::Column::Id, order),
        SortField::Title => query
            .order_by(item::Column::Title, order.clone())
            .order_by(item::Column::Id, order),
    }
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Item>> {
        let model = item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        match model {
            Some(m) => Ok(self.hydrate(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> DomainResult<Vec<Item>> {
        let models = item::Entity::find()
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.hydrate(models).await
    }

    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<Item>> {
        let models = item::Entity::find()
            .order_by_desc(item::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.hydrate(models).await
    }

    async fn find_page(&self, kind: &str, plan: &QueryPlan) -> DomainResult<Vec<Item>> {
        let mut query = item::Entity::find().filter(item::Column::Kind.eq(kind));
        if let Some(bound) = &plan.bound {
            query = query.filter(bound_condition(bound));
        }

        let models = apply_order(query, plan)
            .limit(plan.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        debug!(
            kind,
            sort = plan.sort.as_str(),
            scan_order = plan.scan_order.as_str(),
            rows = models.len(),
            "Page query executed"
        );
        self.hydrate(models).await
    }

    async fn count_by_kind(&self, kind: &str) -> DomainResult<u64> {
        item::Entity::find()
            .filter(item::Column::Kind.eq(kind))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn create(&self, new: NewItem) -> DomainResult<Item> {
        let authors = normalize_tags(&new.authors);
        let genres = normalize_tags(&new.genres);
        let now = Utc::now();

        let uow = UnitOfWork::begin(&self.db).await.map_err(db_err)?;

        let model = item::ActiveModel {
            id: NotSet,
            kind: Set(new.kind().as_str().to_string()),
            title: Set(new.fields.title.clone()),
            description: Set(new.fields.description.clone()),
            publication_date: Set(new.fields.publication_date),
            external_id: Set(new.fields.external_id.clone()),
            external_url: Set(new.fields.external_url.clone()),
            image_url: Set(new.fields.image_url.clone()),
            details: Set(details_json(&new.details)?),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(uow.connection())
        .await
        .map_err(db_err)?;

        uow.replace_tags(model.id, &authors, &genres)
            .await
            .map_err(db_err)?;
        uow.commit().await.map_err(db_err)?;

        info!(id = model.id, kind = %model.kind, "Item created");
        model_to_domain(model, authors, genres)
    }

    async fn update(&self, updated: Item) -> DomainResult<Item> {
        let authors = normalize_tags(&updated.authors);
        let genres = normalize_tags(&updated.genres);

        let uow = UnitOfWork::begin(&self.db).await.map_err(db_err)?;

        let existing = item::Entity::find_by_id(updated.id)
            .one(uow.connection())
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::item_not_found(updated.id))?;

        let mut active: item::ActiveModel = existing.into();
        active.kind = Set(updated.kind().as_str().to_string());
        active.title = Set(updated.fields.title.clone());
        active.description = Set(updated.fields.description.clone());
        active.publication_date = Set(updated.fields.publication_date);
        active.external_id = Set(updated.fields.external_id.clone());
        active.external_url = Set(updated.fields.external_url.clone());
        active.image_url = Set(updated.fields.image_url.clone());
        active.details = Set(details_json(&updated.details)?);
        active.updated_at = Set(Utc::now());

        let model = active.update(uow.connection()).await.map_err(db_err)?;
        uow.replace_tags(model.id, &authors, &genres)
            .await
            .map_err(db_err)?;
        uow.commit().await.map_err(db_err)?;

        info!(id = model.id, "Item updated");
        model_to_domain(model, authors, genres)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let uow = UnitOfWork::begin(&self.db).await.map_err(db_err)?;
        uow.clear_tags(id).await.map_err(db_err)?;

        let result = item::Entity::delete_by_id(id)
            .exec(uow.connection())
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::item_not_found(id));
        }

        uow.commit().await.map_err(db_err)?;
        info!(id, "Item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{BookDetails, CdDetails};
    use crate::domain::pagination::{assemble, PageRequest};
    use crate::infrastructure::database::migrator::Migrator;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    async fn repo() -> SeaOrmItemRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmItemRepository::new(db)
    }

    fn book(title: &str) -> NewItem {
        NewItem::new(title, ItemDetails::Book(BookDetails::default()))
    }

    async fn seed_books(repo: &SeaOrmItemRepository, titles: &[&str]) -> Vec<i32> {
        let mut ids = Vec::new();
        for title in titles {
            ids.push(repo.create(book(title)).await.unwrap().id);
        }
        ids
    }

    #[tokio::test]
    async fn create_round_trips_fields_details_and_tags() {
        let repo = repo().await;
        let mut new = NewItem::new(
            "Abbey Road",
            ItemDetails::Cd(CdDetails {
                primary_artist: Some("The Beatles".into()),
                track_list: Some(vec!["Come Together".into(), "Something".into()]),
                ..Default::default()
            }),
        );
        new.authors = vec!["Lennon".into(), "McCartney".into(), "Lennon".into()];
        new.genres = vec!["Rock".into()];

        let created = repo.create(new).await.unwrap();
        let loaded = repo.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(loaded.title(), "Abbey Road");
        assert_eq!(loaded.kind().as_str(), "cd");
        assert_eq!(loaded.authors, vec!["Lennon".to_string(), "McCartney".to_string()]);
        assert_eq!(loaded.genres, vec!["Rock".to_string()]);
        assert_eq!(loaded.details, created.details);
    }

    #[tokio::test]
    async fn shared_tags_are_reused_across_items() {
        let repo = repo().await;
        let mut first = book("Dune");
        first.authors = vec!["Frank Herbert".into()];
        let mut second = book("Dune Messiah");
        second.authors = vec!["Frank Herbert".into()];

        repo.create(first).await.unwrap();
        let created = repo.create(second).await.unwrap();
        assert_eq!(created.authors, vec!["Frank Herbert".to_string()]);

        let count = crate::infrastructure::database::entities::author::Entity::find()
            .count(&repo.db)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn find_page_walks_by_id() {
        let repo = repo().await;
        let ids = seed_books(&repo, &["a", "b", "c", "d", "e"]).await;

        let first = PageRequest::first(SortField::Id, SortOrder::Asc, 2);
        let plan = first.plan().unwrap();
        let page = assemble(&plan, repo.find_page("book", &plan).await.unwrap());
        assert_eq!(page.items.iter().map(|i| i.id).collect::<Vec<_>>(), ids[..2]);
        assert!(page.has_next);

        let plan = first.next(page.next_cursor.unwrap()).plan().unwrap();
        let page = assemble(&plan, repo.find_page("book", &plan).await.unwrap());
        assert_eq!(page.items.iter().map(|i| i.id).collect::<Vec<_>>(), ids[2..4]);
        assert!(page.has_prev);

        let plan = first.prev(page.prev_cursor.unwrap()).plan().unwrap();
        let page = assemble(&plan, repo.find_page("book", &plan).await.unwrap());
        assert_eq!(page.items.iter().map(|i| i.id).collect::<Vec<_>>(), ids[..2]);
        assert!(!page.has_prev);
    }

    #[tokio::test]
    async fn find_page_breaks_title_ties_by_id() {
        let repo = repo().await;
        let ids = seed_books(&repo, &["Same", "Same", "Same", "Other"]).await;

        let first = PageRequest::first(SortField::Title, SortOrder::Asc, 2);
        let plan = first.plan().unwrap();
        let page = assemble(&plan, repo.find_page("book", &plan).await.unwrap());
        assert_eq!(page.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![ids[3], ids[0]]);

        let plan = first.next(page.next_cursor.unwrap()).plan().unwrap();
        let page = assemble(&plan, repo.find_page("book", &plan).await.unwrap());
        assert_eq!(page.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![ids[1], ids[2]]);
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn find_page_filters_by_kind() {
        let repo = repo().await;
        seed_books(&repo, &["a"]).await;
        repo.create(NewItem::new("x", ItemDetails::Cd(CdDetails::default())))
            .await
            .unwrap();

        let plan = PageRequest::first(SortField::Id, SortOrder::Desc, 10).plan().unwrap();
        assert_eq!(repo.find_page("cd", &plan).await.unwrap().len(), 1);
        assert!(repo.find_page("vinyl", &plan).await.unwrap().is_empty());
        assert_eq!(repo.count_by_kind("book").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_replaces_tags() {
        let repo = repo().await;
        let mut new = book("Emma");
        new.genres = vec!["Romance".into()];
        let mut item = repo.create(new).await.unwrap();

        item.fields.title = "Emma (Annotated)".into();
        item.genres = vec!["Classic".into()];
        let updated = repo.update(item).await.unwrap();

        assert_eq!(updated.title(), "Emma (Annotated)");
        let loaded = repo.find_by_id(updated.id).await.unwrap().unwrap();
        assert_eq!(loaded.genres, vec!["Classic".to_string()]);
    }

    #[tokio::test]
    async fn delete_missing_item_is_not_found() {
        let repo = repo().await;
        let ids = seed_books(&repo, &["a"]).await;

        repo.delete(ids[0]).await.unwrap();
        assert!(repo.find_by_id(ids[0]).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(ids[0]).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn find_recent_is_newest_first() {
        let repo = repo().await;
        let ids = seed_books(&repo, &["a", "b", "c"]).await;
        let recent = repo.find_recent(2).await.unwrap();
        assert_eq!(recent.iter().map(|i| i.id).collect::<Vec<_>>(), vec![ids[2], ids[1]]);
    }
}
