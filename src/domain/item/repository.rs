//! Item repository interface

use async_trait::async_trait;

use super::model::{Item, NewItem};
use crate::domain::pagination::QueryPlan;
use crate::shared::errors::DomainResult;

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Item>>;

    /// Every item, ordered by id
    async fn find_all(&self) -> DomainResult<Vec<Item>>;

    /// Newest items first
    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<Item>>;

    /// Rows of the stored discriminator `kind` admitted by `plan`, in its
    /// scan order, at most `plan.limit()` of them.
    ///
    /// `kind` is a raw discriminator so that unknown types simply match
    /// nothing.
    async fn find_page(&self, kind: &str, plan: &QueryPlan) -> DomainResult<Vec<Item>>;

    async fn count_by_kind(&self, kind: &str) -> DomainResult<u64>;

    /// Insert the item and attach its authors/genres in one transaction.
    async fn create(&self, item: NewItem) -> DomainResult<Item>;

    /// Replace the stored fields, details and tags of `item.id`.
    async fn update(&self, item: Item) -> DomainResult<Item>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
