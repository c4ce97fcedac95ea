//! In-memory item repository

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::item::{normalize_tags, Item, ItemRepository, NewItem};
use crate::domain::pagination::QueryPlan;
use crate::domain::{DomainError, DomainResult};

/// In-memory storage for development and testing
pub struct InMemoryItemRepository {
    items: DashMap<i32, Item>,
    item_counter: AtomicI32,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            item_counter: AtomicI32::new(1),
        }
    }

    fn snapshot(&self) -> Vec<Item> {
        self.items.iter().map(|entry| entry.value().clone()).collect()
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Item>> {
        Ok(self.items.get(&id).map(|i| i.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Item>> {
        let mut items = self.snapshot();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<Item>> {
        let mut items = self.snapshot();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(items)
    }

    async fn find_page(&self, kind: &str, plan: &QueryPlan) -> DomainResult<Vec<Item>> {
        let mut rows: Vec<Item> = self
            .items
            .iter()
            .filter(|entry| entry.kind().as_str() == kind && plan.admits(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| plan.compare(a, b));
        rows.truncate(usize::try_from(plan.limit()).unwrap_or(usize::MAX));
        Ok(rows)
    }

    async fn count_by_kind(&self, kind: &str) -> DomainResult<u64> {
        let count = self
            .items
            .iter()
            .filter(|entry| entry.kind().as_str() == kind)
            .count();
        Ok(count as u64)
    }

    async fn create(&self, new: NewItem) -> DomainResult<Item> {
        let id = self.item_counter.fetch_add(1, Ordering::SeqCst);
        let mut item = Item::from_new(id, new);
        item.authors = normalize_tags(&item.authors);
        item.genres = normalize_tags(&item.genres);
        self.items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, mut item: Item) -> DomainResult<Item> {
        let mut stored = self
            .items
            .get_mut(&item.id)
            .ok_or_else(|| DomainError::item_not_found(item.id))?;
        item.authors = normalize_tags(&item.authors);
        item.genres = normalize_tags(&item.genres);
        item.created_at = stored.created_at;
        item.updated_at = Utc::now();
        *stored = item.clone();
        Ok(item)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::item_not_found(id))
    }
}
