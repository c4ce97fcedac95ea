//! Catalog service: listings and item lifecycle

use std::sync::Arc;

use tracing::{debug, info};

use super::draft::ItemDraft;
use super::listing::{resolve_kind, type_label, ListingPage};
use crate::domain::item::{Item, ItemKind, ItemRepository};
use crate::domain::pagination::{assemble, PageRequest};
use crate::domain::{DomainError, DomainResult};

pub const DEFAULT_ITEMS_PER_PAGE: u64 = 10;

/// Service for catalog operations
pub struct CatalogService {
    items: Arc<dyn ItemRepository>,
    page_size: u64,
}

impl CatalogService {
    pub fn new(items: Arc<dyn ItemRepository>, page_size: u64) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Resolve a type name for creation. `None` means book.
    pub fn creatable_kind(type_name: Option<&str>) -> DomainResult<ItemKind> {
        match type_name.map(str::trim).filter(|t| !t.is_empty()) {
            None => Ok(ItemKind::Book),
            Some(name) => ItemKind::from_alias(name)
                .ok_or_else(|| DomainError::Validation("unknown type".to_string())),
        }
    }

    /// One page of the listing for `route_type`.
    ///
    /// `request.page_size` is ignored; the service's configured size applies.
    pub async fn list_by_type(
        &self,
        route_type: &str,
        request: PageRequest,
    ) -> DomainResult<ListingPage> {
        let kind = resolve_kind(route_type);
        let request = PageRequest {
            page_size: self.page_size,
            ..request
        };
        let plan = request.plan()?;

        let rows = self.items.find_page(&kind, &plan).await?;
        let page = assemble(&plan, rows);
        let total = self.items.count_by_kind(&kind).await?;

        metrics::counter!("catalog_pages_served_total", "sort" => plan.sort.as_str())
            .increment(1);
        debug!(
            kind = kind.as_str(),
            navigation = ?plan.navigation,
            shown = page.items.len(),
            total,
            "Listing page assembled"
        );

        Ok(ListingPage {
            page,
            type_label: type_label(&kind),
            route_param: route_type.to_string(),
            sort: request.sort,
            order: request.order,
            total,
        })
    }

    /// Newest items, one page worth
    pub async fn recent(&self) -> DomainResult<Vec<Item>> {
        self.items.find_recent(self.page_size).await
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Item>> {
        self.items.find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Item> {
        self.items
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::item_not_found(id))
    }

    pub async fn create(&self, kind: ItemKind, draft: ItemDraft) -> DomainResult<Item> {
        let item = self.items.create(draft.into_new_item(kind)).await?;
        info!(id = item.id, kind = %item.kind(), title = item.title(), "Catalog item added");
        Ok(item)
    }

    /// Apply `draft` over the stored item; absent attributes are kept.
    pub async fn update(&self, id: i32, draft: ItemDraft) -> DomainResult<Item> {
        let mut item = self.get(id).await?;
        draft.apply_to(&mut item);
        self.items.update(item).await
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.items.delete(id).await
    }
}
