//! Catalog use cases
//!
//! - [`CatalogService`]: listings, item lifecycle
//! - [`ItemDraft`] / [`ItemForm`]: submitted attributes and their mapping onto items
//! - [`ListingPage`]: one page of a type listing plus display metadata
//! - [`seed_samples`]: demo content for a fresh database

pub mod draft;
pub mod listing;
pub mod seed;
pub mod service;

pub use draft::{split_tags, title_case, ItemDraft, ItemForm, DEFAULT_TITLE};
pub use listing::{resolve_kind, type_label, ListingPage};
pub use seed::{seed_samples, SAMPLE_AUTHOR, SAMPLE_GENRE};
pub use service::{CatalogService, DEFAULT_ITEMS_PER_PAGE};
