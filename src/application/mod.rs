pub mod catalog;

pub use catalog::{CatalogService, ItemDraft, ItemForm, ListingPage};
