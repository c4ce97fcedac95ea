//! Item aggregate
//!
//! Contains the catalog item entity, its per-type payloads, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{
    BoardGameDetails, BookDetails, CdDetails, DvdDetails, Item, ItemDetails, ItemFields, ItemKind,
    NewItem, normalize_tags,
};
pub use repository::ItemRepository;
