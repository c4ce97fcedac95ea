pub mod item;
pub mod pagination;

pub use item::{Item, ItemDetails, ItemKind, ItemRepository, NewItem};
pub use pagination::{Page, PageRequest, QueryPlan};

pub use crate::shared::errors::{DomainError, DomainResult};
