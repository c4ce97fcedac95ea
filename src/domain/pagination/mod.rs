//! Cursor-based bidirectional pagination
//!
//! Flow for one listing request:
//! `PageRequest` → [`cursor::decode`] → [`QueryPlan`] → storage query
//! (`limit()` rows in `scan_order`) → [`page::assemble`] → [`Page`].
//!
//! Everything here is pure; storage backends only translate a [`QueryPlan`]
//! into their own filter/order/limit.

pub mod cursor;
pub mod page;
pub mod query;

pub use cursor::{CursorError, CursorKey};
pub use page::{assemble, Page};
pub use query::{Direction, KeyBound, Navigation, PageRequest, QueryPlan, SortField, SortOrder};

use crate::domain::item::Item;

/// Row that can be positioned in a listing by `(title, id)` or `id`.
pub trait Keyed {
    fn key_id(&self) -> i64;
    fn key_title(&self) -> &str;
}

impl Keyed for Item {
    fn key_id(&self) -> i64 {
        i64::from(self.id)
    }

    fn key_title(&self) -> &str {
        self.title()
    }
}
