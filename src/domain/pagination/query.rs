//! Page requests and the query plan derived from them

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::cursor::{self, CursorKey};
use super::Keyed;
use crate::shared::errors::DomainResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Id,
    Title,
}

impl SortField {
    /// Anything other than `title` sorts by id.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("title") => Self::Title,
            _ => Self::Id,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than `desc` is ascending.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Next,
    Prev,
}

impl Direction {
    /// Anything other than `prev` navigates forward.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("prev") => Self::Prev,
            _ => Self::Next,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
        }
    }
}

/// One listing request. `direction` only matters when `cursor` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub sort: SortField,
    pub order: SortOrder,
    pub cursor: Option<String>,
    pub direction: Direction,
    pub page_size: u64,
}

impl PageRequest {
    pub fn first(sort: SortField, order: SortOrder, page_size: u64) -> Self {
        Self {
            sort,
            order,
            cursor: None,
            direction: Direction::Next,
            page_size: page_size.max(1),
        }
    }

    pub fn next(&self, cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            direction: Direction::Next,
            ..self.clone()
        }
    }

    pub fn prev(&self, cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            direction: Direction::Prev,
            ..self.clone()
        }
    }

    /// Decode the cursor (if any) and build the query plan.
    pub fn plan(&self) -> DomainResult<QueryPlan> {
        let key = match self.cursor.as_deref() {
            Some(token) if !token.is_empty() => Some(cursor::decode(token, self.sort)?),
            _ => None,
        };
        Ok(QueryPlan::build(self, key))
    }
}

/// How the page relates to the cursor it was requested with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    First,
    Next,
    Prev,
}

/// Strict bound on the `(key, id)` tuple, in ascending key terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyBound {
    /// Rows strictly greater than the key
    After(CursorKey),
    /// Rows strictly less than the key
    Before(CursorKey),
}

impl KeyBound {
    pub fn key(&self) -> &CursorKey {
        match self {
            Self::After(key) | Self::Before(key) => key,
        }
    }

    pub fn admits<K: Keyed>(&self, item: &K) -> bool {
        match self {
            Self::After(key) => compare_to_key(item, key) == Ordering::Greater,
            Self::Before(key) => compare_to_key(item, key) == Ordering::Less,
        }
    }
}

/// Everything a storage backend needs to run one bounded page query:
/// filter by `bound`, order by the sort key (then id) in `scan_order`,
/// and return at most `limit()` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub sort: SortField,
    /// Order the page is displayed in
    pub display_order: SortOrder,
    /// Order the query runs in; reversed when walking backwards
    pub scan_order: SortOrder,
    pub bound: Option<KeyBound>,
    pub navigation: Navigation,
    pub page_size: u64,
}

impl QueryPlan {
    pub fn build(request: &PageRequest, key: Option<CursorKey>) -> Self {
        let navigation = match (&key, request.direction) {
            (None, _) => Navigation::First,
            (Some(_), Direction::Next) => Navigation::Next,
            (Some(_), Direction::Prev) => Navigation::Prev,
        };

        let bound = key.map(|key| match (navigation, request.order) {
            (Navigation::Prev, SortOrder::Asc) | (Navigation::Next, SortOrder::Desc) => {
                KeyBound::Before(key)
            }
            _ => KeyBound::After(key),
        });

        let scan_order = if navigation == Navigation::Prev {
            request.order.reverse()
        } else {
            request.order
        };

        Self {
            sort: request.sort,
            display_order: request.order,
            scan_order,
            bound,
            navigation,
            page_size: request.page_size.max(1),
        }
    }

    /// One extra row detects whether more rows exist past the page.
    pub fn limit(&self) -> u64 {
        self.page_size + 1
    }

    pub fn admits<K: Keyed>(&self, item: &K) -> bool {
        self.bound.as_ref().map_or(true, |b| b.admits(item))
    }

    /// Ordering of two rows in scan order
    pub fn compare<K: Keyed>(&self, a: &K, b: &K) -> Ordering {
        let ascending = match self.sort {
            SortField::Id => a.key_id().cmp(&b.key_id()),
            SortField::Title => a
                .key_title()
                .cmp(b.key_title())
                .then_with(|| a.key_id().cmp(&b.key_id())),
        };
        match self.scan_order {
            SortOrder::Asc => ascending,
            SortOrder::Desc => ascending.reverse(),
        }
    }
}

/// Ascending comparison of a row against a cursor key
fn compare_to_key<K: Keyed>(item: &K, key: &CursorKey) -> Ordering {
    match key {
        CursorKey::Id { id } => item.key_id().cmp(id),
        CursorKey::Title { title, id } => item
            .key_title()
            .cmp(title.as_str())
            .then_with(|| item.key_id().cmp(id)),
    }
}
