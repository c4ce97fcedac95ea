//! Turning raw query rows into a display page

use serde::Serialize;

use super::cursor::{encode, CursorKey};
use super::query::{Navigation, QueryPlan};
use super::Keyed;

/// One page of rows in display order, plus what is needed to move on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_next: false,
            has_prev: false,
            next_cursor: None,
            prev_cursor: None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_next: self.has_next,
            has_prev: self.has_prev,
            next_cursor: self.next_cursor,
            prev_cursor: self.prev_cursor,
        }
    }
}

/// Build the page from the rows returned for `plan`.
///
/// `raw` must be in scan order and hold at most `plan.limit()` rows.
pub fn assemble<T: Keyed>(plan: &QueryPlan, mut raw: Vec<T>) -> Page<T> {
    let page_size = usize::try_from(plan.page_size).unwrap_or(usize::MAX);
    let has_more = raw.len() > page_size;

    raw.truncate(page_size);
    if plan.navigation == Navigation::Prev {
        raw.reverse();
    }

    let (Some(first), Some(last)) = (raw.first(), raw.last()) else {
        return Page::empty();
    };

    let prev_cursor = encode(&CursorKey::of(plan.sort, first));
    let next_cursor = encode(&CursorKey::of(plan.sort, last));

    // A cursor was followed to get here, so the side we came from exists.
    let (has_next, has_prev) = match plan.navigation {
        Navigation::First => (has_more, false),
        Navigation::Next => (has_more, true),
        Navigation::Prev => (true, has_more),
    };

    Page {
        items: raw,
        has_next,
        has_prev,
        next_cursor: Some(next_cursor),
        prev_cursor: Some(prev_cursor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::cursor::decode;
    use crate::domain::pagination::query::{PageRequest, SortField, SortOrder};

    #[derive(Debug, Clone, PartialEq)]
    struct Row(i64, String);

    impl Keyed for Row {
        fn key_id(&self) -> i64 {
            self.0
        }
        fn key_title(&self) -> &str {
            &self.1
        }
    }

    fn rows(ids: impl IntoIterator<Item = i64>) -> Vec<Row> {
        ids.into_iter().map(|id| Row(id, format!("Title {id:02}"))).collect()
    }

    fn ids(page: &Page<Row>) -> Vec<i64> {
        page.items.iter().map(|r| r.0).collect()
    }

    #[test]
    fn first_page_with_extra_row_has_next() {
        let plan = PageRequest::first(SortField::Id, SortOrder::Asc, 3).plan().unwrap();
        let page = assemble(&plan, rows(1..=4));
        assert_eq!(ids(&page), vec![1, 2, 3]);
        assert!(page.has_next);
        assert!(!page.has_prev);
        let next = decode(page.next_cursor.as_deref().unwrap(), SortField::Id).unwrap();
        assert_eq!(next, CursorKey::Id { id: 3 });
        let prev = decode(page.prev_cursor.as_deref().unwrap(), SortField::Id).unwrap();
        assert_eq!(prev, CursorKey::Id { id: 1 });
    }

    #[test]
    fn exact_page_has_no_next() {
        let plan = PageRequest::first(SortField::Id, SortOrder::Asc, 3).plan().unwrap();
        let page = assemble(&plan, rows(1..=3));
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn prev_page_is_reversed_into_display_order() {
        let first = PageRequest::first(SortField::Id, SortOrder::Asc, 3);
        let token = crate::domain::pagination::cursor::encode(&CursorKey::Id { id: 7 });
        let plan = first.prev(token).plan().unwrap();
        // Scan ran descending from the cursor: 6, 5, 4, 3
        let page = assemble(&plan, rows([6, 5, 4, 3]));
        assert_eq!(ids(&page), vec![4, 5, 6]);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn prev_page_at_start_has_no_prev() {
        let first = PageRequest::first(SortField::Id, SortOrder::Asc, 3);
        let token = crate::domain::pagination::cursor::encode(&CursorKey::Id { id: 4 });
        let plan = first.prev(token).plan().unwrap();
        let page = assemble(&plan, rows([3, 2, 1]));
        assert_eq!(ids(&page), vec![1, 2, 3]);
        assert!(!page.has_prev);
        assert!(page.has_next);
    }

    #[test]
    fn empty_rows_after_cursor_yield_empty_page() {
        let first = PageRequest::first(SortField::Title, SortOrder::Asc, 3);
        let token = crate::domain::pagination::cursor::encode(&CursorKey::Title {
            title: "Zzz".into(),
            id: 99,
        });
        let plan = first.next(token).plan().unwrap();
        let page = assemble(&plan, Vec::<Row>::new());
        assert_eq!(page, Page::empty());
    }

    #[test]
    fn title_cursors_carry_title_and_id() {
        let plan = PageRequest::first(SortField::Title, SortOrder::Asc, 2).plan().unwrap();
        let page = assemble(&plan, rows([1, 2]));
        let next = decode(page.next_cursor.as_deref().unwrap(), SortField::Title).unwrap();
        assert_eq!(
            next,
            CursorKey::Title {
                title: "Title 02".into(),
                id: 2
            }
        );
    }

    #[test]
    fn map_keeps_navigation_state() {
        let plan = PageRequest::first(SortField::Id, SortOrder::Asc, 1).plan().unwrap();
        let page = assemble(&plan, rows([1, 2])).map(|r| r.0);
        assert_eq!(page.items, vec![1]);
        assert!(page.has_next);
        assert!(page.next_cursor.is_some());
    }
}
