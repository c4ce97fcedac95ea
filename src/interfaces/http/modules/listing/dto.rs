//! Listing DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::catalog::ListingPage;
use crate::domain::pagination::{Direction, PageRequest, SortField, SortOrder};
use crate::interfaces::http::modules::items::ItemDto;

/// Listing query parameters. Unrecognized values fall back to the defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    /// `id` (default) or `title`
    pub sort: Option<String>,
    /// `asc` (default) or `desc`
    pub order: Option<String>,
    /// Opaque token from a previous page
    pub cursor: Option<String>,
    /// `next` (default) or `prev`; only used with `cursor`
    pub direction: Option<String>,
}

impl ListingQuery {
    /// Page request for these parameters; the page size is set by the service.
    pub fn to_request(&self) -> PageRequest {
        let sort = SortField::parse_lenient(self.sort.as_deref());
        let order = SortOrder::parse_lenient(self.order.as_deref());
        let base = PageRequest::first(sort, order, 1);

        match self.cursor.as_deref().filter(|c| !c.is_empty()) {
            None => base,
            Some(cursor) => match Direction::parse_lenient(self.direction.as_deref()) {
                Direction::Next => base.next(cursor),
                Direction::Prev => base.prev(cursor),
            },
        }
    }
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct PageLinks {
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One listing page, ready for display
#[derive(Debug, Serialize, ToSchema)]
pub struct ListingResponse {
    pub items: Vec<ItemDto>,
    pub type_label: String,
    pub route_param: String,
    pub sort: String,
    pub order: String,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
    pub links: PageLinks,
}

fn listing_link(
    route_param: &str,
    sort: SortField,
    order: SortOrder,
    cursor: &str,
    direction: Direction,
) -> String {
    // The route segment is percent-encoded; cursor tokens are URL-safe base64.
    format!(
        "/items/type/{}?sort={}&order={}&cursor={}&direction={}",
        urlencoding::encode(route_param),
        sort.as_str(),
        order.as_str(),
        cursor,
        direction.as_str()
    )
}

impl From<ListingPage> for ListingResponse {
    fn from(listing: ListingPage) -> Self {
        let page = listing.page;

        let link = |flag: bool, cursor: &Option<String>, direction: Direction| {
            cursor.as_deref().filter(|_| flag).map(|c| {
                listing_link(&listing.route_param, listing.sort, listing.order, c, direction)
            })
        };
        let links = PageLinks {
            next: link(page.has_next, &page.next_cursor, Direction::Next),
            prev: link(page.has_prev, &page.prev_cursor, Direction::Prev),
        };

        Self {
            items: page.items.into_iter().map(ItemDto::from).collect(),
            type_label: listing.type_label,
            route_param: listing.route_param,
            sort: listing.sort.as_str().to_string(),
            order: listing.order.as_str().to_string(),
            total: listing.total,
            has_next: page.has_next,
            has_prev: page.has_prev,
            next_cursor: page.next_cursor,
            prev_cursor: page.prev_cursor,
            links,
        }
    }
}
