//! Type listing pages

use crate::domain::item::{Item, ItemKind};
use crate::domain::pagination::{Page, SortField, SortOrder};

/// Route segments a listing understands. Narrower than
/// [`ItemKind::from_alias`]: `game` is only accepted when creating.
const LISTING_ALIASES: [(&str, ItemKind); 5] = [
    ("book", ItemKind::Book),
    ("cd", ItemKind::Cd),
    ("dvd", ItemKind::Dvd),
    ("boardgame", ItemKind::BoardGame),
    ("board_game", ItemKind::BoardGame),
];

/// Discriminator value used to filter a listing.
///
/// Known aliases map to their stored discriminator; anything else is used
/// as-is (lower-cased) and simply matches no rows.
pub fn resolve_kind(route_type: &str) -> String {
    let literal = route_type.trim().to_lowercase();
    LISTING_ALIASES
        .iter()
        .find(|(alias, _)| *alias == literal)
        .map(|(_, kind)| kind.as_str().to_string())
        .unwrap_or(literal)
}

/// Human label for a discriminator: `board_game` → `Board game`.
pub fn type_label(kind: &str) -> String {
    let spaced = kind.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// One page of a type listing with its display metadata
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub page: Page<Item>,
    pub type_label: String,
    /// Type segment as it appeared in the request path
    pub route_param: String,
    pub sort: SortField,
    pub order: SortOrder,
    /// Items of this type overall
    pub total: u64,
}
