//! Opaque cursor tokens
//!
//! A cursor is the key of the first or last row of a rendered page, written
//! as compact JSON (`{"id":7}` or `{"title":"Dune","id":7}`) and then
//! URL-safe base64 encoded. Tokens are emitted without padding so they can be
//! dropped into a query string verbatim; padded tokens are accepted too.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde_json::Value;
use thiserror::Error;

use super::{Keyed, SortField};
use crate::shared::errors::DomainError;

const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded position in a `(sort, order)` ordering. `id` is always the tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorKey {
    Id { id: i64 },
    Title { title: String, id: i64 },
}

impl CursorKey {
    /// Key of `item` under the given sort field
    pub fn of<K: Keyed>(sort: SortField, item: &K) -> Self {
        match sort {
            SortField::Id => Self::Id { id: item.key_id() },
            SortField::Title => Self::Title {
                title: item.key_title().to_string(),
                id: item.key_id(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("Invalid cursor token")]
    Malformed,
    #[error("Cursor missing id")]
    MissingId,
    #[error("Cursor missing title/id")]
    MissingTitle,
    #[error("Invalid id in cursor")]
    InvalidId,
}

impl From<CursorError> for DomainError {
    fn from(e: CursorError) -> Self {
        DomainError::InvalidCursor(e.to_string())
    }
}

/// Serialize a key into an opaque token.
pub fn encode(key: &CursorKey) -> String {
    // Written by hand so `title` always precedes `id`.
    let json = match key {
        CursorKey::Id { id } => format!(r#"{{"id":{id}}}"#),
        CursorKey::Title { title, id } => {
            format!(r#"{{"title":{},"id":{id}}}"#, Value::from(title.as_str()))
        }
    };
    TOKEN_ENGINE.encode(json)
}

/// Decode a token for the active sort mode.
///
/// `id` is required in every mode; `title` is additionally required when
/// sorting by title. A token minted under another sort mode is not detected
/// here as long as it carries the required keys.
pub fn decode(token: &str, sort: SortField) -> Result<CursorKey, CursorError> {
    let bytes = TOKEN_ENGINE
        .decode(token.trim())
        .map_err(|_| CursorError::Malformed)?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|_| CursorError::Malformed)?;
    let Value::Object(record) = value else {
        return Err(match sort {
            SortField::Id => CursorError::MissingId,
            SortField::Title => CursorError::MissingTitle,
        });
    };

    match sort {
        SortField::Id => {
            let raw_id = record.get("id").ok_or(CursorError::MissingId)?;
            Ok(CursorKey::Id {
                id: parse_id(raw_id)?,
            })
        }
        SortField::Title => {
            let (Some(raw_title), Some(raw_id)) = (record.get("title"), record.get("id")) else {
                return Err(CursorError::MissingTitle);
            };
            let title = raw_title.as_str().ok_or(CursorError::MissingTitle)?;
            Ok(CursorKey::Title {
                title: title.to_string(),
                id: parse_id(raw_id)?,
            })
        }
    }
}

/// Integers and integer strings are accepted; anything else is rejected.
fn parse_id(value: &Value) -> Result<i64, CursorError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or(CursorError::InvalidId),
        Value::String(s) => s.trim().parse().map_err(|_| CursorError::InvalidId),
        _ => Err(CursorError::InvalidId),
    }
}
