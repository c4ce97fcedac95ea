//! Mapping submitted attributes onto items
//!
//! Forms and API clients both end up as an [`ItemDraft`]: every attribute
//! optional, already parsed. Creation fills the variant payload for the
//! requested kind; updates only overwrite what the draft carries.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::item::{
    BoardGameDetails, BookDetails, CdDetails, DvdDetails, Item, ItemDetails, ItemFields, ItemKind,
    NewItem,
};
use crate::domain::{DomainError, DomainResult};

pub const DEFAULT_TITLE: &str = "Untitled";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub external_id: Option<String>,
    pub external_url: Option<String>,
    pub image_url: Option<String>,

    // book
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub length: Option<i32>,
    pub size: Option<String>,

    // cd / dvd / board game
    pub primary_artist: Option<String>,
    pub duration_minutes: Option<i32>,
    pub track_list: Option<Vec<String>>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub main_actors: Option<String>,
    pub author_note: Option<String>,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,

    pub authors: Vec<String>,
    pub genres: Vec<String>,
}

impl ItemDraft {
    /// Build a new item of `kind`, ignoring attributes of other kinds.
    pub fn into_new_item(self, kind: ItemKind) -> NewItem {
        let details = match kind {
            ItemKind::Book => ItemDetails::Book(BookDetails {
                language: self.language,
                publisher: self.publisher,
                length: self.length,
                size: self.size,
            }),
            ItemKind::Cd => ItemDetails::Cd(CdDetails {
                primary_artist: self.primary_artist,
                publisher: self.publisher,
                duration_minutes: self.duration_minutes,
                track_list: self.track_list,
                genre: self.genre,
            }),
            ItemKind::Dvd => ItemDetails::Dvd(DvdDetails {
                director: self.director,
                main_actors: self.main_actors,
                genre: self.genre,
                duration_minutes: self.duration_minutes,
            }),
            ItemKind::BoardGame => ItemDetails::BoardGame(BoardGameDetails {
                author_note: self.author_note,
                min_players: self.min_players,
                max_players: self.max_players,
                genre: self.genre,
            }),
        };

        NewItem {
            fields: ItemFields {
                title: self
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                description: self.description,
                publication_date: self.publication_date,
                external_id: self.external_id,
                external_url: self.external_url,
                image_url: self.image_url,
            },
            details,
            authors: self.authors,
            genres: self.genres,
        }
    }

    /// Overwrite the attributes present in the draft; keep the rest.
    /// Authors and genres are always replaced.
    pub fn apply_to(self, item: &mut Item) {
        let fields = &mut item.fields;
        keep(&mut fields.title, self.title.filter(|t| !t.trim().is_empty()));
        keep_opt(&mut fields.description, self.description);
        keep_opt(&mut fields.publication_date, self.publication_date);
        keep_opt(&mut fields.external_id, self.external_id);
        keep_opt(&mut fields.external_url, self.external_url);
        keep_opt(&mut fields.image_url, self.image_url);

        match &mut item.details {
            ItemDetails::Book(d) => {
                keep_opt(&mut d.language, self.language);
                keep_opt(&mut d.publisher, self.publisher);
                keep_opt(&mut d.length, self.length);
                keep_opt(&mut d.size, self.size);
            }
            ItemDetails::Cd(d) => {
                keep_opt(&mut d.primary_artist, self.primary_artist);
                keep_opt(&mut d.publisher, self.publisher);
                keep_opt(&mut d.duration_minutes, self.duration_minutes);
                keep_opt(&mut d.track_list, self.track_list);
                keep_opt(&mut d.genre, self.genre);
            }
            ItemDetails::Dvd(d) => {
                keep_opt(&mut d.director, self.director);
                keep_opt(&mut d.main_actors, self.main_actors);
                keep_opt(&mut d.genre, self.genre);
                keep_opt(&mut d.duration_minutes, self.duration_minutes);
            }
            ItemDetails::BoardGame(d) => {
                keep_opt(&mut d.author_note, self.author_note);
                keep_opt(&mut d.min_players, self.min_players);
                keep_opt(&mut d.max_players, self.max_players);
                keep_opt(&mut d.genre, self.genre);
            }
        }

        item.authors = self.authors;
        item.genres = self.genres;
    }
}

fn keep<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

fn keep_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

/// Urlencoded item form. Every field arrives as text; blank means absent.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ItemForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<String>,
    pub external_id: Option<String>,
    pub external_url: Option<String>,
    pub image_url: Option<String>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub length: Option<String>,
    pub size: Option<String>,
    #[serde(alias = "artist")]
    pub primary_artist: Option<String>,
    #[serde(alias = "duration")]
    pub duration_minutes: Option<String>,
    /// Comma-separated
    pub track_list: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub main_actors: Option<String>,
    #[serde(alias = "author")]
    pub author_note: Option<String>,
    pub min_players: Option<String>,
    pub max_players: Option<String>,
    /// Comma-separated
    pub authors: Option<String>,
    /// Comma-separated
    pub genres: Option<String>,
}

impl TryFrom<ItemForm> for ItemDraft {
    type Error = DomainError;

    fn try_from(form: ItemForm) -> DomainResult<Self> {
        Ok(Self {
            title: text(form.title),
            description: text(form.description),
            publication_date: date("publication_date", form.publication_date)?,
            external_id: text(form.external_id),
            external_url: text(form.external_url),
            image_url: text(form.image_url),
            language: text(form.language),
            publisher: text(form.publisher),
            length: integer("length", form.length)?,
            size: text(form.size),
            primary_artist: text(form.primary_artist),
            duration_minutes: integer("duration", form.duration_minutes)?,
            track_list: text(form.track_list).map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            }),
            genre: text(form.genre),
            director: text(form.director),
            main_actors: text(form.main_actors),
            author_note: text(form.author_note),
            min_players: integer("min_players", form.min_players)?,
            max_players: integer("max_players", form.max_players)?,
            authors: split_tags(form.authors.as_deref().unwrap_or_default()),
            genres: split_tags(form.genres.as_deref().unwrap_or_default()),
        })
    }
}

fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn integer(field: &str, value: Option<String>) -> DomainResult<Option<i32>> {
    text(value)
        .map(|v| {
            v.parse::<i32>()
                .map_err(|_| DomainError::Validation(format!("{} must be a whole number", field)))
        })
        .transpose()
}

fn date(field: &str, value: Option<String>) -> DomainResult<Option<NaiveDate>> {
    text(value)
        .map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                .map_err(|_| DomainError::Validation(format!("{} must be YYYY-MM-DD", field)))
        })
        .transpose()
}

/// Comma-separated names, trimmed, title-cased and de-duplicated.
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(title_case)
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Upper-case the first letter of every word, lower-case the rest.
/// Any non-letter starts a new word ("o'brien" → "O'Brien").
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("ursula k. le guin"), "Ursula K. Le Guin");
        assert_eq!(title_case("SCIENCE fiction"), "Science Fiction");
        assert_eq!(title_case("o'brien"), "O'Brien");
    }

    #[test]
    fn split_tags_normalizes_and_dedups() {
        assert_eq!(
            split_tags(" sci-fi , Fantasy,,fantasy , "),
            vec!["Fantasy".to_string(), "Sci-Fi".to_string()]
        );
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn form_parses_numbers_dates_and_lists() {
        let form = ItemForm {
            title: Some("Abbey Road".into()),
            primary_artist: Some("The Beatles".into()),
            duration_minutes: Some("47".into()),
            track_list: Some("Come Together, Something ,".into()),
            publication_date: Some("1969-09-26".into()),
            authors: Some("lennon, mccartney".into()),
            description: Some("   ".into()),
            ..Default::default()
        };
        let draft = ItemDraft::try_from(form).unwrap();
        assert_eq!(draft.duration_minutes, Some(47));
        assert_eq!(
            draft.track_list,
            Some(vec!["Come Together".to_string(), "Something".to_string()])
        );
        assert_eq!(draft.publication_date, NaiveDate::from_ymd_opt(1969, 9, 26));
        assert_eq!(draft.authors, vec!["Lennon".to_string(), "Mccartney".to_string()]);
        assert_eq!(draft.description, None);
    }

    #[test]
    fn form_rejects_bad_numbers() {
        let form = ItemForm {
            length: Some("many".into()),
            ..Default::default()
        };
        assert!(matches!(
            ItemDraft::try_from(form),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn new_item_defaults_title_and_picks_kind_fields() {
        let draft = ItemDraft {
            title: Some("  ".into()),
            director: Some("Kubrick".into()),
            language: Some("en".into()),
            ..Default::default()
        };
        let item = draft.into_new_item(ItemKind::Dvd);
        assert_eq!(item.fields.title, DEFAULT_TITLE);
        match item.details {
            ItemDetails::Dvd(d) => assert_eq!(d.director.as_deref(), Some("Kubrick")),
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn apply_keeps_absent_fields_and_replaces_tags() {
        let mut new = NewItem::new(
            "Dune",
            ItemDetails::Book(BookDetails {
                publisher: Some("Chilton".into()),
                length: Some(412),
                ..Default::default()
            }),
        );
        new.authors = vec!["Frank Herbert".into()];
        let mut item = Item::from_new(1, new);

        ItemDraft {
            length: Some(896),
            genres: vec!["Sci-Fi".into()],
            ..Default::default()
        }
        .apply_to(&mut item);

        assert_eq!(item.title(), "Dune");
        match &item.details {
            ItemDetails::Book(d) => {
                assert_eq!(d.publisher.as_deref(), Some("Chilton"));
                assert_eq!(d.length, Some(896));
            }
            other => panic!("unexpected details {:?}", other),
        }
        assert!(item.authors.is_empty());
        assert_eq!(item.genres, vec!["Sci-Fi".to_string()]);
    }
}
