//! Sample data for freshly created databases

use tracing::info;

use super::draft::ItemDraft;
use super::service::CatalogService;
use crate::domain::item::{Item, ItemKind};
use crate::domain::DomainResult;

pub const SAMPLE_AUTHOR: &str = "Sample Author";
pub const SAMPLE_GENRE: &str = "Sample Genre";

fn sample_draft(kind: ItemKind) -> ItemDraft {
    let genres = vec![SAMPLE_GENRE.to_string()];
    match kind {
        ItemKind::Book => ItemDraft {
            title: Some("Example Book".into()),
            description: Some("An example".into()),
            language: Some("en".into()),
            publisher: Some("ExamplePub".into()),
            length: Some(123),
            size: Some("200x130mm".into()),
            authors: vec![SAMPLE_AUTHOR.to_string()],
            genres,
            ..Default::default()
        },
        ItemKind::Cd => ItemDraft {
            title: Some("Example CD".into()),
            description: Some("Sample CD".into()),
            primary_artist: Some("Sample Artist".into()),
            publisher: Some("MusicPub".into()),
            duration_minutes: Some(42),
            track_list: Some(vec!["Track 1".into(), "Track 2".into()]),
            genres,
            ..Default::default()
        },
        ItemKind::Dvd => ItemDraft {
            title: Some("Example DVD".into()),
            description: Some("Sample DVD".into()),
            director: Some("Jane Doe".into()),
            main_actors: Some("Actor A, Actor B".into()),
            genre: Some("Drama".into()),
            duration_minutes: Some(120),
            genres,
            ..Default::default()
        },
        ItemKind::BoardGame => ItemDraft {
            title: Some("Example Game".into()),
            description: Some("Sample board game".into()),
            author_note: Some("Designer".into()),
            min_players: Some(2),
            max_players: Some(4),
            genre: Some("Family".into()),
            genres,
            ..Default::default()
        },
    }
}

/// Create one item of every kind. All share the sample genre; only the book
/// is credited to the sample author.
pub async fn seed_samples(catalog: &CatalogService) -> DomainResult<Vec<Item>> {
    let mut created = Vec::with_capacity(ItemKind::ALL.len());
    for kind in ItemKind::ALL {
        created.push(catalog.create(kind, sample_draft(kind)).await?);
    }
    info!("Seeded {} sample items", created.len());
    Ok(created)
}
