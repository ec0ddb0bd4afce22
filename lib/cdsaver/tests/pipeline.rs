//! End-to-end runs of the scan → review → commit flow against an in-memory catalog.

use async_trait::async_trait;
use cdsaver::{CatalogProvider, Credential, Error, Result, ResultSet, Scanner};
use shared::catalog::Album;
use shared::ocr::{ExtractionMode, RawTextBlock};
use std::collections::HashMap;
use std::sync::Mutex;

/// Catalog keyed by exact query string. Records the credential it was called with.
#[derive(Default)]
struct MemoryCatalog {
    albums: HashMap<String, Vec<Album>>,
    unavailable: Vec<String>,
    reject_adds: Vec<String>,
    searched: Mutex<Vec<String>>,
    tokens_seen: Mutex<Vec<String>>,
}

impl MemoryCatalog {
    fn with(mut self, query: &str, albums: &[(&str, &str, &str)]) -> Self {
        let albums = albums
            .iter()
            .map(|(id, title, artist)| Album {
                id: id.to_string(),
                title: title.to_string(),
                artist: Some(artist.to_string()),
                cover_image_url: Some(format!("https://covers.example/{id}.jpg")),
            })
            .collect();
        self.albums.insert(query.to_string(), albums);
        self
    }
}

#[async_trait]
impl CatalogProvider for MemoryCatalog {
    fn id(&self) -> &'static str {
        "memory"
    }

    fn name(&self) -> &'static str {
        "Memory"
    }

    async fn search_albums(
        &self,
        query: &str,
        credential: &Credential,
        _limit: Option<usize>,
    ) -> Result<Vec<Album>> {
        self.searched.lock().unwrap().push(query.to_string());
        self.tokens_seen
            .lock()
            .unwrap()
            .push(credential.access_token.clone());
        if self.unavailable.iter().any(|q| q == query) {
            return Err(Error::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        Ok(self.albums.get(query).cloned().unwrap_or_default())
    }

    async fn add_to_library(&self, album: &Album, _credential: &Credential) -> Result<()> {
        if self.reject_adds.contains(&album.id) {
            return Err(Error::Api {
                status: 429,
                message: "slow down".to_string(),
            });
        }
        Ok(())
    }
}

fn spine_photo() -> Vec<RawTextBlock> {
    vec![
        RawTextBlock::new("PINK FLOYD", 10.0),
        RawTextBlock::new("The Wall", 12.0),
        RawTextBlock::new("7 2435-6", 14.0),
        RawTextBlock::new("Slipknot", 400.0),
        RawTextBlock::new("Iowa ™", 430.0),
    ]
}

#[tokio::test]
async fn stacked_scan_then_commit() {
    let catalog = MemoryCatalog {
        reject_adds: vec!["iowa".to_string()],
        ..Default::default()
    }
    .with("PINK FLOYD The Wall", &[("wall", "The Wall", "Pink Floyd")])
    .with("The Wall", &[("wall", "The Wall", "Pink Floyd"), ("wall-live", "Is There Anybody Out There?", "Pink Floyd")])
    .with("Slipknot Iowa", &[("iowa", "Iowa", "Slipknot")]);
    let credential = Credential::bearer("token-123");

    let mut results = Scanner::new(ExtractionMode::StackedDiscs)
        .scan(&spine_photo(), &catalog, &credential)
        .await
        .unwrap();

    let mut searched = catalog.searched.lock().unwrap().clone();
    searched.sort();
    assert_eq!(
        searched,
        [
            "Iowa",
            "PINK FLOYD",
            "PINK FLOYD The Wall",
            "Slipknot",
            "Slipknot Iowa",
            "The Wall"
        ]
    );
    assert!(catalog
        .tokens_seen
        .lock()
        .unwrap()
        .iter()
        .all(|t| t == "token-123"));

    // "wall" belongs to whichever query answered first; the live album only to "The Wall".
    let all_ids: Vec<&str> = results
        .groups()
        .iter()
        .flat_map(|g| g.albums().iter().map(|a| a.id.as_str()))
        .collect();
    assert_eq!(all_ids.iter().filter(|id| **id == "wall").count(), 1);
    assert!(all_ids.contains(&"wall-live"));
    assert!(all_ids.contains(&"iowa"));

    let group_count = results.len();
    let summary = results.commit_to_library(&catalog, &credential).await;
    assert_eq!(summary.failed, ["Slipknot - Iowa"]);
    assert_eq!(summary.added, group_count - 1);
    assert_eq!(summary.added, results.added_count());
    assert!(results.is_empty());
}

#[tokio::test]
async fn whole_photo_searches_each_block() {
    let catalog = MemoryCatalog::default().with("Kind of Blue", &[("kob", "Kind of Blue", "Miles Davis")]);
    let blocks = vec![
        RawTextBlock::without_geometry("Kind of Blue"),
        RawTextBlock::without_geometry("MILES DAVIS"),
        RawTextBlock::without_geometry("Kind of Blue"),
    ];

    let results = Scanner::default()
        .scan(&blocks, &catalog, &Credential::bearer("t"))
        .await
        .unwrap();

    assert_eq!(catalog.searched.lock().unwrap().len(), 2);
    assert_eq!(results.len(), 1);
    assert_eq!(results.groups()[0].primary().display_name(), "Miles Davis - Kind of Blue");
}

#[tokio::test]
async fn empty_photo_is_no_detections() {
    let catalog = MemoryCatalog::default();
    let result = Scanner::new(ExtractionMode::StackedDiscs)
        .scan(&[], &catalog, &Credential::bearer("t"))
        .await;

    assert!(matches!(result, Err(Error::NoDetections)));
    assert!(catalog.searched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failing_searches_do_not_sink_the_batch() {
    let catalog = MemoryCatalog {
        unavailable: vec!["Low".to_string()],
        ..Default::default()
    }
    .with("Heroes", &[("heroes", "Heroes", "David Bowie")]);
    let blocks = vec![
        RawTextBlock::without_geometry("Low"),
        RawTextBlock::without_geometry("Heroes"),
    ];

    let results = Scanner::default()
        .scan(&blocks, &catalog, &Credential::bearer("t"))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results.groups()[0].query(), "Heroes");
}

#[tokio::test]
async fn review_edits_carry_into_commit() {
    let catalog = MemoryCatalog::default()
        .with("Abbey Road", &[("ar", "Abbey Road", "The Beatles"), ("ar-deluxe", "Abbey Road (Super Deluxe)", "The Beatles")])
        .with("Revolver", &[("rev", "Revolver", "The Beatles")])
        .with("Help", &[("help", "Help!", "The Beatles")]);
    let blocks = vec![
        RawTextBlock::without_geometry("Abbey Road"),
        RawTextBlock::without_geometry("Revolver"),
        RawTextBlock::without_geometry("Help"),
    ];
    let credential = Credential::bearer("t");

    let mut results: ResultSet = Scanner::default()
        .scan(&blocks, &catalog, &credential)
        .await
        .unwrap();
    assert_eq!(results.len(), 3);

    let abbey = results
        .groups()
        .iter()
        .position(|g| g.query() == "Abbey Road")
        .unwrap();
    assert!(results.promote(abbey, "ar-deluxe"));

    let revolver = results
        .groups()
        .iter()
        .position(|g| g.query() == "Revolver")
        .unwrap();
    results.select(revolver);
    assert_eq!(results.remove_selected(), 1);
    assert_eq!(results.len(), 2);

    let summary = results.commit_to_library(&catalog, &credential).await;
    assert_eq!(summary.added, 2);
    assert!(summary.is_complete_success());
}
