//! Release catalog
//!
//! In-memory list of submitted releases. New submissions land as Pending and
//! administrators move them to Distributed or Rejected.

use crate::distribution::DistributionRequest;
use fm_common::Genre;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReleaseStatus {
    Pending,
    Distributed,
    Rejected,
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseStatus::Pending => f.write_str("PENDING"),
            ReleaseStatus::Distributed => f.write_str("DISTRIBUTED"),
            ReleaseStatus::Rejected => f.write_str("REJECTED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub song_title: String,
    pub isrc: String,
    pub audio_url: Option<String>,
    pub credits: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    pub title: String,
    pub upc: String,
    pub genre: Genre,
    pub release_date: String,
    pub cover_url: Option<String>,
    pub status: ReleaseStatus,
    pub artist_id: String,
    pub artist_name: String,
    pub tracks: Vec<Track>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Release {0} not found")]
    NotFound(String),
    #[error("Release {id} is {status}, only pending releases can be triaged")]
    NotPending { id: String, status: ReleaseStatus },
}

#[derive(Debug, Clone, Default)]
pub struct ReleaseCatalog {
    releases: Vec<Release>,
    next_id: u64,
}

impl ReleaseCatalog {
    pub fn new() -> Self {
        Self {
            releases: Vec::new(),
            next_id: 101,
        }
    }

    /// Catalog pre-filled with the submissions shown on a fresh admin panel.
    pub fn with_demo_submissions() -> Self {
        let demo = [
            (
                "Nova Sky",
                "Galactic Horizon",
                Genre::Electronic,
                "2023-11-20",
                ReleaseStatus::Pending,
            ),
            (
                "The Rhythm Co.",
                "Back 2 Basics",
                Genre::HipHop,
                "2023-11-21",
                ReleaseStatus::Pending,
            ),
            (
                "Elena Ray",
                "Faded Memories",
                Genre::Pop,
                "2023-11-22",
                ReleaseStatus::Pending,
            ),
            (
                "Acid Jazz Trio",
                "Blue Monday",
                Genre::Jazz,
                "2023-11-23",
                ReleaseStatus::Distributed,
            ),
        ];
        let mut catalog = Self::new();
        for (artist, title, genre, date, status) in demo {
            let id = catalog.allocate_id();
            catalog.releases.push(Release {
                artist_id: format!("demo-{id}"),
                id,
                title: title.to_string(),
                upc: generate_upc(),
                genre,
                release_date: date.to_string(),
                cover_url: None,
                status,
                artist_name: artist.to_string(),
                tracks: Vec::new(),
            });
        }
        catalog
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id.max(101);
        self.next_id = id + 1;
        id.to_string()
    }

    /// Record a submission as pending. An empty UPC is replaced by a
    /// generated one.
    pub fn insert_pending(&mut self, request: &DistributionRequest) -> Release {
        let id = self.allocate_id();
        let upc = if request.upc.trim().is_empty() {
            generate_upc()
        } else {
            request.upc.trim().to_string()
        };
        let tracks = request
            .tracks
            .iter()
            .enumerate()
            .map(|(idx, t)| Track {
                id: format!("{}-{}", id, idx + 1),
                song_title: t.song_title.clone(),
                isrc: t.isrc.clone(),
                audio_url: t.audio_ref.clone(),
                credits: t.credits.clone(),
            })
            .collect();
        let release = Release {
            id,
            title: request.title.clone(),
            upc,
            genre: request.genre,
            release_date: request.release_date.clone(),
            cover_url: request.cover_art.clone(),
            status: ReleaseStatus::Pending,
            artist_id: request.artist_id.clone(),
            artist_name: request.artist_name.clone(),
            tracks,
        };
        info!(
            "Catalog: release {} \"{}\" by {} pending review",
            release.id, release.title, release.artist_name
        );
        self.releases.push(release.clone());
        release
    }

    pub fn approve(&mut self, id: &str) -> Result<&Release, CatalogError> {
        self.triage(id, ReleaseStatus::Distributed)
    }

    pub fn reject(&mut self, id: &str) -> Result<&Release, CatalogError> {
        self.triage(id, ReleaseStatus::Rejected)
    }

    fn triage(&mut self, id: &str, status: ReleaseStatus) -> Result<&Release, CatalogError> {
        let release = self
            .releases
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        if release.status != ReleaseStatus::Pending {
            return Err(CatalogError::NotPending {
                id: id.to_string(),
                status: release.status,
            });
        }
        release.status = status;
        info!("Catalog: release {} is now {}", id, status);
        Ok(release)
    }

    pub fn get(&self, id: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.id == id)
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn pending(&self) -> impl Iterator<Item = &Release> {
        self.releases
            .iter()
            .filter(|r| r.status == ReleaseStatus::Pending)
    }

    /// Case-insensitive match on artist name or title.
    pub fn search(&self, query: &str) -> Vec<&Release> {
        let needle = query.trim().to_lowercase();
        self.releases
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.artist_name.to_lowercase().contains(&needle)
                    || r.title.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn for_artist(&self, artist_id: &str) -> Vec<&Release> {
        self.releases
            .iter()
            .filter(|r| r.artist_id == artist_id)
            .collect()
    }
}

/// Catalog handle shared between the distribution worker and admin views
#[derive(Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<Mutex<ReleaseCatalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: ReleaseCatalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    pub fn get(&self) -> MutexGuard<'_, ReleaseCatalog> {
        self.inner.lock().unwrap()
    }
}

/// Random 12-digit UPC-A code with a valid check digit
pub fn generate_upc() -> String {
    let mut rng = rand::rng();
    let body: Vec<u32> = (0..11).map(|_| rng.random_range(0..10)).collect();
    let mut upc: String = body
        .iter()
        .filter_map(|d| char::from_digit(*d, 10))
        .collect();
    if let Some(check) = char::from_digit(upc_check_digit(&body), 10) {
        upc.push(check);
    }
    upc
}

fn upc_check_digit(body: &[u32]) -> u32 {
    let (odd, even) = body
        .iter()
        .enumerate()
        .fold((0, 0), |(odd, even), (i, d)| {
            if i % 2 == 0 {
                (odd + d, even)
            } else {
                (odd, even + d)
            }
        });
    (10 - (odd * 3 + even) % 10) % 10
}
