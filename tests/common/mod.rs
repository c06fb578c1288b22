//! Shared test doubles for orchestrator integration tests.
//!
//! `FakeStreamingService` serves scripted playlists/tracks through the real
//! cursor-pagination contract and can inject rate-limit and network
//! failures; `InMemoryStore` is a stateful remote store over a shared map so
//! tests can inspect what a run actually wrote.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use playlist_backup::{
    BackupConfig, BackupError, Page, Playlist, RemoteStore, Result, RetryConfig, StreamingService,
    Track,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

pub fn added_at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
}

pub fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec!["Artist".to_string()],
        album_name: "Album".to_string(),
        album_release_date: "2024-01-01".to_string(),
        added_at: added_at(1),
        added_by: "user-1".to_string(),
        duration_ms: 210000,
        is_local: false,
    }
}

pub fn playlist(id: &str, name: &str, tracks: Vec<Track>) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        owner: "owner".to_string(),
        snapshot_id: "snap-1".to_string(),
        total_tracks: tracks.len() as u32,
        tracks,
    }
}

/// Zero-delay retry policy so failure-path tests stay fast.
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_transient_retries: 2,
        base_delay: 0,
        max_delay: 0,
        rate_limit_delay: 0,
    }
}

pub fn test_config() -> BackupConfig {
    BackupConfig {
        backup_folder: "/backups".to_string(),
        dry_run: false,
        retry: fast_retry(),
    }
}

fn page_of<T: Clone>(items: &[T], cursor: Option<String>, page_size: usize) -> Page<T> {
    let start: usize = cursor
        .as_deref()
        .map(|c| c.parse().expect("numeric test cursor"))
        .unwrap_or(0);
    let end = usize::min(start + page_size, items.len());
    let next_cursor = (end < items.len()).then(|| end.to_string());
    Page {
        items: items[start..end].to_vec(),
        next_cursor,
    }
}

/// Scripted streaming service. Playlists are listed without tracks (as the
/// real listing endpoint does); tracks are served per playlist id.
pub struct FakeStreamingService {
    playlists: Vec<Playlist>,
    tracks: BTreeMap<String, Vec<Track>>,
    /// Playlist ids whose track fetch fails with a persistent network error.
    pub fail_tracks_for: HashSet<String>,
    /// Page size for both listings; small values exercise pagination.
    pub page_size: usize,
    /// Number of upcoming track-page calls that return a rate-limit signal.
    pub rate_limit_next_calls: RefCell<u32>,
}

impl FakeStreamingService {
    /// Build from playlists that carry their tracks; the tracks are moved
    /// into the per-playlist track listing and the listed playlists are
    /// track-less summaries.
    pub fn new(playlists_with_tracks: Vec<Playlist>) -> Self {
        let mut tracks = BTreeMap::new();
        let mut playlists = Vec::new();
        for p in playlists_with_tracks {
            tracks.insert(p.id.clone(), p.tracks.clone());
            playlists.push(p.with_tracks(Vec::new()));
        }
        Self {
            playlists,
            tracks,
            fail_tracks_for: HashSet::new(),
            page_size: 100,
            rate_limit_next_calls: RefCell::new(0),
        }
    }
}

#[async_trait(?Send)]
impl StreamingService for FakeStreamingService {
    async fn playlists_page(&self, cursor: Option<String>) -> Result<Page<Playlist>> {
        Ok(page_of(&self.playlists, cursor, self.page_size))
    }

    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        cursor: Option<String>,
    ) -> Result<Page<Track>> {
        {
            let mut remaining = self.rate_limit_next_calls.borrow_mut();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(BackupError::RateLimit {
                    retry_after: Some(0),
                });
            }
        }
        if self.fail_tracks_for.contains(playlist_id) {
            return Err(BackupError::Network("track fetch failed".to_string()));
        }
        let tracks = self.tracks.get(playlist_id).cloned().unwrap_or_default();
        Ok(page_of(&tracks, cursor, self.page_size))
    }
}

/// In-memory remote store backed by shared maps, so a test can keep a clone
/// and inspect files after the service consumed its boxed copy.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub files: Rc<RefCell<BTreeMap<String, String>>>,
    pub folders: Rc<RefCell<Vec<String>>>,
    pub put_count: Rc<RefCell<u32>>,
    /// Fail `put` with a persistent network error for paths containing this.
    pub fail_put_containing: Option<String>,
}

impl InMemoryStore {
    pub fn file(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }
}

#[async_trait(?Send)]
impl RemoteStore for InMemoryStore {
    async fn put(&self, path: &str, content: &str) -> Result<()> {
        if let Some(marker) = &self.fail_put_containing {
            if path.contains(marker.as_str()) {
                return Err(BackupError::Network("upload failed".to_string()));
            }
        }
        *self.put_count.borrow_mut() += 1;
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.to_string());
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| BackupError::NotFound(path.to_string()))
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.files.borrow().contains_key(path))
    }

    async fn list_folder(&self, folder: &str) -> Result<Vec<String>> {
        let prefix = format!("{folder}/");
        let entries: Vec<String> = self
            .files
            .borrow()
            .keys()
            .filter_map(|path| path.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_string)
            .collect();
        if entries.is_empty() && !self.folders.borrow().iter().any(|f| f == folder) {
            return Err(BackupError::NotFound(folder.to_string()));
        }
        Ok(entries)
    }

    async fn ensure_folder(&self, path: &str) -> Result<()> {
        let mut folders = self.folders.borrow_mut();
        if !folders.iter().any(|f| f == path) {
            folders.push(path.to_string());
        }
        Ok(())
    }
}
