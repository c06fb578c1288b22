//! Backup/sync orchestration.
//!
//! [`BackupService`] drives a whole run: it lists playlists through the
//! paged fetcher, hydrates each playlist's tracks, serializes them, and
//! writes the result through the retrying store gateway, aggregating
//! per-playlist outcomes into a [`RunReport`]. Playlists are processed
//! sequentially: both remote APIs are globally rate limited per credential,
//! and sequential processing keeps the report order deterministic and equal
//! to the listing order. One playlist's failure never aborts the run.

use crate::auth::AuthProvider;
use crate::diff;
use crate::export;
use crate::pagination::fetch_all;
use crate::report::{PlaylistOutcome, PlaylistStatus, RunReport};
use crate::retry::RetryConfig;
use crate::store::RemoteStoreGateway;
use crate::streaming::StreamingService;
use crate::types::{Playlist, Track};
use crate::{BackupError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a backup service instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Remote folder exports are written into. Empty means the store root;
    /// a leading separator is optional.
    pub backup_folder: String,
    /// When set, every stage runs identically through serialization and
    /// diffing, but nothing is written to the remote store. Outcomes report
    /// what would have happened.
    pub dry_run: bool,
    /// Retry policy shared by the paged fetcher and the store gateway.
    #[serde(skip)]
    pub retry: RetryConfig,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            backup_folder: "/playlist-backups".to_string(),
            dry_run: false,
            retry: RetryConfig::default(),
        }
    }
}

/// Which playlists a backup run should cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistSelector {
    /// Every playlist in the user's listing.
    All,
    /// The single playlist with this remote id.
    ById(String),
    /// The single playlist with this display name. Matching more than one
    /// playlist is a reported failure, never a silent first-match pick.
    ByName(String),
}

impl PlaylistSelector {
    fn label(&self) -> &str {
        match self {
            PlaylistSelector::All => "*",
            PlaylistSelector::ById(id) => id,
            PlaylistSelector::ByName(name) => name,
        }
    }
}

/// Orchestrates backup and sync runs over a pair of authenticated handles.
///
/// Construct directly from handles with [`BackupService::new`], or acquire
/// the handles through an [`AuthProvider`] with [`BackupService::from_auth`].
pub struct BackupService {
    streaming: Box<dyn StreamingService>,
    store: RemoteStoreGateway,
    config: BackupConfig,
}

impl BackupService {
    /// Create a service from already-authenticated handles.
    pub fn new(
        streaming: Box<dyn StreamingService>,
        store: Box<dyn crate::store::RemoteStore>,
        config: BackupConfig,
    ) -> Self {
        let gateway = RemoteStoreGateway::new(store, config.retry.clone());
        Self {
            streaming,
            store: gateway,
            config,
        }
    }

    /// Acquire both service handles from `auth` and build the service.
    ///
    /// A [`BackupError::Auth`] from either acquisition aborts here, before
    /// any playlist is processed.
    pub async fn from_auth(auth: &dyn AuthProvider, config: BackupConfig) -> Result<Self> {
        let streaming = auth.streaming_service().await?;
        let store = auth.remote_store().await?;
        Ok(Self::new(streaming, store, config))
    }

    /// Back up the selected playlists as full exports.
    ///
    /// Each playlist is fetched, serialized, and written to
    /// `{backup_folder}/{generated filename}` with overwrite semantics. A
    /// failure at any stage marks that playlist failed in the report and
    /// processing continues with the next one. Returns `Err` only for
    /// run-wide failures (the initial playlist listing).
    pub async fn backup_all_playlists(&self, selector: &PlaylistSelector) -> Result<RunReport> {
        let playlists = self.fetch_playlists().await?;
        let selected = match resolve_selector(&playlists, selector) {
            Ok(selected) => selected,
            Err(err) => {
                log::error!("playlist selection '{}' failed: {err}", selector.label());
                let mut report = RunReport::new(1);
                report.record(PlaylistOutcome::selection_failure(
                    selector.label(),
                    err.to_string(),
                ));
                return Ok(report);
            }
        };

        let total = selected.len();
        log::info!("starting backup for {total} playlists");
        let mut report = RunReport::new(total);
        for (index, playlist) in selected.iter().enumerate() {
            log::info!(
                "backing up playlist {}/{total}: {}",
                index + 1,
                playlist.name
            );
            let outcome = match self.backup_playlist(playlist).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    log::error!("backup failed for {}: {err}", playlist.name);
                    failed_outcome(playlist, err)
                }
            };
            report.record(outcome);
        }
        Ok(report)
    }

    /// Incrementally sync every playlist against its existing export.
    ///
    /// A playlist with no existing export gets a full export (its first
    /// sync), with all tracks counted as new. Otherwise the existing file is
    /// parsed into the set of known track ids and exactly the tracks not yet
    /// recorded are appended, in current-fetch order; a playlist with no new
    /// tracks is recorded unchanged with no write. Sync never removes a
    /// previously recorded track.
    pub async fn sync_all_playlists(&self) -> Result<RunReport> {
        let playlists = self.fetch_playlists().await?;

        let total = playlists.len();
        log::info!("starting sync for {total} playlists");
        let mut report = RunReport::new(total);
        for (index, playlist) in playlists.iter().enumerate() {
            log::info!("syncing playlist {}/{total}: {}", index + 1, playlist.name);
            let outcome = match self.sync_playlist(playlist).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    log::error!("sync failed for {}: {err}", playlist.name);
                    failed_outcome(playlist, err)
                }
            };
            report.record(outcome);
        }
        Ok(report)
    }

    async fn fetch_playlists(&self) -> Result<Vec<Playlist>> {
        fetch_all(&self.config.retry, "playlist listing", |cursor| {
            self.streaming.playlists_page(cursor)
        })
        .await
    }

    async fn fetch_tracks(&self, playlist_id: &str) -> Result<Vec<Track>> {
        fetch_all(&self.config.retry, "track listing", |cursor| {
            self.streaming.playlist_tracks_page(playlist_id, cursor)
        })
        .await
    }

    async fn backup_playlist(&self, playlist: &Playlist) -> Result<PlaylistOutcome> {
        let tracks = self.fetch_tracks(&playlist.id).await?;
        let hydrated = playlist.with_tracks(tracks);

        let csv = export::playlist_to_csv(&hydrated)?;
        let file_path = self.backup_path(&export::generate_filename(&hydrated));
        self.write(&file_path, &csv).await?;

        Ok(PlaylistOutcome {
            playlist_id: hydrated.id,
            playlist_name: hydrated.name,
            file_path,
            track_count: hydrated.tracks.len(),
            new_tracks: 0,
            status: PlaylistStatus::BackedUp,
        })
    }

    async fn sync_playlist(&self, playlist: &Playlist) -> Result<PlaylistOutcome> {
        let tracks = self.fetch_tracks(&playlist.id).await?;
        let hydrated = playlist.with_tracks(tracks);
        let file_path = self.backup_path(&export::generate_filename(&hydrated));

        let existing = self.store.get(&file_path).await?;
        let (content, new_count, status) = match existing {
            None => {
                // First sync: behave as a full backup, all tracks are new.
                let csv = export::playlist_to_csv(&hydrated)?;
                let count = hydrated.tracks.len();
                (Some(csv), count, PlaylistStatus::Updated)
            }
            Some(existing_csv) => {
                let new_tracks = diff::find_new_tracks(&hydrated.tracks, &existing_csv);
                if new_tracks.is_empty() {
                    (None, 0, PlaylistStatus::Unchanged)
                } else {
                    let updated = export::append_tracks(&existing_csv, &new_tracks)?;
                    (Some(updated), new_tracks.len(), PlaylistStatus::Updated)
                }
            }
        };

        if let Some(content) = content {
            self.write(&file_path, &content).await?;
        }

        Ok(PlaylistOutcome {
            playlist_id: hydrated.id,
            playlist_name: hydrated.name,
            file_path,
            track_count: hydrated.tracks.len(),
            new_tracks: new_count,
            status,
        })
    }

    /// Write an export, creating the backup folder as needed. In dry-run
    /// mode no remote state changes.
    async fn write(&self, file_path: &str, content: &str) -> Result<()> {
        if self.config.dry_run {
            log::info!("dry run: skipping write of {file_path}");
            return Ok(());
        }
        let folder = self.config.backup_folder.trim();
        if !folder.is_empty() {
            self.store.ensure_folder(folder).await?;
        }
        self.store.put(file_path, content).await
    }

    fn backup_path(&self, filename: &str) -> String {
        build_backup_path(&self.config.backup_folder, filename)
    }
}

/// Join the configured backup folder and an export filename into a
/// normalized remote path. An empty folder means the store root.
fn build_backup_path(backup_folder: &str, filename: &str) -> String {
    let folder = backup_folder.trim();
    if folder.is_empty() {
        return format!("/{filename}");
    }
    let folder = folder.trim_end_matches('/');
    if folder.starts_with('/') {
        format!("{folder}/{filename}")
    } else {
        format!("/{folder}/{filename}")
    }
}

fn failed_outcome(playlist: &Playlist, err: BackupError) -> PlaylistOutcome {
    PlaylistOutcome {
        playlist_id: playlist.id.clone(),
        playlist_name: playlist.name.clone(),
        file_path: String::new(),
        track_count: 0,
        new_tracks: 0,
        status: PlaylistStatus::Failed(err.to_string()),
    }
}

fn resolve_selector(playlists: &[Playlist], selector: &PlaylistSelector) -> Result<Vec<Playlist>> {
    match selector {
        PlaylistSelector::All => Ok(playlists.to_vec()),
        PlaylistSelector::ById(id) => playlists
            .iter()
            .find(|playlist| &playlist.id == id)
            .map(|playlist| vec![playlist.clone()])
            .ok_or_else(|| BackupError::NotFound(format!("playlist not found: {id}"))),
        PlaylistSelector::ByName(name) => {
            let matches: Vec<&Playlist> = playlists
                .iter()
                .filter(|playlist| &playlist.name == name)
                .collect();
            match matches.len() {
                0 => Err(BackupError::NotFound(format!("playlist not found: {name}"))),
                1 => Ok(vec![matches[0].clone()]),
                n => Err(BackupError::AmbiguousSelection {
                    filter: name.clone(),
                    matches: n,
                }),
            }
        }
    }
}
