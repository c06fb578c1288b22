//! Run report accumulation.
//!
//! A backup or sync run returns one [`RunReport`]: per-playlist outcomes in
//! processing order plus aggregate counters. The report is the sole success
//! signal of a run: a run with `failed > 0` is not itself a process error;
//! the caller decides exit semantics from the counts.

use serde::Serialize;

/// Outcome of processing a single playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PlaylistStatus {
    /// A full export was written (backup mode).
    BackedUp,
    /// A sync wrote the file: either a first sync (full export) or an
    /// incremental append of new tracks.
    Updated,
    /// A sync found no new tracks; no write occurred.
    Unchanged,
    /// Processing this playlist failed; the run continued with the rest.
    Failed(String),
}

impl PlaylistStatus {
    /// Whether this outcome counts as a success.
    pub fn is_success(&self) -> bool {
        !matches!(self, PlaylistStatus::Failed(_))
    }
}

/// Per-playlist entry in a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistOutcome {
    /// Remote playlist id (or the filter text, for selection failures).
    pub playlist_id: String,
    /// Playlist display name.
    pub playlist_name: String,
    /// Remote path the export was (or would have been) written to.
    pub file_path: String,
    /// Number of tracks in the playlist snapshot that was processed.
    pub track_count: usize,
    /// Number of tracks newly recorded by this run (sync mode; a first sync
    /// counts every track).
    pub new_tracks: usize,
    /// How processing this playlist ended.
    pub status: PlaylistStatus,
}

impl PlaylistOutcome {
    /// A failure entry for a selection that never resolved to a playlist.
    pub fn selection_failure(filter: &str, reason: String) -> Self {
        Self {
            playlist_id: filter.to_string(),
            playlist_name: filter.to_string(),
            file_path: String::new(),
            track_count: 0,
            new_tracks: 0,
            status: PlaylistStatus::Failed(reason),
        }
    }
}

/// Aggregated result of one orchestrator invocation.
///
/// Outcomes appear in processing order, which equals the remote listing
/// order (playlists are processed sequentially).
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Number of playlists this run attempted to process.
    pub total_playlists: usize,
    /// Playlists that ended in a non-failure status.
    pub successful: usize,
    /// Playlists that ended in [`PlaylistStatus::Failed`].
    pub failed: usize,
    /// Sync mode: playlists whose export file was written this run.
    pub playlists_updated: usize,
    /// Sync mode: total tracks newly recorded across all playlists.
    pub total_new_tracks: usize,
    /// Per-playlist outcomes in processing order.
    pub playlists: Vec<PlaylistOutcome>,
}

impl RunReport {
    /// An empty report expecting `total_playlists` entries.
    pub fn new(total_playlists: usize) -> Self {
        Self {
            total_playlists,
            ..Self::default()
        }
    }

    /// Record one playlist outcome, updating the aggregate counters.
    pub fn record(&mut self, outcome: PlaylistOutcome) {
        match &outcome.status {
            PlaylistStatus::Failed(_) => self.failed += 1,
            PlaylistStatus::Updated => {
                self.successful += 1;
                self.playlists_updated += 1;
                self.total_new_tracks += outcome.new_tracks;
            }
            PlaylistStatus::BackedUp | PlaylistStatus::Unchanged => self.successful += 1,
        }
        self.playlists.push(outcome);
    }
}
