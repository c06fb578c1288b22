//! Core data model for playlist backup runs.
//!
//! [`Track`] and [`Playlist`] are read-only snapshots of remote state,
//! constructed fresh per run at the API boundary (see [`crate::api`]) and
//! never mutated or cached across runs. The only state that survives a run
//! is the exported CSV file itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single playlist entry as seen by the backup core.
///
/// Local-only tracks lack full metadata and are filtered out at the API
/// boundary before reaching this type, so `is_local` is `false` for every
/// track the orchestrator processes; the field is retained because it is part
/// of the exported CSV schema.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use playlist_backup::Track;
///
/// let track = Track {
///     id: "6rqhFgbbKwnb9MLmUQDhG6".to_string(),
///     name: "Paranoid Android".to_string(),
///     artists: vec!["Radiohead".to_string()],
///     album_name: "OK Computer".to_string(),
///     album_release_date: "1997-05-21".to_string(),
///     added_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
///     added_by: "user-1".to_string(),
///     duration_ms: 387000,
///     is_local: false,
/// };
///
/// println!("{} by {}", track.name, track.artists.join(", "));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stable remote identifier, unique within one playlist snapshot.
    pub id: String,
    /// The track name/title.
    pub name: String,
    /// Artist names in the order the remote API reports them.
    pub artists: Vec<String>,
    /// The album name.
    pub album_name: String,
    /// Album release date as reported by the service; may be empty.
    pub album_release_date: String,
    /// When the track was added to the playlist (UTC).
    pub added_at: DateTime<Utc>,
    /// Identifier of the user who added the track; may be empty.
    pub added_by: String,
    /// Track duration in milliseconds.
    pub duration_ms: u64,
    /// Whether this is a local-only track.
    pub is_local: bool,
}

/// A playlist snapshot.
///
/// Playlist listings yield playlists with an empty `tracks` vector; the
/// orchestrator hydrates each playlist's tracks with [`Playlist::with_tracks`]
/// right before exporting it. Track order equals remote fetch order and is
/// meaningful for export, but not for diffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Stable remote identifier.
    pub id: String,
    /// Display name (not unique across a user's playlists).
    pub name: String,
    /// Playlist description; may be empty.
    pub description: String,
    /// Display name or id of the owning user.
    pub owner: String,
    /// Opaque version token for the playlist's current membership/ordering.
    ///
    /// Unused for diffing (the diff is id-based), carried as a future
    /// optimization hook.
    pub snapshot_id: String,
    /// Track count as reported by the listing endpoint.
    pub total_tracks: u32,
    /// The playlist's tracks, in remote API order.
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Return a copy of this playlist with its `tracks` replaced.
    ///
    /// Used by the orchestrator to hydrate a listing-derived playlist with
    /// the tracks fetched for it.
    pub fn with_tracks(&self, tracks: Vec<Track>) -> Playlist {
        Playlist {
            tracks,
            ..self.clone()
        }
    }
}
