//! API-boundary parsing of remote JSON payloads.
//!
//! The streaming service speaks loosely-typed JSON; the backup core never
//! does. Service implementations call these helpers to turn a raw listing
//! payload into strict [`Playlist`]/[`Track`] models the moment it arrives,
//! so everything past the [`StreamingService`](crate::StreamingService) seam
//! is fully typed. Malformed payloads become
//! [`BackupError::Parse`](crate::BackupError::Parse).
//!
//! Expected shapes follow the service's paging envelope:
//!
//! ```json
//! { "items": [ ... ], "next": "opaque-cursor-or-null" }
//! ```
//!
//! Playlist items carry `id`, `name`, `description`, `owner`, `snapshot_id`
//! and a `tracks.total` count; track items wrap the track object together
//! with the `added_at`/`added_by` playlist metadata.

use crate::pagination::Page;
use crate::types::{Playlist, Track};
use crate::{BackupError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

fn str_field(value: &Value, field: &str) -> Result<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| BackupError::Parse(format!("missing or non-string field '{field}'")))
}

fn opt_str_field(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn items(value: &Value) -> Result<&Vec<Value>> {
    value
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| BackupError::Parse("payload has no 'items' array".to_string()))
}

fn next_cursor(value: &Value) -> Option<String> {
    value
        .get("next")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Parse one playlist object from a playlist-listing payload.
///
/// The returned playlist carries no tracks; the orchestrator hydrates them
/// from the track-listing endpoint.
pub fn parse_playlist(data: &Value) -> Result<Playlist> {
    let owner = data.get("owner").cloned().unwrap_or(Value::Null);
    let owner_name = owner
        .get("display_name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .or_else(|| owner.get("id").and_then(Value::as_str))
        .unwrap_or("unknown")
        .to_string();

    let total_tracks = data
        .get("tracks")
        .and_then(|tracks| tracks.get("total"))
        .and_then(Value::as_u64)
        .unwrap_or(0) as u32;

    Ok(Playlist {
        id: str_field(data, "id")?,
        name: str_field(data, "name")?,
        description: opt_str_field(data, "description"),
        owner: owner_name,
        snapshot_id: str_field(data, "snapshot_id")?,
        total_tracks,
        tracks: Vec::new(),
    })
}

/// Parse one playlist-item entry into a [`Track`].
///
/// Returns `Ok(None)` for entries the core excludes upstream: missing track
/// objects (e.g. removed episodes) and local-only tracks, which lack the
/// metadata the export schema needs.
pub fn parse_track_item(item: &Value) -> Result<Option<Track>> {
    let track_data = match item.get("track") {
        Some(track) if !track.is_null() => track,
        _ => return Ok(None),
    };
    if track_data
        .get("is_local")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return Ok(None);
    }

    let artists = track_data
        .get("artists")
        .and_then(Value::as_array)
        .map(|artists| {
            artists
                .iter()
                .map(|artist| str_field(artist, "name"))
                .collect::<Result<Vec<String>>>()
        })
        .transpose()?
        .unwrap_or_default();

    let album = track_data.get("album").cloned().unwrap_or(Value::Null);

    let added_at_raw = str_field(item, "added_at")?;
    let added_at = DateTime::parse_from_rfc3339(&added_at_raw)
        .map_err(|err| BackupError::Parse(format!("invalid added_at '{added_at_raw}': {err}")))?
        .with_timezone(&Utc);

    let added_by = item
        .get("added_by")
        .and_then(|added_by| added_by.get("id"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Some(Track {
        id: str_field(track_data, "id")?,
        name: str_field(track_data, "name")?,
        artists,
        album_name: opt_str_field(&album, "name"),
        album_release_date: opt_str_field(&album, "release_date"),
        added_at,
        added_by,
        duration_ms: track_data
            .get("duration_ms")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        is_local: false,
    }))
}

/// Parse one page of a playlist listing.
pub fn parse_playlist_page(payload: &Value) -> Result<Page<Playlist>> {
    let playlists = items(payload)?
        .iter()
        .map(parse_playlist)
        .collect::<Result<Vec<Playlist>>>()?;

    Ok(Page {
        items: playlists,
        next_cursor: next_cursor(payload),
    })
}

/// Parse one page of a playlist's tracks, excluding local/missing entries.
pub fn parse_track_page(payload: &Value) -> Result<Page<Track>> {
    let mut tracks = Vec::new();
    for item in items(payload)? {
        if let Some(track) = parse_track_item(item)? {
            tracks.push(track);
        }
    }

    Ok(Page {
        items: tracks,
        next_cursor: next_cursor(payload),
    })
}
