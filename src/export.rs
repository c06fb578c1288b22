//! CSV export for playlist backups.
//!
//! The CSV layout is the one byte-exact external contract of this crate:
//! consumers re-import the files, and the sync diff parses them back. Rows
//! use a fixed column order, minimal quoting (a field is quoted only when it
//! contains the delimiter, a quote, or a line break, with embedded quotes
//! doubled), `\n` line termination, and a leading UTF-8 BOM so spreadsheet
//! tools default to UTF-8 interpretation.

use crate::types::{Playlist, Track};
use crate::{BackupError, Result};
use chrono::SecondsFormat;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Column order of the exported CSV.
pub const CSV_FIELDS: [&str; 9] = [
    "track_id",
    "track_name",
    "artists",
    "album",
    "album_release_date",
    "added_at",
    "added_by",
    "duration_ms",
    "is_local",
];

/// UTF-8 byte-order mark prepended to every full export.
pub const CSV_BOM: &str = "\u{feff}";

static INVALID_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|]+"#).expect("static filename pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));

/// Quote `field` per minimal-quoting CSV rules, appending to `out`.
fn write_field(out: &mut String, field: &str) {
    let needs_quoting = field.contains([',', '"', '\n', '\r']);
    if needs_quoting {
        out.push('"');
        for ch in field.chars() {
            if ch == '"' {
                out.push('"');
            }
            out.push(ch);
        }
        out.push('"');
    } else {
        out.push_str(field);
    }
}

fn write_row(out: &mut String, track: &Track) {
    let artists = track.artists.join(", ");
    let added_at = track.added_at.to_rfc3339_opts(SecondsFormat::Secs, true);

    write_field(out, &track.id);
    out.push(',');
    write_field(out, &track.name);
    out.push(',');
    write_field(out, &artists);
    out.push(',');
    write_field(out, &track.album_name);
    out.push(',');
    write_field(out, &track.album_release_date);
    out.push(',');
    write_field(out, &added_at);
    out.push(',');
    write_field(out, &track.added_by);
    out.push(',');
    out.push_str(&track.duration_ms.to_string());
    out.push(',');
    out.push_str(if track.is_local { "true" } else { "false" });
    out.push('\n');
}

fn check_unique_ids(tracks: &[Track]) -> Result<()> {
    let mut seen = HashSet::new();
    for track in tracks {
        if !seen.insert(track.id.as_str()) {
            return Err(BackupError::Export(format!(
                "duplicate track id in playlist snapshot: {}",
                track.id
            )));
        }
    }
    Ok(())
}

/// Serialize a playlist's tracks into a CSV string with a UTF-8 BOM.
///
/// Row order equals the playlist's track order (remote fetch order). The
/// output is deterministic: serializing the same snapshot twice produces
/// byte-identical text. Duplicate track ids violate the snapshot invariant
/// and are rejected with [`BackupError::Export`].
pub fn playlist_to_csv(playlist: &Playlist) -> Result<String> {
    check_unique_ids(&playlist.tracks)?;

    let mut out = String::from(CSV_BOM);
    out.push_str(&CSV_FIELDS.join(","));
    out.push('\n');
    for track in &playlist.tracks {
        write_row(&mut out, track);
    }
    Ok(out)
}

/// Append rows for `tracks` to an existing export without re-emitting the
/// BOM or header.
///
/// The caller is responsible for passing only tracks whose ids are not
/// already recorded (the sync diff guarantees this); append order is
/// preserved.
pub fn append_tracks(existing: &str, tracks: &[Track]) -> Result<String> {
    check_unique_ids(tracks)?;

    let mut out = String::from(existing);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    for track in tracks {
        write_row(&mut out, track);
    }
    Ok(out)
}

/// Generate the collision-safe export filename for a playlist.
///
/// Characters illegal in file names (`\ / : * ? " < > |`) are replaced,
/// repeated whitespace collapses to single spaces, and surrounding spaces
/// and dots are trimmed; an empty result falls back to `"playlist"`. The
/// playlist id is appended before the extension, so two playlists sharing a
/// display name never collide. Pure function of `(name, id)`.
pub fn generate_filename(playlist: &Playlist) -> String {
    let mut name = playlist.name.trim().to_string();
    if name.is_empty() {
        name = "playlist".to_string();
    }
    name = INVALID_FILENAME_CHARS.replace_all(&name, "-").into_owned();
    name = WHITESPACE.replace_all(&name, " ").into_owned();
    name = name.trim_matches([' ', '.']).to_string();
    if name.is_empty() {
        name = "playlist".to_string();
    }
    format!("{name}-{}.csv", playlist.id)
}
