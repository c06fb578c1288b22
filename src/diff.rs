//! Track-set diffing for incremental sync.
//!
//! A previously persisted export is the only record of which tracks have
//! been backed up: there is no manifest or index file. Sync parses the
//! existing CSV back into a set of track ids and keeps exactly the current
//! tracks whose id is not yet recorded. The diff is deliberately id-based
//! and append-only: re-ordering or metadata drift on already-recorded tracks
//! never triggers a write.

use crate::export::CSV_BOM;
use crate::types::Track;
use std::collections::HashSet;

/// Split CSV text into records of unquoted fields.
///
/// Line breaks inside quoted fields do not terminate a record, and doubled
/// quotes inside quoted fields unescape to a single quote. Accepts both
/// `\n` and `\r\n` record terminators.
fn parse_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut saw_any = false;

    let mut chars = content.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                other => field.push(other),
            }
            continue;
        }
        match ch {
            '"' => {
                in_quotes = true;
                saw_any = true;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                saw_any = true;
            }
            '\n' => {
                if saw_any || !field.is_empty() || !record.is_empty() {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                saw_any = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            other => {
                field.push(other);
                saw_any = true;
            }
        }
    }
    if saw_any || !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}

/// Extract the set of track ids recorded in existing CSV content.
///
/// Tolerates a leading BOM, skips the header record, and ignores records
/// with an empty id field. Quoted fields containing commas or line breaks
/// are handled correctly, so the id column is recovered exactly even for
/// exports with awkward metadata.
pub fn parse_track_ids(csv_content: &str) -> HashSet<String> {
    let content = csv_content.strip_prefix(CSV_BOM).unwrap_or(csv_content);

    parse_records(content)
        .into_iter()
        .skip(1) // header
        .filter_map(|record| record.into_iter().next())
        .filter(|id| !id.is_empty())
        .collect()
}

/// Compare current tracks with an existing export and return the new ones.
///
/// The result is exactly `current − known` by id, preserving current-fetch
/// order. Tracks recorded in the export but absent from `current` are left
/// alone: sync never removes a previously recorded track.
pub fn find_new_tracks(current_tracks: &[Track], existing_csv: &str) -> Vec<Track> {
    let existing_ids = parse_track_ids(existing_csv);
    current_tracks
        .iter()
        .filter(|track| !existing_ids.contains(&track.id))
        .cloned()
        .collect()
}
