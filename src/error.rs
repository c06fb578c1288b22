use thiserror::Error;

/// Error types for playlist backup operations.
///
/// This enum covers all failure modes of a backup or sync run: transient
/// network problems, rate limiting from either remote service, absent remote
/// resources, authentication failures, and per-playlist export problems.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use playlist_backup::{BackupError, BackupService, PlaylistSelector};
///
/// # async fn run(service: BackupService) {
/// match service.backup_all_playlists(&PlaylistSelector::All).await {
///     Ok(report) => println!("{} backed up, {} failed", report.successful, report.failed),
///     Err(BackupError::Auth(msg)) => eprintln!("Authentication failed: {msg}"),
///     Err(BackupError::RateLimit { retry_after }) => {
///         eprintln!("Rate limited, retry after {retry_after:?} seconds");
///     }
///     Err(e) => eprintln!("Run failed: {e}"),
/// }
/// # }
/// ```
///
/// Per-playlist failures never surface here: the orchestrator converts them
/// into [`PlaylistStatus::Failed`](crate::PlaylistStatus::Failed) entries in
/// the [`RunReport`](crate::RunReport) and keeps going. Only run-wide
/// failures (authentication, the initial playlist listing) abort a run.
#[derive(Error, Debug)]
pub enum BackupError {
    /// Transient network failure (connection errors, timeouts, 5xx-equivalent
    /// responses from either remote service).
    ///
    /// These are retried with exponential backoff by the shared retry policy
    /// and only surface once the retry budget is exhausted.
    #[error("network error: {0}")]
    Network(String),

    /// Rate limiting from a remote service.
    ///
    /// The `retry_after` field carries the service's suggested wait in
    /// seconds, when the response included one. The retry policy waits and
    /// re-issues the same request; rate-limit retries are not capped, since
    /// both services are globally rate limited per credential and the only
    /// correct response is to pace down.
    #[error("rate limited (retry after {retry_after:?} seconds)")]
    RateLimit {
        /// Suggested wait in seconds, if the service provided one.
        retry_after: Option<u64>,
    },

    /// A remote resource does not exist.
    ///
    /// For `get`/`exists`/`list_folder` on the remote store this is a valid
    /// outcome ("never backed up"), never retried, and mapped to
    /// `None`/`false`/empty by the store gateway rather than surfaced.
    #[error("not found: {0}")]
    NotFound(String),

    /// Authentication failure from the auth provider or a remote handle.
    ///
    /// Fatal to the whole run: no further API calls can succeed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A playlist-name filter matched more than one playlist.
    ///
    /// Reported as a failure for that selection instead of silently picking
    /// the first match.
    #[error("ambiguous playlist selection '{filter}': matched {matches} playlists")]
    AmbiguousSelection {
        /// The name filter that was applied.
        filter: String,
        /// How many playlists it matched.
        matches: usize,
    },

    /// Malformed playlist data prevented CSV serialization.
    ///
    /// Reported per playlist; does not abort the run.
    #[error("export failed: {0}")]
    Export(String),

    /// Failed to parse a remote API response into the strict data model.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// File system I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackupError {
    /// Whether this error qualifies for capped transient retries.
    ///
    /// Rate limits are handled separately (uncapped, honoring `retry_after`);
    /// everything else is definitive and surfaces immediately.
    pub fn is_transient(&self) -> bool {
        matches!(self, BackupError::Network(_))
    }
}
