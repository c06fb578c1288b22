use crate::pagination::Page;
use crate::types::{Playlist, Track};
use crate::Result;
use async_trait::async_trait;

/// Trait for the streaming-service side of a backup run.
///
/// This is the authenticated handle an [`AuthProvider`](crate::AuthProvider)
/// yields for the playlist service. The core only needs the two
/// cursor-paginated listing endpoints; everything else about the service
/// (transport, credentials, token refresh) stays behind this seam.
///
/// Implementations should translate their wire errors into the crate
/// taxonomy: rate-limit responses become
/// [`BackupError::RateLimit`](crate::BackupError::RateLimit) (carrying the
/// service's `Retry-After` hint when present) and transient network failures
/// become [`BackupError::Network`](crate::BackupError::Network), so the
/// shared retry policy can do its job. Loosely-typed JSON payloads should be
/// parsed into the strict model with [`crate::api`] at this boundary.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides
/// `MockStreamingService` implementing this trait via the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait StreamingService {
    /// Fetch one page of the current user's playlists.
    ///
    /// Playlists in a listing page carry no tracks; the orchestrator fetches
    /// tracks separately per playlist.
    async fn playlists_page(&self, cursor: Option<String>) -> Result<Page<Playlist>>;

    /// Fetch one page of a playlist's tracks, in playlist order.
    ///
    /// Local-only tracks are excluded at this boundary (they lack the
    /// metadata the export schema needs).
    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        cursor: Option<String>,
    ) -> Result<Page<Track>>;
}
