//! Backup and incrementally sync streaming-service playlists to CSV files
//! in a remote file store.
//!
//! The crate turns two rate-limited, paginated external APIs, a streaming
//! service ([`StreamingService`]) and a hierarchical file store
//! ([`RemoteStore`]), into a reliable backup/sync pipeline:
//!
//! - [`fetch_all`] drains cursor-paginated endpoints with retry-after
//!   backoff ([`retry_with_backoff`], [`RetryConfig`]),
//! - [`export`] serializes playlists into deterministic, BOM-prefixed CSV
//!   with collision-safe filenames,
//! - [`RemoteStoreGateway`] adds retries and path normalization over the
//!   store handle,
//! - [`BackupService`] orchestrates full backups and incremental syncs,
//!   aggregating per-playlist outcomes into a [`RunReport`].
//!
//! Authentication is a consumed capability: an [`AuthProvider`] yields
//! ready-to-use handles, and the core never sees credentials.
//!
//! # Example
//!
//! ```rust,no_run
//! use playlist_backup::{AuthProvider, BackupConfig, BackupService, PlaylistSelector};
//!
//! # async fn run(auth: &dyn AuthProvider) -> playlist_backup::Result<()> {
//! let service = BackupService::from_auth(auth, BackupConfig::default()).await?;
//!
//! let report = service.backup_all_playlists(&PlaylistSelector::All).await?;
//! println!("{} backed up, {} failed", report.successful, report.failed);
//!
//! let sync = service.sync_all_playlists().await?;
//! println!("{} new tracks across {} playlists", sync.total_new_tracks, sync.playlists_updated);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod diff;
pub mod error;
pub mod export;
pub mod pagination;
pub mod report;
pub mod retry;
pub mod service;
pub mod store;
pub mod streaming;
pub mod types;

pub use auth::AuthProvider;
pub use error::BackupError;
pub use pagination::{fetch_all, Page};
pub use report::{PlaylistOutcome, PlaylistStatus, RunReport};
pub use retry::{retry_with_backoff, RetryConfig};
pub use service::{BackupConfig, BackupService, PlaylistSelector};
pub use store::{RemoteStore, RemoteStoreGateway};
pub use streaming::StreamingService;
pub use types::{Playlist, Track};

#[cfg(feature = "mock")]
pub use store::MockRemoteStore;
#[cfg(feature = "mock")]
pub use streaming::MockStreamingService;

pub type Result<T> = std::result::Result<T, BackupError>;
