use crate::store::RemoteStore;
use crate::streaming::StreamingService;
use crate::Result;
use async_trait::async_trait;

/// Capability trait yielding ready-to-use authenticated service handles.
///
/// OAuth flows, token persistence and refresh are deliberately outside this
/// crate; an `AuthProvider` owns that lifecycle and hands the orchestrator
/// opaque, already-authenticated handles. Acquisition happens once, up
/// front, in [`BackupService::from_auth`](crate::BackupService::from_auth):
/// if either handle cannot be produced the run aborts with
/// [`BackupError::Auth`](crate::BackupError::Auth) before any playlist is
/// processed, since no later API call could succeed.
///
/// Providers are free to refresh tokens internally for the lifetime of the
/// handles they return; the core never sees credentials.
#[async_trait(?Send)]
pub trait AuthProvider {
    /// Acquire an authenticated streaming-service handle.
    async fn streaming_service(&self) -> Result<Box<dyn StreamingService>>;

    /// Acquire an authenticated remote file store handle.
    async fn remote_store(&self) -> Result<Box<dyn RemoteStore>>;
}
