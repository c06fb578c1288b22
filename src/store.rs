//! Remote file store access.
//!
//! [`RemoteStore`] is the raw, authenticated transport handle for the cloud
//! file store; [`RemoteStoreGateway`] wraps it with the shared retry policy,
//! path normalization, and not-found mapping, and is what the orchestrator
//! talks to. All gateway operations are idempotent and safe to retry: `put`
//! has plain overwrite semantics with no conflict detection, and a
//! definitive not-found from `get`/`exists`/`list_folder` is a valid result,
//! never an error and never retried.

use crate::retry::{retry_with_backoff, RetryConfig};
use crate::{BackupError, Result};
use async_trait::async_trait;

/// Trait for the raw remote file store handle.
///
/// This is the authenticated handle an [`AuthProvider`](crate::AuthProvider)
/// yields for the file store. Implementations receive already-normalized
/// paths (leading separator present) and translate wire errors into the
/// crate taxonomy: absence becomes
/// [`BackupError::NotFound`](crate::BackupError::NotFound), rate limiting
/// becomes [`BackupError::RateLimit`](crate::BackupError::RateLimit), and
/// 5xx-equivalent or network failures become
/// [`BackupError::Network`](crate::BackupError::Network).
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockRemoteStore`
/// implementing this trait via the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait RemoteStore {
    /// Create or overwrite the file at `path` with `content`.
    async fn put(&self, path: &str, content: &str) -> Result<()>;

    /// Fetch the content of the file at `path`.
    ///
    /// Returns [`BackupError::NotFound`] when the file does not exist.
    async fn get(&self, path: &str) -> Result<String>;

    /// Whether a file exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// List entry names directly under `folder` (non-recursive).
    ///
    /// Returns [`BackupError::NotFound`] when the folder does not exist.
    async fn list_folder(&self, folder: &str) -> Result<Vec<String>>;

    /// Create the folder at `path`; succeed silently if it already exists.
    async fn ensure_folder(&self, path: &str) -> Result<()>;
}

/// Normalize a store path so a leading separator is optional and equivalent.
///
/// The empty path stays empty (it denotes the store root).
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Retrying facade over a [`RemoteStore`] handle.
///
/// Every operation normalizes its path argument and runs the underlying call
/// through [`retry_with_backoff`], so rate limits and transient failures are
/// absorbed by the shared policy. Not-found results are mapped to
/// `None`/`false`/empty instead of surfacing as errors.
pub struct RemoteStoreGateway {
    store: Box<dyn RemoteStore>,
    retry: RetryConfig,
}

impl RemoteStoreGateway {
    /// Wrap a raw store handle with the given retry policy.
    pub fn new(store: Box<dyn RemoteStore>, retry: RetryConfig) -> Self {
        Self { store, retry }
    }

    /// Create or overwrite the file at `path`.
    pub async fn put(&self, path: &str, content: &str) -> Result<()> {
        let path = normalize_path(path);
        retry_with_backoff(&self.retry, "store put", || self.store.put(&path, content)).await
    }

    /// Fetch a file's content, or `None` if it does not exist.
    pub async fn get(&self, path: &str) -> Result<Option<String>> {
        let path = normalize_path(path);
        match retry_with_backoff(&self.retry, "store get", || self.store.get(&path)).await {
            Ok(content) => Ok(Some(content)),
            Err(BackupError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Whether a file exists at `path`.
    pub async fn exists(&self, path: &str) -> Result<bool> {
        let path = normalize_path(path);
        match retry_with_backoff(&self.retry, "store exists", || self.store.exists(&path)).await {
            Ok(present) => Ok(present),
            Err(BackupError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// List entry names directly under `folder`.
    ///
    /// A missing folder lists as empty: before the first backup run the
    /// backup folder legitimately does not exist yet.
    pub async fn list_folder(&self, folder: &str) -> Result<Vec<String>> {
        let folder = normalize_path(folder);
        match retry_with_backoff(&self.retry, "store list", || self.store.list_folder(&folder))
            .await
        {
            Ok(entries) => Ok(entries),
            Err(BackupError::NotFound(_)) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    /// Create `path` as a folder if it does not exist yet.
    ///
    /// The empty path denotes the store root, which always exists.
    pub async fn ensure_folder(&self, path: &str) -> Result<()> {
        let path = normalize_path(path);
        if path.is_empty() {
            return Ok(());
        }
        retry_with_backoff(&self.retry, "store ensure folder", || {
            self.store.ensure_folder(&path)
        })
        .await
    }
}
