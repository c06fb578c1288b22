use crate::{BackupError, Result};
use std::future::Future;

/// Configuration for the shared retry policy.
///
/// One instance is shared by the paged fetcher and the remote store gateway
/// so both remote services see the same pacing behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries for transient errors.
    ///
    /// Rate-limit retries are not counted against this cap.
    pub max_transient_retries: u32,
    /// Base delay for exponential backoff (in seconds).
    pub base_delay: u64,
    /// Maximum backoff delay cap (in seconds).
    pub max_delay: u64,
    /// Wait applied to a rate-limit signal that carries no `retry_after`
    /// hint (in seconds).
    pub rate_limit_delay: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_transient_retries: 3,
            base_delay: 1,
            max_delay: 60,
            rate_limit_delay: 1,
        }
    }
}

/// Execute an async operation with the crate's retry policy.
///
/// Two error classes are retried:
///
/// - [`BackupError::RateLimit`]: the calling task sleeps for the signal's
///   `retry_after` (or [`RetryConfig::rate_limit_delay`] when absent) and
///   re-issues the same operation. These retries are unbounded; both remote
///   services are globally rate limited per credential, so backing off and
///   repeating is always the right move.
/// - Transient errors ([`BackupError::is_transient`]): retried up to
///   [`RetryConfig::max_transient_retries`] times with exponential backoff
///   doubling from [`RetryConfig::base_delay`], clamped at
///   [`RetryConfig::max_delay`], before the error surfaces.
///
/// Any other error (not-found, auth, parse, export) returns immediately.
///
/// # Arguments
/// * `config` - Retry configuration
/// * `operation_name` - Name of the operation for logging
/// * `operation` - Closure producing a fresh future per attempt
pub async fn retry_with_backoff<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut transient_retries = 0;
    let mut delay = config.base_delay;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(BackupError::RateLimit { retry_after }) => {
                let wait = retry_after.unwrap_or(config.rate_limit_delay);
                log::warn!("{operation_name} rate limited, waiting {wait} seconds before retry");
                tokio::time::sleep(std::time::Duration::from_secs(wait)).await;
            }
            Err(err) if err.is_transient() => {
                if transient_retries >= config.max_transient_retries {
                    log::warn!(
                        "max transient retries ({}) exceeded for {operation_name}: {err}",
                        config.max_transient_retries
                    );
                    return Err(err);
                }
                log::warn!("{operation_name} failed transiently ({err}), retrying in {delay} seconds");
                tokio::time::sleep(std::time::Duration::from_secs(delay)).await;
                transient_retries += 1;
                delay = std::cmp::min(delay * 2, config.max_delay);
            }
            Err(err) => return Err(err),
        }
    }
}
