//! Cursor pagination over rate-limited remote endpoints.
//!
//! Both remote services page their listings with an opaque cursor: each
//! response carries the items for that page plus a token for the next page,
//! terminating when no token is returned. [`fetch_all`] drains such an
//! endpoint into a single ordered `Vec`, routing every page request through
//! the shared retry policy so rate-limit signals re-request the same page.

use crate::retry::{retry_with_backoff, RetryConfig};
use crate::Result;
use std::future::Future;

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items on this page, in response order.
    pub items: Vec<T>,
    /// Cursor for the next page, or `None` when this is the last page.
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// A final page carrying the given items.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// An intermediate page pointing at `next_cursor`.
    pub fn with_next(items: Vec<T>, next_cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(next_cursor.into()),
        }
    }
}

/// Fetch every page of a cursor-paginated endpoint.
///
/// `fetch_page` is called with `None` for the first page and with the
/// previous page's cursor afterwards, until a page comes back without a
/// `next_cursor`. Items are concatenated in response order.
///
/// Each page request runs under [`retry_with_backoff`], so a rate-limit
/// signal pauses and retries the *same* page, and transient network errors
/// are retried up to the configured cap before the whole fetch fails.
///
/// # Examples
///
/// ```rust
/// use playlist_backup::{fetch_all, Page, RetryConfig};
///
/// # tokio_test::block_on(async {
/// let pages = vec![
///     Page::with_next(vec![1, 2], "cursor-1"),
///     Page::last(vec![3]),
/// ];
/// let mut remaining = pages.into_iter();
///
/// let items = fetch_all(&RetryConfig::default(), "numbers", |_cursor| {
///     let page = remaining.next().unwrap();
///     async move { Ok(page) }
/// })
/// .await
/// .unwrap();
///
/// assert_eq!(items, vec![1, 2, 3]);
/// # });
/// ```
pub async fn fetch_all<T, F, Fut>(
    retry: &RetryConfig,
    operation_name: &str,
    mut fetch_page: F,
) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page_number = 0u32;

    loop {
        log::debug!("fetching {operation_name} page {page_number} (cursor: {cursor:?})");
        let page = retry_with_backoff(retry, operation_name, || fetch_page(cursor.clone())).await?;
        items.extend(page.items);
        page_number += 1;

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    log::debug!("{operation_name}: fetched {} items over {page_number} pages", items.len());
    Ok(items)
}
