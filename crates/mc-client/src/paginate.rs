//! Cursor-driven pagination.
//!
//! A listing is walked by feeding each response's cursor into the next
//! request, starting with no cursor, until a response carries none. A cursor
//! that comes back a second time is a protocol violation and ends the walk
//! with an error.

use futures::stream::{self, Stream, TryStreamExt};
use std::collections::HashSet;
use std::future::Future;

use crate::error::{Error, ErrorKind, Result};

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }

    /// True when no further pages follow.
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

struct WalkState<F> {
    fetch: F,
    cursor: Option<String>,
    seen: HashSet<String>,
    finished: bool,
}

/// Stream the pages of a listing in provider order.
///
/// `fetch` is called with the cursor to continue from (`None` for the first
/// page). Each page is yielded before the next one is requested.
pub fn pages<'a, T, F, Fut>(
    endpoint: &'a str,
    fetch: F,
) -> impl Stream<Item = Result<Page<T>>> + 'a
where
    T: 'a,
    F: FnMut(Option<String>) -> Fut + 'a,
    Fut: Future<Output = Result<Page<T>>> + 'a,
{
    let state = WalkState {
        fetch,
        cursor: None,
        seen: HashSet::new(),
        finished: false,
    };

    stream::try_unfold(state, move |state| advance(endpoint, state))
}

async fn advance<T, F, Fut>(
    endpoint: &str,
    mut state: WalkState<F>,
) -> Result<Option<(Page<T>, WalkState<F>)>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    if state.finished {
        return Ok(None);
    }

    let page = (state.fetch)(state.cursor.take()).await?;

    match &page.next_cursor {
        Some(next) => {
            if !state.seen.insert(next.clone()) {
                return Err(Error::new(ErrorKind::RepeatedCursor {
                    endpoint: endpoint.to_string(),
                    cursor: next.clone(),
                }));
            }
            state.cursor = Some(next.clone());
        }
        None => state.finished = true,
    }

    Ok(Some((page, state)))
}

/// Walk every page of a listing and return the flattened items.
pub async fn collect_all<'a, T, F, Fut>(endpoint: &'a str, fetch: F) -> Result<Vec<T>>
where
    T: 'a,
    F: FnMut(Option<String>) -> Fut + 'a,
    Fut: Future<Output = Result<Page<T>>> + 'a,
{
    pages(endpoint, fetch)
        .try_fold(Vec::new(), |mut all, page| async move {
            all.extend(page.items);
            Ok(all)
        })
        .await
}
