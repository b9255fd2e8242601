//! Bounded, failure-sticky cache for a source's genre taxonomy.
//!
//! Genres live on a separate page, so they are fetched opportunistically
//! while browsing. A failed fetch leaves the list empty and is retried on the
//! next browse, but never more than [`MAX_GENRE_FETCH_ATTEMPTS`] times in the
//! life of the adapter.

use crate::error::{Result, ScrapeError};
use crate::models::Genre;
use std::future::Future;
use tokio::sync::Mutex;

pub const MAX_GENRE_FETCH_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreCacheState {
    pub genres: Vec<Genre>,
    pub attempt_count: u32,
    pub last_attempt_failed: bool,
}

impl GenreCacheState {
    fn needs_refresh(&self) -> bool {
        self.attempt_count < MAX_GENRE_FETCH_ATTEMPTS
            && (self.genres.is_empty() || self.last_attempt_failed)
    }
}

#[derive(Debug, Default)]
pub struct GenreCache {
    // Held across the fetch so concurrent refreshes run one at a time.
    state: Mutex<GenreCacheState>,
}

impl GenreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `load` if the cache is empty or failed and attempts remain.
    ///
    /// Never fails: a load error is recorded in the state and the current
    /// (possibly empty) genre list is returned.
    pub async fn refresh_if_needed<F, Fut>(&self, load: F) -> Vec<Genre>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Genre>>>,
    {
        let mut state = self.state.lock().await;
        if !state.needs_refresh() {
            return state.genres.clone();
        }

        match load().await {
            Ok(genres) => {
                log::debug!("Fetched {} genres", genres.len());
                state.genres = genres;
                state.last_attempt_failed = false;
            }
            Err(e) => {
                let e = ScrapeError::GenreFetchFailed(e.to_string());
                log::warn!(
                    "{} (attempt {}/{})",
                    e,
                    state.attempt_count + 1,
                    MAX_GENRE_FETCH_ATTEMPTS
                );
                state.genres.clear();
                state.last_attempt_failed = true;
            }
        }
        state.attempt_count += 1;

        state.genres.clone()
    }

    pub async fn genres(&self) -> Vec<Genre> {
        self.state.lock().await.genres.clone()
    }

    pub async fn snapshot(&self) -> GenreCacheState {
        self.state.lock().await.clone()
    }
}
