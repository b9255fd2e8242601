//! Per-source request spacing, applied as a wrapper around any fetcher.

use crate::error::Result;
use crate::fetcher::{DocumentFetcher, Request, Response};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Spaces requests so that at most `permits_per_second` start in any second.
pub struct RateLimitedFetcher {
    inner: Arc<dyn DocumentFetcher>,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimitedFetcher {
    pub fn new(inner: Arc<dyn DocumentFetcher>, permits_per_second: f64) -> Self {
        // Rates too small for a representable interval never release a second request.
        let min_interval = if permits_per_second > 0.0 {
            Duration::try_from_secs_f64(1.0 / permits_per_second).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Self {
            inner,
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                log::debug!("Rate limit: waiting {}ms", wait_time.as_millis());
                sleep(wait_time).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl DocumentFetcher for RateLimitedFetcher {
    async fn execute(&self, request: &Request) -> Result<Response> {
        self.acquire().await;
        self.inner.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;

    struct Echo;

    #[async_trait]
    impl DocumentFetcher for Echo {
        async fn execute(&self, _request: &Request) -> Result<Response> {
            Ok(Response { status: 200, body: Vec::new() })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_are_spaced() {
        let limited = RateLimitedFetcher::new(Arc::new(Echo), 2.0);
        let req = Request::get("https://example.com", HeaderMap::new());

        let start = Instant::now();
        for _ in 0..3 {
            limited.execute(&req).await.unwrap();
        }

        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_rate_means_unlimited() {
        let limited = RateLimitedFetcher::new(Arc::new(Echo), 0.0);
        let req = Request::get("https://example.com", HeaderMap::new());

        let start = Instant::now();
        for _ in 0..5 {
            limited.execute(&req).await.unwrap();
        }

        assert!(start.elapsed() < Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_vanishing_rate_still_serves_first_request() {
        let limited = RateLimitedFetcher::new(Arc::new(Echo), 1e-320);
        assert_eq!(limited.min_interval, Duration::MAX);

        let req = Request::get("https://example.com", HeaderMap::new());
        assert_eq!(limited.execute(&req).await.unwrap().status, 200);
    }
}
