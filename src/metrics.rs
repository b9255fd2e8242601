/// Per-source operation metrics
///
/// Tracks success rates, failure categories and response times for every
/// source adapter operation.

use crate::error::ScrapeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetrics {
    pub source_name: String,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub average_response_time_ms: f64,
    pub total_response_time_ms: u64,
    pub fetch_failures: u64,
    pub malformed_documents: u64,
}

impl SourceMetrics {
    pub fn new(source_name: String) -> Self {
        Self {
            source_name,
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
            last_success: None,
            last_failure: None,
            last_error: None,
            average_response_time_ms: 0.0,
            total_response_time_ms: 0,
            fetch_failures: 0,
            malformed_documents: 0,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            (self.successful_requests as f64 / self.total_requests as f64) * 100.0
        }
    }

    pub fn record_success(&mut self, response_time: Duration) {
        self.total_requests += 1;
        self.successful_requests += 1;
        self.last_success = Some(Utc::now());

        self.total_response_time_ms += response_time.as_millis() as u64;
        self.average_response_time_ms =
            self.total_response_time_ms as f64 / self.successful_requests as f64;
    }

    pub fn record_failure(&mut self, error: &ScrapeError) {
        self.total_requests += 1;
        self.failed_requests += 1;
        self.last_failure = Some(Utc::now());
        self.last_error = Some(error.to_string());

        match error {
            ScrapeError::FetchFailed { .. } => self.fetch_failures += 1,
            ScrapeError::MalformedDocument(_) => self.malformed_documents += 1,
            _ => {}
        }
    }
}

/// Shared tracker, keyed by source id
#[derive(Clone, Default)]
pub struct MetricsTracker {
    metrics: Arc<Mutex<HashMap<String, SourceMetrics>>>,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_source<R>(&self, source_name: &str, f: impl FnOnce(&mut SourceMetrics) -> R) -> R {
        // A poisoned lock only means another thread panicked mid-update.
        let mut metrics = self.metrics.lock().unwrap_or_else(|e| e.into_inner());
        let entry = metrics
            .entry(source_name.to_string())
            .or_insert_with(|| SourceMetrics::new(source_name.to_string()));
        f(entry)
    }

    pub fn record_success(&self, source_name: &str, response_time: Duration) {
        let rate = self.with_source(source_name, |m| {
            m.record_success(response_time);
            m.success_rate()
        });
        log::debug!(
            "[{}] Success - Response time: {}ms - Success rate: {:.2}%",
            source_name,
            response_time.as_millis(),
            rate
        );
    }

    pub fn record_failure(&self, source_name: &str, error: &ScrapeError) {
        let rate = self.with_source(source_name, |m| {
            m.record_failure(error);
            m.success_rate()
        });
        log::warn!(
            "[{}] Failure - Error: {} - Success rate: {:.2}%",
            source_name,
            error,
            rate
        );
    }

    pub fn get_metrics(&self, source_name: &str) -> Option<SourceMetrics> {
        let metrics = self.metrics.lock().unwrap_or_else(|e| e.into_inner());
        metrics.get(source_name).cloned()
    }

    pub fn get_all_metrics(&self) -> Vec<SourceMetrics> {
        let metrics = self.metrics.lock().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<_> = metrics.values().cloned().collect();
        all.sort_by(|a, b| a.source_name.cmp(&b.source_name));
        all
    }
}

/// Time an operation and record its outcome
pub async fn track_request<F, T>(
    tracker: &MetricsTracker,
    source_name: &str,
    operation: F,
) -> Result<T, ScrapeError>
where
    F: Future<Output = Result<T, ScrapeError>>,
{
    let start = Instant::now();
    let result = operation.await;
    let duration = start.elapsed();

    match &result {
        Ok(_) => tracker.record_success(source_name, duration),
        Err(e) => tracker.record_failure(source_name, e),
    }

    result
}
