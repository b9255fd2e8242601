//! Application state for the Actix-web server
//!
//! `AppState` is wrapped in `web::Data` and shared across all HTTP handlers.
//! Adapters are internally synchronized, so no outer lock is needed.

use crate::config::Config;
use crate::fetcher::DocumentFetcher;
use crate::metrics::MetricsTracker;
use crate::sources::SourceRegistry;
use std::sync::Arc;

pub struct AppState {
    /// Every registered site adapter
    pub registry: SourceRegistry,
    /// Metrics tracker shared with every adapter
    pub metrics: MetricsTracker,
}

impl AppState {
    /// Register the enabled sources on top of `fetcher`.
    pub fn new(config: &Config, fetcher: Arc<dyn DocumentFetcher>) -> crate::error::Result<Self> {
        let metrics = MetricsTracker::new();
        let registry = SourceRegistry::new(
            fetcher,
            metrics.clone(),
            config.enabled_sources.as_deref(),
            config.http.rate_limit_per_second,
        )?;
        Ok(Self { registry, metrics })
    }
}
