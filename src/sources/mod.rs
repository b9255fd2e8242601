// Site families
pub mod keyoapp;
pub mod madara;

// Keyoapp sites
pub mod edscanlation;
pub mod kewnscans;

// Madara sites
pub mod legendsnofansub;
pub mod topmanhua;

use crate::adapter::SiteAdapter;
use crate::error::{Result, ScrapeError};
use crate::fetcher::DocumentFetcher;
use crate::metrics::MetricsTracker;
use crate::models::SourceInfo;
use crate::rate_limiter::RateLimitedFetcher;
use crate::site::{SiteConfig, SiteOverrides};
use std::collections::BTreeMap;
use std::sync::Arc;

pub type SourceFactory = (&'static str, fn() -> SiteConfig, fn() -> SiteOverrides);

pub const SOURCES: &[SourceFactory] = &[
    (kewnscans::ID, kewnscans::config, kewnscans::overrides),
    (edscanlation::ID, edscanlation::config, edscanlation::overrides),
    (topmanhua::ID, topmanhua::config, topmanhua::overrides),
    (legendsnofansub::ID, legendsnofansub::config, legendsnofansub::overrides),
];

/// Build one adapter whose requests go through a per-site rate limiter.
pub fn build_adapter(
    config: SiteConfig,
    overrides: SiteOverrides,
    fetcher: Arc<dyn DocumentFetcher>,
    metrics: MetricsTracker,
) -> Result<SiteAdapter> {
    let limited = RateLimitedFetcher::new(fetcher, config.rate_limit_per_second);
    Ok(SiteAdapter::new(config, overrides, Arc::new(limited))?.with_metrics(metrics))
}

/// Every configured site, keyed by id.
pub struct SourceRegistry {
    adapters: BTreeMap<&'static str, Arc<SiteAdapter>>,
}

impl SourceRegistry {
    /// `enabled` restricts the registry to the listed ids; `None` enables all.
    /// `rate_limit` replaces every site's own request rate when set.
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        metrics: MetricsTracker,
        enabled: Option<&[String]>,
        rate_limit: Option<f64>,
    ) -> Result<Self> {
        let mut adapters = BTreeMap::new();
        for (id, config, overrides) in SOURCES {
            if let Some(enabled) = enabled {
                if !enabled.iter().any(|e| e == id) {
                    log::debug!("Source {} disabled by configuration", id);
                    continue;
                }
            }
            let mut config = config();
            if let Some(rate) = rate_limit {
                config.rate_limit_per_second = rate;
            }
            let adapter = build_adapter(config, overrides(), fetcher.clone(), metrics.clone())?;
            adapters.insert(*id, Arc::new(adapter));
        }

        if let Some(enabled) = enabled {
            for id in enabled {
                if !adapters.contains_key(id.as_str()) {
                    log::warn!("Unknown source {} in enabled_sources", id);
                }
            }
        }

        log::info!("Registered {} sources", adapters.len());
        Ok(Self { adapters })
    }

    pub fn get(&self, id: &str) -> Result<Arc<SiteAdapter>> {
        self.adapters
            .get(id)
            .cloned()
            .ok_or_else(|| ScrapeError::UnknownSource(id.to_string()))
    }

    pub fn list(&self) -> Vec<SourceInfo> {
        self.adapters.values().map(|a| a.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{Request, Response};
    use async_trait::async_trait;

    struct NoNetwork;

    #[async_trait]
    impl DocumentFetcher for NoNetwork {
        async fn execute(&self, request: &Request) -> Result<Response> {
            Err(ScrapeError::fetch_failed(request.url.clone(), "offline"))
        }
    }

    #[test]
    fn test_every_source_builds() {
        let registry =
            SourceRegistry::new(Arc::new(NoNetwork), MetricsTracker::new(), None, None).unwrap();
        assert_eq!(registry.len(), SOURCES.len());

        let ids: Vec<String> = registry.list().into_iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec!["edscanlation", "kewnscans", "legendsnofansub", "topmanhua"]
        );
    }

    #[test]
    fn test_enabled_sources_and_unknown_lookup() {
        let enabled = vec!["topmanhua".to_string(), "nope".to_string()];
        let registry = SourceRegistry::new(
            Arc::new(NoNetwork),
            MetricsTracker::new(),
            Some(enabled.as_slice()),
            Some(1.0),
        )
        .unwrap();

        assert_eq!(registry.len(), 1);
        let adapter = registry.get("topmanhua").unwrap();
        assert_eq!(adapter.config().rate_limit_per_second, 1.0);
        assert!(matches!(
            registry.get("kewnscans"),
            Err(ScrapeError::UnknownSource(_))
        ));
    }

    #[test]
    fn test_source_info_reports_pagination() {
        let registry =
            SourceRegistry::new(Arc::new(NoNetwork), MetricsTracker::new(), None, None).unwrap();
        let info = registry.get("legendsnofansub").unwrap().info();
        assert_eq!(info.language, "es");
        assert_eq!(info.pagination, "ajax_load_more");
    }
}
