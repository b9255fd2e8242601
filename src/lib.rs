// Library interface for multisrc_scraper
// The binary and the integration tests both build on these modules

pub mod adapter;
pub mod app_state;
pub mod config;
pub mod date_format;
pub mod document;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod filter;
pub mod genre_cache;
pub mod http_client;
pub mod metrics;
pub mod models;
pub mod query;
pub mod rate_limiter;
pub mod routes;
pub mod selectors;
pub mod site;
pub mod sources;

pub use adapter::SiteAdapter;
pub use error::{Result, ScrapeError};
