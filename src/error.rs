//! Error taxonomy shared by every site adapter.
//!
//! Only [`ScrapeError::FetchFailed`] and [`ScrapeError::MalformedDocument`] ever
//! leave the public adapter operations. Date and genre failures are recovered
//! where they happen and only show up in logs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport level failure: unreachable origin, timeout or non-2xx status.
    #[error("fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// A structural element that must exist is missing or unreadable.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Recovered inside the extractor, the chapter gets timestamp 0.
    #[error("could not parse date {input:?} with pattern {pattern:?}")]
    DateParseFailed { input: String, pattern: String },

    /// Recovered inside the genre cache, surfaces as an empty genre list.
    #[error("genre fetch failed: {0}")]
    GenreFetchFailed(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid selector {0:?}")]
    InvalidSelector(String),

    #[error("unknown source {0:?}")]
    UnknownSource(String),
}

impl ScrapeError {
    pub fn fetch_failed(url: impl Into<String>, reason: impl ToString) -> Self {
        ScrapeError::FetchFailed {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(what: impl Into<String>) -> Self {
        ScrapeError::MalformedDocument(what.into())
    }

    /// Short category name, used as a metrics key.
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::FetchFailed { .. } => "fetch_failed",
            ScrapeError::MalformedDocument(_) => "malformed_document",
            ScrapeError::DateParseFailed { .. } => "date_parse_failed",
            ScrapeError::GenreFetchFailed(_) => "genre_fetch_failed",
            ScrapeError::InvalidUrl(_) => "invalid_url",
            ScrapeError::InvalidSelector(_) => "invalid_selector",
            ScrapeError::UnknownSource(_) => "unknown_source",
        }
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        let url = e.url().map(|u| u.to_string()).unwrap_or_default();
        ScrapeError::FetchFailed {
            url,
            reason: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
