use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One series as it appears on a browse or search listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    pub thumbnail_url: Option<String>,
    /// Host-relative (path, query and fragment only).
    pub relative_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum MangaStatus {
    Ongoing,
    Completed,
    OnHiatus,
    Cancelled,
    #[default]
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub status: MangaStatus,
    pub author: Option<String>,
    pub artist: Option<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    pub relative_url: String,
    pub display_name: String,
    /// Epoch milliseconds, 0 when the source date could not be read.
    pub upload_timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub index: u32,
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Genre {
    pub display_name: String,
    /// Value sent back as the filter parameter.
    pub id: String,
}

impl Genre {
    pub fn new(display_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            id: id.into(),
        }
    }

    /// Genre whose id is its display name.
    pub fn named(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            id: display_name.clone(),
            display_name,
        }
    }
}

/// Browse/search result envelope.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MangasPage {
    pub entries: Vec<CatalogEntry>,
    pub has_next_page: bool,
}

/// Caller-supplied search selections, built fresh for every search call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub text_query: String,
    pub selected_genre_ids: BTreeSet<String>,
}

impl FilterState {
    pub fn new<I, S>(text_query: impl Into<String>, genre_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text_query: text_query.into(),
            selected_genre_ids: genre_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// What a host should render as the filter UI for a source.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterItem {
    Header { text: String },
    Genres { title: String, genres: Vec<Genre> },
}

#[derive(Debug, Serialize, Clone)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    pub base_url: String,
    pub language: String,
    pub pagination: String,
}
