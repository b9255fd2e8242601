//! Client-side narrowing of search results.
//!
//! The origin's search endpoint does not reliably intersect a text query with
//! several genres, so every search entry is checked again against its title
//! attribute and the JSON tag list embedded in its markup.

use crate::document::attr;
use crate::error::{Result, ScrapeError};
use crate::models::FilterState;
use scraper::ElementRef;

pub struct ResultFilter<'a> {
    query: String,
    genres: Vec<&'a str>,
    title_attr: Option<&'static str>,
    tags_attr: Option<&'static str>,
}

impl<'a> ResultFilter<'a> {
    pub fn new(
        filters: &'a FilterState,
        title_attr: Option<&'static str>,
        tags_attr: Option<&'static str>,
    ) -> Self {
        Self {
            query: filters.text_query.trim().to_lowercase(),
            genres: filters.selected_genre_ids.iter().map(String::as_str).collect(),
            title_attr,
            tags_attr,
        }
    }

    /// Whether the entry passes both predicates. A tag list that cannot be
    /// decoded fails the whole request.
    pub fn matches(&self, entry: ElementRef<'_>) -> Result<bool> {
        Ok(self.title_matches(entry) && self.genres_match(entry)?)
    }

    fn title_matches(&self, entry: ElementRef<'_>) -> bool {
        let Some(name) = self.title_attr else {
            return true;
        };
        if self.query.is_empty() {
            return true;
        }
        attr(entry, name)
            .map(|title| title.to_lowercase().contains(&self.query))
            .unwrap_or(false)
    }

    fn genres_match(&self, entry: ElementRef<'_>) -> Result<bool> {
        let Some(name) = self.tags_attr else {
            return Ok(true);
        };
        let tags = decode_tags(attr(entry, name).unwrap_or_default())?;
        Ok(all_genres_tagged(&self.genres, &tags))
    }
}

pub fn decode_tags(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw)
        .map_err(|e| ScrapeError::malformed(format!("undecodable tag list {:?}: {}", raw, e)))
}

/// Every selected genre must equal, ignoring case, at least one tag.
pub fn all_genres_tagged(selected: &[&str], tags: &[String]) -> bool {
    selected
        .iter()
        .all(|genre| {
            let genre = genre.to_lowercase();
            tags.iter().any(|tag| tag.to_lowercase() == genre)
        })
}
