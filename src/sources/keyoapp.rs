//! Keyoapp family defaults.
//!
//! Keyoapp sites render the whole catalog into a handful of static pages:
//! popular on the home page, latest on `/latest/`, and search plus the genre
//! taxonomy on `/series/`. None of them paginate.

use crate::selectors::KEYOAPP;
use crate::site::{ChapterListMode, PaginationMode, SearchParams, SiteConfig};

pub const DATE_FORMAT: &str = "MMM d, yyyy";

pub const SEARCH: SearchParams = SearchParams {
    path: "/series/",
    query_param: "q",
    genre_param: "genre",
    fixed_params: &[],
};

pub fn site(
    id: &'static str,
    name: &'static str,
    base_url: &'static str,
    language: &'static str,
) -> SiteConfig {
    SiteConfig {
        id,
        name,
        base_url,
        language,
        date_format: DATE_FORMAT,
        selectors: KEYOAPP,
        pagination: PaginationMode::StaticList,
        chapter_list: ChapterListMode::Inline,
        // Keyoapp listings only carry series, there is nothing to filter.
        filter_non_manga_items: false,
        popular_path: "/",
        latest_path: "/latest/",
        search: SEARCH,
        genres_path: "/series/",
        rate_limit_per_second: 2.0,
    }
}
