//! Madara (WordPress manga theme) family defaults.

use crate::models::MangaStatus;
use crate::selectors::MADARA;
use crate::site::{ChapterListMode, PaginationMode, SearchParams, SiteConfig};

pub const SEARCH: SearchParams = SearchParams {
    path: "/",
    query_param: "s",
    genre_param: "genre[]",
    fixed_params: &[("post_type", "wp-manga")],
};

/// Listing under the default `manga` archive; `{page}` takes the page segment.
pub const POPULAR_PATH: &str = "/manga/{page}?m_orderby=views";
pub const LATEST_PATH: &str = "/manga/{page}?m_orderby=latest";

pub fn site(
    id: &'static str,
    name: &'static str,
    base_url: &'static str,
    language: &'static str,
    date_format: &'static str,
) -> SiteConfig {
    SiteConfig {
        id,
        name,
        base_url,
        language,
        date_format,
        selectors: MADARA,
        pagination: PaginationMode::StaticList,
        chapter_list: ChapterListMode::Inline,
        filter_non_manga_items: true,
        popular_path: POPULAR_PATH,
        latest_path: LATEST_PATH,
        search: SEARCH,
        // The advanced search form lists every genre checkbox.
        genres_path: "/?s=genre&post_type=wp-manga",
        rate_limit_per_second: 2.0,
    }
}

/// Status vocabulary of Madara sites, English and Spanish labels.
pub fn parse_status(text: Option<&str>) -> MangaStatus {
    let Some(text) = text else {
        return MangaStatus::Unknown;
    };
    match text.trim().to_lowercase().as_str() {
        "ongoing" | "en curso" | "en emisión" | "activo" | "publicándose" => MangaStatus::Ongoing,
        "completed" | "completado" | "finalizado" | "terminado" => MangaStatus::Completed,
        "on hold" | "en espera" | "pausado" => MangaStatus::OnHiatus,
        "canceled" | "cancelled" | "cancelado" | "abandonado" | "dropped" => MangaStatus::Cancelled,
        _ => MangaStatus::Unknown,
    }
}
