//! Static description of one site: where things live and how it paginates.

use crate::extractor::{self, StatusParser};
use crate::selectors::SelectorTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    Popular,
    Latest,
}

/// Fields of the WordPress "load more" handler that differ between sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMore {
    pub endpoint: &'static str,
    pub template: &'static str,
    pub popular_meta_key: &'static str,
    pub latest_meta_key: &'static str,
}

pub const MADARA_LOAD_MORE: LoadMore = LoadMore {
    endpoint: "/wp-admin/admin-ajax.php",
    template: "madara-core/content/content-archive",
    popular_meta_key: "_wp_manga_views",
    latest_meta_key: "_latest_update",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationMode {
    /// Plain GET listing pages.
    StaticList,
    /// POSTs to the AJAX load-more handler.
    AjaxLoadMore(LoadMore),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterListMode {
    /// Chapters are rendered into the series page.
    Inline,
    /// Chapters come from `{series}/ajax/chapters` via POST.
    AjaxEndpoint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub path: &'static str,
    pub query_param: &'static str,
    /// Repeated once per selected genre.
    pub genre_param: &'static str,
    pub fixed_params: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub base_url: &'static str,
    pub language: &'static str,
    /// SimpleDateFormat-style pattern, e.g. `MMM d, yyyy`.
    pub date_format: &'static str,
    pub selectors: SelectorTable,
    pub pagination: PaginationMode,
    pub chapter_list: ChapterListMode,
    /// Drop listing items the site does not classify as manga.
    pub filter_non_manga_items: bool,
    /// Listing paths; `{page}` is replaced by the page segment.
    pub popular_path: &'static str,
    pub latest_path: &'static str,
    pub search: SearchParams,
    pub genres_path: &'static str,
    pub rate_limit_per_second: f64,
}

/// Behaviour a site can swap out without touching the pipeline.
#[derive(Clone, Copy)]
pub struct SiteOverrides {
    /// Path segment inserted for `{page}` in listing paths.
    pub page_segment: fn(u32) -> String,
    pub parse_status: StatusParser,
}

fn default_page_segment(page: u32) -> String {
    format!("page/{}/", page)
}

impl Default for SiteOverrides {
    fn default() -> Self {
        Self {
            page_segment: default_page_segment,
            parse_status: extractor::parse_status,
        }
    }
}
