use crate::site::{ChapterListMode, PaginationMode, SiteConfig, SiteOverrides, MADARA_LOAD_MORE};

pub const ID: &str = "legendsnofansub";
const BASE_URL: &str = "https://legnmangas.com";

/// Spanish Madara site that pages its listings through the load-more
/// handler and serves chapters from the per-series endpoint.
pub fn config() -> SiteConfig {
    SiteConfig {
        pagination: PaginationMode::AjaxLoadMore(MADARA_LOAD_MORE),
        chapter_list: ChapterListMode::AjaxEndpoint,
        rate_limit_per_second: 2.0,
        ..crate::sources::madara::site(ID, "Legends No Fansub", BASE_URL, "es", "dd/MM/yyyy")
    }
}

pub fn overrides() -> SiteOverrides {
    SiteOverrides {
        parse_status: crate::sources::madara::parse_status,
        ..SiteOverrides::default()
    }
}
