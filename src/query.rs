//! Outbound request construction for browse, search and the side pages.

use crate::error::{Result, ScrapeError};
use crate::fetcher::Request;
use crate::models::FilterState;
use crate::site::{BrowseMode, LoadMore, PaginationMode, SiteConfig};
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::Url;

const XHR_HEADER: &str = "x-requested-with";
const XHR_VALUE: &str = "XMLHttpRequest";

pub struct QueryBuilder {
    config: SiteConfig,
    base_url: Url,
    page_segment: fn(u32) -> String,
}

impl QueryBuilder {
    pub fn new(config: SiteConfig, page_segment: fn(u32) -> String) -> Result<Self> {
        let base_url = Url::parse(config.base_url)?;
        Ok(Self {
            config,
            base_url,
            page_segment,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn headers(&self) -> Result<HeaderMap> {
        let referer = format!("{}/", self.config.base_url.trim_end_matches('/'));
        let value = HeaderValue::from_str(&referer)
            .map_err(|_| ScrapeError::fetch_failed(referer.clone(), "invalid referer header"))?;
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, value);
        Ok(headers)
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    pub fn browse_request(&self, mode: BrowseMode, page: u32) -> Result<Request> {
        match &self.config.pagination {
            PaginationMode::StaticList => {
                let template = match mode {
                    BrowseMode::Popular => self.config.popular_path,
                    BrowseMode::Latest => self.config.latest_path,
                };
                let path = if template.contains("{page}") {
                    template.replace("{page}", &(self.page_segment)(page))
                } else {
                    template.to_string()
                };
                Ok(Request::get(self.url(&path)?, self.headers()?))
            }
            PaginationMode::AjaxLoadMore(load_more) => self.load_more_request(load_more, mode, page),
        }
    }

    /// POST to the load-more handler. `page` is one-based, the wire index is
    /// zero-based.
    pub fn load_more_request(&self, load_more: &LoadMore, mode: BrowseMode, page: u32) -> Result<Request> {
        let meta_key = match mode {
            BrowseMode::Popular => load_more.popular_meta_key,
            BrowseMode::Latest => load_more.latest_meta_key,
        };
        let page_index = page.saturating_sub(1).to_string();

        let fields = [
            ("action", "madara_load_more"),
            ("page", page_index.as_str()),
            ("template", load_more.template),
            ("vars[paged]", "1"),
            ("vars[orderby]", "meta_value_num"),
            ("vars[template]", "archive"),
            ("vars[sidebar]", "full"),
            ("vars[post_type]", "wp-manga"),
            ("vars[post_status]", "publish"),
            ("vars[meta_key]", meta_key),
            ("vars[order]", "desc"),
            ("vars[meta_query][relation]", "AND"),
            ("vars[manga_archives_item_layout]", "big_thumbnail"),
        ];

        Ok(
            Request::post_form(self.url(load_more.endpoint)?, self.headers()?, &fields)
                .with_header(XHR_HEADER, XHR_VALUE),
        )
    }

    /// Search always hits the canonical search path; the origin's narrowing is
    /// best-effort and results are filtered again client-side.
    pub fn search_request(&self, filters: &FilterState) -> Result<Request> {
        let search = &self.config.search;
        let mut url = self.url(search.path)?;
        {
            let mut pairs = url.query_pairs_mut();
            let query = filters.text_query.trim();
            if !query.is_empty() {
                pairs.append_pair(search.query_param, query);
            }
            for (key, value) in search.fixed_params {
                pairs.append_pair(key, value);
            }
            for id in &filters.selected_genre_ids {
                pairs.append_pair(search.genre_param, id);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(Request::get(url, self.headers()?))
    }

    pub fn genres_request(&self) -> Result<Request> {
        Ok(Request::get(self.url(self.config.genres_path)?, self.headers()?))
    }

    /// GET for a host-relative series, chapter or reader URL.
    pub fn page_request(&self, relative_url: &str) -> Result<Request> {
        Ok(Request::get(self.url(relative_url)?, self.headers()?))
    }

    /// Chapter list endpoint used by sites that load chapters by XHR.
    pub fn ajax_chapters_request(&self, relative_url: &str) -> Result<Request> {
        let series = self.url(relative_url)?;
        let endpoint = format!("{}/ajax/chapters/", series.as_str().trim_end_matches('/'));
        Ok(Request::post_form(endpoint, self.headers()?, &[]).with_header(XHR_HEADER, XHR_VALUE))
    }

    /// Older WordPress chapter handler keyed by the series post id.
    pub fn admin_ajax_chapters_request(&self, post_id: &str) -> Result<Request> {
        let fields = [("action", "manga_get_chapters"), ("manga", post_id)];
        Ok(
            Request::post_form(self.url("/wp-admin/admin-ajax.php")?, self.headers()?, &fields)
                .with_header(XHR_HEADER, XHR_VALUE),
        )
    }
}
