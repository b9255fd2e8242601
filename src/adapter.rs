//! Composition root binding one site's configuration to the generic pipeline.

use crate::date_format::DateParser;
use crate::document::{self, parse_document, parse_fragment};
use crate::error::Result;
use crate::extractor::EntryExtractor;
use crate::fetcher::{DocumentFetcher, Request};
use crate::filter::ResultFilter;
use crate::genre_cache::{GenreCache, GenreCacheState};
use crate::metrics::{track_request, MetricsTracker};
use crate::models::{
    ChapterEntry, DetailRecord, FilterItem, FilterState, Genre, MangasPage, PageEntry, SourceInfo,
};
use crate::query::QueryBuilder;
use crate::site::{BrowseMode, ChapterListMode, PaginationMode, SiteConfig, SiteOverrides};
use scraper::Html;
use std::sync::Arc;

const GENRE_HINT: &str = "Press 'Reset' to attempt to show the genres";

pub struct SiteAdapter {
    config: SiteConfig,
    fetcher: Arc<dyn DocumentFetcher>,
    queries: QueryBuilder,
    extractor: EntryExtractor,
    genres: GenreCache,
    metrics: MetricsTracker,
}

impl SiteAdapter {
    pub fn new(
        config: SiteConfig,
        overrides: SiteOverrides,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Result<Self> {
        let queries = QueryBuilder::new(config.clone(), overrides.page_segment)?;
        let extractor = EntryExtractor::new(
            config.selectors.clone(),
            queries.base_url().clone(),
            DateParser::new(config.date_format),
            overrides.parse_status,
        );

        Ok(Self {
            config,
            fetcher,
            queries,
            extractor,
            genres: GenreCache::new(),
            metrics: MetricsTracker::new(),
        })
    }

    /// Share a metrics tracker with other adapters.
    pub fn with_metrics(mut self, metrics: MetricsTracker) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn info(&self) -> SourceInfo {
        SourceInfo {
            id: self.config.id.to_string(),
            name: self.config.name.to_string(),
            base_url: self.config.base_url.to_string(),
            language: self.config.language.to_string(),
            pagination: match self.config.pagination {
                PaginationMode::StaticList => "static_list".to_string(),
                PaginationMode::AjaxLoadMore(_) => "ajax_load_more".to_string(),
            },
        }
    }

    async fn fetch_text(&self, request: &Request) -> Result<String> {
        log::debug!("[{}] {} {}", self.config.id, request.method, request.url);
        let response = self.fetcher.execute(request).await?;
        response.into_text(&request.url)
    }

    async fn load_genres(&self) -> Result<Vec<Genre>> {
        let request = self.queries.genres_request()?;
        let body = self.fetch_text(&request).await?;
        let doc = parse_document(&body);
        self.extractor.extract_genres(doc.root_element())
    }

    /// Best-effort genre refresh; never fails.
    pub async fn refresh_genres(&self) -> Vec<Genre> {
        self.genres.refresh_if_needed(|| self.load_genres()).await
    }

    pub async fn genres(&self) -> Vec<Genre> {
        self.genres.genres().await
    }

    pub async fn genre_cache_state(&self) -> GenreCacheState {
        self.genres.snapshot().await
    }

    /// Filter UI for the host: the genre group, or a hint while it is empty.
    pub async fn filters(&self) -> Vec<FilterItem> {
        let genres = self.genres.genres().await;
        if genres.is_empty() {
            vec![FilterItem::Header {
                text: GENRE_HINT.to_string(),
            }]
        } else {
            vec![FilterItem::Genres {
                title: "Genres".to_string(),
                genres,
            }]
        }
    }

    pub async fn browse_popular(&self, page: u32) -> Result<MangasPage> {
        track_request(&self.metrics, self.config.id, self.browse(BrowseMode::Popular, page)).await
    }

    pub async fn browse_latest(&self, page: u32) -> Result<MangasPage> {
        track_request(&self.metrics, self.config.id, self.browse(BrowseMode::Latest, page)).await
    }

    async fn browse(&self, mode: BrowseMode, page: u32) -> Result<MangasPage> {
        let request = self.queries.browse_request(mode, page)?;
        let body = self.fetch_text(&request).await?;
        self.refresh_genres().await;

        let table = self.extractor.table();
        let base = match mode {
            BrowseMode::Popular => table.popular_entry,
            BrowseMode::Latest => table.latest_entry,
        };
        let entry_selector = table.listing_entry(base, self.config.filter_non_manga_items);

        let result = match self.config.pagination {
            PaginationMode::StaticList => {
                let doc = parse_document(&body);
                let root = doc.root_element();
                MangasPage {
                    entries: self.extractor.extract_listing(root, &entry_selector)?,
                    has_next_page: self.extractor.has_next_page(root)?,
                }
            }
            PaginationMode::AjaxLoadMore(_) => {
                let doc = parse_fragment(&body);
                let root = doc.root_element();
                let entries = self.extractor.extract_listing(root, &entry_selector)?;
                let has_next_page =
                    !entries.is_empty() && !self.extractor.load_more_exhausted(root)?;
                MangasPage {
                    entries,
                    has_next_page,
                }
            }
        };

        log::info!(
            "[{}] {:?} page {}: {} entries",
            self.config.id,
            mode,
            page,
            result.entries.len()
        );
        Ok(result)
    }

    /// Search with free text and genre filters.
    ///
    /// A non-blank `query` takes precedence over `filters.text_query`. The
    /// whole result set comes back in one response, so there is never a next
    /// page.
    pub async fn search(&self, query: &str, filters: &FilterState, page: u32) -> Result<MangasPage> {
        track_request(&self.metrics, self.config.id, self.search_inner(query, filters, page)).await
    }

    async fn search_inner(&self, query: &str, filters: &FilterState, page: u32) -> Result<MangasPage> {
        let filters = if query.trim().is_empty() {
            filters.clone()
        } else {
            FilterState {
                text_query: query.to_string(),
                selected_genre_ids: filters.selected_genre_ids.clone(),
            }
        };
        if page > 1 {
            log::debug!("[{}] search results are not paginated, page {} ignored", self.config.id, page);
        }

        let request = self.queries.search_request(&filters)?;
        let body = self.fetch_text(&request).await?;
        self.refresh_genres().await;

        let doc = parse_document(&body);
        let table = self.extractor.table();
        // Search result blocks carry no content-type class, so the manga-only
        // qualifier applies to browse listings only.
        let filter = ResultFilter::new(&filters, table.search_title_attr, table.search_tags_attr);

        let mut entries = Vec::new();
        for el in document::select_all(doc.root_element(), table.search_entry)? {
            if filter.matches(el)? {
                entries.push(self.extractor.entry_from_element(el)?);
            }
        }

        log::info!(
            "[{}] search {:?} with {} genres: {} entries",
            self.config.id,
            filters.text_query,
            filters.selected_genre_ids.len(),
            entries.len()
        );
        Ok(MangasPage {
            entries,
            has_next_page: false,
        })
    }

    pub async fn fetch_detail(&self, relative_url: &str) -> Result<DetailRecord> {
        track_request(&self.metrics, self.config.id, async {
            let body = self.fetch_text(&self.queries.page_request(relative_url)?).await?;
            let doc = parse_document(&body);
            self.extractor.extract_detail(doc.root_element())
        })
        .await
    }

    pub async fn fetch_chapters(&self, relative_url: &str) -> Result<Vec<ChapterEntry>> {
        track_request(&self.metrics, self.config.id, self.chapters_inner(relative_url)).await
    }

    async fn chapters_inner(&self, relative_url: &str) -> Result<Vec<ChapterEntry>> {
        if self.config.chapter_list == ChapterListMode::AjaxEndpoint {
            let request = self.queries.ajax_chapters_request(relative_url)?;
            return self.chapters_from_fragment(&request).await;
        }

        let body = self.fetch_text(&self.queries.page_request(relative_url)?).await?;
        let post_id = {
            let doc = parse_document(&body);
            let root = doc.root_element();
            let chapters = self.extractor.extract_chapters(root)?;
            if !chapters.is_empty() {
                return Ok(chapters);
            }
            chapter_holder_id(&doc, self.extractor.table().chapter_holder)?
        };

        match post_id {
            Some(id) => {
                log::debug!("[{}] no inline chapters, asking admin-ajax for {}", self.config.id, id);
                let request = self.queries.admin_ajax_chapters_request(&id)?;
                self.chapters_from_fragment(&request).await
            }
            None => Ok(Vec::new()),
        }
    }

    async fn chapters_from_fragment(&self, request: &Request) -> Result<Vec<ChapterEntry>> {
        let body = self.fetch_text(request).await?;
        let doc = parse_fragment(&body);
        self.extractor.extract_chapters(doc.root_element())
    }

    pub async fn fetch_pages(&self, relative_url: &str) -> Result<Vec<PageEntry>> {
        track_request(&self.metrics, self.config.id, async {
            let body = self.fetch_text(&self.queries.page_request(relative_url)?).await?;
            let doc = parse_document(&body);
            self.extractor.extract_pages(doc.root_element())
        })
        .await
    }
}

fn chapter_holder_id(doc: &Html, css: &str) -> Result<Option<String>> {
    Ok(document::select_first(doc.root_element(), css)?
        .and_then(|el| document::attr(el, "data-id"))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string))
}
