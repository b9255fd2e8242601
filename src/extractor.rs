//! Turns parsed pages into normalized catalog entities.
//!
//! Everything here is a pure function of the parsed page and the site's
//! selector table. Missing mandatory elements fail the whole page with
//! `MalformedDocument`; optional ones degrade to `None`, `Unknown` or 0.

use crate::date_format::DateParser;
use crate::document::{self, absolute_url, attr, host_relative, text};
use crate::error::{Result, ScrapeError};
use crate::models::{CatalogEntry, ChapterEntry, DetailRecord, Genre, MangaStatus, PageEntry};
use crate::selectors::SelectorTable;
use reqwest::Url;
use scraper::ElementRef;

/// Width hint appended to background-image thumbnails.
pub const THUMBNAIL_WIDTH: &str = "480";

/// Image source attributes, most specific first.
const IMAGE_ATTRS: [&str; 3] = ["data-lazy-src", "data-src", "src"];

pub type StatusParser = fn(Option<&str>) -> MangaStatus;

/// Case-insensitive mapping of the status vocabulary shared by the site
/// family. Never fails: anything unrecognised is `Unknown`.
pub fn parse_status(text: Option<&str>) -> MangaStatus {
    match text.map(|t| t.trim().to_lowercase()).as_deref() {
        Some("ongoing") => MangaStatus::Ongoing,
        Some("dropped") => MangaStatus::Cancelled,
        Some("paused") => MangaStatus::OnHiatus,
        Some("completed") => MangaStatus::Completed,
        _ => MangaStatus::Unknown,
    }
}

/// The `url(...)` argument of a CSS `background-image` declaration.
pub fn background_image_url(style: &str) -> Option<&str> {
    let start = style.find("url(")? + "url(".len();
    let end = start + style[start..].find(')')?;
    let url = style[start..end].trim().trim_matches(|c| c == '"' || c == '\'');
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}

fn with_width_hint(mut url: Url, width: &str) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "w")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("w", width);
    url
}

fn image_source(el: ElementRef<'_>) -> Option<&str> {
    IMAGE_ATTRS
        .iter()
        .filter_map(|name| attr(el, name))
        .map(str::trim)
        .find(|v| !v.is_empty())
}

/// Absolute thumbnail URL from an image element or a background-image style.
pub fn resolve_thumbnail(el: ElementRef<'_>, base: &Url) -> Option<String> {
    if let Some(src) = image_source(el) {
        return absolute_url(base, src).ok().map(String::from);
    }
    let raw = background_image_url(attr(el, "style")?)?;
    let url = absolute_url(base, raw).ok()?;
    Some(with_width_hint(url, THUMBNAIL_WIDTH).to_string())
}

pub struct EntryExtractor {
    table: SelectorTable,
    base_url: Url,
    dates: DateParser,
    status_parser: StatusParser,
}

impl EntryExtractor {
    pub fn new(
        table: SelectorTable,
        base_url: Url,
        dates: DateParser,
        status_parser: StatusParser,
    ) -> Self {
        Self {
            table,
            base_url,
            dates,
            status_parser,
        }
    }

    pub fn table(&self) -> &SelectorTable {
        &self.table
    }

    fn relative(&self, href: &str) -> Result<String> {
        let url = absolute_url(&self.base_url, href)?;
        let relative = host_relative(&url);
        if relative.is_empty() {
            return Err(ScrapeError::malformed(format!("empty url from href {:?}", href)));
        }
        Ok(relative)
    }

    /// Every element matched by `entry_selector`, converted in document order.
    pub fn extract_listing(&self, root: ElementRef<'_>, entry_selector: &str) -> Result<Vec<CatalogEntry>> {
        document::select_all(root, entry_selector)?
            .into_iter()
            .map(|el| self.entry_from_element(el))
            .collect()
    }

    pub fn entry_from_element(&self, el: ElementRef<'_>) -> Result<CatalogEntry> {
        let link = document::select_first(el, self.table.entry_link)?.ok_or_else(|| {
            ScrapeError::malformed(format!(
                "listing entry without title link {:?}",
                self.table.entry_link
            ))
        })?;

        let href = attr(link, "href")
            .ok_or_else(|| ScrapeError::malformed("title link without href"))?;
        let title = match self.table.entry_title_attr {
            Some(name) => attr(link, name).unwrap_or_default().trim().to_string(),
            None => text(link),
        };

        let thumbnail_url = document::select_first(el, self.table.entry_thumbnail)?
            .and_then(|thumb| resolve_thumbnail(thumb, &self.base_url));

        Ok(CatalogEntry {
            title,
            thumbnail_url,
            relative_url: self.relative(href)?,
        })
    }

    pub fn extract_detail(&self, root: ElementRef<'_>) -> Result<DetailRecord> {
        let t = &self.table;
        let title_el = document::require_first(root, t.detail_title)?;

        let optional_text = |css: &str| -> Result<Option<String>> {
            Ok(document::select_first(root, css)?
                .map(text)
                .filter(|s| !s.is_empty()))
        };

        let thumbnail_url = document::select_first(root, t.detail_thumbnail)?
            .and_then(|el| resolve_thumbnail(el, &self.base_url));
        let status_text = optional_text(t.detail_status)?;

        Ok(DetailRecord {
            title: text(title_el),
            thumbnail_url,
            description: optional_text(t.detail_description)?,
            status: (self.status_parser)(status_text.as_deref()),
            author: optional_text(t.detail_author)?,
            artist: optional_text(t.detail_artist)?,
            genres: self.detail_genres(root, title_el)?,
        })
    }

    fn detail_genres(&self, root: ElementRef<'_>, title_el: ElementRef<'_>) -> Result<Vec<String>> {
        let links = if self.table.detail_genre_near_title {
            let Some(container) = title_el.parent().and_then(ElementRef::wrap) else {
                return Ok(Vec::new());
            };
            // Only links sitting directly in the container's child blocks.
            document::select_all(container, self.table.detail_genre)?
                .into_iter()
                .filter(|a| {
                    a.parent()
                        .and_then(|p| p.parent())
                        .map(|gp| gp.id() == container.id())
                        .unwrap_or(false)
                })
                .collect()
        } else {
            document::select_all(root, self.table.detail_genre)?
        };

        Ok(links
            .into_iter()
            .map(text)
            .filter(|g| !g.is_empty())
            .collect())
    }

    /// Chapters in source order; works on full pages and AJAX fragments.
    pub fn extract_chapters(&self, root: ElementRef<'_>) -> Result<Vec<ChapterEntry>> {
        let t = &self.table;
        document::select_all(root, t.chapter_entry)?
            .into_iter()
            .map(|entry| {
                let link = if attr(entry, "href").is_some() {
                    entry
                } else {
                    document::require_first(entry, t.chapter_link)?
                };
                let href = attr(link, "href")
                    .ok_or_else(|| ScrapeError::malformed("chapter link without href"))?;

                let display_name = match t.chapter_name {
                    Some(css) => text(document::require_first(entry, css)?),
                    None => text(link),
                };

                let upload_timestamp = document::select_first(entry, t.chapter_date)?
                    .map(|el| self.dates.parse_or_zero(&text(el)))
                    .unwrap_or(0);

                Ok(ChapterEntry {
                    relative_url: self.relative(href)?,
                    display_name,
                    upload_timestamp,
                })
            })
            .collect()
    }

    pub fn extract_pages(&self, root: ElementRef<'_>) -> Result<Vec<PageEntry>> {
        let t = &self.table;
        document::select_all(root, t.page_image)?
            .into_iter()
            .enumerate()
            .map(|(position, img)| {
                let index = match t.page_index_attr {
                    Some(name) => attr(img, name)
                        .and_then(|v| v.trim().parse::<u32>().ok())
                        .ok_or_else(|| {
                            ScrapeError::malformed(format!("page image without numeric {:?}", name))
                        })?,
                    None => position as u32,
                };
                let src = image_source(img)
                    .ok_or_else(|| ScrapeError::malformed("page image without source"))?;

                let mut url = absolute_url(&self.base_url, src)?;
                if let Some(width) = t.page_width_hint {
                    url = with_width_hint(url, width);
                }

                Ok(PageEntry {
                    index,
                    image_url: url.to_string(),
                })
            })
            .collect()
    }

    pub fn extract_genres(&self, root: ElementRef<'_>) -> Result<Vec<Genre>> {
        let t = &self.table;
        let mut genres = Vec::new();

        for entry in document::select_all(root, t.genre_entry)? {
            let name = match t.genre_name {
                Some(css) => document::select_first(entry, css)?.map(text).unwrap_or_default(),
                None => text(entry),
            };
            if name.is_empty() {
                continue;
            }

            let id_el = match t.genre_id_element {
                Some(css) => document::select_first(entry, css)?,
                None => Some(entry),
            };
            let id = id_el
                .and_then(|el| attr(el, t.genre_id_attr))
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| name.clone());

            genres.push(Genre::new(name, id));
        }

        Ok(genres)
    }

    /// Probe for a next-page marker; no selector means no further pages.
    pub fn has_next_page(&self, root: ElementRef<'_>) -> Result<bool> {
        match self.table.next_page {
            Some(css) => Ok(document::select_first(root, css)?.is_some()),
            None => Ok(false),
        }
    }

    /// Load-more fragments signal exhaustion with a marker element.
    pub fn load_more_exhausted(&self, root: ElementRef<'_>) -> Result<bool> {
        Ok(document::select_first(root, self.table.no_more_posts)?.is_some())
    }
}
