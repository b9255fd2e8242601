//! Thin helpers over `scraper` for querying parsed pages.
//!
//! Every query goes through an [`ElementRef`]; whole documents are queried via
//! their root element so documents and fragments behave the same.

use crate::error::{Result, ScrapeError};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

pub fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

pub fn parse_fragment(body: &str) -> Html {
    Html::parse_fragment(body)
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| ScrapeError::InvalidSelector(css.to_string()))
}

/// All matches under `root`, in document order.
pub fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(root.select(&sel).collect())
}

pub fn select_first<'a>(root: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(root.select(&sel).next())
}

/// Like [`select_first`] but the element must exist.
pub fn require_first<'a>(root: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>> {
    select_first(root, css)?
        .ok_or_else(|| ScrapeError::malformed(format!("missing element {:?}", css)))
}

/// Text content with whitespace runs collapsed.
pub fn text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Resolve a possibly relative reference against `base`.
pub fn absolute_url(base: &Url, href: &str) -> Result<Url> {
    Ok(base.join(href.trim())?)
}

/// Path, query and fragment of `url`, dropping scheme and authority.
pub fn host_relative(url: &Url) -> String {
    let mut out = url.path().to_string();
    if let Some(query) = url.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    out
}
