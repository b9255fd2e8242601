//! Canned-response fetcher shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use multisrc_scraper::error::{Result, ScrapeError};
use multisrc_scraper::fetcher::{DocumentFetcher, Request, Response};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Serves registered bodies by exact URL and records every request.
/// Unregistered URLs answer 404.
#[derive(Default)]
pub struct StubFetcher {
    routes: Mutex<HashMap<String, (u16, String)>>,
    requests: Mutex<Vec<Request>>,
}

impl StubFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, url: &str, body: &str) {
        self.route_status(url, 200, body);
    }

    pub fn route_status(&self, url: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }
}

#[async_trait]
impl DocumentFetcher for StubFetcher {
    async fn execute(&self, request: &Request) -> Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        let route = self.routes.lock().unwrap().get(&request.url).cloned();
        match route {
            Some((status, body)) => Ok(Response {
                status,
                body: body.into_bytes(),
            }),
            None => Ok(Response {
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}

/// Fetcher whose transport always fails.
pub struct OfflineFetcher;

#[async_trait]
impl DocumentFetcher for OfflineFetcher {
    async fn execute(&self, request: &Request) -> Result<Response> {
        Err(ScrapeError::fetch_failed(request.url.clone(), "connection refused"))
    }
}

pub const KEYOAPP_BASE: &str = "https://kewnscans.org";

pub const KEYOAPP_HOME: &str = r#"
<html><body>
<div class="flex-col">
  <div class="grid">
    <div class="group border">
      <a href="/series/solo-leveling/" title="Solo Leveling">
        <div style="background-image:url(https://cdn.kewnscans.org/covers/solo.jpg)"></div>
      </a>
    </div>
    <div class="group border">
      <a href="https://kewnscans.org/series/omniscient-reader/" title=" Omniscient Reader ">
        <div style="background-image:url('/covers/orv.webp')"></div>
      </a>
    </div>
  </div>
</div>
</body></html>
"#;

pub const KEYOAPP_SERIES: &str = r#"
<html><body>
<div id="series_tags_page">
  <button tag="action">Action</button>
  <button tag="fantasy">Fantasy</button>
  <button tag="romance">Romance</button>
</div>
<div id="searched_series_page">
  <button title="Solo Leveling" tags='["Action","Fantasy"]'>
    <a href="/series/solo-leveling/" title="Solo Leveling"><div style="background-image:url(/covers/solo.jpg)"></div></a>
  </button>
  <button title="Solo Camping" tags='["Slice of Life"]'>
    <a href="/series/solo-camping/" title="Solo Camping"></a>
  </button>
  <button title="Villainess Level 99" tags='["Action","Romance"]'>
    <a href="/series/villainess/" title="Villainess Level 99"></a>
  </button>
</div>
</body></html>
"#;

pub const KEYOAPP_DETAIL: &str = r#"
<html><body>
<div class="grid">
  <div class="photoURL" style="background-image:url(/covers/solo.jpg)"></div>
  <h1> Solo Leveling </h1>
  <div class="overflow-hidden"><p>The weakest hunter of all mankind.</p></div>
  <div class="flex"><a href="/genre/action/">Action</a><a href="/genre/fantasy/">Fantasy</a></div>
  <div><div><a href="/genre/nested/">NotAGenre</a></div></div>
</div>
<div alt="Status">Ongoing</div>
<div alt="Author">Chugong</div>
<div alt="Artist">DUBU</div>
<div id="chapters">
  <a href="/chapter/solo-leveling-2/">
    <span class="text-sm">Chapter 2</span><span class="text-xs">Jan 12, 2023</span>
  </a>
  <a href="/chapter/solo-leveling-1/">
    <span class="text-sm">Chapter 1</span><span class="text-xs">3 days ago</span>
  </a>
</div>
</body></html>
"#;

pub const KEYOAPP_READER: &str = r#"
<html><body>
<div id="pages">
  <img count="0" src="https://cdn.kewnscans.org/1/000.jpg">
  <img count="1" data-src="/1/001.jpg">
  <img count="2" src="https://cdn.kewnscans.org/1/002.jpg">
</div>
</body></html>
"#;

pub fn madara_listing(titles: &[(&str, &str)]) -> String {
    let items: String = titles
        .iter()
        .map(|(title, slug)| {
            format!(
                r#"<div class="page-item-detail manga">
  <div class="item-thumb"><a href="/manga/{slug}/"><img data-src="/wp-content/{slug}.jpg" src="data:blank"></a></div>
  <div class="item-summary"><div class="post-title"><h3><a href="/manga/{slug}/">{title}</a></h3></div></div>
</div>"#,
                slug = slug,
                title = title
            )
        })
        .collect();
    format!("<div class=\"page-listing-item\">{}</div>", items)
}
