/// Madara family adapter tests
/// Static listings, the AJAX load-more protocol and both chapter endpoints

mod common;

use common::{madara_listing, StubFetcher};
use multisrc_scraper::adapter::SiteAdapter;
use multisrc_scraper::models::{FilterState, MangaStatus};
use multisrc_scraper::sources::{legendsnofansub, topmanhua};
use reqwest::Method;
use std::sync::Arc;

const TOP_BASE: &str = "https://topmanhua.com";
const LEGENDS_BASE: &str = "https://legnmangas.com";

const GENRE_FORM: &str = r#"
<form class="search-advanced-form">
  <div class="checkbox-group">
    <div class="checkbox"><input type="checkbox" value="accion" id="accion"><label for="accion">Acción</label></div>
    <div class="checkbox"><input type="checkbox" value="romance" id="romance"><label for="romance">Romance</label></div>
  </div>
</form>
"#;

fn top_manhua(fetcher: Arc<StubFetcher>) -> SiteAdapter {
    SiteAdapter::new(topmanhua::config(), topmanhua::overrides(), fetcher).unwrap()
}

fn legends(fetcher: Arc<StubFetcher>) -> SiteAdapter {
    SiteAdapter::new(legendsnofansub::config(), legendsnofansub::overrides(), fetcher).unwrap()
}

fn genres_url(base: &str) -> String {
    format!("{}/?s=genre&post_type=wp-manga", base)
}

#[tokio::test]
async fn test_static_listing_first_and_later_pages() {
    let fetcher = StubFetcher::new();
    let listing = format!(
        "{}<div class=\"nav-previous\"><a href=\"/manhua/page/2/\">Older</a></div>",
        madara_listing(&[("Martial Peak", "martial-peak"), ("Tales of Demons", "tales")])
    );
    fetcher.route(&format!("{}/manhua/?m_orderby=views", TOP_BASE), &listing);
    fetcher.route(
        &format!("{}/manhua/page/2/?m_orderby=views", TOP_BASE),
        &madara_listing(&[("Last One", "last-one")]),
    );
    fetcher.route(&genres_url(TOP_BASE), GENRE_FORM);
    let adapter = top_manhua(fetcher.clone());

    let first = adapter.browse_popular(1).await.unwrap();
    assert!(first.has_next_page);
    assert_eq!(first.entries.len(), 2);
    assert_eq!(first.entries[0].title, "Martial Peak");
    assert_eq!(first.entries[0].relative_url, "/manga/martial-peak/");
    assert_eq!(
        first.entries[0].thumbnail_url.as_deref(),
        Some("https://topmanhua.com/wp-content/martial-peak.jpg")
    );

    let second = adapter.browse_popular(2).await.unwrap();
    assert!(!second.has_next_page);
    assert_eq!(second.entries[0].title, "Last One");

    let genre_ids: Vec<String> = adapter.genres().await.into_iter().map(|g| g.id).collect();
    assert_eq!(genre_ids, vec!["accion", "romance"]);
}

#[tokio::test]
async fn test_unflagged_items_are_kept_when_filtering_is_off() {
    let fetcher = StubFetcher::new();
    fetcher.route(
        &format!("{}/manhua/?m_orderby=latest", TOP_BASE),
        r#"<div class="page-item-detail"><div class="post-title"><a href="/manga/plain/">Plain</a></div></div>"#,
    );
    let adapter = top_manhua(fetcher);

    let page = adapter.browse_latest(1).await.unwrap();
    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].thumbnail_url, None);
}

#[tokio::test]
async fn test_load_more_popular_request_and_pagination() {
    let fetcher = StubFetcher::new();
    let endpoint = format!("{}/wp-admin/admin-ajax.php", LEGENDS_BASE);
    fetcher.route(&endpoint, &madara_listing(&[("Uno", "uno"), ("Dos", "dos")]));
    fetcher.route(&genres_url(LEGENDS_BASE), GENRE_FORM);
    let adapter = legends(fetcher.clone());

    let page = adapter.browse_popular(3).await.unwrap();
    assert!(page.has_next_page);
    assert_eq!(page.entries.len(), 2);

    let request = &fetcher.requests()[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, endpoint);
    assert_eq!(request.form_value("action").as_deref(), Some("madara_load_more"));
    assert_eq!(request.form_value("page").as_deref(), Some("2"));
    assert_eq!(request.form_values("vars[meta_key]"), vec!["_wp_manga_views"]);
    assert_eq!(request.header("x-requested-with"), Some("XMLHttpRequest"));
}

#[tokio::test]
async fn test_load_more_latest_exhausted() {
    let fetcher = StubFetcher::new();
    let endpoint = format!("{}/wp-admin/admin-ajax.php", LEGENDS_BASE);
    let body = format!(
        "{}<div class=\"no-posts\">No hay más</div>",
        madara_listing(&[("Ultimo", "ultimo")])
    );
    fetcher.route(&endpoint, &body);
    let adapter = legends(fetcher.clone());

    let page = adapter.browse_latest(1).await.unwrap();
    assert_eq!(page.entries.len(), 1);
    assert!(!page.has_next_page);
    assert_eq!(
        fetcher.requests()[0].form_values("vars[meta_key]"),
        vec!["_latest_update"]
    );
    assert_eq!(fetcher.requests()[0].form_value("page").as_deref(), Some("0"));
}

#[tokio::test]
async fn test_load_more_empty_fragment_has_no_next_page() {
    let fetcher = StubFetcher::new();
    fetcher.route(&format!("{}/wp-admin/admin-ajax.php", LEGENDS_BASE), "");
    let adapter = legends(fetcher);

    let page = adapter.browse_popular(9).await.unwrap();
    assert!(page.entries.is_empty());
    assert!(!page.has_next_page);
}

#[tokio::test]
async fn test_ajax_endpoint_chapters_with_spanish_dates() {
    let fetcher = StubFetcher::new();
    fetcher.route(
        &format!("{}/manga/uno/ajax/chapters/", LEGENDS_BASE),
        r#"<ul>
          <li class="wp-manga-chapter"><a href="/manga/uno/capitulo-2/"> Capítulo 2 </a><span class="chapter-release-date"><i>05/01/2023</i></span></li>
          <li class="wp-manga-chapter"><a href="/manga/uno/capitulo-1/">Capítulo 1</a><span class="chapter-release-date">hace 2 días</span></li>
        </ul>"#,
    );
    let adapter = legends(fetcher.clone());

    let chapters = adapter.fetch_chapters("/manga/uno/").await.unwrap();

    assert_eq!(fetcher.requests().len(), 1);
    assert_eq!(fetcher.requests()[0].method, Method::POST);
    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[0].display_name, "Capítulo 2");
    assert_eq!(chapters[0].relative_url, "/manga/uno/capitulo-2/");
    assert_eq!(chapters[0].upload_timestamp, 1_672_876_800_000);
    assert_eq!(chapters[1].upload_timestamp, 0);
}

#[tokio::test]
async fn test_inline_chapters_fall_back_to_admin_ajax() {
    let fetcher = StubFetcher::new();
    fetcher.route(
        &format!("{}/manga/martial-peak/", TOP_BASE),
        r#"<div class="post-title"><h1>Martial Peak</h1></div>
           <div id="manga-chapters-holder" data-id="4321"></div>"#,
    );
    fetcher.route(
        &format!("{}/wp-admin/admin-ajax.php", TOP_BASE),
        r#"<li class="wp-manga-chapter"><a href="/manga/martial-peak/chapter-1/">Chapter 1</a><span class="chapter-release-date">01/05/23</span></li>"#,
    );
    let adapter = top_manhua(fetcher.clone());

    let chapters = adapter.fetch_chapters("/manga/martial-peak/").await.unwrap();

    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].upload_timestamp, 1_672_876_800_000);
    let requests = fetcher.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].form_value("action").as_deref(), Some("manga_get_chapters"));
    assert_eq!(requests[1].form_value("manga").as_deref(), Some("4321"));
}

#[tokio::test]
async fn test_detail_and_pages() {
    let fetcher = StubFetcher::new();
    fetcher.route(
        &format!("{}/manga/uno/", LEGENDS_BASE),
        r#"<div class="post-title"><h1>Uno</h1></div>
           <div class="summary_image"><img data-src="/wp-content/uno.jpg"></div>
           <div class="post-status"><div class="summary-content">En curso</div></div>
           <div class="author-content"><a href="/autor/x/">Autor X</a></div>
           <div class="genres-content"><a href="/genero/accion/">Acción</a>, <a href="/genero/drama/">Drama</a></div>
           <div class="description-summary"><div class="summary__content"><p>Una historia.</p></div></div>"#,
    );
    fetcher.route(
        &format!("{}/manga/uno/capitulo-1/", LEGENDS_BASE),
        r#"<div class="page-break"><img src=" https://cdn.legnmangas.com/1.jpg "></div>
           <div class="page-break"><img data-lazy-src="/2.jpg" src="placeholder.gif"></div>"#,
    );
    let adapter = legends(fetcher);

    let detail = adapter.fetch_detail("/manga/uno/").await.unwrap();
    assert_eq!(detail.title, "Uno");
    assert_eq!(detail.status, MangaStatus::Ongoing);
    assert_eq!(detail.author.as_deref(), Some("Autor X"));
    assert_eq!(detail.artist, None);
    assert_eq!(detail.genres, vec!["Acción", "Drama"]);
    assert_eq!(
        detail.thumbnail_url.as_deref(),
        Some("https://legnmangas.com/wp-content/uno.jpg")
    );

    let pages = adapter.fetch_pages("/manga/uno/capitulo-1/").await.unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].index, 0);
    assert_eq!(pages[0].image_url, "https://cdn.legnmangas.com/1.jpg");
    assert_eq!(pages[1].image_url, "https://legnmangas.com/2.jpg");
}

#[tokio::test]
async fn test_search_builds_wordpress_query() {
    let fetcher = StubFetcher::new();
    fetcher.route(
        &format!("{}/?s=martial&post_type=wp-manga&genre%5B%5D=action", TOP_BASE),
        r#"<div class="c-tabs-item__content"><div class="post-title"><a href="/manga/martial-peak/">Martial Peak</a></div></div>"#,
    );
    let adapter = top_manhua(fetcher);

    let page = adapter
        .search("martial", &FilterState::new("", ["action"]), 1)
        .await
        .unwrap();
    assert!(!page.has_next_page);
    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].title, "Martial Peak");
}

#[tokio::test]
async fn test_search_on_manga_only_site_reads_plain_result_blocks() {
    let fetcher = StubFetcher::new();
    fetcher.route(
        &format!("{}/?s=uno&post_type=wp-manga", LEGENDS_BASE),
        r#"<div class="tab-content-wrap">
          <div class="c-tabs-item__content"><div class="post-title"><a href="/manga/uno/">Uno</a></div></div>
          <div class="c-tabs-item__content"><div class="post-title"><a href="/manga/dos/">Dos</a></div></div>
        </div>"#,
    );
    let adapter = legends(fetcher);
    assert!(adapter.config().filter_non_manga_items);

    let page = adapter.search("uno", &FilterState::default(), 1).await.unwrap();
    assert_eq!(page.entries.len(), 2);
    assert_eq!(page.entries[0].title, "Uno");
    assert_eq!(page.entries[0].relative_url, "/manga/uno/");
    assert!(!page.has_next_page);
}
