//! Per-family selector tables.
//!
//! A table maps every semantic role the extractor needs to a CSS selector (and
//! where relevant an attribute name). Sites pick a family table and override
//! individual fields with struct update syntax.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorTable {
    // Listings
    pub popular_entry: &'static str,
    pub latest_entry: &'static str,
    pub search_entry: &'static str,
    /// Appended to listing entry selectors when the site flags non-manga
    /// items and the adapter filters them out.
    pub manga_only_qualifier: Option<&'static str>,
    pub entry_link: &'static str,
    /// Attribute holding the entry title; `None` reads the link text.
    pub entry_title_attr: Option<&'static str>,
    pub entry_thumbnail: &'static str,
    pub next_page: Option<&'static str>,
    /// Marker the load-more endpoint renders when there are no more posts.
    pub no_more_posts: &'static str,

    // Search result filtering
    pub search_title_attr: Option<&'static str>,
    pub search_tags_attr: Option<&'static str>,

    // Details
    pub detail_title: &'static str,
    pub detail_thumbnail: &'static str,
    pub detail_description: &'static str,
    pub detail_status: &'static str,
    pub detail_author: &'static str,
    pub detail_artist: &'static str,
    pub detail_genre: &'static str,
    /// Search genre links only inside the title element's parent.
    pub detail_genre_near_title: bool,

    // Chapters
    pub chapter_entry: &'static str,
    pub chapter_link: &'static str,
    /// Required name element; `None` uses the link text.
    pub chapter_name: Option<&'static str>,
    pub chapter_date: &'static str,
    pub chapter_holder: &'static str,

    // Pages
    pub page_image: &'static str,
    /// Attribute carrying the page index; `None` numbers pages by position.
    pub page_index_attr: Option<&'static str>,
    /// Width requested from the image host via the `w` query parameter.
    pub page_width_hint: Option<&'static str>,

    // Genres page
    pub genre_entry: &'static str,
    /// Element holding the genre name; `None` reads the entry text.
    pub genre_name: Option<&'static str>,
    /// Element holding the id attribute; `None` reads it from the entry.
    pub genre_id_element: Option<&'static str>,
    pub genre_id_attr: &'static str,
}

pub const KEYOAPP: SelectorTable = SelectorTable {
    popular_entry: "div.flex-col div.grid > div.group.border",
    latest_entry: "div.grid > div.group",
    search_entry: "#searched_series_page > button",
    manga_only_qualifier: None,
    entry_link: "a[href]",
    entry_title_attr: Some("title"),
    entry_thumbnail: "*[style*=background-image]",
    next_page: None,
    no_more_posts: ".no-posts",

    search_title_attr: Some("title"),
    search_tags_attr: Some("tags"),

    detail_title: "div.grid > h1",
    detail_thumbnail: "div[class*=photoURL]",
    detail_description: "div.grid > div.overflow-hidden > p",
    detail_status: "div[alt=Status]",
    detail_author: "div[alt=Author]",
    detail_artist: "div[alt=Artist]",
    detail_genre: "div > a",
    detail_genre_near_title: true,

    chapter_entry: "#chapters > a",
    chapter_link: "a[href]",
    chapter_name: Some(".text-sm"),
    chapter_date: ".text-xs",
    chapter_holder: "div#manga-chapters-holder",

    page_image: "#pages > img",
    page_index_attr: Some("count"),
    page_width_hint: Some("150"),

    genre_entry: "#series_tags_page > button",
    genre_name: None,
    genre_id_element: None,
    genre_id_attr: "tag",
};

pub const MADARA: SelectorTable = SelectorTable {
    popular_entry: "div.page-item-detail",
    latest_entry: "div.page-item-detail",
    search_entry: "div.c-tabs-item__content",
    manga_only_qualifier: Some(".manga"),
    entry_link: "div.post-title a",
    entry_title_attr: None,
    entry_thumbnail: "img",
    next_page: Some("div.nav-previous, nav.navigation-ajax, a.nextpostslink"),
    no_more_posts: ".no-posts",

    search_title_attr: None,
    search_tags_attr: None,

    detail_title: "div.post-title h3, div.post-title h1",
    detail_thumbnail: "div.summary_image img",
    detail_description: "div.description-summary div.summary__content",
    detail_status: "div.post-status div.summary-content",
    detail_author: "div.author-content > a",
    detail_artist: "div.artist-content > a",
    detail_genre: "div.genres-content a",
    detail_genre_near_title: false,

    chapter_entry: "li.wp-manga-chapter",
    chapter_link: "a[href]",
    chapter_name: None,
    chapter_date: "span.chapter-release-date",
    chapter_holder: "div#manga-chapters-holder",

    page_image: "div.page-break img",
    page_index_attr: None,
    page_width_hint: None,

    genre_entry: "div.checkbox-group div.checkbox",
    genre_name: Some("label"),
    genre_id_element: Some("input[type=checkbox]"),
    genre_id_attr: "value",
};

impl SelectorTable {
    /// Listing entry selector, narrowed to flagged manga items when asked.
    pub fn listing_entry(&self, base: &'static str, manga_only: bool) -> String {
        match (manga_only, self.manga_only_qualifier) {
            (true, Some(qualifier)) => base
                .split(',')
                .map(|part| format!("{}{}", part.trim(), qualifier))
                .collect::<Vec<_>>()
                .join(", "),
            _ => base.to_string(),
        }
    }
}
