use crate::site::{SiteConfig, SiteOverrides};

pub const ID: &str = "topmanhua";
const BASE_URL: &str = "https://topmanhua.com";

pub fn config() -> SiteConfig {
    SiteConfig {
        // The site does not flag its content type.
        filter_non_manga_items: false,
        popular_path: "/manhua/{page}?m_orderby=views",
        latest_path: "/manhua/{page}?m_orderby=latest",
        ..crate::sources::madara::site(ID, "Top Manhua", BASE_URL, "en", "MM/dd/yy")
    }
}

/// The first listing page lives at the archive root.
fn page_segment(page: u32) -> String {
    if page <= 1 {
        String::new()
    } else {
        format!("page/{}/", page)
    }
}

pub fn overrides() -> SiteOverrides {
    SiteOverrides {
        page_segment,
        parse_status: crate::sources::madara::parse_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_segment() {
        assert_eq!(page_segment(1), "");
        assert_eq!(page_segment(2), "page/2/");
    }
}
