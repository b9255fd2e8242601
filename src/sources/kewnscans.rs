use crate::site::{SiteConfig, SiteOverrides};

pub const ID: &str = "kewnscans";
const BASE_URL: &str = "https://kewnscans.org";

pub fn config() -> SiteConfig {
    crate::sources::keyoapp::site(ID, "Kewn Scans", BASE_URL, "en")
}

pub fn overrides() -> SiteOverrides {
    SiteOverrides::default()
}
