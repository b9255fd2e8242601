use crate::site::{SiteConfig, SiteOverrides};

pub const ID: &str = "edscanlation";
const BASE_URL: &str = "https://edscanlation.fr";

/// French Keyoapp site; dates are still rendered with English month names.
pub fn config() -> SiteConfig {
    crate::sources::keyoapp::site(ID, "ED Scanlation", BASE_URL, "fr")
}

pub fn overrides() -> SiteOverrides {
    SiteOverrides::default()
}
