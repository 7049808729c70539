//! Product URL rules
//!
//! Input validation for caller-supplied product URLs, construction of search
//! URLs, and the link-shape heuristics used to spot product listings in
//! search pages whose card markup is unknown.

use thiserror::Error;
use url::Url;
use url::form_urlencoded;

use super::constants::site;

/// Path fragment carried by every Flipkart product detail link
const PRODUCT_LINK_MARKER: &str = "/p/itm";

/// Looser markers accepted when scanning around price text
const PRODUCT_PATH_MARKERS: &[&str] = &["/p/", "pid="];

/// Leading path segments of links that never lead to a product page
const NON_PRODUCT_SEGMENTS: &[&str] = &[
    "search",
    "help",
    "helpcentre",
    "account",
    "viewcart",
    "login",
    "wishlist",
    "orders",
    "plus",
];

/// Why a caller-supplied product URL was refused before any network access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlRejection {
    #[error(
        "Invalid URL. Please provide a full Flipkart product URL starting with http:// or https://"
    )]
    MissingScheme,

    #[error("Unsupported domain: this tool only works with Flipkart product URLs")]
    UnsupportedDomain,
}

/// Check scheme first, then host.
pub fn validate_product_url(raw: &str) -> Result<Url, UrlRejection> {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(UrlRejection::MissingScheme);
    }

    let parsed = Url::parse(trimmed).map_err(|_| UrlRejection::MissingScheme)?;
    match parsed.host_str() {
        Some(host) if is_site_host(host) => Ok(parsed),
        _ => Err(UrlRejection::UnsupportedDomain),
    }
}

fn is_site_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == site::DOMAIN || host.ends_with(&format!(".{}", site::DOMAIN))
}

/// Search page URL for a free-text query; spaces become `+`.
pub fn search_url(query: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.trim().as_bytes()).collect();
    format!("{}{}?q={}", site::BASE_URL, site::SEARCH_PATH, encoded)
}

/// Strict product-link shape: a detail-page marker and no known non-product path.
pub fn is_product_link(href: &str) -> bool {
    href.contains(PRODUCT_LINK_MARKER) && !is_non_product_path(href)
}

/// Loose product-link shape used by the price-proximity scan.
pub fn has_product_marker(href: &str) -> bool {
    PRODUCT_PATH_MARKERS.iter().any(|marker| href.contains(marker))
}

/// Link accepted as a search card's target: a product marker outside the
/// site's navigation paths.
pub fn is_listing_link(href: &str) -> bool {
    has_product_marker(href) && !is_non_product_path(href)
}

fn is_non_product_path(href: &str) -> bool {
    let path = Url::parse(href)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| href.split(['?', '#']).next().unwrap_or(href).to_string());
    let first_segment = path.trim_start_matches('/').split('/').next().unwrap_or_default();
    NON_PRODUCT_SEGMENTS.contains(&first_segment)
}
