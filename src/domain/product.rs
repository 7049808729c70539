use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::{product_sentinel, search_sentinel};

/// Stock state derived from the page's purchase button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[default]
    Unknown,
}

impl Availability {
    /// Classify the text of a purchase-action element.
    pub fn from_button_text(text: &str) -> Self {
        let upper = text.trim().to_uppercase();
        if upper.contains("ADD TO CART") || upper.contains("BUY NOW") {
            Self::InStock
        } else if upper.contains("OUT OF STOCK") || upper.contains("NOTIFY") {
            Self::OutOfStock
        } else {
            Self::Unknown
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::OutOfStock => "Out of Stock",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details scraped from a single product page.
///
/// Every field is always populated: fields the page did not yield keep the
/// placeholder from [`product_sentinel`]. Only `original_price` and
/// `discount` are genuinely optional, since the report omits their lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount: Option<String>,
    pub image_url: String,
    pub rating: String,
    pub review_count: String,
    pub availability: Availability,
    pub description: String,
    pub specifications: Vec<String>,
    pub highlights: Vec<String>,
    pub source_url: String,
}

impl ProductRecord {
    /// A record with every field at its placeholder.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            name: product_sentinel::NAME.to_string(),
            price: product_sentinel::PRICE.to_string(),
            original_price: None,
            discount: None,
            image_url: product_sentinel::IMAGE.to_string(),
            rating: product_sentinel::RATING.to_string(),
            review_count: product_sentinel::REVIEWS.to_string(),
            availability: Availability::Unknown,
            description: product_sentinel::DESCRIPTION.to_string(),
            specifications: Vec::new(),
            highlights: Vec::new(),
            source_url: source_url.into(),
        }
    }
}

/// One listing from a search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultRecord {
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub rating: String,
    pub url: String,
}

impl SearchResultRecord {
    /// A listing with a resolved URL and every other field at its placeholder.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            name: search_sentinel::NAME.to_string(),
            price: search_sentinel::PRICE.to_string(),
            image_url: search_sentinel::IMAGE.to_string(),
            rating: search_sentinel::RATING.to_string(),
            url: url.into(),
        }
    }
}
