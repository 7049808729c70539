//! Parsing configuration for HTML extraction
//!
//! Centralized CSS selector chains and heuristic limits. Each chain is
//! ordered: the first selector that yields a usable value wins. Flipkart
//! renames its generated class names between deployments, so every chain
//! carries the older markup generation first and the 2024/2025 generation
//! after it. Adding a new generation is an edit here, not in the parsers.

use serde::{Deserialize, Serialize};

use crate::domain::constants::site;

/// Main parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Origin used to resolve relative links
    pub base_url: String,

    /// Product detail page selectors
    pub product_detail_selectors: ProductDetailSelectors,

    /// Search results page selectors
    pub search_selectors: SearchResultSelectors,

    /// Limits for the markup-independent search fallback
    pub search_heuristics: SearchHeuristics,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            base_url: site::BASE_URL.to_string(),
            product_detail_selectors: ProductDetailSelectors::default(),
            search_selectors: SearchResultSelectors::default(),
            search_heuristics: SearchHeuristics::default(),
        }
    }
}

fn chain(selectors: &[&str]) -> Vec<String> {
    selectors.iter().map(ToString::to_string).collect()
}

/// CSS selectors for product detail pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDetailSelectors {
    pub name: Vec<String>,
    pub price: Vec<String>,
    pub original_price: Vec<String>,
    pub discount: Vec<String>,
    pub image: Vec<String>,
    pub rating: Vec<String>,
    pub review_count: Vec<String>,
    /// Purchase-action elements whose text reveals stock state
    pub availability: Vec<String>,
    /// Each selector matches the individual highlight items
    pub highlights: Vec<String>,
    /// Each selector matches specification table rows
    pub specification_rows: Vec<String>,
    pub description: Vec<String>,
}

impl Default for ProductDetailSelectors {
    fn default() -> Self {
        Self {
            name: chain(&[
                "span.VU-ZEz",
                "span.B_NuCI",
                "h1.yhB1nd",
                "h1._6EBuvT span",
                "h1 span",
                ".B_NuCI",
            ]),
            price: chain(&[
                "div.Nx9bqj.CxhGGd",
                "div._30jeq3",
                "div._16Jk6d",
                ".Nx9bqj",
                "div.hZ3P6w",
            ]),
            original_price: chain(&[
                r"div.yRaY8j.A6\+E6v",
                "div._3I9_wc",
                "div.yRaY8j",
                "div.kRYCnD",
            ]),
            discount: chain(&["div.UkUFwK span", "._3Ay6Sb", "div.UkUFwK"]),
            image: chain(&[
                "img._0DkuPH",
                "img._2r_T1I",
                "img[class*=\"DByuf4\"]",
                "div._1YokD2 img",
                "img[alt]",
            ]),
            rating: chain(&["div._3LWZlK", "div.XQDdHH", "span._1lRcqv"]),
            review_count: chain(&["span._2_R_DZ", "span.row > span", "span.Wphh3N"]),
            availability: chain(&[
                "button._2KpZ6l._2U9uOA",
                "div._16FRp0",
                "div._3xgqrA",
                "button.QqFHMw",
            ]),
            highlights: chain(&["ul._1_Bfqy li", "div._2418kt li", "div.xFVion li"]),
            specification_rows: chain(&[
                "div._2GjhP6 tr",
                "table.tbg7Hw tr",
                "table._0ZhAN9 tr",
            ]),
            description: chain(&["div._1mXcCf", "div.qnrGsz", "p._2o5hS8", "div._4gvKMe"]),
        }
    }
}

/// CSS selectors for search results pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultSelectors {
    /// Product card containers; the first selector with any match wins
    pub card: Vec<String>,
    /// Product link inside a card
    pub link: Vec<String>,
    pub name: Vec<String>,
    pub price: Vec<String>,
    pub image: Vec<String>,
    pub rating: Vec<String>,
}

impl Default for SearchResultSelectors {
    fn default() -> Self {
        Self {
            // single cards before the row wrappers that contain them
            card: chain(&[
                "div.jIjQ8S",
                "div.tUxRFH",
                "div.slAVV4",
                "div._2kHMtA",
                "a._1fQZEK",
                "div._1AtVbE",
                "div.cPHDOP",
            ]),
            link: chain(&["a.k7wcnx[href]", "a.CGtC98[href]", "a[href]"]),
            name: chain(&[
                "a.k7wcnx",
                "a.IRpwTa",
                "a.s1Q9rs",
                "div.IRpwTa",
                "div._4rR01T",
                "div.KzDlHZ",
                "a.wjcEIp",
                "a.WKTcLC",
            ]),
            price: chain(&[
                "div.hZ3P6w.DeU9vF",
                "div.hZ3P6w",
                "div._30jeq3",
                "div.Nx9bqj",
                "div._1_WHN1",
            ]),
            image: chain(&["img.UCc1lI", "img.DByuf4", "img._396cs4", "img"]),
            rating: chain(&["div.a7saXW", "div._3LWZlK", "span._1lRcqv", "div.XQDdHH"]),
        }
    }
}

/// Limits for locating listings when no card selector matches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHeuristics {
    /// Ancestor levels walked up from a product link to find its card
    pub max_link_ancestor_depth: usize,
    /// Ancestor levels walked up from a price text to find a product link
    pub max_price_ancestor_depth: usize,
    /// Shortest text accepted as a listing name
    pub min_name_chars: usize,
    /// Longest text node considered when scanning for a name
    pub max_name_chars: usize,
    /// UI labels that are never product names
    pub noise_phrases: Vec<String>,
}

impl Default for SearchHeuristics {
    fn default() -> Self {
        Self {
            max_link_ancestor_depth: 4,
            max_price_ancestor_depth: 5,
            min_name_chars: 5,
            max_name_chars: 200,
            noise_phrases: chain(&["Add to Compare"]),
        }
    }
}
