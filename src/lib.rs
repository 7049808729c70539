//! Flipkart product scraper
//!
//! Two tool operations over Flipkart's storefront: `get_product` scrapes a
//! product page into a labeled report, `search_products` scrapes a search
//! results page into a numbered listing. Selector chains are configuration;
//! see [`infrastructure::parsing::config`].

pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::{ParsingService, ScraperTools, ToolResponse};
pub use infrastructure::{AppConfig, HttpClient, PageFetcher};
