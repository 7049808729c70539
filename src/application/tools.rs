//! The two scraper tool operations
//!
//! Each operation validates its input, fetches one page, extracts off the
//! async executor, and answers with either a text report or a JSON payload.
//! Errors never escape: they become `{"error": ...}` payloads here.

use serde::Serialize;
use tracing::{info, warn};

use super::errors::{ToolError, ToolResult};
use super::parsing_service::ParsingService;
use super::report::{product_report, search_report};
use crate::domain::constants::search;
use crate::domain::product_url::{search_url, validate_product_url};
use crate::domain::{ProductRecord, SearchResultRecord};
use crate::infrastructure::PageFetcher;

const EMPTY_QUERY_MESSAGE: &str = "Search query cannot be empty";

/// What an operation hands back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    /// Human-readable success report
    Report(String),
    Error { error: String },
    /// Search ran but matched nothing
    NoResults { message: String, search_url: String },
}

impl ToolResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Report text as-is; payloads as indented JSON.
    pub fn render(&self) -> String {
        match self {
            Self::Report(text) => text.clone(),
            payload => serde_json::to_string_pretty(payload)
                .unwrap_or_else(|e| format!(r#"{{"error": "Failed to encode response: {e}"}}"#)),
        }
    }
}

/// Clamp a requested result count: above the limit → limit, below one → default.
pub fn clamp_max_results(requested: i64) -> usize {
    if requested < 1 {
        search::DEFAULT_MAX_RESULTS
    } else {
        usize::try_from(requested).map_or(search::MAX_RESULTS_LIMIT, |n| n.min(search::MAX_RESULTS_LIMIT))
    }
}

/// Product lookup and catalog search over a [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct ScraperTools<F> {
    fetcher: F,
    parsing: ParsingService,
}

impl<F: PageFetcher> ScraperTools<F> {
    pub const fn new(fetcher: F, parsing: ParsingService) -> Self {
        Self { fetcher, parsing }
    }

    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Scrape one product page into a labeled report.
    pub async fn get_product(&self, product_url: &str) -> ToolResponse {
        info!(url = %product_url, "get_product");

        match self.fetch_product(product_url).await {
            Ok(product) => ToolResponse::Report(product_report(&product)),
            Err(ToolError::Validation(message)) => ToolResponse::error(message),
            Err(ToolError::Network(e)) => {
                warn!("Failed to fetch product page {}: {}", product_url, e);
                ToolResponse::error(format!("Failed to fetch product page: {e}"))
            }
            Err(e) => {
                warn!("Error scraping product {}: {}", product_url, e);
                ToolResponse::error(format!("Error scraping product: {e}"))
            }
        }
    }

    /// Search the catalog and report up to `max_results` listings.
    pub async fn search_products(&self, query: &str, max_results: i64) -> ToolResponse {
        info!(query = %query, max_results, "search_products");

        match self.run_search(query, clamp_max_results(max_results)).await {
            Ok((_, results)) if !results.is_empty() => {
                ToolResponse::Report(search_report(query, &results))
            }
            Ok((url, _)) => ToolResponse::NoResults {
                message: format!("No products found for query: {query}"),
                search_url: url,
            },
            Err(ToolError::Validation(message)) => ToolResponse::error(message),
            Err(ToolError::Network(e)) => {
                warn!("Failed to perform search for '{}': {}", query, e);
                ToolResponse::error(format!("Failed to perform search: {e}"))
            }
            Err(e) => {
                warn!("Error searching products for '{}': {}", query, e);
                ToolResponse::error(format!("Error searching products: {e}"))
            }
        }
    }

    async fn fetch_product(&self, product_url: &str) -> ToolResult<ProductRecord> {
        let product_url = product_url.trim();
        validate_product_url(product_url)?;

        let html = self.fetcher.fetch(product_url).await?;

        let parsing = self.parsing.clone();
        let url = product_url.to_string();
        let product =
            tokio::task::spawn_blocking(move || parsing.parse_product_detail(&html, &url)).await??;
        Ok(product)
    }

    async fn run_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> ToolResult<(String, Vec<SearchResultRecord>)> {
        if query.trim().is_empty() {
            return Err(ToolError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
        }

        let url = search_url(query);
        let html = self.fetcher.fetch(&url).await?;

        let parsing = self.parsing.clone();
        let query = query.to_string();
        let results = tokio::task::spawn_blocking(move || {
            parsing.parse_search_results(&html, &query, max_results)
        })
        .await??;
        Ok((url, results))
    }
}
