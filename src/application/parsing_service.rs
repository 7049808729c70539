//! Parsing service
//!
//! Owns the compiled parsers and turns raw HTML into domain records. All
//! methods are synchronous and CPU-bound; callers run them off the async
//! executor.

use std::sync::Arc;

use scraper::Html;
use tracing::{debug, info};

use crate::domain::{ProductRecord, SearchResultRecord};
use crate::infrastructure::parsing::{
    ContextualParser, DetailParseContext, ParsingConfig, ParsingResult, ProductDetailParser,
    ProductListParser, SearchParseContext,
};

/// Compiled parsers shared across calls
#[derive(Debug, Clone)]
pub struct ParsingService {
    list_parser: Arc<ProductListParser>,
    detail_parser: Arc<ProductDetailParser>,
    base_url: String,
}

impl ParsingService {
    /// Create a new parsing service with the given configuration
    pub fn new(config: &ParsingConfig) -> ParsingResult<Self> {
        let list_parser = Arc::new(ProductListParser::with_config(
            &config.search_selectors,
            &config.search_heuristics,
        )?);
        let detail_parser = Arc::new(ProductDetailParser::with_config(
            &config.product_detail_selectors,
        )?);

        Ok(Self {
            list_parser,
            detail_parser,
            base_url: config.base_url.clone(),
        })
    }

    /// Parse product detail from HTML content
    pub fn parse_product_detail(&self, html: &str, url: &str) -> ParsingResult<ProductRecord> {
        debug!("Parsing product detail for URL: {}", url);

        let document = Html::parse_document(html);
        let record = self
            .detail_parser
            .parse_with_context(&document, &DetailParseContext::new(url))?;

        info!("Parsed product detail: {}", record.name);
        Ok(record)
    }

    /// Parse up to `max_results` listings from a search results page
    pub fn parse_search_results(
        &self,
        html: &str,
        query: &str,
        max_results: usize,
    ) -> ParsingResult<Vec<SearchResultRecord>> {
        let document = Html::parse_document(html);
        let context = SearchParseContext::new(query, self.base_url.clone(), max_results);
        let results = self.list_parser.parse_with_context(&document, &context)?;

        info!("Parsed {} search results for '{}'", results.len(), query);
        Ok(results)
    }
}
