//! Parsing context for HTML extraction
//!
//! Per-call inputs the parsers need besides the document itself.

/// Context for a search results page
#[derive(Debug, Clone)]
pub struct SearchParseContext {
    /// Query that produced the page, for log correlation
    pub query: String,

    /// Base URL for resolving relative links
    pub base_url: String,

    /// Stop once this many qualifying listings are collected
    pub max_results: usize,
}

impl SearchParseContext {
    pub fn new(query: impl Into<String>, base_url: impl Into<String>, max_results: usize) -> Self {
        Self {
            query: query.into(),
            base_url: base_url.into(),
            max_results,
        }
    }
}

/// Context for a product detail page
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Product URL being parsed; echoed into the record
    pub url: String,
}

impl DetailParseContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
