//! HTML parsing infrastructure
//!
//! Trait-based parsers for Flipkart product and search pages. Selector data
//! lives in [`config`]; [`selector_chain`] evaluates it; the two parsers
//! hold the per-field derivation rules.

pub mod config;
pub mod context;
pub mod error;
pub mod price;
pub mod product_detail_parser;
pub mod product_list_parser;
pub mod selector_chain;

pub use config::ParsingConfig;
pub use context::{DetailParseContext, SearchParseContext};
pub use error::{ParsingError, ParsingResult};
pub use price::normalize_price;
pub use product_detail_parser::ProductDetailParser;
pub use product_list_parser::ProductListParser;
pub use selector_chain::SelectorChain;

use scraper::Html;

/// Parser over an already-parsed document plus per-call context
pub trait ContextualParser {
    type Output;
    type Context;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;

    /// Parse raw HTML text.
    fn parse_str(&self, html: &str, context: &Self::Context) -> ParsingResult<Self::Output> {
        let document = Html::parse_document(html);
        self.parse_with_context(&document, context)
    }
}

/// Validation of parsed records before they are returned
pub trait Validator<T> {
    fn validate(&self, data: &T) -> ParsingResult<()>;
}
