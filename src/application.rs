//! Application layer
//!
//! The scraper tool operations and the services they orchestrate.

pub mod errors;
pub mod parsing_service;
pub mod report;
pub mod tools;

pub use errors::{ToolError, ToolResult};
pub use parsing_service::ParsingService;
pub use tools::{ScraperTools, ToolResponse, clamp_max_results};
