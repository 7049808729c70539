//! Infrastructure layer: configuration, logging, page fetching, and HTML parsing

pub mod config;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod parsing_error;

pub use config::{AppConfig, ConfigError, LoggingConfig};
pub use http_client::{FetchError, HttpClient, HttpClientConfig, PageFetcher};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{
    ParsingConfig, ParsingError, ParsingResult, ProductDetailParser, ProductListParser,
};
