//! Domain module - records produced by the scraper and the rules about
//! which URLs it accepts.
//!
//! Records are transient: built fresh per call and dropped once the report
//! is rendered.

pub mod constants;
pub mod product;
pub mod product_url;

pub use product::{Availability, ProductRecord, SearchResultRecord};
pub use product_url::UrlRejection;
