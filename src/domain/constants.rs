//! Site characteristics and domain constants
//!
//! Fixed facts about the Flipkart storefront and the placeholder strings used
//! when a field cannot be extracted from the markup.

/// Flipkart storefront characteristics
pub mod site {
    /// Registrable domain every accepted product URL must belong to
    pub const DOMAIN: &str = "flipkart.com";

    /// Origin used to resolve relative links found in search results
    pub const BASE_URL: &str = "https://www.flipkart.com";

    /// Search page path; the encoded query is appended as the `q` parameter
    pub const SEARCH_PATH: &str = "/search";

    /// Currency symbol prefixing every listed price
    pub const CURRENCY_SYMBOL: char = '₹';
}

/// Search request limits
pub mod search {
    /// Used when the caller asks for fewer than one result
    pub const DEFAULT_MAX_RESULTS: usize = 5;

    /// Hard upper bound on results per call
    pub const MAX_RESULTS_LIMIT: usize = 20;
}

/// Placeholders for product detail fields that could not be extracted
pub mod product_sentinel {
    pub const NAME: &str = "Product name not found";
    pub const PRICE: &str = "Price not available";
    pub const IMAGE: &str = "No image available";
    pub const RATING: &str = "No rating";
    pub const REVIEWS: &str = "No reviews";
    pub const DESCRIPTION: &str = "No description available";
}

/// Placeholders for search result fields
pub mod search_sentinel {
    pub const NAME: &str = "Name not found";
    pub const PRICE: &str = super::product_sentinel::PRICE;
    pub const IMAGE: &str = "No image";
    pub const RATING: &str = "No rating";
}
