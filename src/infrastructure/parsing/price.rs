//! Price text normalization
//!
//! Prices arrive wrapped in whitespace, strike-through labels, and offer
//! copy. Normalization keeps only the `₹` amount when one is present.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::constants::{product_sentinel, site};

static CURRENCY_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"{}[\d,]+", regex::escape(&site::CURRENCY_SYMBOL.to_string()));
    Regex::new(&pattern).expect("currency amount pattern is a valid regex")
});

/// Collapse whitespace and extract the currency amount.
///
/// Returns the first `₹`-prefixed run of digits and commas when present,
/// otherwise the whitespace-collapsed text. Empty input yields
/// `"Price not available"`. Idempotent.
pub fn normalize_price(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return product_sentinel::PRICE.to_string();
    }

    if let Some(amount) = CURRENCY_AMOUNT.find(&collapsed) {
        return amount.as_str().to_string();
    }
    collapsed
}

/// Whether `normalized` carries an actual amount rather than a placeholder.
pub fn is_currency_amount(normalized: &str) -> bool {
    CURRENCY_AMOUNT
        .find(normalized)
        .is_some_and(|m| m.start() == 0 && m.end() == normalized.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extracts_amount_from_surrounding_text() {
        assert_eq!(normalize_price("₹1,29,999"), "₹1,29,999");
        assert_eq!(normalize_price("  Special price ₹54,999  incl. taxes"), "₹54,999");
        assert_eq!(normalize_price("₹79,900₹69,900"), "₹79,900");
    }

    #[test]
    fn collapses_whitespace_without_amount() {
        assert_eq!(normalize_price("  Price   on\n request "), "Price on request");
    }

    #[test]
    fn empty_input_is_sentinel() {
        assert_eq!(normalize_price(""), "Price not available");
        assert_eq!(normalize_price(" \n\t "), "Price not available");
    }

    #[test]
    fn amount_detection() {
        assert!(is_currency_amount("₹499"));
        assert!(!is_currency_amount("Price not available"));
        assert!(!is_currency_amount("from ₹499"));
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "\\PC{0,40}") {
            let once = normalize_price(&raw);
            prop_assert_eq!(normalize_price(&once), once);
        }

        #[test]
        fn plain_text_is_only_whitespace_collapsed(raw in "[a-zA-Z0-9 .,\t\n-]{1,40}") {
            prop_assume!(!raw.trim().is_empty());
            let expected = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            prop_assert_eq!(normalize_price(&raw), expected);
        }

        #[test]
        fn amount_is_found_anywhere(prefix in "[a-zA-Z ]{0,12}", digits in "[1-9][0-9,]{0,8}", suffix in "[a-zA-Z ]{0,12}") {
            let raw = format!("{prefix}₹{digits}{suffix}");
            prop_assert_eq!(normalize_price(&raw), format!("₹{digits}"));
        }
    }
}
