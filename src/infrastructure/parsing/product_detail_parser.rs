//! Product detail parser
//!
//! Fills a [`ProductRecord`] from a Flipkart product page. Every field has
//! its own selector chain and acceptance rule; a field no selector satisfies
//! keeps its placeholder.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::ProductDetailSelectors;
use super::context::DetailParseContext;
use super::price::normalize_price;
use super::selector_chain::{SelectorChain, element_text};
use super::{ContextualParser, ParsingError, ParsingResult};
use crate::domain::product::{Availability, ProductRecord};

/// Descriptions this short are labels, not copy
const MIN_DESCRIPTION_CHARS: usize = 20;
const MAX_DESCRIPTION_CHARS: usize = 500;

/// Substrings that mark a ratings/reviews summary
const REVIEW_KEYWORDS: &[&str] = &["Rating", "Review", "&"];

const SPEC_CELL_SELECTOR: &str = "td, th";

/// Parser for Flipkart product detail pages
#[derive(Debug, Clone)]
pub struct ProductDetailParser {
    name: SelectorChain,
    price: SelectorChain,
    original_price: SelectorChain,
    discount: SelectorChain,
    image: SelectorChain,
    rating: SelectorChain,
    review_count: SelectorChain,
    availability: SelectorChain,
    highlights: SelectorChain,
    specification_rows: SelectorChain,
    description: SelectorChain,
    spec_cell: Selector,
}

impl ProductDetailParser {
    /// Create a parser with the built-in selector chains
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ProductDetailSelectors::default())
    }

    /// Create a parser with custom selector chains
    pub fn with_config(selectors: &ProductDetailSelectors) -> ParsingResult<Self> {
        let spec_cell = Selector::parse(SPEC_CELL_SELECTOR)
            .map_err(|e| ParsingError::invalid_selector(SPEC_CELL_SELECTOR, format!("{e:?}")))?;

        Ok(Self {
            name: SelectorChain::compile("name", &selectors.name)?,
            price: SelectorChain::compile("price", &selectors.price)?,
            original_price: SelectorChain::compile("original_price", &selectors.original_price)?,
            discount: SelectorChain::compile("discount", &selectors.discount)?,
            image: SelectorChain::compile("image", &selectors.image)?,
            rating: SelectorChain::compile("rating", &selectors.rating)?,
            review_count: SelectorChain::compile("review_count", &selectors.review_count)?,
            availability: SelectorChain::compile("availability", &selectors.availability)?,
            highlights: SelectorChain::compile("highlights", &selectors.highlights)?,
            specification_rows: SelectorChain::compile(
                "specifications",
                &selectors.specification_rows,
            )?,
            description: SelectorChain::compile("description", &selectors.description)?,
            spec_cell,
        })
    }
}

impl ContextualParser for ProductDetailParser {
    type Output = ProductRecord;
    type Context = DetailParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!("Parsing product detail from: {}", context.url);

        let mut record = ProductRecord::new(context.url.clone());

        if let Some(name) = self.name.first_derived(html, non_empty_text) {
            record.name = name;
        }
        if let Some(price) = self.price.first_derived(html, normalized_price) {
            record.price = price;
        }
        record.original_price = self.original_price.first_derived(html, normalized_price);
        record.discount = self.discount.first_derived(html, discount_text);
        if let Some(image_url) = self.image.first_derived(html, still_image_src) {
            record.image_url = image_url;
        }
        if let Some(rating) = self.rating.first_derived(html, rating_text) {
            record.rating = rating;
        }
        if let Some(reviews) = self.review_count.first_derived(html, review_summary) {
            record.review_count = reviews;
        }
        record.availability = self
            .availability
            .first_element(html)
            .map(|button| Availability::from_button_text(&element_text(button)))
            .unwrap_or_default();
        record.highlights = self.highlights.first_non_empty(html, |items| {
            items
                .iter()
                .map(|item| element_text(*item))
                .filter(|text| !text.is_empty())
                .collect()
        });
        record.specifications = self.specification_rows.first_non_empty(html, |rows| {
            rows.iter().filter_map(|row| self.specification_entry(*row)).collect()
        });
        if let Some(description) = self.description.first_derived(html, description_text) {
            record.description = description;
        }

        debug!(
            name = %record.name,
            price = %record.price,
            availability = %record.availability,
            specifications = record.specifications.len(),
            "Extracted product detail"
        );
        Ok(record)
    }
}

impl ProductDetailParser {
    /// `"key: value"` from a table row with at least two non-empty cells.
    fn specification_entry(&self, row: ElementRef<'_>) -> Option<String> {
        let mut cells = row.select(&self.spec_cell);
        let key = element_text(cells.next()?);
        let value = element_text(cells.next()?);
        (!key.is_empty() && !value.is_empty()).then(|| format!("{key}: {value}"))
    }
}

fn non_empty_text(element: ElementRef<'_>) -> Option<String> {
    let text = element_text(element);
    (!text.is_empty()).then_some(text)
}

#[allow(clippy::unnecessary_wraps)]
fn normalized_price(element: ElementRef<'_>) -> Option<String> {
    Some(normalize_price(&element_text(element)))
}

fn discount_text(element: ElementRef<'_>) -> Option<String> {
    let text = element_text(element);
    text.contains('%').then_some(text)
}

/// `src` of a non-animated image; `.gif` sources are lazy-load placeholders.
fn still_image_src(element: ElementRef<'_>) -> Option<String> {
    let src = element.value().attr("src")?.trim();
    let path = src.split(['?', '#']).next().unwrap_or(src);
    (!src.is_empty() && !path.to_ascii_lowercase().ends_with(".gif")).then(|| src.to_string())
}

fn rating_text(element: ElementRef<'_>) -> Option<String> {
    let text = element_text(element);
    text.starts_with(|c: char| c.is_ascii_digit())
        .then(|| format!("{text} out of 5"))
}

fn review_summary(element: ElementRef<'_>) -> Option<String> {
    let text = element_text(element);
    REVIEW_KEYWORDS
        .iter()
        .any(|keyword| text.contains(keyword))
        .then_some(text)
}

fn description_text(element: ElementRef<'_>) -> Option<String> {
    let text = element_text(element);
    (text.chars().count() > MIN_DESCRIPTION_CHARS)
        .then(|| text.chars().take(MAX_DESCRIPTION_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> ProductRecord {
        let parser = ProductDetailParser::new().unwrap();
        parser
            .parse_str(html, &DetailParseContext::new("https://www.flipkart.com/x/p/itm1"))
            .unwrap()
    }

    #[test]
    fn parser_creation() {
        assert!(ProductDetailParser::new().is_ok());
    }

    #[test]
    fn empty_page_keeps_every_placeholder() {
        let record = parse("<html><body><p>nothing here</p></body></html>");
        assert_eq!(record, ProductRecord::new("https://www.flipkart.com/x/p/itm1"));
    }

    #[test]
    fn discount_without_percent_falls_through() {
        let record = parse(
            r#"<div class="UkUFwK"><span>Special offer</span></div><div class="_3Ay6Sb">12% off</div>"#,
        );
        assert_eq!(record.discount.as_deref(), Some("12% off"));
    }

    #[test]
    fn gif_images_are_skipped() {
        let record = parse(
            r#"<img class="_0DkuPH" src="https://rukminim.example/loading.gif">
               <img class="_2r_T1I" src="https://rukminim.example/phone.jpeg">"#,
        );
        assert_eq!(record.image_url, "https://rukminim.example/phone.jpeg");
    }

    #[test]
    fn rating_requires_leading_digit() {
        let record = parse(r#"<div class="_3LWZlK">New</div><div class="XQDdHH">4.4</div>"#);
        assert_eq!(record.rating, "4.4 out of 5");
    }

    #[test]
    fn review_count_requires_keyword() {
        let record = parse(
            r#"<span class="_2_R_DZ">Be the first</span><span class="Wphh3N">1,024 Ratings &amp; 88 Reviews</span>"#,
        );
        assert_eq!(record.review_count, "1,024 Ratings & 88 Reviews");
    }

    #[test]
    fn availability_stops_at_first_purchase_element() {
        let record = parse(
            r#"<button class="_2KpZ6l _2U9uOA">Wishlist</button><div class="_16FRp0">Sold Out</div>"#,
        );
        assert_eq!(record.availability, Availability::Unknown);

        let record = parse(r#"<div class="_16FRp0">Currently out of stock</div>"#);
        assert_eq!(record.availability, Availability::OutOfStock);
    }

    #[test]
    fn description_is_length_gated_and_truncated() {
        let long = "x".repeat(800);
        let html = format!(
            r#"<div class="_1mXcCf">Too short</div><div class="qnrGsz">{long}</div>"#
        );
        let record = parse(&html);
        assert_eq!(record.description.chars().count(), 500);
    }

    #[test]
    fn specification_rows_need_two_non_empty_cells() {
        let record = parse(
            r#"<div class="_2GjhP6"><table>
                 <tr><td>Brand</td><td>Apple</td></tr>
                 <tr><td>Colour</td><td>  </td></tr>
                 <tr><td colspan="2">In The Box</td></tr>
                 <tr><th>Model</th><td>iPhone 15</td></tr>
               </table></div>"#,
        );
        assert_eq!(record.specifications, vec!["Brand: Apple", "Model: iPhone 15"]);
    }
}
