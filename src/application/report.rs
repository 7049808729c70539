//! Plain-text reports returned on success

use crate::domain::{ProductRecord, SearchResultRecord};

/// Most specification lines shown in a product report
pub const MAX_REPORTED_SPECIFICATIONS: usize = 10;

const SEPARATOR_WIDTH: usize = 50;

/// Labeled product report. Optional price lines and empty lists are omitted.
pub fn product_report(product: &ProductRecord) -> String {
    let mut out = String::from("\nProduct Information:\n-------------------\n");
    out.push_str(&format!("Name: {}\n", product.name));
    out.push_str(&format!("Price: {}\n", product.price));
    if let Some(original_price) = &product.original_price {
        out.push_str(&format!("Original Price: {original_price}\n"));
    }
    if let Some(discount) = &product.discount {
        out.push_str(&format!("Discount: {discount}\n"));
    }
    out.push_str(&format!("Rating: {}\n", product.rating));
    out.push_str(&format!("Reviews: {}\n", product.review_count));
    out.push_str(&format!("Availability: {}\n\n", product.availability));
    out.push_str(&format!("Image: {}\n\n", product.image_url));

    bullet_section(&mut out, "Highlights", &product.highlights);
    bullet_section(
        &mut out,
        "Specifications",
        &product.specifications[..product.specifications.len().min(MAX_REPORTED_SPECIFICATIONS)],
    );

    out.push_str(&format!("Description: {}\n\n", product.description));
    out.push_str(&format!("Product URL: {}", product.source_url));
    out
}

fn bullet_section(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("{title}:\n"));
    for item in items {
        out.push_str(&format!("  • {item}\n"));
    }
    out.push('\n');
}

/// Numbered search report with a header, a count line and a rule.
pub fn search_report(query: &str, results: &[SearchResultRecord]) -> String {
    let mut out = format!(
        "Search Results for '{query}':\nFound {} product(s)\n{}\n\n",
        results.len(),
        "=".repeat(SEPARATOR_WIDTH)
    );

    for (index, result) in results.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, result.name));
        out.push_str(&format!("   Price: {}\n", result.price));
        out.push_str(&format!("   Rating: {}\n", result.rating));
        out.push_str(&format!("   Image: {}\n", result.image_url));
        out.push_str(&format!("   URL: {}\n\n", result.url));
    }
    out
}
