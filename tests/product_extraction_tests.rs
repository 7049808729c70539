//! Product detail extraction against a saved product page

use flipkart_scraper::domain::Availability;
use flipkart_scraper::infrastructure::parsing::{
    ContextualParser, DetailParseContext, ProductDetailParser,
};
use rstest::rstest;

const PRODUCT_PAGE: &str = include_str!("fixtures/product_page.html");
const PRODUCT_URL: &str = "https://www.flipkart.com/apple-iphone-15-black-128-gb/p/itm6ac6485515ae4";

fn parse(html: &str) -> flipkart_scraper::domain::ProductRecord {
    let parser = ProductDetailParser::new().expect("default selectors compile");
    parser
        .parse_str(html, &DetailParseContext::new(PRODUCT_URL))
        .expect("detail parsing never fails on well-formed selectors")
}

#[test]
fn extracts_every_field_from_current_markup() {
    let product = parse(PRODUCT_PAGE);

    assert_eq!(product.name, "Apple iPhone 15 (Black, 128 GB)");
    assert_eq!(product.price, "₹65,999");
    assert_eq!(product.original_price.as_deref(), Some("₹79,900"));
    assert_eq!(product.discount.as_deref(), Some("17% off"));
    assert!(product.image_url.starts_with("https://rukminim2.flixcart.com/image/416/416/"));
    assert!(product.image_url.ends_with("?q=70&crop=false"));
    assert_eq!(product.rating, "4.6 out of 5");
    assert!(product.review_count.contains("4,408 Reviews"));
    assert_eq!(product.availability, Availability::InStock);
    assert_eq!(product.source_url, PRODUCT_URL);
}

#[test]
fn collects_highlights_and_specifications_in_order() {
    let product = parse(PRODUCT_PAGE);

    assert_eq!(product.highlights.len(), 4);
    assert_eq!(product.highlights[0], "128 GB ROM");
    assert_eq!(
        product.specifications,
        vec![
            "In The Box: iPhone, USB C Charge Cable (1 m), Documentation",
            "Model Number: MTP03HN/A",
            "Model Name: iPhone 15",
            "Color: Black",
            "SIM Type: Dual Sim(Nano + eSIM)",
        ]
    );
    assert!(product.description.starts_with("The iPhone 15 brings you Dynamic Island"));
}

#[test]
fn older_markup_generation_still_matches() {
    let html = r#"
        <span class="B_NuCI">Realme Narzo 60 5G (Mars Orange, 128 GB)</span>
        <div class="_30jeq3 _16Jk6d">₹17,999</div>
        <div class="_3I9_wc _2p6lqe">₹19,999</div>
        <div class="_3Ay6Sb _31Dcoz"><span>10% off</span></div>
        <img class="_396cs4 _2amPTt _3qGmMb" src="https://rukminim1.flixcart.com/image/416/416/narzo.jpeg">
        <div class="_3LWZlK">4.3</div>
        <span class="_2_R_DZ"><span>12,045 Ratings&nbsp;&amp;&nbsp;1,113 Reviews</span></span>
        <button class="_2KpZ6l _2U9uOA _3v1-ww">ADD TO CART</button>
    "#;
    let product = parse(html);

    assert_eq!(product.name, "Realme Narzo 60 5G (Mars Orange, 128 GB)");
    assert_eq!(product.price, "₹17,999");
    assert_eq!(product.original_price.as_deref(), Some("₹19,999"));
    assert_eq!(product.discount.as_deref(), Some("10% off"));
    assert_eq!(product.rating, "4.3 out of 5");
    assert_eq!(product.availability, Availability::InStock);
    // the image chain has no `_396cs4` entry for detail pages
    assert_eq!(product.image_url, "No image available");
}

#[test]
fn unrelated_page_yields_placeholders() {
    let product = parse("<html><body><h2>Something went wrong</h2></body></html>");

    assert_eq!(product.name, "Product name not found");
    assert_eq!(product.price, "Price not available");
    assert_eq!(product.image_url, "No image available");
    assert_eq!(product.rating, "No rating");
    assert_eq!(product.review_count, "No reviews");
    assert_eq!(product.availability, Availability::Unknown);
    assert_eq!(product.description, "No description available");
    assert!(product.original_price.is_none());
    assert!(product.discount.is_none());
    assert!(product.highlights.is_empty());
    assert!(product.specifications.is_empty());
}

#[rstest]
#[case("ADD TO CART", Availability::InStock)]
#[case("Buy Now", Availability::InStock)]
#[case("Sold Out - Out of Stock", Availability::OutOfStock)]
#[case("NOTIFY ME", Availability::OutOfStock)]
#[case("Coming Soon", Availability::Unknown)]
fn availability_follows_purchase_button(#[case] label: &str, #[case] expected: Availability) {
    let product = parse(&format!(r#"<div class="_16FRp0">{label}</div>"#));
    assert_eq!(product.availability, expected);
}

#[test]
fn description_is_truncated_to_500_chars() {
    let long = "Durable stainless steel body with auto shut-off. ".repeat(20);
    let product = parse(&format!(r#"<div class="_1mXcCf">{long}</div>"#));
    assert_eq!(product.description.chars().count(), 500);
}
