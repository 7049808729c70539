//! Search result extraction across card markup and the two fallback scans

use flipkart_scraper::domain::SearchResultRecord;
use flipkart_scraper::domain::constants::site;
use flipkart_scraper::infrastructure::parsing::{
    ContextualParser, ProductListParser, SearchParseContext,
};

const STRUCTURAL: &str = include_str!("fixtures/search_structural.html");
const HEURISTIC: &str = include_str!("fixtures/search_heuristic.html");
const PRICE_ONLY: &str = include_str!("fixtures/search_price_only.html");
const GRID: &str = include_str!("fixtures/search_grid.html");

fn search(html: &str, max_results: usize) -> Vec<SearchResultRecord> {
    let parser = ProductListParser::new().expect("default selectors compile");
    parser
        .parse_str(html, &SearchParseContext::new("test", site::BASE_URL, max_results))
        .expect("search parsing never fails on well-formed selectors")
}

#[test]
fn card_markup_yields_listings_in_document_order() {
    let results = search(STRUCTURAL, 20);

    // seven product cards plus one banner card with neither name nor price
    assert_eq!(results.len(), 7);
    let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names[0], "Apple iPhone 15 (Black, 128 GB)");
    assert_eq!(names[2], "Motorola Edge 50 Fusion (Forest Blue, 128 GB)");
    assert_eq!(names[3], "REDMI 13C (Stardust Black, 128 GB)");
    assert!(!names.contains(&"Add to Compare"));

    let first = &results[0];
    assert_eq!(first.price, "₹65,999");
    assert_eq!(first.rating, "4.6/5");
    assert!(first.image_url.ends_with("mobgtagptb3vs24w.jpeg?q=70"));
    assert!(first.url.starts_with(
        "https://www.flipkart.com/apple-iphone-15-black-128-gb/p/itm6ac6485515ae4?pid=MOBGTAGPTB3VS24W"
    ));
}

#[test]
fn listing_without_rating_keeps_placeholder() {
    let results = search(STRUCTURAL, 20);
    let nothing = results.last().expect("at least one listing");
    assert_eq!(nothing.name, "Nothing Phone (2a) 5G (Black, 128 GB)");
    assert_eq!(nothing.rating, "No rating");
}

#[test]
fn stops_at_max_results_counting_only_valid_listings() {
    let results = search(STRUCTURAL, 4);
    assert_eq!(results.len(), 4);
    // the banner card sits fourth in the page and is skipped, not counted
    assert_eq!(results[3].name, "REDMI 13C (Stardust Black, 128 GB)");
}

#[test]
fn grid_rows_yield_every_card() {
    let results = search(GRID, 30);

    // six rows of four cards; the header and pagination rows are not listings
    assert_eq!(results.len(), 24);
    let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        &names[..5],
        [
            "Running Shoe Model 1",
            "Running Shoe Model 2",
            "Running Shoe Model 3",
            "Running Shoe Model 4",
            "Running Shoe Model 5",
        ]
    );
    assert_eq!(names[23], "Running Shoe Model 24");

    let first = &results[0];
    assert_eq!(first.price, "₹599");
    assert_eq!(first.rating, "3.1/5");
    assert!(first.image_url.ends_with("shogrd0001xyz.jpeg?q=70"));
    assert!(first.url.contains("/asian-running-shoe-model-1/p/itm0001a1b2c3?pid=SHOGRD0001XYZ"));
    assert_eq!(results[4].rating, "No rating");
}

#[test]
fn grid_results_stop_at_max_results() {
    let results = search(GRID, 20);
    assert_eq!(results.len(), 20);
    assert_eq!(results[19].name, "Running Shoe Model 20");
}

#[test]
fn product_links_locate_cards_without_known_markup() {
    let results = search(HEURISTIC, 10);

    assert_eq!(results.len(), 3);

    let boat = &results[0];
    assert_eq!(boat.name, "boAt Rockerz 450 Bluetooth Headset");
    assert_eq!(boat.price, "₹1,499");
    assert_eq!(boat.rating, "4.2/5");
    assert_eq!(
        boat.image_url,
        "https://rukminim2.flixcart.com/image/612/612/xif0q/headphone/boat-rockerz-450.jpeg?q=70"
    );
    assert!(boat.url.contains("/boat-rockerz-450-bluetooth-headset/p/itm0b5a6a5e9f1d2"));

    assert_eq!(results[1].name, "SONY WH-CH520 Bluetooth Headset");
    assert_eq!(results[1].rating, "4.4/5");

    let jbl = &results[2];
    assert_eq!(jbl.name, "JBL Tune 760NC Active Noise Cancelling");
    assert_eq!(jbl.rating, "No rating");
    assert!(jbl.image_url.ends_with("jbl-tune-760nc.jpeg?q=70"));
}

#[test]
fn navigation_links_are_never_listings() {
    let results = search(HEURISTIC, 20);
    for result in &results {
        for segment in ["/search", "/helpcentre", "/viewcart", "/plus", "/account", "/wishlist"] {
            assert!(!result.url.contains(&format!("flipkart.com{segment}")), "{}", result.url);
        }
    }
}

#[test]
fn price_text_locates_cards_when_links_are_loose() {
    let results = search(PRICE_ONLY, 10);

    assert_eq!(results.len(), 2);

    let pigeon = &results[0];
    assert_eq!(pigeon.name, "Pigeon Electric Kettle 1.5L");
    assert_eq!(pigeon.price, "₹649");
    assert_eq!(pigeon.rating, "3.9/5");
    assert_eq!(pigeon.image_url, "No image");
    assert_eq!(
        pigeon.url,
        "https://www.flipkart.com/dl/pigeon-electric-kettle?pid=EKTFWZ6ZGHZSZ3PQ"
    );

    assert_eq!(results[1].name, "Prestige Atlas 1700 W Electric Kettle");
    assert_eq!(results[1].price, "₹799");
}

#[test]
fn page_without_listings_is_empty() {
    let html = r#"<html><body><div class="DOjaWF"><div>Sorry, no results found!</div>
        <a href="/search?q=zzzz&amp;page=2">Next</a></div></body></html>"#;
    assert!(search(html, 5).is_empty());
}

#[test]
fn one_malformed_card_does_not_drop_the_rest() {
    let html = r#"
        <div class="_1AtVbE"><div class="_4rR01T">Card with no link at all</div><div class="_30jeq3">₹100</div></div>
        <div class="_1AtVbE"><a href="javascript:void(0)"><div class="_4rR01T">Script link card</div></a></div>
        <div class="_1AtVbE"><a class="s1Q9rs" href="/usb-cable/p/itm42">Ambrane USB-C Cable</a><div class="_30jeq3">₹199</div></div>
    "#;
    let results = search(html, 5);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Ambrane USB-C Cable");
    assert_eq!(results[0].price, "₹199");
}
