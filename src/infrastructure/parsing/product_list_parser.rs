//! Search results parser
//!
//! Finds listing cards on a Flipkart search page and extracts one
//! [`SearchResultRecord`] per card. Cards are located in tiers:
//!
//! 1. configured card selectors (first selector with any match wins)
//! 2. product-shaped links, each widened to the largest ancestor that still
//!    holds only that product
//! 3. `₹` text nodes, widened until the region contains a product link
//!
//! A later tier runs only when the earlier one produced no usable listing.
//! A failing card is logged and skipped; it never aborts the batch.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};
use url::{Url, form_urlencoded};

use super::config::{SearchHeuristics, SearchResultSelectors};
use super::context::SearchParseContext;
use super::price::{is_currency_amount, normalize_price};
use super::selector_chain::{SelectorChain, element_text, spaced_text, visible_text_nodes};
use super::{ContextualParser, ParsingError, ParsingResult, Validator};
use crate::domain::constants::{search_sentinel, site};
use crate::domain::product::SearchResultRecord;
use crate::domain::product_url::{has_product_marker, is_listing_link, is_product_link};

static LEADING_RATING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d)\.?(\d)?").expect("leading rating pattern is a valid regex"));

static EMBEDDED_RATING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([1-5]\.\d)\b").expect("embedded rating pattern is a valid regex"));

const ANY_LINK_SELECTOR: &str = "a[href]";

/// Which tier produced a set of candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    CardSelector,
    ProductLinks,
    PriceProximity,
}

/// A region of the page believed to hold one listing
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    region: ElementRef<'a>,
    /// Already-known product link; otherwise looked up inside the region
    link: Option<ElementRef<'a>>,
}

/// Parser for Flipkart search results pages
#[derive(Debug, Clone)]
pub struct ProductListParser {
    card: SelectorChain,
    link: SelectorChain,
    name: SelectorChain,
    price: SelectorChain,
    image: SelectorChain,
    rating: SelectorChain,
    any_link: Selector,
    heuristics: SearchHeuristics,
}

impl ProductListParser {
    /// Create a parser with the built-in selectors and limits
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&SearchResultSelectors::default(), &SearchHeuristics::default())
    }

    /// Create a parser with custom selectors and limits
    pub fn with_config(
        selectors: &SearchResultSelectors,
        heuristics: &SearchHeuristics,
    ) -> ParsingResult<Self> {
        let any_link = Selector::parse(ANY_LINK_SELECTOR)
            .map_err(|e| ParsingError::invalid_selector(ANY_LINK_SELECTOR, format!("{e:?}")))?;

        Ok(Self {
            card: SelectorChain::compile("card", &selectors.card)?,
            link: SelectorChain::compile("link", &selectors.link)?,
            name: SelectorChain::compile("name", &selectors.name)?,
            price: SelectorChain::compile("price", &selectors.price)?,
            image: SelectorChain::compile("image", &selectors.image)?,
            rating: SelectorChain::compile("rating", &selectors.rating)?,
            any_link,
            heuristics: heuristics.clone(),
        })
    }
}

impl ContextualParser for ProductListParser {
    type Output = Vec<SearchResultRecord>;
    type Context = SearchParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!(query = %context.query, max_results = context.max_results, "Parsing search results");

        if context.max_results == 0 {
            return Ok(Vec::new());
        }

        for source in [
            CandidateSource::CardSelector,
            CandidateSource::ProductLinks,
            CandidateSource::PriceProximity,
        ] {
            let candidates = self.locate_candidates(source, html, &context.base_url);
            if candidates.is_empty() {
                debug!(?source, "No candidates");
                continue;
            }
            debug!(?source, count = candidates.len(), "Found listing candidates");

            let results = self.collect_results(&candidates, context);
            if !results.is_empty() {
                debug!(?source, count = results.len(), "Extracted search results");
                return Ok(results);
            }
        }

        debug!(query = %context.query, "No listings found");
        Ok(Vec::new())
    }
}

impl Validator<SearchResultRecord> for ProductListParser {
    /// A listing needs a real name or a real price.
    fn validate(&self, data: &SearchResultRecord) -> ParsingResult<()> {
        let has_name = data.name != search_sentinel::NAME
            && data.name.chars().count() >= self.heuristics.min_name_chars;
        let has_price = is_currency_amount(&data.price);

        if has_name || has_price {
            return Ok(());
        }
        Err(ParsingError::CandidateValidationFailed {
            reason: "listing has neither a name nor a price".to_string(),
            field_errors: vec![
                format!("name: {:?}", data.name),
                format!("price: {:?}", data.price),
            ],
        })
    }
}

impl ProductListParser {
    fn locate_candidates<'a>(
        &self,
        source: CandidateSource,
        html: &'a Html,
        base_url: &str,
    ) -> Vec<Candidate<'a>> {
        match source {
            CandidateSource::CardSelector => self
                .card
                .first_match_set(html)
                .into_iter()
                .map(|region| Candidate { region, link: None })
                .collect(),
            CandidateSource::ProductLinks => self.product_link_candidates(html, base_url),
            CandidateSource::PriceProximity => self.price_proximity_candidates(html, base_url),
        }
    }

    /// Extract cards in document order until `max_results` listings pass validation.
    fn collect_results(
        &self,
        candidates: &[Candidate<'_>],
        context: &SearchParseContext,
    ) -> Vec<SearchResultRecord> {
        let mut results = Vec::new();

        for (index, candidate) in candidates.iter().enumerate() {
            if results.len() >= context.max_results {
                break;
            }

            let outcome = self
                .extract_candidate(candidate, &context.base_url)
                .and_then(|record| self.validate(&record).map(|()| record));

            match outcome {
                Ok(record) => results.push(record),
                Err(e) if e.is_recoverable() => {
                    debug!(index, "Skipping candidate: {e}");
                }
                Err(e) => {
                    warn!(index, "Failed to extract candidate: {e}");
                }
            }
        }

        results
    }

    fn extract_candidate(
        &self,
        candidate: &Candidate<'_>,
        base_url: &str,
    ) -> ParsingResult<SearchResultRecord> {
        let link = candidate
            .link
            .or_else(|| self.card_link(candidate.region))
            .ok_or(ParsingError::MissingProductLink)?;
        let href = link
            .value()
            .attr("href")
            .ok_or(ParsingError::MissingProductLink)?;

        let mut record = SearchResultRecord::new(resolve_url(href, base_url)?);
        let region = candidate.region;

        if let Some(name) = self.listing_name(region) {
            record.name = name;
        }
        if let Some(price) = self.listing_price(region) {
            record.price = price;
        }
        if let Some(image_url) = self.image.scan_derived(region, inline_free_src) {
            record.image_url = image_url;
        }
        if let Some(rating) = self.listing_rating(region) {
            record.rating = rating;
        }

        Ok(record)
    }

    /// Product link for a card: the card itself, a link inside it, or an
    /// enclosing link. Cards linking only to navigation pages have none.
    fn card_link<'a>(&self, card: ElementRef<'a>) -> Option<ElementRef<'a>> {
        if links_to_listing(card) {
            return Some(card);
        }
        self.link
            .scan_derived(card, |a| links_to_listing(a).then_some(a))
            .or_else(|| {
                card.ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|e| links_to_listing(*e))
            })
    }

    fn listing_name(&self, region: ElementRef<'_>) -> Option<String> {
        let structural = self.name.first_derived(region, |el| {
            let name = self.strip_noise(&element_text(el));
            (!name.is_empty()).then_some(name)
        });

        match structural {
            Some(name) if name.chars().count() >= self.heuristics.min_name_chars => Some(name),
            short => self.scan_name(region).or(short),
        }
    }

    /// Longest visible text node that reads like a product title.
    fn scan_name(&self, region: ElementRef<'_>) -> Option<String> {
        let window = self.heuristics.min_name_chars..=self.heuristics.max_name_chars;

        visible_text_nodes(region)
            .filter(|text| window.contains(&text.chars().count()))
            .filter(|text| !text.contains(site::CURRENCY_SYMBOL))
            .filter(|text| text.chars().any(char::is_alphabetic))
            .filter(|text| !self.is_noise(text))
            .fold(None, |best: Option<&str>, text| match best {
                Some(current) if current.chars().count() >= text.chars().count() => Some(current),
                _ => Some(text),
            })
            .map(ToString::to_string)
    }

    fn listing_price(&self, region: ElementRef<'_>) -> Option<String> {
        self.price
            .first_derived(region, |el| currency_amount(&element_text(el)))
            .or_else(|| visible_text_nodes(region).find_map(currency_amount))
    }

    fn listing_rating(&self, region: ElementRef<'_>) -> Option<String> {
        self.rating
            .first_derived(region, |el| leading_rating(&element_text(el)))
            .or_else(|| embedded_rating(&spaced_text(region)))
    }

    fn strip_noise(&self, text: &str) -> String {
        self.heuristics
            .noise_phrases
            .iter()
            .fold(text.to_string(), |acc, phrase| acc.replace(phrase.as_str(), ""))
            .trim()
            .to_string()
    }

    fn is_noise(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.heuristics
            .noise_phrases
            .iter()
            .any(|phrase| lower.contains(&phrase.to_lowercase()))
    }

    /// Product-shaped links, deduplicated by URL, each widened to its card.
    fn product_link_candidates<'a>(&self, html: &'a Html, base_url: &str) -> Vec<Candidate<'a>> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for anchor in html.select(&self.any_link) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !is_product_link(href) {
                continue;
            }
            let Ok(url) = resolve_url(href, base_url) else {
                continue;
            };
            if !seen.insert(dedup_key(&url)) {
                continue;
            }
            candidates.push(Candidate {
                region: self.link_region(anchor),
                link: Some(anchor),
            });
        }

        candidates
    }

    /// Highest ancestor, within the depth limit, that links to no other product.
    fn link_region<'a>(&self, anchor: ElementRef<'a>) -> ElementRef<'a> {
        let mut region = anchor;
        for ancestor in anchor
            .ancestors()
            .filter_map(ElementRef::wrap)
            .take(self.heuristics.max_link_ancestor_depth)
        {
            if self.distinct_product_links(ancestor) > 1 {
                break;
            }
            region = ancestor;
        }
        region
    }

    fn distinct_product_links(&self, element: ElementRef<'_>) -> usize {
        element
            .select(&self.any_link)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| is_product_link(href))
            .map(dedup_key)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Regions around `₹` text that contain a product-marked link.
    fn price_proximity_candidates<'a>(&self, html: &'a Html, base_url: &str) -> Vec<Candidate<'a>> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for node in html.root_element().descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            if !text.contains(site::CURRENCY_SYMBOL) {
                continue;
            }
            let Some(parent) = node.parent().and_then(ElementRef::wrap) else {
                continue;
            };
            if matches!(parent.value().name(), "script" | "style" | "noscript" | "template") {
                continue;
            }

            let found = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .take(self.heuristics.max_price_ancestor_depth)
                .find_map(|region| self.marked_link(region).map(|link| (region, link)));

            let Some((region, link)) = found else {
                continue;
            };
            let Some(Ok(url)) = link.value().attr("href").map(|href| resolve_url(href, base_url))
            else {
                continue;
            };
            if seen.insert(dedup_key(&url)) {
                candidates.push(Candidate {
                    region,
                    link: Some(link),
                });
            }
        }

        candidates
    }

    /// `element` itself or its first descendant link carrying a product marker.
    fn marked_link<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let marked = |e: &ElementRef<'a>| e.value().attr("href").is_some_and(has_product_marker);
        if is_link(element) && marked(&element) {
            return Some(element);
        }
        element.select(&self.any_link).find(|e| marked(e))
    }
}

fn is_link(element: ElementRef<'_>) -> bool {
    element.value().name() == "a" && element.value().attr("href").is_some()
}

fn links_to_listing(element: ElementRef<'_>) -> bool {
    is_link(element) && element.value().attr("href").is_some_and(is_listing_link)
}

/// Identity of the product a link points at.
///
/// Detail paths carry the item id, so tracking parameters are dropped. Other
/// paths keep only their `pid` parameter.
fn dedup_key(url: &str) -> String {
    let url = url.split('#').next().unwrap_or(url);
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    if path.contains("/p/") {
        return path.to_string();
    }
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "pid")
        .map_or_else(|| path.to_string(), |(_, pid)| format!("{path}?pid={pid}"))
}

/// Resolve a listing href against the site origin; only http(s) targets qualify.
fn resolve_url(href: &str, base_url: &str) -> ParsingResult<String> {
    let href = href.trim();
    if href.is_empty() {
        return Err(ParsingError::url_resolution_failed(href, "empty href", Some(base_url)));
    }

    let resolved = if href.starts_with("http://") || href.starts_with("https://") {
        Url::parse(href).map_err(|e| ParsingError::url_resolution_failed(href, e, None))?
    } else {
        let base = Url::parse(base_url)
            .map_err(|e| ParsingError::url_resolution_failed(base_url, format!("Invalid base URL: {e}"), None))?;
        base.join(href)
            .map_err(|e| ParsingError::url_resolution_failed(href, e, Some(base_url)))?
    };

    if !matches!(resolved.scheme(), "http" | "https") {
        return Err(ParsingError::url_resolution_failed(
            href,
            format!("unsupported scheme '{}'", resolved.scheme()),
            Some(base_url),
        ));
    }
    Ok(resolved.to_string())
}

fn currency_amount(text: &str) -> Option<String> {
    let price = normalize_price(text);
    is_currency_amount(&price).then_some(price)
}

fn inline_free_src(element: ElementRef<'_>) -> Option<String> {
    let src = element.value().attr("src")?.trim();
    (!src.is_empty() && !src.starts_with("data:")).then(|| src.to_string())
}

/// `"4.3"` → `"4.3/5"`, `"4"` → `"4/5"`; text must start with a digit.
fn leading_rating(text: &str) -> Option<String> {
    let caps = LEADING_RATING.captures(text)?;
    let whole = caps.get(1)?.as_str();
    Some(match caps.get(2) {
        Some(fraction) => format!("{whole}.{}/5", fraction.as_str()),
        None => format!("{whole}/5"),
    })
}

/// First standalone `d.d` token between 1.0 and 5.0.
fn embedded_rating(text: &str) -> Option<String> {
    EMBEDDED_RATING
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|value| value.parse::<f32>().is_ok_and(|v| (1.0..=5.0).contains(&v)))
        .map(|value| format!("{value}/5"))
}
