//! Ordered selector fallback evaluation
//!
//! A [`SelectorChain`] is the compiled form of one field's selector list.
//! Evaluation walks the selectors in order and stops at the first one whose
//! match the caller's derivation accepts.

use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, trace, warn};

use super::{ParsingError, ParsingResult};

/// Something selectors can be run against: a whole document or one element.
pub trait Scope<'a>: Copy {
    fn select_first(self, selector: &Selector) -> Option<ElementRef<'a>>;
    fn select_all(self, selector: &Selector) -> Vec<ElementRef<'a>>;
}

impl<'a> Scope<'a> for &'a Html {
    fn select_first(self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }

    fn select_all(self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select(selector).collect()
    }
}

impl<'a> Scope<'a> for ElementRef<'a> {
    fn select_first(self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }

    fn select_all(self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select(selector).collect()
    }
}

/// Compiled, ordered selectors for one field
#[derive(Debug, Clone)]
pub struct SelectorChain {
    field: &'static str,
    entries: Vec<(String, Selector)>,
}

impl SelectorChain {
    /// Compile selector strings, skipping invalid ones.
    ///
    /// Fails when nothing in the list compiles, including an empty list.
    pub fn compile(field: &'static str, sources: &[String]) -> ParsingResult<Self> {
        let mut entries = Vec::with_capacity(sources.len());
        let mut errors = Vec::new();

        for source in sources {
            match Selector::parse(source) {
                Ok(selector) => entries.push((source.clone(), selector)),
                Err(e) => {
                    warn!(field, selector = %source, "Failed to compile selector: {e:?}");
                    errors.push(format!("'{source}': {e:?}"));
                }
            }
        }

        if entries.is_empty() {
            let errors = if errors.is_empty() {
                "no selectors configured".to_string()
            } else {
                errors.join(", ")
            };
            return Err(ParsingError::EmptySelectorChain {
                field: field.to_string(),
                errors,
            });
        }

        Ok(Self { field, entries })
    }

    pub const fn field(&self) -> &'static str {
        self.field
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First element matched by any selector in the chain.
    pub fn first_element<'a>(&self, scope: impl Scope<'a>) -> Option<ElementRef<'a>> {
        self.first_derived(scope, Some)
    }

    /// Run each selector's first match through `derive`; the first `Some` wins.
    pub fn first_derived<'a, T>(
        &self,
        scope: impl Scope<'a>,
        mut derive: impl FnMut(ElementRef<'a>) -> Option<T>,
    ) -> Option<T> {
        for (source, selector) in &self.entries {
            let Some(element) = scope.select_first(selector) else {
                continue;
            };
            if let Some(value) = derive(element) {
                debug!(field = self.field, selector = %source, "Field matched");
                return Some(value);
            }
            trace!(field = self.field, selector = %source, "Match rejected by derivation");
        }
        None
    }

    /// Like [`Self::first_derived`], but tries every match of a selector
    /// before moving on to the next selector.
    pub fn scan_derived<'a, T>(
        &self,
        scope: impl Scope<'a>,
        mut derive: impl FnMut(ElementRef<'a>) -> Option<T>,
    ) -> Option<T> {
        self.entries.iter().find_map(|(source, selector)| {
            let value = scope.select_all(selector).into_iter().find_map(&mut derive)?;
            debug!(field = self.field, selector = %source, "Field matched");
            Some(value)
        })
    }

    /// Run each selector's full match set through `derive`; the first non-empty result wins.
    pub fn first_non_empty<'a, T>(
        &self,
        scope: impl Scope<'a>,
        mut derive: impl FnMut(&[ElementRef<'a>]) -> Vec<T>,
    ) -> Vec<T> {
        for (source, selector) in &self.entries {
            let matches = scope.select_all(selector);
            if matches.is_empty() {
                continue;
            }
            let values = derive(&matches);
            if !values.is_empty() {
                debug!(field = self.field, selector = %source, count = values.len(), "Field matched");
                return values;
            }
        }
        Vec::new()
    }

    /// Matches of the first selector that matches anything at all.
    pub fn first_match_set<'a>(&self, scope: impl Scope<'a>) -> Vec<ElementRef<'a>> {
        self.first_non_empty(scope, <[ElementRef<'a>]>::to_vec)
    }
}

/// Trimmed text content of an element.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Elements whose text never renders
const HIDDEN_TEXT_PARENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Trimmed, non-empty text nodes under `element`, skipping script and style bodies.
pub fn visible_text_nodes<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    element.descendants().filter_map(|node| {
        let Node::Text(text) = node.value() else {
            return None;
        };
        let hidden = node
            .parent()
            .and_then(ElementRef::wrap)
            .is_some_and(|parent| HIDDEN_TEXT_PARENTS.contains(&parent.value().name()));
        let trimmed = text.trim();
        (!hidden && !trimmed.is_empty()).then_some(trimmed)
    })
}

/// Visible text of `element` with its text nodes joined by single spaces.
pub fn spaced_text(element: ElementRef<'_>) -> String {
    visible_text_nodes(element).collect::<Vec<_>>().join(" ")
}
