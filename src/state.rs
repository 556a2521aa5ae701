//! Filter state for the list screen
//!
//! Holds the selected category ids and the raw search text, derives the
//! server-bound [`QueryFilter`], and writes category changes through to the
//! navigation history so the URL always encodes the active tags.

use crate::debounce::Debouncer;
use crate::query::{self, QueryFilter};
use crate::router::{History, Location};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

/// Selected categories plus debounced search text.
#[derive(Debug)]
pub struct FilterController {
    selected: BTreeSet<String>,
    search_text: Option<String>,
    search: Debouncer<Option<String>>,
    initialized: bool,
}

impl FilterController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            selected: BTreeSet::new(),
            search_text: None,
            search: Debouncer::new(None, debounce),
            initialized: false,
        }
    }

    /// Seed the selection from a query string.
    ///
    /// Only the first call has any effect; later URL changes reach the list
    /// screen by remounting it. Returns whether the query was applied.
    pub fn initialize_from_query(&mut self, query_string: &str) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        self.selected = query::decode(query_string).into_iter().collect();
        debug!(selected = ?self.selected, "filter seeded from query string");
        true
    }

    /// Add or remove a category, then push the re-encoded selection as a new
    /// history entry. Search text is untouched.
    pub fn toggle_category(&mut self, id: &str, history: &mut History) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        let location = history.current().with_query(query::encode(&self.selected));
        debug!(category = id, location = %location, "category toggled");
        history.push(location);
    }

    /// Set the search text and adopt it at once, bypassing the debounce
    /// delay. For search input known before the first request goes out.
    pub fn seed_search_text(&mut self, text: Option<String>) {
        self.search_text = text.clone();
        self.search.set_now(text);
    }

    /// Replace the search text verbatim. Not written to the URL.
    pub fn set_search_text(&mut self, text: Option<String>) {
        self.search_text = text.clone();
        self.search.set(text);
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search_text.as_deref()
    }

    /// Search text after the debounce delay.
    pub fn debounced_search(&self) -> Option<String> {
        self.search.get()
    }

    /// Whether typed search text is still waiting out its delay, or was
    /// adopted but not yet picked up through `search_adopted()`.
    pub fn search_pending(&self) -> bool {
        self.search.is_pending() || self.search.has_unobserved()
    }

    /// Resolves when the debouncer adopts a new search value.
    pub async fn search_adopted(&mut self) -> Option<String> {
        self.search.adopted().await
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// List location encoding the current selection.
    pub fn location(&self) -> Location {
        Location::list(&self.selected)
    }

    /// Filter for the facts query: text clause only for non-empty debounced
    /// search, membership clause only for a non-empty selection.
    pub fn derive_query_filter(&self) -> QueryFilter {
        let mut filter = QueryFilter::new();
        if let Some(text) = self.search.get() {
            filter = filter.with_text(text);
        }
        filter.with_categories(self.selected.iter().cloned())
    }
}
