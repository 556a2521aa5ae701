//! Locations, routes and navigation history
//!
//! A location is the in-process stand-in for a browser URL: a path plus an
//! optional query string. The list screen lives at `/`, optionally filtered
//! by `?categories=...`; a single fact lives at `/fact/<id>`.

use crate::query;
use std::fmt;

/// A path and query string, rendered as `path[?query]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: String,
    pub query: String,
}

impl Location {
    /// Parse `path[?query]`. An empty path becomes `/`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };
        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        Self {
            path,
            query: query.to_string(),
        }
    }

    /// The unfiltered list screen.
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: String::new(),
        }
    }

    /// The list screen filtered to the given categories.
    pub fn list<I, S>(category_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            path: "/".to_string(),
            query: query::encode(category_ids),
        }
    }

    /// The detail screen for one fact.
    pub fn fact(id: &str) -> Self {
        Self {
            path: format!("/fact/{}", id),
            query: String::new(),
        }
    }

    /// Same path, different query string.
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            path: self.path.clone(),
            query: query.into(),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// Which screen a location selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, with the categories decoded from the query string
    List { categories: Vec<String> },
    /// `/fact/<id>`
    Detail { id: String },
    /// Anything else
    NotFound { path: String },
}

impl Route {
    pub fn resolve(location: &Location) -> Self {
        let path = location.path.trim_end_matches('/');
        if path.is_empty() {
            return Route::List {
                categories: query::decode(&location.query),
            };
        }

        match path.strip_prefix("/fact/") {
            Some(id) if !id.is_empty() && !id.contains('/') => Route::Detail { id: id.to_string() },
            _ => Route::NotFound {
                path: location.path.clone(),
            },
        }
    }
}

/// Browser-style navigation stack.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Push a new entry, dropping anything ahead of the cursor.
    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    /// Overwrite the current entry.
    pub fn replace(&mut self, location: Location) {
        self.entries[self.index] = location;
    }

    /// Step back; returns the new current entry, or `None` at the start.
    pub fn back(&mut self) -> Option<&Location> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Step forward; returns the new current entry, or `None` at the end.
    pub fn forward(&mut self) -> Option<&Location> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Location::root())
    }
}
