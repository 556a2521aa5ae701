//! Server-bound filter predicate for the facts query
//!
//! Serialized as `{ "_q": "...", "_where": { "categories": { "id_in": [...] } } }`
//! with absent clauses omitted entirely.

use serde::{Deserialize, Serialize};

/// Category-membership predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMembership {
    pub id_in: Vec<String>,
}

/// Structured `_where` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhereClause {
    pub categories: CategoryMembership,
}

/// Filter sent with the facts query. Both clauses present means AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Free-text search predicate
    #[serde(rename = "_q", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Category-membership predicate
    #[serde(rename = "_where", default, skip_serializing_if = "Option::is_none")]
    pub membership: Option<WhereClause>,
}

impl QueryFilter {
    /// An empty predicate (fetch unfiltered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text predicate. Blank text leaves the filter unchanged.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.text = Some(text);
        }
        self
    }

    /// Add a category predicate. An empty id list leaves the filter unchanged.
    pub fn with_categories<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id_in: Vec<String> = ids.into_iter().map(Into::into).collect();
        if !id_in.is_empty() {
            self.membership = Some(WhereClause {
                categories: CategoryMembership { id_in },
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.membership.is_none()
    }

    /// Category ids the filter restricts to, if any.
    pub fn category_ids(&self) -> &[String] {
        self.membership
            .as_ref()
            .map(|w| w.categories.id_in.as_slice())
            .unwrap_or(&[])
    }
}
