//! Single-fact screen with categories and supporting research

use super::LoadState;
use crate::model::{Fact, Research};
use crate::router::Location;
use crate::source::{FactSource, SourceError, SourceResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A category tag that jumps to the list filtered by that category alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    pub id: String,
    pub name: String,
    pub href: Location,
}

/// One row of the research section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchEntry {
    pub title: String,
    /// External link; also drives the link button
    pub link: Option<String>,
    pub citation: Option<String>,
    pub description: Option<String>,
}

impl From<&Research> for ResearchEntry {
    fn from(research: &Research) -> Self {
        Self {
            title: research.title.clone(),
            link: research.link().map(String::from),
            citation: research.citation.clone(),
            description: research.description.clone(),
        }
    }
}

/// Rendered content of a loaded fact.
#[derive(Debug, Clone, PartialEq)]
pub struct FactPage {
    pub id: String,
    pub heading: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub categories: Vec<CategoryLink>,
    /// `None` when the fact has no research, so no section is shown
    pub research: Option<Vec<ResearchEntry>>,
}

impl From<&Fact> for FactPage {
    fn from(fact: &Fact) -> Self {
        Self {
            id: fact.id.clone(),
            heading: fact.text.clone(),
            updated_at: fact.updated_at,
            categories: fact
                .categories
                .iter()
                .map(|c| CategoryLink {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    href: DetailView::category_location(&c.id),
                })
                .collect(),
            research: (!fact.research.is_empty())
                .then(|| fact.research.iter().map(ResearchEntry::from).collect()),
        }
    }
}

/// Snapshot of everything the detail screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailScreen {
    pub back: Location,
    pub fact: LoadState<FactPage>,
}

/// The mounted detail screen.
pub struct DetailView {
    id: String,
    fact: LoadState<Fact>,
    pending: Option<JoinHandle<SourceResult<Fact>>>,
}

impl DetailView {
    /// Mount for one fact id and send its request.
    pub fn mount(source: Arc<dyn FactSource>, id: &str) -> Self {
        info!(fact = id, "mounting detail view");
        let request_id = id.to_string();
        let pending = tokio::spawn(async move { source.get_fact(&request_id).await });
        Self {
            id: id.to_string(),
            fact: LoadState::Loading,
            pending: Some(pending),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_none()
    }

    /// Wait for the fact request to complete. Never resolves once settled.
    pub async fn step(&mut self) {
        let Some(handle) = self.pending.as_mut() else {
            return std::future::pending().await;
        };
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(SourceError::Transport(format!("request task failed: {}", e))),
        };
        self.pending = None;

        match result {
            Ok(_) => debug!(fact = %self.id, "fact loaded"),
            Err(ref e) => warn!(fact = %self.id, error = %e, "fact request failed"),
        }
        self.fact = result.into();
    }

    pub async fn settle(&mut self) {
        while !self.is_settled() {
            self.step().await;
        }
    }

    /// Where a category tag leads: the list filtered to that one category,
    /// regardless of any filter active before this screen.
    pub fn category_location(category_id: &str) -> Location {
        Location::list([category_id])
    }

    /// Where the back button leads: the unfiltered list.
    pub fn back_location() -> Location {
        Location::root()
    }

    pub fn screen(&self) -> DetailScreen {
        DetailScreen {
            back: Self::back_location(),
            fact: self.fact.map(|fact| FactPage::from(fact)),
        }
    }
}
