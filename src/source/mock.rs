//! In-memory data source for tests and offline demos

use super::traits::{FactSource, SourceError, SourceResult};
use crate::model::{Category, Fact, Research};
use crate::query::QueryFilter;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Evaluates filters over a fixed catalog and records what it was asked.
///
/// `_q` matches case-insensitively anywhere in the fact text; `id_in`
/// matches facts carrying at least one of the listed categories.
#[derive(Debug, Default)]
pub struct MockSource {
    categories: Vec<Category>,
    facts: Vec<Fact>,
    latency: Option<Duration>,
    failing: bool,
    fact_requests: Mutex<Vec<QueryFilter>>,
    category_requests: Mutex<usize>,
    detail_requests: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new(categories: Vec<Category>, facts: Vec<Fact>) -> Self {
        Self {
            categories,
            facts,
            ..Self::default()
        }
    }

    /// Delay every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail every request with a transport error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Filters received by `list_facts`, in call order.
    pub fn fact_requests(&self) -> Vec<QueryFilter> {
        self.fact_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn category_requests(&self) -> usize {
        self.category_requests.lock().map(|n| *n).unwrap_or_default()
    }

    /// Ids received by `get_fact`, in call order.
    pub fn detail_requests(&self) -> Vec<String> {
        self.detail_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    async fn respond(&self) -> SourceResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing {
            return Err(SourceError::Transport("mock source configured to fail".to_string()));
        }
        Ok(())
    }

    fn matches(fact: &Fact, filter: &QueryFilter) -> bool {
        if let Some(ref text) = filter.text {
            if !fact.text.to_lowercase().contains(&text.to_lowercase()) {
                return false;
            }
        }
        let ids = filter.category_ids();
        ids.is_empty() || ids.iter().any(|id| fact.has_category(id))
    }
}

#[async_trait]
impl FactSource for MockSource {
    async fn list_categories(&self) -> SourceResult<Vec<Category>> {
        if let Ok(mut n) = self.category_requests.lock() {
            *n += 1;
        }
        self.respond().await?;
        Ok(self.categories.clone())
    }

    async fn list_facts(&self, filter: &QueryFilter) -> SourceResult<Vec<Fact>> {
        if let Ok(mut requests) = self.fact_requests.lock() {
            requests.push(filter.clone());
        }
        self.respond().await?;
        Ok(self
            .facts
            .iter()
            .filter(|fact| Self::matches(fact, filter))
            .map(|fact| Fact {
                updated_at: None,
                research: fact.research.iter().map(|r| Research::new(r.id.clone(), "")).collect(),
                ..fact.clone()
            })
            .collect())
    }

    async fn get_fact(&self, id: &str) -> SourceResult<Fact> {
        if let Ok(mut requests) = self.detail_requests.lock() {
            requests.push(id.to_string());
        }
        self.respond().await?;
        self.facts
            .iter()
            .find(|fact| fact.id == id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }
}
