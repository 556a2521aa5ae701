//! Data-source trait and error type

use crate::model::{Category, Fact};
use crate::query::QueryFilter;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from data-source operations.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("query error: {}", .0.join("; "))]
    Query(Vec<String>),

    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response carried no data")]
    MissingData,

    #[error("fact not found: {0}")]
    NotFound(String),
}

/// Result type for data-source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Read-only access to the remote catalog.
///
/// Abstracts over transport so views don't depend on how the endpoint is
/// reached. Implementations must be shareable across spawned request tasks.
#[async_trait]
pub trait FactSource: Send + Sync {
    /// Every category, unfiltered.
    async fn list_categories(&self) -> SourceResult<Vec<Category>>;

    /// Facts matching the filter, in server order. Research entries carry
    /// only their ids.
    async fn list_facts(&self, filter: &QueryFilter) -> SourceResult<Vec<Fact>>;

    /// One fact with its categories and full research records.
    async fn get_fact(&self, id: &str) -> SourceResult<Fact>;
}
