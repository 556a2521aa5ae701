//! GraphQL-over-HTTP data source

use super::traits::{FactSource, SourceError, SourceResult};
use crate::model::{Category, Fact};
use crate::query::{QueryDescriptor, QueryFilter, GET_FACT, LIST_CATEGORIES, LIST_FACTS};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// POST body for one operation.
#[derive(Debug, Serialize)]
struct Request<'a> {
    query: &'a str,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct Response<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CategoriesData {
    #[serde(default)]
    categories: Option<Vec<Category>>,
}

#[derive(Debug, Deserialize)]
struct FactsData {
    #[serde(default)]
    facts: Option<Vec<Fact>>,
}

#[derive(Debug, Deserialize)]
struct FactData {
    #[serde(default)]
    fact: Option<Fact>,
}

fn request_body(descriptor: &QueryDescriptor, variables: Value) -> Request<'static> {
    Request {
        query: descriptor.document,
        operation_name: descriptor.operation_name,
        variables,
    }
}

/// Unwrap a GraphQL response envelope. Any `errors` entry fails the call,
/// even when partial data came back.
fn decode_response<T: DeserializeOwned>(body: &str) -> SourceResult<T> {
    let response: Response<T> = serde_json::from_str(body)?;
    if !response.errors.is_empty() {
        return Err(SourceError::Query(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    response.data.ok_or(SourceError::MissingData)
}

/// Executes the constant query documents against a GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlSource {
    client: reqwest::Client,
    endpoint: String,
}

impl GraphqlSource {
    /// Build a client for `endpoint`. Without a timeout a stalled request
    /// keeps its screen loading until the transport gives up.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> SourceResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("factsheet/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SourceError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        descriptor: &QueryDescriptor,
        variables: Value,
    ) -> SourceResult<T> {
        debug!(operation = descriptor.operation_name, %variables, "sending query");

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request_body(descriptor, variables))
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Transport(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!(operation = descriptor.operation_name, status = status.as_u16(), "query rejected");
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode_response(&body)
    }
}

#[async_trait]
impl FactSource for GraphqlSource {
    async fn list_categories(&self) -> SourceResult<Vec<Category>> {
        let data: CategoriesData = self.execute(&LIST_CATEGORIES, json!({})).await?;
        Ok(data.categories.unwrap_or_default())
    }

    async fn list_facts(&self, filter: &QueryFilter) -> SourceResult<Vec<Fact>> {
        let data: FactsData = self
            .execute(&LIST_FACTS, json!({ "where": filter }))
            .await?;
        Ok(data.facts.unwrap_or_default())
    }

    async fn get_fact(&self, id: &str) -> SourceResult<Fact> {
        let data: FactData = self.execute(&GET_FACT, json!({ "id": id })).await?;
        data.fact.ok_or_else(|| SourceError::NotFound(id.to_string()))
    }
}
