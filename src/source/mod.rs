//! Data sources for the catalog
//!
//! Two implementations of [`FactSource`]:
//! - `GraphqlSource`: posts the constant query documents to a GraphQL endpoint
//! - `MockSource`: evaluates filters over an in-memory catalog (testing)

mod graphql;
mod mock;
mod traits;

pub use graphql::GraphqlSource;
pub use mock::MockSource;
pub use traits::{FactSource, SourceError, SourceResult};
