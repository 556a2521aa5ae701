//! Factsheet: a read-only catalog viewer for facts and their research
//!
//! Lists short factual statements fetched from a GraphQL endpoint, filters
//! them by category tag and free-text search, and drills into a single fact
//! to show its supporting citations.
//!
//! # Core Concepts
//!
//! - **Location**: path plus query string; `/`, `/?categories=1,3`, `/fact/<id>`
//! - **Filter state**: selected category ids (mirrored in the location) and
//!   debounced search text, derived into a [`QueryFilter`]
//! - **Views**: list and detail screens that fold request completions into
//!   renderable snapshots
//!
//! # Example
//!
//! ```
//! use factsheet::{Location, Route};
//!
//! let location = Location::parse("/?categories=1,3");
//! assert_eq!(
//!     Route::resolve(&location),
//!     Route::List { categories: vec!["1".into(), "3".into()] }
//! );
//! ```

pub mod app;
pub mod config;
pub mod debounce;
pub mod model;
pub mod query;
pub mod render;
pub mod router;
pub mod source;
pub mod state;
pub mod view;

pub use app::{App, Screen, ScreenView};
pub use config::{Config, ConfigError};
pub use debounce::Debouncer;
pub use model::{Category, Fact, Research};
pub use query::{QueryDescriptor, QueryFilter};
pub use router::{History, Location, Route};
pub use source::{FactSource, GraphqlSource, MockSource, SourceError, SourceResult};
pub use state::FilterController;
pub use view::{DetailScreen, DetailView, ListScreen, ListView, LoadState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
