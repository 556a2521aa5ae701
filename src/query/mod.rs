//! Translation between UI filter state, URL query strings and the
//! server-bound query documents.

mod codec;
mod descriptor;
mod filter;

pub use codec::{decode, encode, CATEGORIES_KEY};
pub use descriptor::{QueryDescriptor, GET_FACT, LIST_CATEGORIES, LIST_FACTS};
pub use filter::{CategoryMembership, QueryFilter, WhereClause};
