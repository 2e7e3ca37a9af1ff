//! Storage abstraction for resource collections
//!
//! - **Generic CRUD**: [`Repository`] with associated id/entity/payload types
//! - **Eager loading**: [`FetchPlan`] names relations to batch-load with a read
//! - **Filtering**: [`FilterCondition`] predicates, ANDed together
//! - **Ordering and windows**: [`OrderBy`] terms and [`Pagination`]
//! - **Field access**: [`Queryable`] lets a backend filter and sort by field name

mod error;
mod fetch;
mod fields;
mod pagination;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use fetch::FetchPlan;
pub use fields::{FieldValue, Queryable};
pub use pagination::{
    FilterCondition, FilterOperator, FilterValue, OrderBy, OrderDirection, Pagination,
};
pub use traits::{Repository, RepositoryResult};
