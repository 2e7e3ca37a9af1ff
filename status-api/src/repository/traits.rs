//! Generic storage contract shared by every resource

use std::future::Future;

use super::error::RepositoryError;
use super::fetch::FetchPlan;
use super::pagination::{FilterCondition, OrderBy, Pagination};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// CRUD access to one resource collection.
///
/// Reads take a [`FetchPlan`]; relations named in it are attached to every
/// returned entity using one batched read per relation.
pub trait Repository: Send + Sync {
    /// Unique record identifier
    type Id: Send + Sync;
    type Entity: Send;
    /// Fully validated create payload
    type Create: Send;
    /// Partial update payload; `None` fields stay untouched
    type Update: Send;

    /// Returns `Ok(None)` when the record does not exist.
    fn find_by_id(
        &self,
        id: &Self::Id,
        plan: &FetchPlan,
    ) -> impl Future<Output = RepositoryResult<Option<Self::Entity>>> + Send;

    /// List records matching every filter, ordered by `order_by` in turn,
    /// restricted to the `pagination` row window.
    ///
    /// Only the first matching term decides the order; ties fall through to
    /// the next term and finally to ascending identifier.
    fn find_all(
        &self,
        filters: &[FilterCondition],
        order_by: &[OrderBy],
        pagination: Pagination,
        plan: &FetchPlan,
    ) -> impl Future<Output = RepositoryResult<Vec<Self::Entity>>> + Send;

    /// Persist a new record and return it with its generated identifier.
    fn create(&self, data: Self::Create)
        -> impl Future<Output = RepositoryResult<Self::Entity>> + Send;

    /// Patch an existing record in place.
    ///
    /// # Errors
    ///
    /// `NotFound` kind if the record is gone.
    fn update(
        &self,
        id: &Self::Id,
        data: Self::Update,
    ) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Hard delete. Returns `false` if the record did not exist.
    fn delete(&self, id: &Self::Id) -> impl Future<Output = RepositoryResult<bool>> + Send;
}
