use crate::core::filters::AnyOf;
use crate::models::{Experience, ExperienceId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when reading from the catalog store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Store returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid service key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

/// Read-only view of the catalog store
///
/// Every method treats zero rows as a normal outcome.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Experience ids on the user's wishlist
    async fn wishlist_ids(&self, user_id: &str) -> Result<Vec<ExperienceId>, StoreError>;

    /// Flattened `likes` of every swipe record of the user
    async fn liked_ids(&self, user_id: &str) -> Result<Vec<ExperienceId>, StoreError>;

    /// Experience ids the user has viewed
    async fn viewed_ids(&self, user_id: &str) -> Result<Vec<ExperienceId>, StoreError>;

    /// Full records for the given ids
    async fn experiences_by_ids(&self, ids: &[ExperienceId]) -> Result<Vec<Experience>, StoreError>;

    /// Records matching any clause of the filter; an empty filter yields no rows
    async fn experiences_matching(&self, filter: &AnyOf) -> Result<Vec<Experience>, StoreError>;

    /// Up to `limit` records flagged trending or featured
    async fn highlighted_experiences(&self, limit: usize) -> Result<Vec<Experience>, StoreError>;

    /// Tag columns of the whole catalog, for deriving the tag vocabulary
    async fn tag_columns(&self) -> Result<Vec<Experience>, StoreError>;
}
