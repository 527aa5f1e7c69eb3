//! Driving port for review reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, FilmId, Review, ReviewId};

/// Parameters for a ranked review listing as supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsRequest {
    /// Restrict to one film when present.
    pub film_id: Option<FilmId>,
    /// Maximum number of reviews; the default limit applies when absent.
    #[serde(rename = "count")]
    pub limit: Option<u32>,
}

/// Driving port for fetching reviews with their usefulness.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Fetch one review.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the review does not exist.
    async fn review(&self, review_id: ReviewId) -> Result<Review, DomainError>;

    /// Reviews ranked by usefulness descending, ties by ascending id.
    ///
    /// # Errors
    ///
    /// - `NotFound` when a film filter names an unknown film.
    async fn list(&self, request: ListReviewsRequest) -> Result<Vec<Review>, DomainError>;
}
