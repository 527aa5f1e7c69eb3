//! Driving port for review ledger mutations.
//!
//! Requests carry raw caller input. Content and vote values are validated by
//! the implementation and rejected with `InvalidArgument`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, FilmId, Review, ReviewId, UserId};

/// Request to publish a new review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    /// Review text; must not be blank.
    pub content: String,
    /// Whether the review recommends the film.
    pub is_positive: bool,
    /// Author, who must exist.
    #[serde(rename = "userId")]
    pub author_id: UserId,
    /// Reviewed film, which must exist.
    pub film_id: FilmId,
}

/// Request to rewrite an existing review's text and sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    /// Review to rewrite.
    pub review_id: ReviewId,
    /// New text; must not be blank.
    pub content: String,
    /// New sentiment.
    pub is_positive: bool,
}

/// A usefulness vote as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Review being rated.
    pub review_id: ReviewId,
    /// User casting or retracting the vote.
    pub voter_id: UserId,
    /// `1` for useful, `-1` for not useful.
    pub value: i64,
}

/// Driving port for writing reviews and votes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Create a review with usefulness 0.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown author or film.
    /// - `InvalidArgument` for blank content.
    async fn submit(&self, request: SubmitReviewRequest) -> Result<Review, DomainError>;

    /// Update content and sentiment; author, film and id stay fixed.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the review does not exist.
    /// - `InvalidArgument` for blank content.
    async fn update(&self, request: UpdateReviewRequest) -> Result<Review, DomainError>;

    /// Delete a review and its votes. Deleting an absent review succeeds.
    async fn delete(&self, review_id: ReviewId) -> Result<(), DomainError>;

    /// Record or replace the voter's opinion of a review.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown review or voter.
    /// - `InvalidArgument` when `value` is not `1` or `-1`.
    async fn cast_vote(&self, request: VoteRequest) -> Result<(), DomainError>;

    /// Remove the vote matching the exact triple; anything else is a no-op.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` when `value` is not `1` or `-1`.
    async fn retract_vote(&self, request: VoteRequest) -> Result<(), DomainError>;
}
