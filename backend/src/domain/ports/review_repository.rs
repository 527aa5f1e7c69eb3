//! Port for review and vote persistence.
//!
//! Review mutations append their activity event inside the same transaction.
//! The adapter reads the stored author while mutating, so update and delete
//! events are attributed to the original author rather than the caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Review, ReviewDraft, ReviewId, ReviewListQuery, ReviewRevision, ReviewVote};

use super::define_port_error;

define_port_error! {
    /// Errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "review repository query failed: {message}",
        /// A referenced user, film or review row does not exist.
        MissingReference { message: String } =>
            "review repository references a missing row: {message}",
    }
}

/// Storage for reviews and their usefulness votes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Store a new review with a store-assigned id and append REVIEW/ADD.
    async fn insert(
        &self,
        draft: &ReviewDraft,
        occurred_at: DateTime<Utc>,
    ) -> Result<Review, ReviewRepositoryError>;

    /// Rewrite content and sentiment and append REVIEW/UPDATE.
    ///
    /// Returns `None` without writing anything when the review is absent.
    async fn update(
        &self,
        revision: &ReviewRevision,
        occurred_at: DateTime<Utc>,
    ) -> Result<Option<Review>, ReviewRepositoryError>;

    /// Delete a review with its votes and append REVIEW/REMOVE.
    ///
    /// Returns `false` without writing anything when the review is absent.
    async fn delete(
        &self,
        id: ReviewId,
        occurred_at: DateTime<Utc>,
    ) -> Result<bool, ReviewRepositoryError>;

    /// Fetch a review with its current usefulness.
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, ReviewRepositoryError>;

    /// Reviews ordered by usefulness descending then id ascending.
    async fn list_ranked(
        &self,
        query: &ReviewListQuery,
    ) -> Result<Vec<Review>, ReviewRepositoryError>;

    /// Insert or replace the vote for `(review, voter)` atomically.
    async fn upsert_vote(&self, vote: &ReviewVote) -> Result<(), ReviewRepositoryError>;

    /// Delete the vote matching the full `(review, voter, value)` triple.
    ///
    /// Returns `true` when a row was removed.
    async fn retract_vote(&self, vote: &ReviewVote) -> Result<bool, ReviewRepositoryError>;
}
