//! Review ledger domain service.
//!
//! Implements [`ReviewCommand`] and [`ReviewQuery`]. Reviews are validated
//! against the user directory and film catalogue before any write, and the
//! repository appends the matching activity event in the same transaction.
//! Votes never produce events.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    FilmCatalogue, ListReviewsRequest, ReviewCommand, ReviewQuery, ReviewRepository,
    ReviewRepositoryError, SubmitReviewRequest, UpdateReviewRequest, UserDirectory, VoteRequest,
};
use crate::domain::reference_checks::{require_film, require_user};
use crate::domain::{
    DEFAULT_REVIEW_LIST_LIMIT, DomainError, Review, ReviewContent, ReviewDraft, ReviewId,
    ReviewListQuery, ReviewRevision, ReviewValidationError, ReviewVote, VoteValue,
};

fn map_review_error(error: ReviewRepositoryError) -> DomainError {
    match error {
        ReviewRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            DomainError::internal(format!("review repository error: {message}"))
        }
        ReviewRepositoryError::MissingReference { message } => DomainError::not_found(message),
    }
}

fn map_validation_error(error: ReviewValidationError) -> DomainError {
    DomainError::invalid_argument(error.to_string())
}

fn review_not_found(id: ReviewId) -> DomainError {
    DomainError::not_found(format!("review {id} not found"))
}

fn build_vote(request: VoteRequest) -> Result<ReviewVote, DomainError> {
    let value = VoteValue::try_from(request.value).map_err(map_validation_error)?;
    Ok(ReviewVote {
        review_id: request.review_id,
        voter_id: request.voter_id,
        value,
    })
}

/// Review ledger service implementing the review driving ports.
#[derive(Clone)]
pub struct ReviewLedgerService<U, M, R> {
    users: Arc<U>,
    films: Arc<M>,
    reviews: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<U, M, R> ReviewLedgerService<U, M, R> {
    /// Create a new service over the directories and the review store.
    pub fn new(users: Arc<U>, films: Arc<M>, reviews: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            films,
            reviews,
            clock,
        }
    }
}

impl<U, M, R> ReviewLedgerService<U, M, R>
where
    R: ReviewRepository,
{
    async fn require_review(&self, id: ReviewId) -> Result<(), DomainError> {
        self.reviews
            .find_by_id(id)
            .await
            .map_err(map_review_error)?
            .map(|_| ())
            .ok_or_else(|| review_not_found(id))
    }
}

#[async_trait]
impl<U, M, R> ReviewCommand for ReviewLedgerService<U, M, R>
where
    U: UserDirectory,
    M: FilmCatalogue,
    R: ReviewRepository,
{
    async fn submit(&self, request: SubmitReviewRequest) -> Result<Review, DomainError> {
        let content = ReviewContent::new(request.content).map_err(map_validation_error)?;
        require_user(self.users.as_ref(), request.author_id).await?;
        require_film(self.films.as_ref(), request.film_id).await?;

        let draft = ReviewDraft {
            content,
            is_positive: request.is_positive,
            author_id: request.author_id,
            film_id: request.film_id,
        };
        let review = self
            .reviews
            .insert(&draft, self.clock.utc())
            .await
            .map_err(map_review_error)?;

        info!(
            review_id = %review.id,
            author_id = %review.author_id,
            film_id = %review.film_id,
            "review submitted"
        );
        Ok(review)
    }

    async fn update(&self, request: UpdateReviewRequest) -> Result<Review, DomainError> {
        let revision = ReviewRevision {
            id: request.review_id,
            content: ReviewContent::new(request.content).map_err(map_validation_error)?,
            is_positive: request.is_positive,
        };
        let review = self
            .reviews
            .update(&revision, self.clock.utc())
            .await
            .map_err(map_review_error)?
            .ok_or_else(|| review_not_found(revision.id))?;

        info!(
            review_id = %review.id,
            author_id = %review.author_id,
            "review updated"
        );
        Ok(review)
    }

    async fn delete(&self, review_id: ReviewId) -> Result<(), DomainError> {
        let deleted = self
            .reviews
            .delete(review_id, self.clock.utc())
            .await
            .map_err(map_review_error)?;

        info!(review_id = %review_id, deleted, "review delete processed");
        Ok(())
    }

    async fn cast_vote(&self, request: VoteRequest) -> Result<(), DomainError> {
        let vote = build_vote(request)?;
        self.require_review(vote.review_id).await?;
        require_user(self.users.as_ref(), vote.voter_id).await?;

        self.reviews
            .upsert_vote(&vote)
            .await
            .map_err(map_review_error)?;

        info!(
            review_id = %vote.review_id,
            voter_id = %vote.voter_id,
            value = vote.value.weight(),
            "review vote recorded"
        );
        Ok(())
    }

    async fn retract_vote(&self, request: VoteRequest) -> Result<(), DomainError> {
        let vote = build_vote(request)?;
        let removed = self
            .reviews
            .retract_vote(&vote)
            .await
            .map_err(map_review_error)?;

        info!(
            review_id = %vote.review_id,
            voter_id = %vote.voter_id,
            removed,
            "review vote retraction processed"
        );
        Ok(())
    }
}

#[async_trait]
impl<U, M, R> ReviewQuery for ReviewLedgerService<U, M, R>
where
    U: UserDirectory,
    M: FilmCatalogue,
    R: ReviewRepository,
{
    async fn review(&self, review_id: ReviewId) -> Result<Review, DomainError> {
        self.reviews
            .find_by_id(review_id)
            .await
            .map_err(map_review_error)?
            .ok_or_else(|| review_not_found(review_id))
    }

    async fn list(&self, request: ListReviewsRequest) -> Result<Vec<Review>, DomainError> {
        if let Some(film_id) = request.film_id {
            require_film(self.films.as_ref(), film_id).await?;
        }
        let query = ReviewListQuery {
            film_id: request.film_id,
            limit: request.limit.unwrap_or(DEFAULT_REVIEW_LIST_LIMIT),
        };
        if query.limit == 0 {
            return Ok(Vec::new());
        }
        self.reviews
            .list_ranked(&query)
            .await
            .map_err(map_review_error)
    }
}

#[cfg(test)]
#[path = "review_ledger_service_tests.rs"]
mod tests;
