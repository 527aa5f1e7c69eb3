//! PostgreSQL-backed review repository.
//!
//! Usefulness is computed on every read as `COALESCE(SUM(useful), 0)` over
//! `reviews_rates`. Review ids come from the `reviews.id` sequence via
//! `RETURNING`. Update and delete read the stored author with `RETURNING
//! user_id` so the activity event is attributed inside the same transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable};
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{ReviewRepository, ReviewRepositoryError};
use crate::domain::{
    FilmId, NewEvent, Operation, Review, ReviewDraft, ReviewId, ReviewListQuery, ReviewRevision,
    ReviewVote, UserId,
};

use super::diesel_activity_log::insert_event;
use super::diesel_error_mapping::{map_basic_pool_error, map_referential_diesel_error};
use super::models::{NewReviewRow, NewVoteRow, RankedReviewRow, vote_to_db};
use super::pool::{DbPool, PoolError};
use super::schema::{reviews, reviews_rates};

const FIND_REVIEW_SQL: &str = "\
    SELECT r.id, r.content, r.is_positive, r.user_id, r.film_id, \
           COALESCE(SUM(rr.useful), 0)::BIGINT AS useful \
    FROM reviews r \
    LEFT JOIN reviews_rates rr ON rr.review_id = r.id \
    WHERE r.id = $1 \
    GROUP BY r.id";

const RANKED_REVIEWS_SQL: &str = "\
    SELECT r.id, r.content, r.is_positive, r.user_id, r.film_id, \
           COALESCE(SUM(rr.useful), 0)::BIGINT AS useful \
    FROM reviews r \
    LEFT JOIN reviews_rates rr ON rr.review_id = r.id \
    WHERE ($1::BIGINT IS NULL OR r.film_id = $1) \
    GROUP BY r.id \
    ORDER BY useful DESC, r.id ASC \
    LIMIT $2";

/// Diesel-backed implementation of [`ReviewRepository`].
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a new review repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use filmorate::outbound::persistence::{DbPool, DieselReviewRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/filmorate")).await?;
    /// let repository = DieselReviewRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewRepositoryError {
    map_basic_pool_error(error, ReviewRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewRepositoryError {
    map_referential_diesel_error(
        error,
        ReviewRepositoryError::query,
        ReviewRepositoryError::connection,
        ReviewRepositoryError::missing_reference,
    )
}

fn into_review(row: RankedReviewRow) -> Result<Review, ReviewRepositoryError> {
    Review::try_from(row).map_err(ReviewRepositoryError::query)
}

async fn load_review(
    conn: &mut AsyncPgConnection,
    id: ReviewId,
) -> QueryResult<Option<RankedReviewRow>> {
    diesel::sql_query(FIND_REVIEW_SQL)
        .bind::<BigInt, _>(id.get())
        .get_result::<RankedReviewRow>(conn)
        .await
        .optional()
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(
        &self,
        draft: &ReviewDraft,
        occurred_at: DateTime<Utc>,
    ) -> Result<Review, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let row = NewReviewRow {
                        content: draft.content.as_str(),
                        is_positive: draft.is_positive,
                        user_id: draft.author_id.get(),
                        film_id: draft.film_id.get(),
                    };
                    let id = diesel::insert_into(reviews::table)
                        .values(&row)
                        .returning(reviews::id)
                        .get_result::<i64>(conn)
                        .await
                        .map(ReviewId::new)?;
                    let event = NewEvent::review(draft.author_id, id, Operation::Add, occurred_at);
                    insert_event(conn, &event).await?;
                    Ok(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(Review {
            id,
            content: draft.content.clone(),
            is_positive: draft.is_positive,
            author_id: draft.author_id,
            film_id: draft.film_id,
            useful: 0,
        })
    }

    async fn update(
        &self,
        revision: &ReviewRevision,
        occurred_at: DateTime<Utc>,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let author = diesel::update(reviews::table.find(revision.id.get()))
                        .set((
                            reviews::content.eq(revision.content.as_str()),
                            reviews::is_positive.eq(revision.is_positive),
                        ))
                        .returning(reviews::user_id)
                        .get_result::<i64>(conn)
                        .await
                        .optional()?;
                    let Some(author) = author else {
                        return Ok(None);
                    };
                    let event = NewEvent::review(
                        UserId::new(author),
                        revision.id,
                        Operation::Update,
                        occurred_at,
                    );
                    insert_event(conn, &event).await?;
                    load_review(conn, revision.id).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row.map(into_review).transpose()
    }

    async fn delete(
        &self,
        id: ReviewId,
        occurred_at: DateTime<Utc>,
    ) -> Result<bool, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let author = diesel::delete(reviews::table.find(id.get()))
                    .returning(reviews::user_id)
                    .get_result::<i64>(conn)
                    .await
                    .optional()?;
                let Some(author) = author else {
                    return Ok(false);
                };
                let event =
                    NewEvent::review(UserId::new(author), id, Operation::Remove, occurred_at);
                insert_event(conn, &event).await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = load_review(&mut conn, id)
            .await
            .map_err(map_diesel_error)?;
        row.map(into_review).transpose()
    }

    async fn list_ranked(
        &self,
        query: &ReviewListQuery,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::sql_query(RANKED_REVIEWS_SQL)
            .bind::<Nullable<BigInt>, _>(query.film_id.map(FilmId::get))
            .bind::<BigInt, _>(i64::from(query.limit))
            .load::<RankedReviewRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(into_review).collect()
    }

    async fn upsert_vote(&self, vote: &ReviewVote) -> Result<(), ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reviews_rates::table)
            .values(NewVoteRow::from(vote))
            .on_conflict((reviews_rates::review_id, reviews_rates::user_id))
            .do_update()
            .set(reviews_rates::useful.eq(excluded(reviews_rates::useful)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn retract_vote(&self, vote: &ReviewVote) -> Result<bool, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            reviews_rates::table
                .filter(reviews_rates::review_id.eq(vote.review_id.get()))
                .filter(reviews_rates::user_id.eq(vote.voter_id.get()))
                .filter(reviews_rates::useful.eq(vote_to_db(vote.value))),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
