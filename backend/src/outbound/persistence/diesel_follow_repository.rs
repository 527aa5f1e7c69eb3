//! PostgreSQL-backed follow repository.
//!
//! Edge writes use `ON CONFLICT DO NOTHING` so repeated follows leave one
//! row. The edge change and its FOLLOW event commit in one transaction.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{FollowRepository, FollowRepositoryError};
use crate::domain::{FollowEdge, NewEvent, UserId};

use super::diesel_activity_log::insert_event;
use super::diesel_error_mapping::{map_basic_pool_error, map_referential_diesel_error};
use super::models::NewFollowRow;
use super::pool::{DbPool, PoolError};
use super::schema::follows;

/// Diesel-backed implementation of [`FollowRepository`].
#[derive(Clone)]
pub struct DieselFollowRepository {
    pool: DbPool,
}

impl DieselFollowRepository {
    /// Create a new follow repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use filmorate::outbound::persistence::{DbPool, DieselFollowRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/filmorate")).await?;
    /// let repository = DieselFollowRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FollowRepositoryError {
    map_basic_pool_error(error, FollowRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FollowRepositoryError {
    map_referential_diesel_error(
        error,
        FollowRepositoryError::query,
        FollowRepositoryError::connection,
        FollowRepositoryError::missing_user,
    )
}

fn edge_row(edge: &FollowEdge) -> NewFollowRow {
    NewFollowRow {
        following_id: edge.follower().get(),
        followed_id: edge.followed().get(),
    }
}

fn into_user_ids(ids: Vec<i64>) -> BTreeSet<UserId> {
    ids.into_iter().map(UserId::new).collect()
}

#[async_trait]
impl FollowRepository for DieselFollowRepository {
    async fn insert_edge(
        &self,
        edge: &FollowEdge,
        event: &NewEvent,
    ) -> Result<bool, FollowRepositoryError> {
        let row = edge_row(edge);
        let event = *event;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let inserted = diesel::insert_into(follows::table)
                    .values(&row)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;
                insert_event(conn, &event).await?;
                Ok(inserted > 0)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete_edge(
        &self,
        edge: &FollowEdge,
        event: &NewEvent,
    ) -> Result<bool, FollowRepositoryError> {
        let row = edge_row(edge);
        let event = *event;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let removed = diesel::delete(
                    follows::table
                        .filter(follows::following_id.eq(row.following_id))
                        .filter(follows::followed_id.eq(row.followed_id)),
                )
                .execute(conn)
                .await?;
                insert_event(conn, &event).await?;
                Ok(removed > 0)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn followers_of(
        &self,
        user_id: UserId,
    ) -> Result<BTreeSet<UserId>, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<i64> = follows::table
            .filter(follows::followed_id.eq(user_id.get()))
            .select(follows::following_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(into_user_ids(ids))
    }

    async fn mutual_followers(
        &self,
        left: UserId,
        right: UserId,
    ) -> Result<BTreeSet<UserId>, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<i64> = follows::table
            .filter(follows::followed_id.eq(left.get()))
            .select(follows::following_id)
            .intersect(
                follows::table
                    .filter(follows::followed_id.eq(right.get()))
                    .select(follows::following_id),
            )
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(into_user_ids(ids))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for follow repository mapping helpers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn edge_rows_keep_direction() {
        let edge = FollowEdge::new(UserId::new(4), UserId::new(7)).expect("valid edge");
        let row = edge_row(&edge);

        assert_eq!(row.following_id, 4);
        assert_eq!(row.followed_id, 7);
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(error, FollowRepositoryError::Connection { .. }));
        assert!(error.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let error = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(error, FollowRepositoryError::Query { .. }));
    }
}
