//! PostgreSQL-backed activity log adapter.
//!
//! [`insert_event`] is shared with the follow and review adapters so every
//! mutation writes its event on the connection that holds its transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{ActivityLog, ActivityLogError};
use crate::domain::{Event, EventId, NewEvent, UserId};

use super::diesel_error_mapping::{map_basic_pool_error, map_referential_diesel_error};
use super::models::{EventRow, NewEventRow};
use super::pool::{DbPool, PoolError};
use super::schema::events;

/// Append `event` and return it with its sequence-assigned id.
pub(crate) async fn insert_event(
    conn: &mut AsyncPgConnection,
    event: &NewEvent,
) -> QueryResult<Event> {
    let id = diesel::insert_into(events::table)
        .values(NewEventRow::from(event))
        .returning(events::id)
        .get_result::<i64>(conn)
        .await?;
    Ok(Event::from_new(EventId::new(id), *event))
}

/// Diesel-backed implementation of [`ActivityLog`].
#[derive(Clone)]
pub struct DieselActivityLog {
    pool: DbPool,
}

impl DieselActivityLog {
    /// Create the log adapter over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ActivityLogError {
    map_basic_pool_error(error, ActivityLogError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ActivityLogError {
    map_referential_diesel_error(
        error,
        ActivityLogError::query,
        ActivityLogError::connection,
        ActivityLogError::missing_actor,
    )
}

#[async_trait]
impl ActivityLog for DieselActivityLog {
    async fn append(&self, event: &NewEvent) -> Result<Event, ActivityLogError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        insert_event(&mut conn, event)
            .await
            .map_err(map_diesel_error)
    }

    async fn events_for_actor(&self, actor: UserId) -> Result<Vec<Event>, ActivityLogError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventRow> = events::table
            .filter(events::user_id.eq(actor.get()))
            .order_by(events::id.asc())
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(Event::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ActivityLogError::query)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for activity log error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::build("bad url"));

        assert!(matches!(error, ActivityLogError::Connection { .. }));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let error = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(error, ActivityLogError::Query { .. }));
    }
}
