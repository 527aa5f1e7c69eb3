//! Activity log domain service.
//!
//! Implements [`ActivityLogCommand`] for producers outside the follow graph
//! and review ledger, and [`ActivityFeedQuery`] for timeline consumers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ActivityFeedQuery, ActivityLog, ActivityLogCommand, ActivityLogError, AppendEventRequest,
    UserDirectory,
};
use crate::domain::reference_checks::require_user;
use crate::domain::{DomainError, Event, NewEvent, UserId};

fn map_log_error(error: ActivityLogError) -> DomainError {
    match error {
        ActivityLogError::Connection { message } => {
            DomainError::service_unavailable(format!("activity log unavailable: {message}"))
        }
        ActivityLogError::Query { message } => {
            DomainError::internal(format!("activity log error: {message}"))
        }
        ActivityLogError::MissingActor { message } => DomainError::not_found(message),
    }
}

/// Activity log service implementing the append and feed ports.
#[derive(Clone)]
pub struct ActivityLogService<U, A> {
    users: Arc<U>,
    log: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<U, A> ActivityLogService<U, A> {
    /// Create a new service over the user directory and event store.
    pub fn new(users: Arc<U>, log: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self { users, log, clock }
    }
}

#[async_trait]
impl<U, A> ActivityLogCommand for ActivityLogService<U, A>
where
    U: UserDirectory,
    A: ActivityLog,
{
    async fn append(&self, request: AppendEventRequest) -> Result<Event, DomainError> {
        require_user(self.users.as_ref(), request.actor).await?;
        let pending = NewEvent {
            actor: request.actor,
            entity_type: request.entity_type,
            entity_id: request.entity_id,
            operation: request.operation,
            occurred_at: self.clock.utc(),
        };
        let event = self.log.append(&pending).await.map_err(map_log_error)?;

        info!(
            event_id = %event.id,
            actor_id = %event.actor,
            event_type = %event.entity_type,
            operation = %event.operation,
            "activity event appended"
        );
        Ok(event)
    }
}

#[async_trait]
impl<U, A> ActivityFeedQuery for ActivityLogService<U, A>
where
    U: UserDirectory,
    A: ActivityLog,
{
    async fn feed(&self, user_id: UserId) -> Result<Vec<Event>, DomainError> {
        require_user(self.users.as_ref(), user_id).await?;
        self.log
            .events_for_actor(user_id)
            .await
            .map_err(map_log_error)
    }
}

#[cfg(test)]
#[path = "activity_log_service_tests.rs"]
mod tests;
