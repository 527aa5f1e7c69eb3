//! Port for the append-only activity log.

use async_trait::async_trait;

use crate::domain::{Event, NewEvent, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by activity log adapters.
    pub enum ActivityLogError {
        /// Log connection could not be established.
        Connection { message: String } => "activity log connection failed: {message}",
        /// Append or read failed during execution.
        Query { message: String } => "activity log query failed: {message}",
        /// The actor does not exist in the user directory.
        MissingActor { message: String } => "activity log actor is missing: {message}",
    }
}

/// Append-only event storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Persist one event and return it with its store-assigned id.
    async fn append(&self, event: &NewEvent) -> Result<Event, ActivityLogError>;

    /// Events attributed to `actor`, oldest first.
    async fn events_for_actor(&self, actor: UserId) -> Result<Vec<Event>, ActivityLogError>;
}
