//! Driving port for appending activity events directly.
//!
//! Follow graph and review ledger mutations write their own events. This port
//! serves other producers that need to record an action.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, EntityType, Event, Operation, UserId};

/// Event fields supplied by the producer; id and timestamp are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendEventRequest {
    /// User the event is attributed to; must exist.
    #[serde(rename = "userId")]
    pub actor: UserId,
    /// Kind of entity touched.
    #[serde(rename = "eventType")]
    pub entity_type: EntityType,
    /// Id of the touched entity.
    pub entity_id: i64,
    /// What happened to it.
    pub operation: Operation,
}

/// Driving port for the activity log sink.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLogCommand: Send + Sync {
    /// Append one immutable event stamped with the current time.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the actor is unknown.
    async fn append(&self, request: AppendEventRequest) -> Result<Event, DomainError>;
}
