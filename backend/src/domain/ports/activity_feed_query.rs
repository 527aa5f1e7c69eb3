//! Driving port for reading a user's activity feed.

use async_trait::async_trait;

use crate::domain::{DomainError, Event, UserId};

/// Read side of the activity log, used by timeline consumers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityFeedQuery: Send + Sync {
    /// Events attributed to `user_id` in append order.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the user is unknown.
    async fn feed(&self, user_id: UserId) -> Result<Vec<Event>, DomainError>;
}
