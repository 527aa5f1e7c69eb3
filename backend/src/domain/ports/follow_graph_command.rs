//! Driving port for follow graph mutations.
//!
//! Inbound adapters call [`FollowGraphCommand`] to add or remove directed
//! follow edges. Both operations are idempotent with respect to the edge and
//! append one FOLLOW event per successful call.

use async_trait::async_trait;

use crate::domain::{DomainError, UserId};

/// Driving port for creating and removing follow edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowGraphCommand: Send + Sync {
    /// Make `follower` follow `followed`.
    ///
    /// # Errors
    ///
    /// - `NotFound` when either user is unknown.
    /// - `InvalidArgument` when both ids are equal.
    async fn follow(&self, follower: UserId, followed: UserId) -> Result<(), DomainError>;

    /// Stop `follower` following `followed`. A missing edge is not an error.
    ///
    /// # Errors
    ///
    /// - `NotFound` when either user is unknown.
    async fn unfollow(&self, follower: UserId, followed: UserId) -> Result<(), DomainError>;
}
