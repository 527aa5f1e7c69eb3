//! Driving port for follow graph reads.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{DomainError, User, UserId};

/// Follower queries derived from the live edge set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowGraphQuery: Send + Sync {
    /// Users following `user_id`.
    async fn followers(&self, user_id: UserId) -> Result<BTreeSet<UserId>, DomainError>;

    /// Users following both `left` and `right`. Symmetric in its arguments.
    async fn mutual_followers(
        &self,
        left: UserId,
        right: UserId,
    ) -> Result<BTreeSet<UserId>, DomainError>;

    /// Profile of `user_id` with its follower set populated.
    async fn user(&self, user_id: UserId) -> Result<User, DomainError>;
}
