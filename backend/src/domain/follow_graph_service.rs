//! Follow graph domain service.
//!
//! Implements [`FollowGraphCommand`] and [`FollowGraphQuery`]. Follower sets
//! are always read from the edge store; nothing is cached between calls.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    FollowGraphCommand, FollowGraphQuery, FollowRepository, FollowRepositoryError, UserDirectory,
};
use crate::domain::reference_checks::{map_user_directory_error, require_user, user_not_found};
use crate::domain::{DomainError, FollowEdge, NewEvent, Operation, User, UserId};

fn map_follow_error(error: FollowRepositoryError) -> DomainError {
    match error {
        FollowRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("follow repository unavailable: {message}"))
        }
        FollowRepositoryError::Query { message } => {
            DomainError::internal(format!("follow repository error: {message}"))
        }
        FollowRepositoryError::MissingUser { message } => DomainError::not_found(message),
    }
}

/// Follow graph service implementing the follow driving ports.
#[derive(Clone)]
pub struct FollowGraphService<U, F> {
    users: Arc<U>,
    follows: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<U, F> FollowGraphService<U, F> {
    /// Create a new service over the user directory and follow store.
    pub fn new(users: Arc<U>, follows: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            follows,
            clock,
        }
    }
}

impl<U, F> FollowGraphService<U, F>
where
    U: UserDirectory,
    F: FollowRepository,
{
    async fn require_pair(&self, follower: UserId, followed: UserId) -> Result<FollowEdge, DomainError> {
        require_user(self.users.as_ref(), follower).await?;
        require_user(self.users.as_ref(), followed).await?;
        FollowEdge::new(follower, followed).map_err(|err| DomainError::invalid_argument(err.to_string()))
    }
}

#[async_trait]
impl<U, F> FollowGraphCommand for FollowGraphService<U, F>
where
    U: UserDirectory,
    F: FollowRepository,
{
    async fn follow(&self, follower: UserId, followed: UserId) -> Result<(), DomainError> {
        let edge = self.require_pair(follower, followed).await?;
        let event = NewEvent::follow(edge, Operation::Add, self.clock.utc());

        let created = self
            .follows
            .insert_edge(&edge, &event)
            .await
            .map_err(map_follow_error)?;

        info!(
            follower_id = %follower,
            followed_id = %followed,
            created,
            "follow edge recorded"
        );
        Ok(())
    }

    async fn unfollow(&self, follower: UserId, followed: UserId) -> Result<(), DomainError> {
        let edge = self.require_pair(follower, followed).await?;
        let event = NewEvent::follow(edge, Operation::Remove, self.clock.utc());

        let removed = self
            .follows
            .delete_edge(&edge, &event)
            .await
            .map_err(map_follow_error)?;

        info!(
            follower_id = %follower,
            followed_id = %followed,
            removed,
            "follow edge removed"
        );
        Ok(())
    }
}

#[async_trait]
impl<U, F> FollowGraphQuery for FollowGraphService<U, F>
where
    U: UserDirectory,
    F: FollowRepository,
{
    async fn followers(&self, user_id: UserId) -> Result<BTreeSet<UserId>, DomainError> {
        require_user(self.users.as_ref(), user_id).await?;
        self.follows
            .followers_of(user_id)
            .await
            .map_err(map_follow_error)
    }

    async fn mutual_followers(
        &self,
        left: UserId,
        right: UserId,
    ) -> Result<BTreeSet<UserId>, DomainError> {
        require_user(self.users.as_ref(), left).await?;
        require_user(self.users.as_ref(), right).await?;
        self.follows
            .mutual_followers(left, right)
            .await
            .map_err(map_follow_error)
    }

    async fn user(&self, user_id: UserId) -> Result<User, DomainError> {
        let profile = self
            .users
            .find_profile(user_id)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(|| user_not_found(user_id))?;
        let followers = self
            .follows
            .followers_of(user_id)
            .await
            .map_err(map_follow_error)?;
        Ok(User::new(profile, followers))
    }
}

#[cfg(test)]
#[path = "follow_graph_service_tests.rs"]
mod tests;
