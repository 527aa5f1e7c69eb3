//! Port for follow edge persistence.
//!
//! Mutations take the activity event describing them so adapters can write
//! the edge change and the event in one transaction. Repeated inserts and
//! removals of absent edges still append their event.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{FollowEdge, NewEvent, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by follow repository adapters.
    pub enum FollowRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "follow repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "follow repository query failed: {message}",
        /// A referenced user row vanished between validation and write.
        MissingUser { message: String } =>
            "follow repository references a missing user: {message}",
    }
}

/// Storage for directed follow edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Insert the edge if absent and append `event`.
    ///
    /// Returns `true` when a new edge row was created.
    async fn insert_edge(
        &self,
        edge: &FollowEdge,
        event: &NewEvent,
    ) -> Result<bool, FollowRepositoryError>;

    /// Remove the edge if present and append `event`.
    ///
    /// Returns `true` when an edge row was deleted.
    async fn delete_edge(
        &self,
        edge: &FollowEdge,
        event: &NewEvent,
    ) -> Result<bool, FollowRepositoryError>;

    /// Every user following `user_id`.
    async fn followers_of(
        &self,
        user_id: UserId,
    ) -> Result<BTreeSet<UserId>, FollowRepositoryError>;

    /// Users following both `left` and `right`.
    async fn mutual_followers(
        &self,
        left: UserId,
        right: UserId,
    ) -> Result<BTreeSet<UserId>, FollowRepositoryError>;
}
