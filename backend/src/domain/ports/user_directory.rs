//! Port for the externally owned user directory.
//!
//! The social core does not create or edit users. It asks the directory
//! whether an id exists before accepting it as a foreign key, and reads
//! profile attributes when composing a full user view.

use async_trait::async_trait;

use crate::domain::{UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } => "user directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "user directory query failed: {message}",
    }
}

/// Read-only access to registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Report whether a user with this id exists.
    async fn exists(&self, id: UserId) -> Result<bool, UserDirectoryError>;

    /// Fetch profile attributes, or `None` when the user is unknown.
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, UserDirectoryError>;
}
