//! Directed follow edges between users.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Validation errors returned by [`FollowEdge::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowEdgeValidationError {
    /// Follower and followed are the same user.
    SelfFollow {
        /// The user that tried to follow themselves.
        user_id: UserId,
    },
}

impl fmt::Display for FollowEdgeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfFollow { user_id } => write!(f, "user {user_id} cannot follow themselves"),
        }
    }
}

impl std::error::Error for FollowEdgeValidationError {}

/// `follower` follows `followed`. The relation is not reciprocal.
///
/// ## Invariants
/// - `follower != followed`.
///
/// # Examples
/// ```
/// use filmorate::domain::{FollowEdge, UserId};
///
/// let edge = FollowEdge::new(UserId::new(1), UserId::new(2)).expect("distinct users");
/// assert_eq!(edge.follower(), UserId::new(1));
/// assert!(FollowEdge::new(UserId::new(3), UserId::new(3)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "FollowEdgeDto", into = "FollowEdgeDto")]
pub struct FollowEdge {
    follower: UserId,
    followed: UserId,
}

impl FollowEdge {
    /// Build an edge, rejecting self-follows.
    pub fn new(follower: UserId, followed: UserId) -> Result<Self, FollowEdgeValidationError> {
        if follower == followed {
            return Err(FollowEdgeValidationError::SelfFollow { user_id: follower });
        }
        Ok(Self { follower, followed })
    }

    /// The user doing the following.
    pub fn follower(&self) -> UserId {
        self.follower
    }

    /// The user being followed.
    pub fn followed(&self) -> UserId {
        self.followed
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowEdgeDto {
    follower: UserId,
    followed: UserId,
}

impl From<FollowEdge> for FollowEdgeDto {
    fn from(value: FollowEdge) -> Self {
        Self {
            follower: value.follower,
            followed: value.followed,
        }
    }
}

impl TryFrom<FollowEdgeDto> for FollowEdge {
    type Error = FollowEdgeValidationError;

    fn try_from(value: FollowEdgeDto) -> Result<Self, Self::Error> {
        Self::new(value.follower, value.followed)
    }
}
