//! Activity log events produced by follow graph and review ledger mutations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EventId, FollowEdge, ReviewId, UserId};

/// Error returned when a stored tag does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} tag: {value}")]
pub struct UnknownTagError {
    kind: &'static str,
    value: String,
}

/// Kind of entity an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// `entity_id` is a review id.
    Review,
    /// `entity_id` is the followed user's id.
    Follow,
}

impl EntityType {
    /// Tag stored in `events.event_type`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Review => "REVIEW",
            Self::Follow => "FOLLOW",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = UnknownTagError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "REVIEW" => Ok(Self::Review),
            "FOLLOW" => Ok(Self::Follow),
            other => Err(UnknownTagError {
                kind: "entity type",
                value: other.to_owned(),
            }),
        }
    }
}

/// Mutation recorded by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    /// Created, or re-asserted for follows.
    Add,
    /// Changed in place.
    Update,
    /// Deleted.
    Remove,
}

impl Operation {
    /// Tag stored in `events.operation`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Update => "UPDATE",
            Self::Remove => "REMOVE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = UnknownTagError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADD" => Ok(Self::Add),
            "UPDATE" => Ok(Self::Update),
            "REMOVE" => Ok(Self::Remove),
            other => Err(UnknownTagError {
                kind: "operation",
                value: other.to_owned(),
            }),
        }
    }
}

/// Event waiting to be appended; the store assigns its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEvent {
    /// User the event is attributed to.
    pub actor: UserId,
    /// Kind of entity touched.
    pub entity_type: EntityType,
    /// Id of the touched entity, interpreted through `entity_type`.
    pub entity_id: i64,
    /// What happened to it.
    pub operation: Operation,
    /// Clock reading at append time.
    pub occurred_at: DateTime<Utc>,
}

impl NewEvent {
    /// FOLLOW event attributed to the follower, pointing at the followed user.
    pub fn follow(edge: FollowEdge, operation: Operation, occurred_at: DateTime<Utc>) -> Self {
        Self {
            actor: edge.follower(),
            entity_type: EntityType::Follow,
            entity_id: edge.followed().get(),
            operation,
            occurred_at,
        }
    }

    /// REVIEW event attributed to the review's author.
    pub fn review(
        author: UserId,
        review_id: ReviewId,
        operation: Operation,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            actor: author,
            entity_type: EntityType::Review,
            entity_id: review_id.get(),
            operation,
            occurred_at,
        }
    }
}

/// Immutable activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned, increasing with append order.
    #[serde(rename = "eventId")]
    pub id: EventId,
    /// See [`NewEvent::actor`].
    #[serde(rename = "userId")]
    pub actor: UserId,
    /// See [`NewEvent::entity_type`].
    #[serde(rename = "eventType")]
    pub entity_type: EntityType,
    /// See [`NewEvent::entity_id`].
    pub entity_id: i64,
    /// See [`NewEvent::operation`].
    pub operation: Operation,
    /// See [`NewEvent::occurred_at`].
    #[serde(rename = "timestamp")]
    pub occurred_at: DateTime<Utc>,
}

impl Event {
    /// Attach a store-assigned id to an appended event.
    pub fn from_new(id: EventId, event: NewEvent) -> Self {
        let NewEvent {
            actor,
            entity_type,
            entity_id,
            operation,
            occurred_at,
        } = event;
        Self {
            id,
            actor,
            entity_type,
            entity_id,
            operation,
            occurred_at,
        }
    }

    /// True when this event records `operation` on `entity_type` by `actor`.
    pub fn matches(&self, actor: UserId, entity_type: EntityType, operation: Operation) -> bool {
        self.actor == actor && self.entity_type == entity_type && self.operation == operation
    }
}
