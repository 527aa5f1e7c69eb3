//! Domain primitives, aggregates and services for the social core.
//!
//! Purpose: model the follow graph, the review ledger and the activity log
//! independently of storage. Services implement the driving ports in
//! [`ports`] and depend only on driven port traits, so any store satisfying
//! those traits (PostgreSQL or the in-memory test store) can back them.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-neutral failure payload.
//! - UserId, FilmId, ReviewId, EventId: integer identifiers.
//! - FollowEdge, Review, ReviewVote, Event: core records.
//! - FollowGraphService, ReviewLedgerService, ActivityLogService.

pub mod activity;
mod activity_log_service;
pub mod error;
pub mod follow;
mod follow_graph_service;
pub mod ids;
pub mod ports;
mod reference_checks;
pub mod review;
mod review_ledger_service;
pub mod user;

pub use self::activity::{EntityType, Event, NewEvent, Operation, UnknownTagError};
pub use self::activity_log_service::ActivityLogService;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::follow::{FollowEdge, FollowEdgeValidationError};
pub use self::follow_graph_service::FollowGraphService;
pub use self::ids::{EventId, FilmId, ReviewId, UserId};
pub use self::review::{
    DEFAULT_REVIEW_LIST_LIMIT, Review, ReviewContent, ReviewDraft, ReviewListQuery,
    ReviewRevision, ReviewValidationError, ReviewVote, VoteValue, rank_reviews, ranking_order,
};
pub use self::review_ledger_service::ReviewLedgerService;
pub use self::user::{User, UserProfile};
