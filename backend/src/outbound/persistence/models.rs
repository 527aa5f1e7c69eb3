//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain. Conversions into domain types validate the
//! stored values and report corrupt rows as messages.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Text};

use crate::domain::{
    Event, EventId, FilmId, NewEvent, Review, ReviewContent, ReviewId, ReviewVote, UserId,
    UserProfile, VoteValue,
};

use super::schema::{events, follows, reviews, reviews_rates, users};

/// Row struct for reading user profiles.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            email: row.email,
            login: row.login,
            name: row.name,
            birthday: row.birthday,
        }
    }
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = follows)]
pub(crate) struct NewFollowRow {
    pub following_id: i64,
    pub followed_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub content: &'a str,
    pub is_positive: bool,
    pub user_id: i64,
    pub film_id: i64,
}

/// Review joined with the signed sum of its votes, loaded via `sql_query`.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RankedReviewRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub content: String,
    #[diesel(sql_type = Bool)]
    pub is_positive: bool,
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = BigInt)]
    pub film_id: i64,
    #[diesel(sql_type = BigInt)]
    pub useful: i64,
}

impl TryFrom<RankedReviewRow> for Review {
    type Error = String;

    fn try_from(row: RankedReviewRow) -> Result<Self, Self::Error> {
        let content = ReviewContent::new(row.content)
            .map_err(|err| format!("review {}: {err}", row.id))?;
        Ok(Self {
            id: ReviewId::new(row.id),
            content,
            is_positive: row.is_positive,
            author_id: UserId::new(row.user_id),
            film_id: FilmId::new(row.film_id),
            useful: row.useful,
        })
    }
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = reviews_rates)]
pub(crate) struct NewVoteRow {
    pub review_id: i64,
    pub user_id: i64,
    pub useful: i16,
}

pub(crate) fn vote_to_db(value: VoteValue) -> i16 {
    match value {
        VoteValue::Useful => 1,
        VoteValue::NotUseful => -1,
    }
}

impl From<&ReviewVote> for NewVoteRow {
    fn from(vote: &ReviewVote) -> Self {
        Self {
            review_id: vote.review_id.get(),
            user_id: vote.voter_id.get(),
            useful: vote_to_db(vote.value),
        }
    }
}

/// Row struct for reading from the events table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: i64,
    pub user_id: i64,
    pub event_type: String,
    pub entity_id: i64,
    pub operation: String,
    pub event_timestamp: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = String;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let entity_type = row
            .event_type
            .parse()
            .map_err(|err| format!("event {}: {err}", row.id))?;
        let operation = row
            .operation
            .parse()
            .map_err(|err| format!("event {}: {err}", row.id))?;
        Ok(Self {
            id: EventId::new(row.id),
            actor: UserId::new(row.user_id),
            entity_type,
            entity_id: row.entity_id,
            operation,
            occurred_at: row.event_timestamp,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow {
    pub user_id: i64,
    pub event_type: &'static str,
    pub entity_id: i64,
    pub operation: &'static str,
    pub event_timestamp: DateTime<Utc>,
}

impl From<&NewEvent> for NewEventRow {
    fn from(event: &NewEvent) -> Self {
        Self {
            user_id: event.actor.get(),
            event_type: event.entity_type.as_str(),
            entity_id: event.entity_id,
            operation: event.operation.as_str(),
            event_timestamp: event.occurred_at,
        }
    }
}
