//! Tests for the activity log service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use super::*;
use crate::domain::ports::{MockActivityLog, MockUserDirectory};
use crate::domain::{EntityType, ErrorCode, EventId, Operation};
use crate::test_support::MutableClock;

fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn known_users() -> MockUserDirectory {
    let mut users = MockUserDirectory::new();
    users.expect_exists().returning(|id| Ok(id.get() == 1));
    users
}

fn service(log: MockActivityLog) -> ActivityLogService<MockUserDirectory, MockActivityLog> {
    ActivityLogService::new(
        Arc::new(known_users()),
        Arc::new(log),
        Arc::new(MutableClock::new(fixture_time())),
    )
}

fn request(actor: i64) -> AppendEventRequest {
    AppendEventRequest {
        actor: UserId::new(actor),
        entity_type: EntityType::Review,
        entity_id: 12,
        operation: Operation::Update,
    }
}

#[tokio::test]
async fn append_stamps_event_with_clock() {
    let mut log = MockActivityLog::new();
    log.expect_append()
        .withf(|event| event.occurred_at == fixture_time() && event.entity_id == 12)
        .times(1)
        .return_once(|event| Ok(Event::from_new(EventId::new(3), *event)));

    let event = service(log)
        .append(request(1))
        .await
        .expect("append succeeds");

    assert_eq!(event.id, EventId::new(3));
    assert_eq!(event.operation, Operation::Update);
}

#[tokio::test]
async fn append_for_unknown_actor_is_not_found() {
    let mut log = MockActivityLog::new();
    log.expect_append().times(0);

    let error = service(log)
        .append(request(2))
        .await
        .expect_err("unknown actor");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn feed_returns_events_from_the_log() {
    let mut log = MockActivityLog::new();
    log.expect_events_for_actor().times(1).return_once(|actor| {
        Ok(vec![Event::from_new(
            EventId::new(1),
            NewEvent {
                actor,
                entity_type: EntityType::Follow,
                entity_id: 4,
                operation: Operation::Add,
                occurred_at: fixture_time(),
            },
        )])
    });

    let feed = service(log).feed(UserId::new(1)).await.expect("feed");

    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].entity_type, EntityType::Follow);
}

#[tokio::test]
async fn feed_maps_query_errors_to_internal() {
    let mut log = MockActivityLog::new();
    log.expect_events_for_actor()
        .times(1)
        .return_once(|_| Err(ActivityLogError::query("relation missing")));

    let error = service(log)
        .feed(UserId::new(1))
        .await
        .expect_err("query failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
