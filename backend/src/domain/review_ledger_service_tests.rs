//! Tests for the review ledger service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockFilmCatalogue, MockReviewRepository, MockUserDirectory};
use crate::domain::{ErrorCode, FilmId, UserId};
use crate::test_support::MutableClock;

type Service = ReviewLedgerService<MockUserDirectory, MockFilmCatalogue, MockReviewRepository>;

fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn stored_review(id: i64, useful: i64) -> Review {
    Review {
        id: ReviewId::new(id),
        content: ReviewContent::new("Tense and well paced").expect("valid content"),
        is_positive: true,
        author_id: UserId::new(1),
        film_id: FilmId::new(7),
        useful,
    }
}

fn known_users() -> MockUserDirectory {
    let mut users = MockUserDirectory::new();
    users.expect_exists().returning(|id| Ok(id.get() < 100));
    users
}

fn known_films() -> MockFilmCatalogue {
    let mut films = MockFilmCatalogue::new();
    films.expect_exists().returning(|id| Ok(id.get() < 100));
    films
}

fn service_with(reviews: MockReviewRepository) -> Service {
    ReviewLedgerService::new(
        Arc::new(known_users()),
        Arc::new(known_films()),
        Arc::new(reviews),
        Arc::new(MutableClock::new(fixture_time())),
    )
}

fn submit_request(author: i64, film: i64) -> SubmitReviewRequest {
    SubmitReviewRequest {
        content: "Tense and well paced".to_owned(),
        is_positive: true,
        author_id: UserId::new(author),
        film_id: FilmId::new(film),
    }
}

fn vote(review: i64, voter: i64, value: i64) -> VoteRequest {
    VoteRequest {
        review_id: ReviewId::new(review),
        voter_id: UserId::new(voter),
        value,
    }
}

#[tokio::test]
async fn submit_stores_draft_stamped_with_clock() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_insert()
        .withf(|draft, at| {
            draft.author_id == UserId::new(1)
                && draft.film_id == FilmId::new(7)
                && draft.content.as_str() == "Tense and well paced"
                && *at == fixture_time()
        })
        .times(1)
        .return_once(|_, _| Ok(stored_review(1, 0)));

    let review = service_with(reviews)
        .submit(submit_request(1, 7))
        .await
        .expect("submit succeeds");

    assert_eq!(review.id, ReviewId::new(1));
    assert_eq!(review.useful, 0);
}

#[rstest]
#[case(submit_request(100, 7), "user 100")]
#[case(submit_request(1, 100), "film 100")]
#[tokio::test]
async fn submit_rejects_unknown_references(
    #[case] request: SubmitReviewRequest,
    #[case] expected_message: &str,
) {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_insert().times(0);

    let error = service_with(reviews)
        .submit(request)
        .await
        .expect_err("unknown reference");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.message().contains(expected_message));
}

#[tokio::test]
async fn submit_rejects_blank_content() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_insert().times(0);
    let mut request = submit_request(1, 7);
    request.content = "   ".to_owned();

    let error = service_with(reviews)
        .submit(request)
        .await
        .expect_err("blank content");

    assert_eq!(error.code(), ErrorCode::InvalidArgument);
}

#[tokio::test]
async fn update_of_missing_review_is_not_found() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_update().times(1).return_once(|_, _| Ok(None));

    let error = service_with(reviews)
        .update(UpdateReviewRequest {
            review_id: ReviewId::new(44),
            content: "Changed my mind".to_owned(),
            is_positive: false,
        })
        .await
        .expect_err("missing review");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.message().contains("review 44"));
}

#[tokio::test]
async fn update_returns_refreshed_review() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_update()
        .withf(|revision, _| !revision.is_positive && revision.id == ReviewId::new(1))
        .times(1)
        .return_once(|revision, _| {
            let mut review = stored_review(1, 3);
            review.content = revision.content.clone();
            review.is_positive = revision.is_positive;
            Ok(Some(review))
        });

    let review = service_with(reviews)
        .update(UpdateReviewRequest {
            review_id: ReviewId::new(1),
            content: "Changed my mind".to_owned(),
            is_positive: false,
        })
        .await
        .expect("update succeeds");

    assert_eq!(review.content.as_str(), "Changed my mind");
    assert_eq!(review.useful, 3);
}

#[tokio::test]
async fn delete_of_missing_review_succeeds() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_delete().times(1).return_once(|_, _| Ok(false));

    service_with(reviews)
        .delete(ReviewId::new(8))
        .await
        .expect("delete is idempotent");
}

#[tokio::test]
async fn get_missing_review_is_not_found() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = service_with(reviews)
        .review(ReviewId::new(8))
        .await
        .expect_err("missing review");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_applies_default_limit() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_list_ranked()
        .withf(|query| query.limit == DEFAULT_REVIEW_LIST_LIMIT && query.film_id.is_none())
        .times(1)
        .return_once(|_| Ok(vec![stored_review(2, 5), stored_review(1, 1)]));

    let listed = service_with(reviews)
        .list(ListReviewsRequest::default())
        .await
        .expect("list succeeds");

    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn list_for_unknown_film_is_not_found() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_list_ranked().times(0);

    let error = service_with(reviews)
        .list(ListReviewsRequest {
            film_id: Some(FilmId::new(100)),
            limit: Some(3),
        })
        .await
        .expect_err("unknown film");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_with_zero_limit_skips_the_store() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_list_ranked().times(0);

    let listed = service_with(reviews)
        .list(ListReviewsRequest {
            film_id: None,
            limit: Some(0),
        })
        .await
        .expect("empty listing");

    assert!(listed.is_empty());
}

#[tokio::test]
async fn cast_vote_upserts_parsed_value() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_review(1, 0))));
    reviews
        .expect_upsert_vote()
        .withf(|vote| vote.value == VoteValue::NotUseful && vote.voter_id == UserId::new(9))
        .times(1)
        .return_once(|_| Ok(()));

    service_with(reviews)
        .cast_vote(vote(1, 9, -1))
        .await
        .expect("vote recorded");
}

#[rstest]
#[case(0)]
#[case(2)]
#[case(-3)]
#[tokio::test]
async fn cast_vote_rejects_unsupported_values(#[case] value: i64) {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_by_id().times(0);
    reviews.expect_upsert_vote().times(0);

    let error = service_with(reviews)
        .cast_vote(vote(1, 9, value))
        .await
        .expect_err("unsupported value");

    assert_eq!(error.code(), ErrorCode::InvalidArgument);
}

#[tokio::test]
async fn cast_vote_on_missing_review_is_not_found() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_by_id().times(1).return_once(|_| Ok(None));
    reviews.expect_upsert_vote().times(0);

    let error = service_with(reviews)
        .cast_vote(vote(5, 9, 1))
        .await
        .expect_err("missing review");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn cast_vote_racing_a_delete_is_not_found() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_review(1, 0))));
    reviews.expect_upsert_vote().times(1).return_once(|_| {
        Err(ReviewRepositoryError::missing_reference(
            "review 1 not found",
        ))
    });

    let error = service_with(reviews)
        .cast_vote(vote(1, 9, 1))
        .await
        .expect_err("review deleted concurrently");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn retract_vote_without_match_is_a_no_op() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_retract_vote()
        .times(1)
        .return_once(|_| Ok(false));

    service_with(reviews)
        .retract_vote(vote(1, 9, 1))
        .await
        .expect("retract is idempotent");
}

#[tokio::test]
async fn store_outage_maps_to_service_unavailable() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Err(ReviewRepositoryError::connection("timed out")));

    let error = service_with(reviews)
        .review(ReviewId::new(1))
        .await
        .expect_err("store unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
