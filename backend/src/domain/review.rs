//! Film reviews, usefulness votes, and ranked listing rules.
//!
//! Usefulness is never stored. It is the signed sum of the votes currently
//! held for a review and is computed whenever a review is read.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FilmId, ReviewId, UserId};

/// Number of reviews returned by a listing when the caller gives no limit.
pub const DEFAULT_REVIEW_LIST_LIMIT: u32 = 10;

/// Validation errors raised while building review values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// Review text was empty or whitespace only.
    EmptyContent,
    /// A vote value other than `1` or `-1`.
    UnsupportedVoteValue {
        /// The rejected value.
        value: i64,
    },
}

impl fmt::Display for ReviewValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "review content must not be empty"),
            Self::UnsupportedVoteValue { value } => {
                write!(f, "vote value must be 1 or -1, got {value}")
            }
        }
    }
}

impl std::error::Error for ReviewValidationError {}

/// Non-blank review text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReviewContent(String);

impl ReviewContent {
    /// Validate and wrap review text.
    pub fn new(content: impl Into<String>) -> Result<Self, ReviewValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ReviewValidationError::EmptyContent);
        }
        Ok(Self(content))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ReviewContent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<ReviewContent> for String {
    fn from(value: ReviewContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for ReviewContent {
    type Error = ReviewValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored review with its current usefulness score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Store-assigned identifier.
    #[serde(rename = "reviewId")]
    pub id: ReviewId,
    /// Review text.
    pub content: ReviewContent,
    /// Whether the review recommends the film.
    pub is_positive: bool,
    /// The user who wrote the review.
    #[serde(rename = "userId")]
    pub author_id: UserId,
    /// The reviewed film.
    pub film_id: FilmId,
    /// Signed sum of the votes cast on this review.
    pub useful: i64,
}

/// Input for creating a review; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Review text.
    pub content: ReviewContent,
    /// Whether the review recommends the film.
    pub is_positive: bool,
    /// Author; must exist in the user directory.
    pub author_id: UserId,
    /// Film; must exist in the catalogue.
    pub film_id: FilmId,
}

/// Mutable part of a review. Author, film and id never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRevision {
    /// Review to revise.
    pub id: ReviewId,
    /// Replacement text.
    pub content: ReviewContent,
    /// Replacement verdict.
    pub is_positive: bool,
}

/// One voter's opinion of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum VoteValue {
    /// `+1`: the voter found the review useful.
    Useful,
    /// `-1`: the voter found the review not useful.
    NotUseful,
}

impl VoteValue {
    /// Signed contribution to the review's usefulness.
    pub const fn weight(self) -> i64 {
        match self {
            Self::Useful => 1,
            Self::NotUseful => -1,
        }
    }
}

impl From<VoteValue> for i64 {
    fn from(value: VoteValue) -> Self {
        value.weight()
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = ReviewValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Useful),
            -1 => Ok(Self::NotUseful),
            other => Err(ReviewValidationError::UnsupportedVoteValue { value: other }),
        }
    }
}

/// A `(review, voter, value)` triple. At most one exists per review and voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewVote {
    /// Review being rated.
    pub review_id: ReviewId,
    /// User casting the vote.
    pub voter_id: UserId,
    /// The opinion held.
    pub value: VoteValue,
}

/// Parameters for a ranked review listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewListQuery {
    /// Restrict the listing to one film; `None` lists every review.
    pub film_id: Option<FilmId>,
    /// Maximum number of reviews returned.
    pub limit: u32,
}

impl ReviewListQuery {
    /// List all reviews with the default limit.
    pub const fn all() -> Self {
        Self {
            film_id: None,
            limit: DEFAULT_REVIEW_LIST_LIMIT,
        }
    }

    /// List one film's reviews with the default limit.
    pub const fn for_film(film_id: FilmId) -> Self {
        Self {
            film_id: Some(film_id),
            limit: DEFAULT_REVIEW_LIST_LIMIT,
        }
    }

    /// Override the limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for ReviewListQuery {
    fn default() -> Self {
        Self::all()
    }
}

/// Ranking order for listings: usefulness descending, then id ascending.
///
/// The id tie-break keeps equal-usefulness reviews in a stable order across
/// repeated calls. SQL adapters must emit the same order
/// (`ORDER BY useful DESC, id ASC`).
pub fn ranking_order(left: &Review, right: &Review) -> Ordering {
    right
        .useful
        .cmp(&left.useful)
        .then_with(|| left.id.cmp(&right.id))
}

/// Sort reviews by [`ranking_order`] and keep at most `limit` of them.
pub fn rank_reviews(mut reviews: Vec<Review>, limit: u32) -> Vec<Review> {
    reviews.sort_by(ranking_order);
    reviews.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    reviews
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn review(id: i64, useful: i64) -> Review {
        Review {
            id: ReviewId::new(id),
            content: ReviewContent::new(format!("review {id}")).expect("valid content"),
            is_positive: true,
            author_id: UserId::new(1),
            film_id: FilmId::new(7),
            useful,
        }
    }

    #[rstest]
    #[case("")]
    #[case("   \n\t")]
    fn content_rejects_blank_text(#[case] text: &str) {
        assert_eq!(
            ReviewContent::new(text),
            Err(ReviewValidationError::EmptyContent)
        );
    }

    #[rstest]
    #[case(1, VoteValue::Useful)]
    #[case(-1, VoteValue::NotUseful)]
    fn vote_values_parse(#[case] raw: i64, #[case] expected: VoteValue) {
        assert_eq!(VoteValue::try_from(raw), Ok(expected));
        assert_eq!(expected.weight(), raw);
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[case(-5)]
    fn vote_values_reject_other_integers(#[case] raw: i64) {
        let err = VoteValue::try_from(raw).expect_err("unsupported value");
        assert!(err.to_string().contains("must be 1 or -1"));
    }

    #[rstest]
    fn ranking_breaks_ties_by_ascending_id() {
        let ranked = rank_reviews(vec![review(3, 5), review(9, 1), review(2, 5)], 2);

        let ids: Vec<i64> = ranked.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[rstest]
    fn ranking_orders_negative_scores_last() {
        let ranked = rank_reviews(vec![review(1, -2), review(2, 0), review(3, 4)], 10);

        let scores: Vec<i64> = ranked.iter().map(|r| r.useful).collect();
        assert_eq!(scores, vec![4, 0, -2]);
    }

    #[rstest]
    fn zero_limit_returns_nothing() {
        assert!(rank_reviews(vec![review(1, 1)], 0).is_empty());
    }

    #[rstest]
    fn query_defaults_to_ten_reviews() {
        let query = ReviewListQuery::default();
        assert_eq!(query.limit, DEFAULT_REVIEW_LIST_LIMIT);
        assert!(query.film_id.is_none());
        assert_eq!(
            ReviewListQuery::for_film(FilmId::new(2)).with_limit(3).limit,
            3
        );
    }

    #[rstest]
    fn review_serialises_with_camel_case_field_names() {
        let value = serde_json::to_value(review(4, -1)).expect("serialise review");

        assert_eq!(value["reviewId"], serde_json::json!(4));
        assert_eq!(value["userId"], serde_json::json!(1));
        assert_eq!(value["filmId"], serde_json::json!(7));
        assert_eq!(value["isPositive"], serde_json::json!(true));
        assert_eq!(value["useful"], serde_json::json!(-1));
    }
}
