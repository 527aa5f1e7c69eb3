//! In-memory store implementing every driven port of the social core.
//!
//! All tables live behind one mutex, so each port call is atomic in the
//! same way a PostgreSQL transaction is. Foreign keys, uniqueness on follow
//! pairs and on `(review, voter)`, vote cascades and sequence-assigned ids
//! mirror the schema in `migrations/`. Mutations append their event before
//! touching any table, so an event the log refuses leaves nothing behind.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::ports::{
    ActivityLog, ActivityLogError, FilmCatalogue, FilmCatalogueError, FollowRepository,
    FollowRepositoryError, ReviewRepository, ReviewRepositoryError, UserDirectory,
    UserDirectoryError,
};
use crate::domain::{
    Event, EventId, FilmId, FollowEdge, NewEvent, Operation, Review, ReviewContent, ReviewDraft,
    ReviewId, ReviewListQuery, ReviewRevision, ReviewVote, UserId, UserProfile, VoteValue,
    rank_reviews,
};

#[derive(Debug, Clone)]
struct StoredReview {
    content: ReviewContent,
    is_positive: bool,
    author_id: UserId,
    film_id: FilmId,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, UserProfile>,
    films: BTreeSet<FilmId>,
    follows: BTreeSet<(UserId, UserId)>,
    reviews: BTreeMap<ReviewId, StoredReview>,
    votes: BTreeMap<(ReviewId, UserId), VoteValue>,
    events: Vec<Event>,
    last_review_id: i64,
    last_event_id: i64,
}

impl State {
    fn usefulness(&self, id: ReviewId) -> i64 {
        self.votes
            .range((id, UserId::new(i64::MIN))..=(id, UserId::new(i64::MAX)))
            .map(|(_, value)| value.weight())
            .sum()
    }

    fn review(&self, id: ReviewId) -> Option<Review> {
        self.reviews.get(&id).map(|stored| Review {
            id,
            content: stored.content.clone(),
            is_positive: stored.is_positive,
            author_id: stored.author_id,
            film_id: stored.film_id,
            useful: self.usefulness(id),
        })
    }

    /// Append an event, or `None` when its actor is not a known user.
    fn push_event(&mut self, event: NewEvent) -> Option<Event> {
        if !self.users.contains_key(&event.actor) {
            return None;
        }
        self.last_event_id += 1;
        let stored = Event::from_new(EventId::new(self.last_event_id), event);
        self.events.push(stored);
        Some(stored)
    }

    fn followers_of(&self, user_id: UserId) -> BTreeSet<UserId> {
        self.follows
            .iter()
            .filter(|(_, followed)| *followed == user_id)
            .map(|(follower, _)| *follower)
            .collect()
    }
}

/// Shared in-memory backing for services under test.
#[derive(Debug, Default)]
pub struct InMemorySocialStore {
    state: Mutex<State>,
}

fn unknown_actor(event: &NewEvent) -> String {
    format!("user {} not found", event.actor)
}

impl InMemorySocialStore {
    /// Create an empty store with no users or films.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with placeholder profile attributes.
    pub fn add_user(&self, id: UserId) {
        let profile = UserProfile {
            id,
            email: format!("user{id}@example.test"),
            login: format!("user{id}"),
            name: format!("User {id}"),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
        };
        self.add_profile(profile);
    }

    /// Register a user with an explicit profile, replacing any previous one.
    pub fn add_profile(&self, profile: UserProfile) {
        self.lock().users.insert(profile.id, profile);
    }

    /// Register a catalogue film.
    pub fn add_film(&self, id: FilmId) {
        self.lock().films.insert(id);
    }

    /// Every event appended so far, in id order.
    pub fn events(&self) -> Vec<Event> {
        self.lock().events.clone()
    }

    /// Number of follow rows for the ordered pair.
    pub fn follow_rows(&self, follower: UserId, followed: UserId) -> usize {
        usize::from(self.lock().follows.contains(&(follower, followed)))
    }

    /// Vote rows currently stored for a review.
    pub fn vote_rows(&self, review_id: ReviewId) -> Vec<(UserId, VoteValue)> {
        self.lock()
            .votes
            .iter()
            .filter(|((review, _), _)| *review == review_id)
            .map(|((_, voter), value)| (*voter, *value))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("in-memory store mutex"),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemorySocialStore {
    async fn exists(&self, id: UserId) -> Result<bool, UserDirectoryError> {
        Ok(self.lock().users.contains_key(&id))
    }

    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, UserDirectoryError> {
        Ok(self.lock().users.get(&id).cloned())
    }
}

#[async_trait]
impl FilmCatalogue for InMemorySocialStore {
    async fn exists(&self, id: FilmId) -> Result<bool, FilmCatalogueError> {
        Ok(self.lock().films.contains(&id))
    }
}

#[async_trait]
impl FollowRepository for InMemorySocialStore {
    async fn insert_edge(
        &self,
        edge: &FollowEdge,
        event: &NewEvent,
    ) -> Result<bool, FollowRepositoryError> {
        let mut state = self.lock();
        for user in [edge.follower(), edge.followed()] {
            if !state.users.contains_key(&user) {
                return Err(FollowRepositoryError::missing_user(format!(
                    "user {user} not found"
                )));
            }
        }
        state
            .push_event(*event)
            .ok_or_else(|| FollowRepositoryError::missing_user(unknown_actor(event)))?;
        Ok(state.follows.insert((edge.follower(), edge.followed())))
    }

    async fn delete_edge(
        &self,
        edge: &FollowEdge,
        event: &NewEvent,
    ) -> Result<bool, FollowRepositoryError> {
        let mut state = self.lock();
        state
            .push_event(*event)
            .ok_or_else(|| FollowRepositoryError::missing_user(unknown_actor(event)))?;
        Ok(state.follows.remove(&(edge.follower(), edge.followed())))
    }

    async fn followers_of(
        &self,
        user_id: UserId,
    ) -> Result<BTreeSet<UserId>, FollowRepositoryError> {
        Ok(self.lock().followers_of(user_id))
    }

    async fn mutual_followers(
        &self,
        left: UserId,
        right: UserId,
    ) -> Result<BTreeSet<UserId>, FollowRepositoryError> {
        let state = self.lock();
        let right_followers = state.followers_of(right);
        Ok(state
            .followers_of(left)
            .intersection(&right_followers)
            .copied()
            .collect())
    }
}

#[async_trait]
impl ReviewRepository for InMemorySocialStore {
    async fn insert(
        &self,
        draft: &ReviewDraft,
        occurred_at: DateTime<Utc>,
    ) -> Result<Review, ReviewRepositoryError> {
        let mut state = self.lock();
        if !state.films.contains(&draft.film_id) {
            return Err(ReviewRepositoryError::missing_reference(format!(
                "film {} not found",
                draft.film_id
            )));
        }

        let id = ReviewId::new(state.last_review_id + 1);
        let event = NewEvent::review(draft.author_id, id, Operation::Add, occurred_at);
        state
            .push_event(event)
            .ok_or_else(|| ReviewRepositoryError::missing_reference(unknown_actor(&event)))?;
        state.last_review_id = id.get();
        state.reviews.insert(
            id,
            StoredReview {
                content: draft.content.clone(),
                is_positive: draft.is_positive,
                author_id: draft.author_id,
                film_id: draft.film_id,
            },
        );
        state
            .review(id)
            .ok_or_else(|| ReviewRepositoryError::query("inserted review vanished"))
    }

    async fn update(
        &self,
        revision: &ReviewRevision,
        occurred_at: DateTime<Utc>,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        let mut state = self.lock();
        let Some(author) = state.reviews.get(&revision.id).map(|stored| stored.author_id) else {
            return Ok(None);
        };
        let event = NewEvent::review(author, revision.id, Operation::Update, occurred_at);
        state
            .push_event(event)
            .ok_or_else(|| ReviewRepositoryError::missing_reference(unknown_actor(&event)))?;
        if let Some(stored) = state.reviews.get_mut(&revision.id) {
            stored.content = revision.content.clone();
            stored.is_positive = revision.is_positive;
        }
        Ok(state.review(revision.id))
    }

    async fn delete(
        &self,
        id: ReviewId,
        occurred_at: DateTime<Utc>,
    ) -> Result<bool, ReviewRepositoryError> {
        let mut state = self.lock();
        let Some(author) = state.reviews.get(&id).map(|stored| stored.author_id) else {
            return Ok(false);
        };
        let event = NewEvent::review(author, id, Operation::Remove, occurred_at);
        state
            .push_event(event)
            .ok_or_else(|| ReviewRepositoryError::missing_reference(unknown_actor(&event)))?;
        state.reviews.remove(&id);
        state.votes.retain(|(review, _), _| *review != id);
        Ok(true)
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, ReviewRepositoryError> {
        Ok(self.lock().review(id))
    }

    async fn list_ranked(
        &self,
        query: &ReviewListQuery,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let state = self.lock();
        let reviews = state
            .reviews
            .iter()
            .filter(|(_, stored)| query.film_id.is_none_or(|film| stored.film_id == film))
            .filter_map(|(id, _)| state.review(*id))
            .collect();
        Ok(rank_reviews(reviews, query.limit))
    }

    async fn upsert_vote(&self, vote: &ReviewVote) -> Result<(), ReviewRepositoryError> {
        let mut state = self.lock();
        if !state.reviews.contains_key(&vote.review_id) {
            return Err(ReviewRepositoryError::missing_reference(format!(
                "review {} not found",
                vote.review_id
            )));
        }
        if !state.users.contains_key(&vote.voter_id) {
            return Err(ReviewRepositoryError::missing_reference(format!(
                "user {} not found",
                vote.voter_id
            )));
        }
        state
            .votes
            .insert((vote.review_id, vote.voter_id), vote.value);
        Ok(())
    }

    async fn retract_vote(&self, vote: &ReviewVote) -> Result<bool, ReviewRepositoryError> {
        let mut state = self.lock();
        let key = (vote.review_id, vote.voter_id);
        if state.votes.get(&key) == Some(&vote.value) {
            state.votes.remove(&key);
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl ActivityLog for InMemorySocialStore {
    async fn append(&self, event: &NewEvent) -> Result<Event, ActivityLogError> {
        self.lock()
            .push_event(*event)
            .ok_or_else(|| ActivityLogError::missing_actor(unknown_actor(event)))
    }

    async fn events_for_actor(&self, actor: UserId) -> Result<Vec<Event>, ActivityLogError> {
        Ok(self
            .lock()
            .events
            .iter()
            .filter(|event| event.actor == actor)
            .copied()
            .collect())
    }
}
