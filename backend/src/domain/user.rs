//! User views composed from the external user directory and the follow graph.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Profile attributes owned by the external user directory.
///
/// The social core never writes these fields; it only reads them to build a
/// [`User`] view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Directory id.
    pub id: UserId,
    /// Contact address.
    pub email: String,
    /// Unique handle.
    pub login: String,
    /// Display name.
    pub name: String,
    /// Date of birth.
    pub birthday: NaiveDate,
}

/// A user together with the set of users following them.
///
/// ## Invariants
/// - `followers` is read from the follow edges at query time and never
///   stored alongside the profile.
/// - `followers` never contains the user's own id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    profile: UserProfile,
    followers: BTreeSet<UserId>,
}

impl User {
    /// Compose a profile with its current follower set.
    pub fn new(profile: UserProfile, mut followers: BTreeSet<UserId>) -> Self {
        followers.remove(&profile.id);
        Self { profile, followers }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.profile.id
    }

    /// Externally owned profile attributes.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Users currently following this user.
    pub fn followers(&self) -> &BTreeSet<UserId> {
        &self.followers
    }
}
