//! Integer identifiers for users, films, reviews, and activity events.
//!
//! Identifiers are assigned by the store (`BIGSERIAL` columns) or by the
//! external user and film catalogues. The wrappers only prevent mixing them
//! up; existence is checked by the services that accept them.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw value as stored in the database.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Identifier of a user owned by the external user directory.
    UserId
}

define_id! {
    /// Identifier of a film owned by the external film catalogue.
    FilmId
}

define_id! {
    /// Store-assigned review identifier; monotonic and never reused.
    ReviewId
}

define_id! {
    /// Store-assigned activity event identifier; monotonic.
    EventId
}
