//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate them with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Users registered in the external user directory.
    users (id) {
        id -> Int8,
        email -> Varchar,
        login -> Varchar,
        name -> Varchar,
        birthday -> Date,
    }
}

diesel::table! {
    /// Films registered in the external film catalogue.
    films (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Directed follow edges; `following_id` follows `followed_id`.
    follows (following_id, followed_id) {
        following_id -> Int8,
        followed_id -> Int8,
    }
}

diesel::table! {
    /// Reviews. Usefulness is derived from `reviews_rates` on read.
    reviews (id) {
        id -> Int8,
        content -> Text,
        is_positive -> Bool,
        user_id -> Int8,
        film_id -> Int8,
    }
}

diesel::table! {
    /// At most one usefulness vote per `(review_id, user_id)`.
    reviews_rates (review_id, user_id) {
        review_id -> Int8,
        user_id -> Int8,
        /// `1` or `-1`.
        useful -> Int2,
    }
}

diesel::table! {
    /// Append-only activity log.
    events (id) {
        id -> Int8,
        user_id -> Int8,
        event_type -> Varchar,
        entity_id -> Int8,
        operation -> Varchar,
        event_timestamp -> Timestamptz,
    }
}

diesel::joinable!(follows -> users (followed_id));
diesel::joinable!(reviews -> films (film_id));
diesel::joinable!(reviews -> users (user_id));
diesel::joinable!(reviews_rates -> reviews (review_id));
diesel::joinable!(events -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(events, films, follows, reviews, reviews_rates, users);
