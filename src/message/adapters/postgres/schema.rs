//! Diesel schema for messages.

diesel::table! {
    /// User-owned messages.
    messages (id) {
        /// Database-assigned identifier.
        id -> Int4,
        /// Message body.
        #[max_length = 140]
        text -> Varchar,
        /// Creation time.
        timestamp -> Timestamptz,
        /// Author.
        user_id -> Int4,
    }
}
