//! Diesel schema for users and follow edges.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Database-assigned identifier.
        id -> Int4,
        /// Unique lowercased email address.
        #[max_length = 254]
        email -> Varchar,
        /// Unique username.
        #[max_length = 50]
        username -> Varchar,
        /// Avatar URL.
        image_url -> Text,
        /// Profile header image URL.
        header_image_url -> Text,
        /// Free-form biography.
        bio -> Nullable<Text>,
        /// Free-form location.
        location -> Nullable<Text>,
        /// Argon2id PHC hash string.
        password -> Text,
    }
}

diesel::table! {
    /// Directed follow edges.
    follows (user_being_followed_id, user_following_id) {
        /// The followed user.
        user_being_followed_id -> Int4,
        /// The follower.
        user_following_id -> Int4,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, follows);
