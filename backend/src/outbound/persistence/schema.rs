//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` or update by hand when a migration changes a table.

diesel::table! {
    /// Community rooms.
    ///
    /// `version` starts at 1 and is bumped by every guarded update.
    rooms (id) {
        id -> Uuid,
        title -> Text,
        description -> Text,
        /// Free-form lifecycle label, e.g. "Room Created".
        status -> Text,
        /// Reference to a category managed outside this service.
        category_id -> Uuid,
        room_owner_id -> Uuid,
        created_by -> Text,
        version -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts published in rooms.
    ///
    /// `room_id` carries no foreign key: deleting a room leaves its posts.
    posts (id) {
        id -> Uuid,
        room_id -> Uuid,
        /// `member` or `room_owner`.
        author_kind -> Text,
        author_id -> Uuid,
        title -> Text,
        description -> Text,
        image -> Nullable<Text>,
        video -> Nullable<Text>,
        /// `Posted` or `Blocked`.
        status -> Text,
        version -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One like per actor per post; removed with the post.
    post_likes (post_id, actor_kind, actor_id) {
        post_id -> Uuid,
        actor_kind -> Text,
        actor_id -> Uuid,
        liked_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on posts; removed with the post.
    post_comments (id) {
        id -> Uuid,
        post_id -> Uuid,
        actor_kind -> Text,
        actor_id -> Uuid,
        body -> Text,
        commented_at -> Timestamptz,
    }
}

diesel::table! {
    /// Room memberships; removed with the room.
    room_members (room_id, member_id) {
        room_id -> Uuid,
        member_id -> Uuid,
        /// `JoinRequested`, `Accepted`, `Rejected`, or `Blocked`.
        status -> Text,
        joined_at -> Timestamptz,
        decided_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(post_likes -> posts (post_id));
diesel::joinable!(post_comments -> posts (post_id));
diesel::joinable!(room_members -> rooms (room_id));

diesel::allow_tables_to_appear_in_same_query!(rooms, posts, post_likes, post_comments, room_members);
