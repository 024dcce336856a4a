//! Diesel schema for task record persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier (`AUTOINCREMENT`, never reused).
        id -> BigInt,
        /// Task title.
        title -> Text,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Progress status.
        status -> Text,
        /// Creation timestamp.
        created_at -> TimestamptzSqlite,
        /// Last update timestamp.
        updated_at -> TimestamptzSqlite,
    }
}
