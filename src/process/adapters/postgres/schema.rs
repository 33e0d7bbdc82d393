//! Diesel schema for background-operation tracking.

diesel::table! {
    /// One row per tracked `(namespace, operation)` pair.
    bg_tracks (id) {
        /// Row identifier.
        id -> Uuid,
        /// Namespace of the tracked operation.
        #[max_length = 255]
        namespace -> Varchar,
        /// Operation name.
        #[max_length = 255]
        operation -> Varchar,
        /// Identifier of the process currently running the operation.
        #[max_length = 255]
        process_id -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
