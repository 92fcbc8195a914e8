//! Diesel schema for task item persistence.

diesel::table! {
    /// Task item records.
    task_item (id) {
        /// Internal task item identifier.
        id -> Uuid,
        /// Producing worker or machine label.
        #[max_length = 255]
        machine_name -> Varchar,
        /// Source location of the artifact.
        pdf_file_path -> Text,
        /// Artifact name, unique across rows.
        #[max_length = 255]
        pdf_name -> Varchar,
        /// Processing status label.
        #[max_length = 50]
        status -> Varchar,
        /// Owning user reference.
        #[max_length = 255]
        owner_user_id -> Varchar,
        /// Parent task reference.
        #[max_length = 255]
        task_id -> Varchar,
        /// Upstream processing payload.
        data -> Jsonb,
        /// Performer payload.
        performer_data -> Jsonb,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
