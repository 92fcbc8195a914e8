//! Diesel schema for user persistence.

diesel::table! {
    /// User account records.
    users (id) {
        /// Caller-supplied user identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Lowercased email address, unique across rows.
        #[max_length = 320]
        email -> Varchar,
    }
}
