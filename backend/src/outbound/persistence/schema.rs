//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change, regenerate with `diesel print-schema`
//! or update by hand.

diesel::table! {
    /// Technician accounts.
    ///
    /// The `username` column carries a unique index; duplicate inserts
    /// surface as a unique-constraint violation.
    technicians (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 50 characters).
        #[max_length = 50]
        username -> Varchar,
        /// Name shown alongside records (max 100 characters).
        #[max_length = 100]
        display_name -> Varchar,
        /// Optional contact address.
        #[max_length = 255]
        email -> Nullable<Varchar>,
        /// Argon2id PHC string for the account password.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Maintenance work log, one row per intervention.
    maintenance_records (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Site ("sede") where the maintenance happened.
        #[max_length = 100]
        sede -> Varchar,
        /// Date the maintenance was performed.
        fecha -> Date,
        /// Department or area within the site.
        #[max_length = 100]
        area -> Varchar,
        /// Machine name, stored uppercase.
        #[max_length = 100]
        equipment -> Varchar,
        /// Equipment category.
        #[max_length = 100]
        equipment_type -> Varchar,
        /// Manufacturer, stored uppercase.
        #[max_length = 100]
        brand -> Varchar,
        /// Model designation, stored uppercase.
        #[max_length = 100]
        model -> Varchar,
        /// Serial number, stored uppercase.
        #[max_length = 100]
        serial -> Varchar,
        /// Free-text observations.
        notes -> Text,
        /// Owning technician (foreign key onto `technicians.id`).
        technician_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(maintenance_records -> technicians (technician_id));

diesel::allow_tables_to_appear_in_same_query!(maintenance_records, technicians);
