//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Guest RSVPs. `access_code` carries a unique constraint.
    rsvps (id) {
        id -> Int8,
        name -> Text,
        email -> Text,
        goodwill_message -> Nullable<Text>,
        access_code -> Varchar,
        created_at -> Timestamptz,
    }
}
