//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::rsvps;

/// Row struct for reading from the rsvps table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rsvps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RsvpRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub goodwill_message: Option<String>,
    pub access_code: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new RSVPs; the database fills `id` and `created_at`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rsvps)]
pub(crate) struct NewRsvpRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub goodwill_message: Option<&'a str>,
    pub access_code: &'a str,
}
