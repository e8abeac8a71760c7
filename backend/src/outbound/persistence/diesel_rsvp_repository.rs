//! PostgreSQL-backed `RsvpRepository` implementation using Diesel ORM.
//!
//! The `rsvps_access_code_key` unique constraint is the final guard against
//! duplicate access codes; a violation maps to
//! `RsvpRepositoryError::DuplicateAccessCode` so the service can reissue.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{count, count_star, exists, max};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RsvpRepository, RsvpRepositoryError};
use crate::domain::{AccessCode, NewRsvp, Rsvp, RsvpStats};

use super::models::{NewRsvpRow, RsvpRow};
use super::pool::{DbPool, PoolError};
use super::schema::rsvps;

/// Diesel-backed implementation of the `RsvpRepository` port.
#[derive(Clone)]
pub struct DieselRsvpRepository {
    pool: DbPool,
}

impl DieselRsvpRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RsvpRepositoryError {
    RsvpRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error, access_code: Option<&str>) -> RsvpRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RsvpRepositoryError::duplicate_access_code(access_code.unwrap_or_default())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RsvpRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => RsvpRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RsvpRepositoryError::query("database query error"),
        _ => RsvpRepositoryError::query("database error"),
    }
}

fn row_to_rsvp(row: RsvpRow) -> Result<Rsvp, RsvpRepositoryError> {
    let access_code = AccessCode::new(row.access_code).map_err(|err| {
        RsvpRepositoryError::query(format!("stored rsvp {} has a malformed access code: {err}", row.id))
    })?;
    Ok(Rsvp {
        id: row.id,
        name: row.name,
        email: row.email,
        goodwill_message: row.goodwill_message,
        access_code,
        created_at: row.created_at,
    })
}

fn count_to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[async_trait]
impl RsvpRepository for DieselRsvpRepository {
    async fn access_code_exists(&self, code: &AccessCode) -> Result<bool, RsvpRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            rsvps::table.filter(rsvps::access_code.eq(code.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, None))
    }

    async fn insert(&self, record: &NewRsvp) -> Result<Rsvp, RsvpRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewRsvpRow {
            name: record.submission.name(),
            email: record.submission.email(),
            goodwill_message: record.submission.goodwill_message(),
            access_code: record.access_code.as_str(),
        };

        let row = diesel::insert_into(rsvps::table)
            .values(&new_row)
            .returning(RsvpRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(record.access_code.as_str())))?;

        row_to_rsvp(row)
    }

    async fn list_newest_first(&self) -> Result<Vec<Rsvp>, RsvpRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RsvpRow> = rsvps::table
            .order((rsvps::created_at.desc(), rsvps::id.desc()))
            .select(RsvpRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        rows.into_iter().map(row_to_rsvp).collect()
    }

    async fn stats(&self) -> Result<RsvpStats, RsvpRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (total, with_message, latest): (i64, i64, Option<DateTime<Utc>>) = rsvps::table
            .select((
                count_star(),
                count(rsvps::goodwill_message),
                max(rsvps::created_at),
            ))
            .first(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(RsvpStats {
            total_rsvps: count_to_u64(total),
            with_goodwill_message: count_to_u64(with_message),
            latest_rsvp_at: latest,
        })
    }
}
