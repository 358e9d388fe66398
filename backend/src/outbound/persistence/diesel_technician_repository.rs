//! PostgreSQL-backed `TechnicianRepository` implementation using Diesel ORM.
//!
//! This adapter persists technician accounts and rehydrates them through the
//! validated domain constructors.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TechnicianPersistenceError, TechnicianRepository};
use crate::domain::{DisplayName, Email, Technician, TechnicianId, Username};

use super::error_mapping::{map_pool_error, map_technician_diesel_error};
use super::models::{NewTechnicianRow, TechnicianRow};
use super::pool::DbPool;
use super::schema::technicians;

/// Diesel-backed implementation of the technician repository port.
#[derive(Clone)]
pub struct DieselTechnicianRepository {
    pool: DbPool,
}

impl DieselTechnicianRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a validated domain technician.
fn row_to_technician(row: TechnicianRow) -> Result<Technician, TechnicianPersistenceError> {
    let TechnicianRow {
        id,
        username,
        display_name,
        email,
        password_hash,
    } = row;

    let username = Username::new(&username)
        .map_err(|err| TechnicianPersistenceError::query(err.to_string()))?;
    let display_name = DisplayName::new(&display_name)
        .map_err(|err| TechnicianPersistenceError::query(err.to_string()))?;
    let email = email
        .map(|raw| Email::new(&raw))
        .transpose()
        .map_err(|err| TechnicianPersistenceError::query(err.to_string()))?;

    Ok(Technician::new(
        TechnicianId::from_uuid(id),
        username,
        display_name,
        email,
        password_hash,
    ))
}

#[async_trait]
impl TechnicianRepository for DieselTechnicianRepository {
    async fn insert(&self, technician: &Technician) -> Result<(), TechnicianPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TechnicianPersistenceError::connection))?;

        let new_row = NewTechnicianRow {
            id: *technician.id().as_uuid(),
            username: technician.username().as_ref(),
            display_name: technician.display_name().as_ref(),
            email: technician.email().map(AsRef::as_ref),
            password_hash: technician.password_hash(),
        };

        diesel::insert_into(technicians::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_technician_diesel_error(err, technician.username().as_ref()))?;

        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Technician>, TechnicianPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TechnicianPersistenceError::connection))?;

        let row = technicians::table
            .filter(technicians::username.eq(username.as_ref()))
            .select(TechnicianRow::as_select())
            .first::<TechnicianRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_technician_diesel_error(err, username.as_ref()))?;

        row.map(row_to_technician).transpose()
    }

    async fn find_by_id(
        &self,
        id: &TechnicianId,
    ) -> Result<Option<Technician>, TechnicianPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TechnicianPersistenceError::connection))?;

        let row = technicians::table
            .find(id.as_uuid())
            .select(TechnicianRow::as_select())
            .first::<TechnicianRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_technician_diesel_error(err, ""))?;

        row.map(row_to_technician).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(email: Option<&str>) -> TechnicianRow {
        TechnicianRow {
            id: Uuid::new_v4(),
            username: "mrojas".to_owned(),
            display_name: "Mar Rojas".to_owned(),
            email: email.map(str::to_owned),
            password_hash: "$argon2id$stub".to_owned(),
        }
    }

    #[rstest]
    fn row_conversion_round_trips_fields() {
        let source = row(Some("mrojas@example.com"));
        let id = source.id;

        let technician = row_to_technician(source).expect("valid row");

        assert_eq!(technician.id().as_uuid(), &id);
        assert_eq!(technician.username().as_ref(), "mrojas");
        assert_eq!(technician.display_name().as_ref(), "Mar Rojas");
        assert_eq!(
            technician.email().map(AsRef::as_ref),
            Some("mrojas@example.com")
        );
        assert_eq!(technician.password_hash(), "$argon2id$stub");
    }

    #[rstest]
    fn row_conversion_accepts_missing_email() {
        let technician = row_to_technician(row(None)).expect("valid row");
        assert!(technician.email().is_none());
    }

    #[rstest]
    fn row_conversion_rejects_corrupt_username() {
        let mut source = row(None);
        source.username = "has spaces".to_owned();

        let err = row_to_technician(source).expect_err("corrupt row must fail");
        assert!(matches!(err, TechnicianPersistenceError::Query { .. }));
    }
}
