//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{maintenance_records, technicians};

/// Row struct for reading from the technicians table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = technicians)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TechnicianRow {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub password_hash: String,
}

/// Insertable struct for creating new technician accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = technicians)]
pub(crate) struct NewTechnicianRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub display_name: &'a str,
    pub email: Option<&'a str>,
    pub password_hash: &'a str,
}

/// Row struct for reading from the maintenance_records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = maintenance_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecordRow {
    pub id: Uuid,
    pub sede: String,
    pub fecha: NaiveDate,
    pub area: String,
    pub equipment: String,
    pub equipment_type: String,
    pub brand: String,
    pub model: String,
    pub serial: String,
    pub notes: String,
    pub technician_id: Uuid,
}

/// Insertable struct for creating new maintenance records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = maintenance_records)]
pub(crate) struct NewRecordRow<'a> {
    pub id: Uuid,
    pub sede: &'a str,
    pub fecha: NaiveDate,
    pub area: &'a str,
    pub equipment: &'a str,
    pub equipment_type: &'a str,
    pub brand: &'a str,
    pub model: &'a str,
    pub serial: &'a str,
    pub notes: &'a str,
    pub technician_id: Uuid,
}

/// Changeset struct for replacing the fields of an existing record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = maintenance_records)]
pub(crate) struct RecordChangeset<'a> {
    pub sede: &'a str,
    pub fecha: NaiveDate,
    pub area: &'a str,
    pub equipment: &'a str,
    pub equipment_type: &'a str,
    pub brand: &'a str,
    pub model: &'a str,
    pub serial: &'a str,
    pub notes: &'a str,
}
