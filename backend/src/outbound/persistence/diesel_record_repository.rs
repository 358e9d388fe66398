//! PostgreSQL-backed `RecordRepository` implementation using Diesel ORM.
//!
//! Listing and export share the same filter translation but differ in
//! ordering: listings read oldest first so the log reads chronologically,
//! exports read newest first so recent work tops the spreadsheet.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{RecordPersistenceError, RecordRepository};
use crate::domain::{
    ExportRecord, MaintenanceRecord, PER_PAGE, RecordDraft, RecordDraftParts, RecordFilter,
    RecordPage, RecordStats, Site, TechnicianId,
};

use super::error_mapping::{map_pool_error, map_record_diesel_error};
use super::models::{NewRecordRow, RecordChangeset, RecordRow};
use super::pool::DbPool;
use super::schema::{maintenance_records, technicians};

/// Diesel-backed implementation of the record repository port.
#[derive(Clone)]
pub struct DieselRecordRepository {
    pool: DbPool,
}

impl DieselRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel(error: diesel::result::Error) -> RecordPersistenceError {
    map_record_diesel_error(error, "")
}

/// Render a search term into the `%term%` pattern ILIKE expects.
fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}

/// Apply the site and search criteria shared by the page and count queries.
macro_rules! filtered {
    ($query:expr, $filter:expr) => {{
        let mut query = $query;
        if let Some(site) = &$filter.site {
            query = query.filter(maintenance_records::sede.eq(site.as_ref().to_owned()));
        }
        if let Some(term) = &$filter.search {
            let pattern = like_pattern(term);
            query = query.filter(
                maintenance_records::sede
                    .ilike(pattern.clone())
                    .or(maintenance_records::area.ilike(pattern.clone()))
                    .or(maintenance_records::equipment.ilike(pattern.clone()))
                    .or(maintenance_records::equipment_type.ilike(pattern.clone()))
                    .or(maintenance_records::brand.ilike(pattern.clone()))
                    .or(maintenance_records::model.ilike(pattern.clone()))
                    .or(maintenance_records::serial.ilike(pattern.clone()))
                    .or(maintenance_records::notes.ilike(pattern)),
            );
        }
        query
    }};
}

/// Convert a database row into a validated domain record.
fn row_to_record(row: RecordRow) -> Result<MaintenanceRecord, RecordPersistenceError> {
    let RecordRow {
        id,
        sede,
        fecha,
        area,
        equipment,
        equipment_type,
        brand,
        model,
        serial,
        notes,
        technician_id,
    } = row;

    let draft = RecordDraft::new(RecordDraftParts {
        site: sede,
        performed_on: Some(fecha),
        area,
        equipment,
        equipment_type,
        brand,
        model,
        serial,
        notes,
    })
    .map_err(|err| RecordPersistenceError::query(err.to_string()))?;

    Ok(MaintenanceRecord::new(
        id,
        TechnicianId::from_uuid(technician_id),
        draft,
    ))
}

fn rows_to_records(rows: Vec<RecordRow>) -> Result<Vec<MaintenanceRecord>, RecordPersistenceError> {
    rows.into_iter().map(row_to_record).collect()
}

#[async_trait]
impl RecordRepository for DieselRecordRepository {
    async fn create(
        &self,
        technician_id: &TechnicianId,
        draft: &RecordDraft,
    ) -> Result<MaintenanceRecord, RecordPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RecordPersistenceError::connection))?;

        let id = Uuid::new_v4();
        let new_row = NewRecordRow {
            id,
            sede: draft.site().as_ref(),
            fecha: draft.performed_on(),
            area: draft.area(),
            equipment: draft.equipment(),
            equipment_type: draft.equipment_type(),
            brand: draft.brand(),
            model: draft.model(),
            serial: draft.serial(),
            notes: draft.notes(),
            technician_id: *technician_id.as_uuid(),
        };

        diesel::insert_into(maintenance_records::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_record_diesel_error(err, &technician_id.to_string()))?;

        Ok(MaintenanceRecord::new(id, *technician_id, draft.clone()))
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<MaintenanceRecord>, RecordPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RecordPersistenceError::connection))?;

        let row = maintenance_records::table
            .find(id)
            .select(RecordRow::as_select())
            .first::<RecordRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_record).transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &RecordDraft,
    ) -> Result<Option<MaintenanceRecord>, RecordPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RecordPersistenceError::connection))?;

        let changeset = RecordChangeset {
            sede: draft.site().as_ref(),
            fecha: draft.performed_on(),
            area: draft.area(),
            equipment: draft.equipment(),
            equipment_type: draft.equipment_type(),
            brand: draft.brand(),
            model: draft.model(),
            serial: draft.serial(),
            notes: draft.notes(),
        };

        let row = diesel::update(maintenance_records::table.find(id))
            .set(&changeset)
            .returning(RecordRow::as_returning())
            .get_result::<RecordRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_record).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RecordPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RecordPersistenceError::connection))?;

        let deleted = diesel::delete(maintenance_records::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(deleted > 0)
    }

    async fn list(&self, filter: &RecordFilter) -> Result<RecordPage, RecordPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RecordPersistenceError::connection))?;

        let count_query = filtered!(
            maintenance_records::table
                .select(diesel::dsl::count_star())
                .into_boxed(),
            filter
        );
        let total = count_query
            .first::<i64>(&mut conn)
            .await
            .map_err(map_diesel)?;

        let page_query = filtered!(
            maintenance_records::table
                .select(RecordRow::as_select())
                .order((
                    maintenance_records::fecha.asc(),
                    maintenance_records::id.asc(),
                ))
                .into_boxed(),
            filter
        );
        let rows = page_query
            .limit(PER_PAGE)
            .offset(filter.offset())
            .load::<RecordRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(RecordPage {
            records: rows_to_records(rows)?,
            total,
            page: filter.page(),
        })
    }

    async fn list_for_export(
        &self,
        site: Option<&Site>,
    ) -> Result<Vec<ExportRecord>, RecordPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RecordPersistenceError::connection))?;

        let mut query = maintenance_records::table
            .inner_join(technicians::table)
            .select((RecordRow::as_select(), technicians::display_name))
            .order((
                maintenance_records::fecha.desc(),
                maintenance_records::id.desc(),
            ))
            .into_boxed();

        if let Some(site) = site {
            query = query.filter(maintenance_records::sede.eq(site.as_ref().to_owned()));
        }

        let rows = query
            .load::<(RecordRow, String)>(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter()
            .map(|(row, technician)| {
                Ok(ExportRecord {
                    record: row_to_record(row)?,
                    technician,
                })
            })
            .collect()
    }

    async fn stats(&self) -> Result<RecordStats, RecordPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RecordPersistenceError::connection))?;

        let total = maintenance_records::table
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel)?;

        let technicians_count = maintenance_records::table
            .select(diesel::dsl::count_distinct(
                maintenance_records::technician_id,
            ))
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel)?;

        let mut by_site = maintenance_records::table
            .group_by(maintenance_records::sede)
            .select((maintenance_records::sede, diesel::dsl::count_star()))
            .load::<(String, i64)>(&mut conn)
            .await
            .map_err(map_diesel)?;
        by_site.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut by_equipment_type = maintenance_records::table
            .group_by(maintenance_records::equipment_type)
            .select((maintenance_records::equipment_type, diesel::dsl::count_star()))
            .load::<(String, i64)>(&mut conn)
            .await
            .map_err(map_diesel)?;
        by_equipment_type.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(RecordStats {
            total,
            technicians: technicians_count,
            by_site,
            by_equipment_type,
        })
    }
}
