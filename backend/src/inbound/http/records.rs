//! Maintenance record API handlers.
//!
//! All routes require an authenticated session. Listing supports an exact
//! sede filter, a case-insensitive substring search, and fixed-size
//! pagination.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::RecordPersistenceError;
use crate::domain::{
    Error, MaintenanceRecord, RecordDraft, RecordDraftParts, RecordFilter, RecordPage,
    RecordStats, RecordValidationError, Site,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, parse_uuid};

/// Request body shared by create and update.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    /// Site where the maintenance happened.
    pub sede: String,
    /// Date performed, `YYYY-MM-DD`. Defaults to today when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    /// Department or area within the site.
    #[serde(default)]
    pub area: String,
    /// Machine name.
    pub equipment: String,
    /// Equipment category.
    #[serde(default)]
    pub equipment_type: String,
    /// Manufacturer.
    #[serde(default)]
    pub brand: String,
    /// Model designation.
    #[serde(default)]
    pub model: String,
    /// Serial number.
    #[serde(default)]
    pub serial: String,
    /// Free-text observations.
    #[serde(default)]
    pub notes: String,
}

fn map_record_validation_error(err: RecordValidationError) -> Error {
    let field = match &err {
        RecordValidationError::EmptySite => "sede",
        RecordValidationError::EmptyEquipment => "equipment",
        RecordValidationError::FieldTooLong { field, .. } => field,
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

impl TryFrom<RecordRequest> for RecordDraft {
    type Error = Error;

    fn try_from(value: RecordRequest) -> Result<Self, Self::Error> {
        let performed_on = value
            .fecha
            .as_deref()
            .map(|raw| parse_date(raw, FieldName::new("fecha")))
            .transpose()?;
        Self::new(RecordDraftParts {
            site: value.sede,
            performed_on,
            area: value.area,
            equipment: value.equipment,
            equipment_type: value.equipment_type,
            brand: value.brand,
            model: value.model,
            serial: value.serial,
            notes: value.notes,
        })
        .map_err(map_record_validation_error)
    }
}

/// A single maintenance record as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    /// Stable identifier.
    pub id: String,
    /// Site where the maintenance happened.
    pub sede: String,
    /// Date performed, `YYYY-MM-DD`.
    pub fecha: String,
    /// Department or area within the site.
    pub area: String,
    /// Machine name.
    pub equipment: String,
    /// Equipment category.
    pub equipment_type: String,
    /// Manufacturer.
    pub brand: String,
    /// Model designation.
    pub model: String,
    /// Serial number.
    pub serial: String,
    /// Free-text observations.
    pub notes: String,
    /// Identifier of the technician who recorded the work.
    pub technician_id: String,
}

impl From<&MaintenanceRecord> for RecordResponse {
    fn from(record: &MaintenanceRecord) -> Self {
        Self {
            id: record.id().to_string(),
            sede: record.site().to_string(),
            fecha: record.performed_on().format("%Y-%m-%d").to_string(),
            area: record.area().to_owned(),
            equipment: record.equipment().to_owned(),
            equipment_type: record.equipment_type().to_owned(),
            brand: record.brand().to_owned(),
            model: record.model().to_owned(),
            serial: record.serial().to_owned(),
            notes: record.notes().to_owned(),
            technician_id: record.technician_id().to_string(),
        }
    }
}

/// One page of records plus pagination metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPageResponse {
    /// Records on this page, oldest first.
    pub records: Vec<RecordResponse>,
    /// Total records matching the filter across all pages.
    pub total: i64,
    /// One-based page number that was served.
    pub page: u32,
    /// Total pages at the fixed page size.
    pub total_pages: u32,
}

impl From<&RecordPage> for RecordPageResponse {
    fn from(page: &RecordPage) -> Self {
        Self {
            records: page.records.iter().map(RecordResponse::from).collect(),
            total: page.total,
            page: page.page,
            total_pages: page.total_pages(),
        }
    }
}

/// Aggregate counts over the whole record set.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Total number of records.
    pub total: i64,
    /// Distinct technicians with at least one record.
    pub technicians: i64,
    /// Record count per site, descending by count.
    pub by_sede: Vec<CountEntry>,
    /// Record count per equipment type, descending by count.
    pub by_equipment_type: Vec<CountEntry>,
}

/// A labelled count within [`StatsResponse`].
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountEntry {
    /// Group label, e.g. a sede or equipment type.
    pub label: String,
    /// Number of records in the group.
    pub count: i64,
}

impl From<&RecordStats> for StatsResponse {
    fn from(value: &RecordStats) -> Self {
        let entries = |pairs: &[(String, i64)]| {
            pairs
                .iter()
                .map(|(label, count)| CountEntry {
                    label: label.clone(),
                    count: *count,
                })
                .collect()
        };
        Self {
            total: value.total,
            technicians: value.technicians,
            by_sede: entries(&value.by_site),
            by_equipment_type: entries(&value.by_equipment_type),
        }
    }
}

/// Query parameters accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Exact sede filter.
    pub sede: Option<String>,
    /// Case-insensitive substring search.
    pub q: Option<String>,
    /// One-based page number.
    pub page: Option<u32>,
}

impl TryFrom<ListQuery> for RecordFilter {
    type Error = Error;

    fn try_from(value: ListQuery) -> Result<Self, Self::Error> {
        let site = value
            .sede
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(Site::new)
            .transpose()
            .map_err(map_record_validation_error)?;
        let search = value
            .q
            .map(|raw| raw.trim().to_owned())
            .filter(|term| !term.is_empty());
        Ok(Self {
            site,
            search,
            page: value.page,
        })
    }
}

pub(crate) fn map_record_persistence_error(err: RecordPersistenceError) -> Error {
    match err {
        RecordPersistenceError::Connection { .. } => {
            Error::service_unavailable("record store unavailable")
        }
        RecordPersistenceError::Query { message } => Error::internal(message),
        RecordPersistenceError::MissingTechnician { technician_id } => {
            Error::invalid_request(format!("technician {technician_id} does not exist"))
        }
    }
}

fn parse_record_id(raw: &str) -> Result<Uuid, Error> {
    parse_uuid(raw, FieldName::new("id"))
}

/// List maintenance records with optional filter, search, and pagination.
#[utoipa::path(
    get,
    path = "/api/v1/records",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching records", body = RecordPageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "listRecords"
)]
#[get("/records")]
pub async fn list(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<RecordPageResponse>> {
    session.require_technician_id()?;
    let filter = RecordFilter::try_from(query.into_inner())?;
    let page = state
        .records
        .list(&filter)
        .await
        .map_err(map_record_persistence_error)?;
    Ok(web::Json(RecordPageResponse::from(&page)))
}

/// Create a maintenance record owned by the session technician.
#[utoipa::path(
    post,
    path = "/api/v1/records",
    request_body = RecordRequest,
    responses(
        (status = 201, description = "Record created", body = RecordResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "createRecord"
)]
#[post("/records")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecordRequest>,
) -> ApiResult<HttpResponse> {
    let technician_id = session.require_technician_id()?;
    let draft = RecordDraft::try_from(payload.into_inner())?;
    let record = state
        .records
        .create(&technician_id, &draft)
        .await
        .map_err(map_record_persistence_error)?;
    Ok(HttpResponse::Created().json(RecordResponse::from(&record)))
}

/// Aggregate statistics over all records.
#[utoipa::path(
    get,
    path = "/api/v1/records/stats",
    responses(
        (status = 200, description = "Aggregate counts", body = StatsResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "recordStats"
)]
#[get("/records/stats")]
pub async fn stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StatsResponse>> {
    session.require_technician_id()?;
    let stats = state
        .records
        .stats()
        .await
        .map_err(map_record_persistence_error)?;
    Ok(web::Json(StatsResponse::from(&stats)))
}

/// Fetch a single record by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/records/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "The record", body = RecordResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such record", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "getRecord"
)]
#[get("/records/{id}")]
pub async fn get(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecordResponse>> {
    session.require_technician_id()?;
    let id = parse_record_id(&path)?;
    let record = state
        .records
        .find_by_id(id)
        .await
        .map_err(map_record_persistence_error)?
        .ok_or_else(|| Error::not_found(format!("record {id} does not exist")))?;
    Ok(web::Json(RecordResponse::from(&record)))
}

/// Replace a record's fields.
#[utoipa::path(
    put,
    path = "/api/v1/records/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    request_body = RecordRequest,
    responses(
        (status = 200, description = "Updated record", body = RecordResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such record", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "updateRecord"
)]
#[put("/records/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RecordRequest>,
) -> ApiResult<web::Json<RecordResponse>> {
    session.require_technician_id()?;
    let id = parse_record_id(&path)?;
    let draft = RecordDraft::try_from(payload.into_inner())?;
    let record = state
        .records
        .update(id, &draft)
        .await
        .map_err(map_record_persistence_error)?
        .ok_or_else(|| Error::not_found(format!("record {id} does not exist")))?;
    Ok(web::Json(RecordResponse::from(&record)))
}

/// Delete a record.
#[utoipa::path(
    delete,
    path = "/api/v1/records/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such record", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "deleteRecord"
)]
#[delete("/records/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_technician_id()?;
    let id = parse_record_id(&path)?;
    let deleted = state
        .records
        .delete(id)
        .await
        .map_err(map_record_persistence_error)?;
    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found(format!("record {id} does not exist")))
    }
}
