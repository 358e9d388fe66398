//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (databases, export writers) and how driving adapters reach domain
//! services. Each trait exposes strongly typed errors so adapters map their
//! failures into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::auth::{LoginCredentials, Registration};
use super::error::Error;
use super::record::{
    ExportRecord, MaintenanceRecord, RecordDraft, RecordFilter, RecordPage, RecordStats, Site,
};
use super::technician::{Technician, TechnicianId, Username};

/// Persistence errors raised by [`TechnicianRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TechnicianPersistenceError {
    /// Repository connection could not be established.
    #[error("technician repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("technician repository query failed: {message}")]
    Query { message: String },
    /// Another technician already holds the requested username.
    #[error("username {username} is already registered")]
    DuplicateUsername { username: String },
}

impl TechnicianPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-constraint violations on the username column.
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }
}

/// Persistence errors raised by [`RecordRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordPersistenceError {
    /// Repository connection could not be established.
    #[error("record repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("record repository query failed: {message}")]
    Query { message: String },
    /// The owning technician no longer exists.
    #[error("technician {technician_id} does not exist")]
    MissingTechnician { technician_id: String },
}

impl RecordPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for foreign-key violations against the technicians table.
    pub fn missing_technician(technician_id: impl Into<String>) -> Self {
        Self::MissingTechnician {
            technician_id: technician_id.into(),
        }
    }
}

/// Errors raised while rendering an export document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The workbook writer rejected the content or failed to serialise.
    #[error("export rendering failed: {message}")]
    Render { message: String },
}

impl ExportError {
    /// Helper for workbook rendering failures.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}

/// Persistence port for technician accounts.
#[async_trait]
pub trait TechnicianRepository: Send + Sync {
    /// Insert a new technician.
    async fn insert(&self, technician: &Technician) -> Result<(), TechnicianPersistenceError>;

    /// Fetch a technician by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Technician>, TechnicianPersistenceError>;

    /// Fetch a technician by identifier.
    async fn find_by_id(
        &self,
        id: &TechnicianId,
    ) -> Result<Option<Technician>, TechnicianPersistenceError>;
}

/// Persistence port for maintenance records.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Persist a new record owned by `technician_id` and return it.
    async fn create(
        &self,
        technician_id: &TechnicianId,
        draft: &RecordDraft,
    ) -> Result<MaintenanceRecord, RecordPersistenceError>;

    /// Fetch a single record by identifier.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<MaintenanceRecord>, RecordPersistenceError>;

    /// Replace the fields of an existing record. Returns `None` when the
    /// record does not exist.
    async fn update(
        &self,
        id: Uuid,
        draft: &RecordDraft,
    ) -> Result<Option<MaintenanceRecord>, RecordPersistenceError>;

    /// Delete a record. Returns `false` when the record does not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, RecordPersistenceError>;

    /// List records matching `filter`, oldest first, one page at a time.
    async fn list(&self, filter: &RecordFilter) -> Result<RecordPage, RecordPersistenceError>;

    /// Fetch every record (optionally scoped to one site) joined with its
    /// owner's display name, newest first, for export.
    async fn list_for_export(
        &self,
        site: Option<&Site>,
    ) -> Result<Vec<ExportRecord>, RecordPersistenceError>;

    /// Aggregate counts across the whole record set.
    async fn stats(&self) -> Result<RecordStats, RecordPersistenceError>;
}

/// Driving port for authenticating technicians.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the matching technician.
    ///
    /// Unknown usernames and wrong passwords both surface as
    /// [`super::ErrorCode::Unauthorized`] so callers cannot probe which
    /// usernames exist.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Technician, Error>;
}

/// Driving port for creating technician accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account from a validated registration.
    async fn register(&self, registration: &Registration) -> Result<Technician, Error>;
}

/// Driving port for resolving a session's technician.
#[async_trait]
pub trait TechnicianQuery: Send + Sync {
    /// Fetch a technician by identifier, mapped into the HTTP error shape.
    async fn get(&self, id: &TechnicianId) -> Result<Option<Technician>, Error>;
}

/// Port for rendering records into a downloadable spreadsheet.
pub trait RecordExporter: Send + Sync {
    /// Render `records` into workbook bytes. An empty slice still yields a
    /// valid document with the header row.
    fn export(&self, records: &[ExportRecord]) -> Result<Vec<u8>, ExportError>;
}
