//! Core domain model for the maintenance tracker.
//!
//! Holds the technician and record aggregates, credential value objects,
//! the shared error envelope, and the ports adapters implement. Nothing in
//! this module touches Actix, Diesel, or any other framework type.

pub mod auth;
pub mod error;
pub mod ports;
pub mod record;
pub mod technician;

pub use auth::{AuthValidationError, LoginCredentials, PASSWORD_MIN, Registration};
pub use error::{Error, ErrorCode};
pub use ports::{
    ExportError, LoginService, RecordExporter, RecordPersistenceError, RecordRepository,
    RegistrationService, TechnicianPersistenceError, TechnicianQuery, TechnicianRepository,
};
pub use record::{
    ExportRecord, MaintenanceRecord, PER_PAGE, RecordDraft, RecordDraftParts, RecordFilter,
    RecordPage, RecordStats, RecordValidationError, Site,
};
pub use technician::{
    DisplayName, Email, Technician, TechnicianId, TechnicianValidationError, Username,
};
