//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, RecordExporter, RecordRepository, RegistrationService, TechnicianQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential verification at login.
    pub login: Arc<dyn LoginService>,
    /// Account creation at registration.
    pub registration: Arc<dyn RegistrationService>,
    /// Profile lookup for the authenticated technician.
    pub technicians: Arc<dyn TechnicianQuery>,
    /// Maintenance record store.
    pub records: Arc<dyn RecordRepository>,
    /// Spreadsheet rendering for the export download.
    pub exporter: Arc<dyn RecordExporter>,
}
