//! Wiring of persistence adapters into the shared HTTP state.

use std::sync::Arc;

use crate::inbound::http::state::HttpState;
use crate::outbound::export::XlsxRecordExporter;
use crate::outbound::persistence::{
    DbPool, DieselLoginService, DieselRecordRepository, DieselRegistrationService,
    DieselTechnicianQuery, DieselTechnicianRepository,
};

/// Build the HTTP state backed by the database pool.
pub(crate) fn build_http_state(pool: &DbPool) -> HttpState {
    HttpState {
        login: Arc::new(DieselLoginService::new(DieselTechnicianRepository::new(
            pool.clone(),
        ))),
        registration: Arc::new(DieselRegistrationService::new(
            DieselTechnicianRepository::new(pool.clone()),
        )),
        technicians: Arc::new(DieselTechnicianQuery::new(DieselTechnicianRepository::new(
            pool.clone(),
        ))),
        records: Arc::new(DieselRecordRepository::new(pool.clone())),
        exporter: Arc::new(XlsxRecordExporter::new()),
    }
}
