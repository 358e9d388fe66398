//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every REST endpoint, the request and response
//! schemas, and the session cookie security scheme. Swagger UI serves the
//! generated document at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::records::{
    CountEntry, RecordPageResponse, RecordRequest, RecordResponse, StatsResponse,
};
use crate::inbound::http::technicians::{LoginRequest, RegisterRequest, TechnicianResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Mantenix API",
        description = "Session-authenticated HTTP interface for maintenance record tracking."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::technicians::register,
        crate::inbound::http::technicians::login,
        crate::inbound::http::technicians::logout,
        crate::inbound::http::technicians::me,
        crate::inbound::http::records::list,
        crate::inbound::http::records::create,
        crate::inbound::http::records::stats,
        crate::inbound::http::records::get,
        crate::inbound::http::records::update,
        crate::inbound::http::records::remove,
        crate::inbound::http::export::export,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        TechnicianResponse,
        RecordRequest,
        RecordResponse,
        RecordPageResponse,
        StatsResponse,
        CountEntry,
    )),
    tags(
        (name = "technicians", description = "Account registration and sessions"),
        (name = "records", description = "Maintenance record tracking"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
