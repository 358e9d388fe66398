//! Maintenance record tracking backend.
//!
//! Hexagonal layout: `domain` holds the types and ports, `inbound` the HTTP
//! adapter, `outbound` the PostgreSQL and XLSX adapters, and `server` the
//! wiring that assembles them into a running process.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::RequestLog;
