//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository and service ports,
//! backed by PostgreSQL through `diesel-async` with `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; validation lives in the domain constructors.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures are mapped to the port
//!   error enums before they cross the boundary.

mod diesel_login_service;
mod diesel_record_repository;
mod diesel_registration_service;
mod diesel_technician_query;
mod diesel_technician_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_login_service::DieselLoginService;
pub use diesel_record_repository::DieselRecordRepository;
pub use diesel_registration_service::DieselRegistrationService;
pub use diesel_technician_query::DieselTechnicianQuery;
pub use diesel_technician_repository::DieselTechnicianRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
