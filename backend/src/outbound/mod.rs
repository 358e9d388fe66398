//! Outbound (driven) adapters.
//!
//! Implementations of the domain ports that talk to external systems: the
//! PostgreSQL persistence layer and the XLSX export writer.

pub mod export;
pub mod persistence;
