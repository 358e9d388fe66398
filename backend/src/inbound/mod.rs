//! Inbound (driving) adapters.

pub mod http;
