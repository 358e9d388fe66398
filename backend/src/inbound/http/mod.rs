//! HTTP inbound adapter.
//!
//! Handlers translate requests into domain operations and domain errors
//! into JSON problem responses. Authentication is a server-side session
//! referenced by a signed cookie.

pub mod error;
pub mod export;
pub mod health;
pub mod records;
pub mod session;
pub mod state;
pub mod technicians;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;

pub use error::ApiResult;
