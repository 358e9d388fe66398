//! Diesel-backed `LoginService` adapter built on `DieselTechnicianRepository`.
//!
//! Verifies Argon2id password hashes against stored PHC strings. Unknown
//! usernames and wrong passwords return the same error so login cannot be
//! used to enumerate accounts.

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use async_trait::async_trait;

use crate::domain::ports::{LoginService, TechnicianRepository};
use crate::domain::{Error, LoginCredentials, Technician, Username};

use super::diesel_technician_repository::DieselTechnicianRepository;
use super::error_mapping::map_technician_persistence_error;

/// Diesel-backed `LoginService` verifying credentials against stored hashes.
#[derive(Clone)]
pub struct DieselLoginService {
    technician_repository: Arc<dyn TechnicianRepository>,
}

impl DieselLoginService {
    /// Create a new service backed by a Diesel technician repository.
    pub fn new(technician_repository: DieselTechnicianRepository) -> Self {
        Self {
            technician_repository: Arc::new(technician_repository),
        }
    }

    #[cfg(test)]
    fn from_repository(technician_repository: Arc<dyn TechnicianRepository>) -> Self {
        Self {
            technician_repository,
        }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn verify_password(technician: &Technician, password: &str) -> Result<(), Error> {
    let hash = PasswordHash::new(technician.password_hash()).map_err(|err| {
        Error::internal(format!(
            "stored password hash for {} is unparseable: {err}",
            technician.username()
        ))
    })?;

    Argon2::default()
        .verify_password(password.as_bytes(), &hash)
        .map_err(|_| invalid_credentials())
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Technician, Error> {
        let username = Username::new(credentials.username()).map_err(|_| invalid_credentials())?;

        let technician = self
            .technician_repository
            .find_by_username(&username)
            .await
            .map_err(map_technician_persistence_error)?
            .ok_or_else(invalid_credentials)?;

        verify_password(&technician, credentials.password())?;
        Ok(technician)
    }
}
