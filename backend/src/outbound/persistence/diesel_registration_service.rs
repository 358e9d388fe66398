//! Diesel-backed `RegistrationService` adapter.
//!
//! Hashes the chosen password with Argon2id and stores the new account.
//! Duplicate usernames surface as a conflict from the unique index rather
//! than a read-then-write race.

use std::sync::Arc;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};
use async_trait::async_trait;

use crate::domain::ports::{RegistrationService, TechnicianRepository};
use crate::domain::{Error, Registration, Technician, TechnicianId};

use super::diesel_technician_repository::DieselTechnicianRepository;
use super::error_mapping::map_technician_persistence_error;

/// Diesel-backed `RegistrationService` creating technician accounts.
#[derive(Clone)]
pub struct DieselRegistrationService {
    technician_repository: Arc<dyn TechnicianRepository>,
}

impl DieselRegistrationService {
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

fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
}

#[async_trait]
impl RegistrationService for DieselRegistrationService {
    async fn register(&self, registration: &Registration) -> Result<Technician, Error> {
        let password_hash = hash_password(registration.password())?;

        let technician = Technician::new(
            TechnicianId::random(),
            registration.username().clone(),
            registration.display_name().clone(),
            registration.email().cloned(),
            password_hash,
        );

        self.technician_repository
            .insert(&technician)
            .await
            .map_err(map_technician_persistence_error)?;

        Ok(technician)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for account creation and duplicate handling.
    use std::sync::Mutex;

    use argon2::{PasswordHash, PasswordVerifier};
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::TechnicianPersistenceError;
    use crate::domain::Username;

    #[derive(Default)]
    struct StubTechnicianRepository {
        stored: Mutex<Vec<Technician>>,
        insert_failure: Mutex<Option<TechnicianPersistenceError>>,
    }

    impl StubTechnicianRepository {
        fn set_insert_failure(&self, failure: TechnicianPersistenceError) {
            *self.insert_failure.lock().expect("failure lock") = Some(failure);
        }

        fn stored(&self) -> Vec<Technician> {
            self.stored.lock().expect("store lock").clone()
        }
    }

    #[async_trait]
    impl TechnicianRepository for StubTechnicianRepository {
        async fn insert(&self, technician: &Technician) -> Result<(), TechnicianPersistenceError> {
            if let Some(failure) = self.insert_failure.lock().expect("failure lock").clone() {
                return Err(failure);
            }
            self.stored
                .lock()
                .expect("store lock")
                .push(technician.clone());
            Ok(())
        }

        async fn find_by_username(
            &self,
            _username: &Username,
        ) -> Result<Option<Technician>, TechnicianPersistenceError> {
            Ok(None)
        }

        async fn find_by_id(
            &self,
            _id: &TechnicianId,
        ) -> Result<Option<Technician>, TechnicianPersistenceError> {
            Ok(None)
        }
    }

    fn registration() -> Registration {
        Registration::try_from_parts("mrojas", "Mar Rojas", Some("mrojas@example.com"), "hunter2xyz")
            .expect("valid registration")
    }

    #[tokio::test]
    async fn register_stores_account_with_verifiable_hash() {
        let repository = Arc::new(StubTechnicianRepository::default());
        let service = DieselRegistrationService::from_repository(repository.clone());

        let technician = service
            .register(&registration())
            .await
            .expect("registration should succeed");

        assert_eq!(technician.username().as_ref(), "mrojas");
        let stored = repository.stored();
        assert_eq!(stored.len(), 1);
        assert_ne!(stored[0].password_hash(), "hunter2xyz");

        let hash = PasswordHash::new(stored[0].password_hash()).expect("valid PHC string");
        Argon2::default()
            .verify_password(b"hunter2xyz", &hash)
            .expect("stored hash verifies against the original password");
    }

    #[tokio::test]
    async fn register_maps_duplicate_username_to_conflict() {
        let repository = Arc::new(StubTechnicianRepository::default());
        repository.set_insert_failure(TechnicianPersistenceError::duplicate_username("mrojas"));
        let service = DieselRegistrationService::from_repository(repository);

        let err = service
            .register(&registration())
            .await
            .expect_err("duplicate username must fail");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert!(err.message().contains("mrojas"));
    }

    #[rstest]
    #[case(
        TechnicianPersistenceError::connection("database unavailable"),
        ErrorCode::ServiceUnavailable
    )]
    #[case(
        TechnicianPersistenceError::query("database query failed"),
        ErrorCode::InternalError
    )]
    #[tokio::test]
    async fn register_maps_repository_failures(
        #[case] failure: TechnicianPersistenceError,
        #[case] expected_code: ErrorCode,
    ) {
        let repository = Arc::new(StubTechnicianRepository::default());
        repository.set_insert_failure(failure);
        let service = DieselRegistrationService::from_repository(repository);

        let err = service
            .register(&registration())
            .await
            .expect_err("repository failures should surface as domain errors");

        assert_eq!(err.code(), expected_code);
    }
}
