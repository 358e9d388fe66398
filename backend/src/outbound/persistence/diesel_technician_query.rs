//! Diesel-backed `TechnicianQuery` adapter built on `DieselTechnicianRepository`.
//!
//! Fetches the technician behind an authenticated session so handlers can
//! render the profile without touching credentials.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{TechnicianQuery, TechnicianRepository};
use crate::domain::{Error, Technician, TechnicianId};

use super::diesel_technician_repository::DieselTechnicianRepository;
use super::error_mapping::map_technician_persistence_error;

/// Diesel-backed `TechnicianQuery` implementation.
#[derive(Clone)]
pub struct DieselTechnicianQuery {
    technician_repository: Arc<dyn TechnicianRepository>,
}

impl DieselTechnicianQuery {
    /// Create a new query adapter backed by a Diesel technician repository.
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

#[async_trait]
impl TechnicianQuery for DieselTechnicianQuery {
    async fn get(&self, id: &TechnicianId) -> Result<Option<Technician>, Error> {
        self.technician_repository
            .find_by_id(id)
            .await
            .map_err(map_technician_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::TechnicianPersistenceError;
    use crate::domain::{DisplayName, Username};

    #[derive(Default)]
    struct StubTechnicianRepository {
        stored: Mutex<Option<Technician>>,
        find_failure: Mutex<Option<TechnicianPersistenceError>>,
    }

    #[async_trait]
    impl TechnicianRepository for StubTechnicianRepository {
        async fn insert(
            &self,
            _technician: &Technician,
        ) -> Result<(), TechnicianPersistenceError> {
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
            id: &TechnicianId,
        ) -> Result<Option<Technician>, TechnicianPersistenceError> {
            if let Some(failure) = self.find_failure.lock().expect("failure lock").clone() {
                return Err(failure);
            }
            Ok(self
                .stored
                .lock()
                .expect("store lock")
                .as_ref()
                .filter(|t| t.id() == id)
                .cloned())
        }
    }

    fn technician() -> Technician {
        Technician::new(
            TechnicianId::random(),
            Username::new("mrojas").expect("valid username"),
            DisplayName::new("Mar Rojas").expect("valid name"),
            None,
            "$argon2id$stub".to_owned(),
        )
    }

    #[tokio::test]
    async fn get_returns_stored_technician() {
        let stored = technician();
        let id = stored.id().clone();
        let repository = Arc::new(StubTechnicianRepository::default());
        *repository.stored.lock().expect("store lock") = Some(stored);
        let query = DieselTechnicianQuery::from_repository(repository);

        let found = query.get(&id).await.expect("query succeeds");
        assert_eq!(found.map(|t| t.id().clone()), Some(id));
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_id() {
        let repository = Arc::new(StubTechnicianRepository::default());
        let query = DieselTechnicianQuery::from_repository(repository);

        let found = query
            .get(&TechnicianId::random())
            .await
            .expect("query succeeds");
        assert!(found.is_none());
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
    async fn get_maps_repository_failures(
        #[case] failure: TechnicianPersistenceError,
        #[case] expected_code: ErrorCode,
    ) {
        let repository = Arc::new(StubTechnicianRepository::default());
        *repository.find_failure.lock().expect("failure lock") = Some(failure);
        let query = DieselTechnicianQuery::from_repository(repository);

        let err = query
            .get(&TechnicianId::random())
            .await
            .expect_err("repository failures should surface as domain errors");

        assert_eq!(err.code(), expected_code);
    }
}
