//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the technician id at login,
//! reading it back, and purging it at logout.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, TechnicianId};

pub(crate) const TECHNICIAN_ID_KEY: &str = "technician_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated technician's id in the session cookie.
    pub fn persist_technician(&self, technician_id: &TechnicianId) -> Result<(), Error> {
        self.0
            .insert(TECHNICIAN_ID_KEY, technician_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current technician id from the session, if present.
    pub fn technician_id(&self) -> Result<Option<TechnicianId>, Error> {
        let id = self
            .0
            .get::<String>(TECHNICIAN_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match TechnicianId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid technician id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated technician id or return `401 Unauthorized`.
    pub fn require_technician_id(&self) -> Result<TechnicianId, Error> {
        self.technician_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Remove all session state, ending the login.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
