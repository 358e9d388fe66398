//! Technician account API handlers.
//!
//! ```text
//! POST /api/v1/register {"username":"mrojas","displayName":"Mar Rojas","password":"..."}
//! POST /api/v1/login    {"username":"mrojas","password":"..."}
//! POST /api/v1/logout
//! GET  /api/v1/technicians/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::technician::TechnicianValidationError;
use crate::domain::{AuthValidationError, Error, LoginCredentials, Registration, Technician};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Unique login name.
    pub username: String,
    /// Name shown alongside records.
    pub display_name: String,
    /// Optional contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Chosen password, at least eight characters.
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = AuthValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.username,
            &value.display_name,
            value.email.as_deref(),
            &value.password,
        )
    }
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = AuthValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Technician profile returned by registration, login, and `/technicians/me`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianResponse {
    /// Stable identifier.
    pub id: String,
    /// Unique login name.
    pub username: String,
    /// Name shown alongside records.
    pub display_name: String,
    /// Optional contact address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&Technician> for TechnicianResponse {
    fn from(technician: &Technician) -> Self {
        Self {
            id: technician.id().to_string(),
            username: technician.username().to_string(),
            display_name: technician.display_name().to_string(),
            email: technician.email().map(ToString::to_string),
        }
    }
}

fn field_for(error: &TechnicianValidationError) -> &'static str {
    match error {
        TechnicianValidationError::InvalidId => "id",
        TechnicianValidationError::EmptyUsername
        | TechnicianValidationError::UsernameLength { .. }
        | TechnicianValidationError::UsernameInvalidCharacters => "username",
        TechnicianValidationError::EmptyDisplayName
        | TechnicianValidationError::DisplayNameLength { .. }
        | TechnicianValidationError::DisplayNameInvalidCharacters => "displayName",
        TechnicianValidationError::InvalidEmail => "email",
    }
}

pub(crate) fn map_auth_validation_error(err: AuthValidationError) -> Error {
    let (field, message) = match &err {
        AuthValidationError::EmptyUsername => ("username", err.to_string()),
        AuthValidationError::EmptyPassword | AuthValidationError::PasswordTooShort { .. } => {
            ("password", err.to_string())
        }
        AuthValidationError::Technician(inner) => (field_for(inner), inner.to_string()),
    };
    Error::invalid_request(message).with_details(json!({ "field": field }))
}

/// Create a technician account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = TechnicianResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["technicians"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_auth_validation_error)?;
    let technician = state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(TechnicianResponse::from(&technician)))
}

/// Authenticate a technician and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TechnicianResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["technicians"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_auth_validation_error)?;
    let technician = state.login.authenticate(&credentials).await?;
    session.persist_technician(technician.id())?;
    Ok(HttpResponse::Ok().json(TechnicianResponse::from(&technician)))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session ended"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["technicians"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Fetch the authenticated technician's profile.
#[utoipa::path(
    get,
    path = "/api/v1/technicians/me",
    responses(
        (status = 200, description = "Current technician", body = TechnicianResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["technicians"],
    operation_id = "currentTechnician"
)]
#[get("/technicians/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<TechnicianResponse>> {
    let technician_id = session.require_technician_id()?;
    let technician = state
        .technicians
        .get(&technician_id)
        .await?
        .ok_or_else(|| Error::unauthorized("login required"))?;
    Ok(web::Json(TechnicianResponse::from(&technician)))
}
