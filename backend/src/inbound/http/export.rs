//! XLSX export endpoint.

use actix_web::http::header::{CONTENT_DISPOSITION, ContentDisposition};
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::ExportError;
use crate::domain::{Error, Site};
use crate::inbound::http::ApiResult;
use crate::inbound::http::records::map_record_persistence_error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const EXPORT_FILE_NAME: &str = "Mantenimiento.xlsx";

/// Query parameters accepted by the export endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ExportQuery {
    /// Restrict the export to a single sede.
    pub sede: Option<String>,
}

fn map_export_error(err: ExportError) -> Error {
    let ExportError::Render { message } = err;
    Error::internal(message)
}

/// Download all matching records as an XLSX workbook.
///
/// An empty result set still yields a well-formed workbook containing only
/// the header row.
#[utoipa::path(
    get,
    path = "/api/v1/records/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "XLSX workbook",
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "exportRecords"
)]
#[get("/records/export")]
pub async fn export(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ExportQuery>,
) -> ApiResult<HttpResponse> {
    session.require_technician_id()?;
    let site = query
        .into_inner()
        .sede
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(Site::new)
        .transpose()
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let records = state
        .records
        .list_for_export(site.as_ref())
        .await
        .map_err(map_record_persistence_error)?;
    let workbook = state.exporter.export(&records).map_err(map_export_error)?;
    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((
            CONTENT_DISPOSITION,
            ContentDisposition::attachment(EXPORT_FILE_NAME),
        ))
        .body(workbook))
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};

    use super::*;
    use crate::domain::TechnicianId;
    use crate::domain::ports::RecordRepository;
    use crate::inbound::http::records::tests::{StubRecords, record_body};
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::technicians;
    use crate::inbound::http::technicians::tests::{StubDirectory, state_with};
    use crate::outbound::export::XlsxRecordExporter;
    use std::sync::Arc;

    fn exporting_state(records: Arc<StubRecords>) -> HttpState {
        let (directory, _) = StubDirectory::with_account("mrojas", "hunter2xyz");
        let mut state = state_with(directory);
        state.records = records;
        state.exporter = Arc::new(XlsxRecordExporter::new());
        state
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(technicians::login)
                    .service(export),
            )
    }

    async fn login_cookie<S>(app: &S) -> Cookie<'static>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(serde_json::json!({
                    "username": "mrojas",
                    "password": "hunter2xyz",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn export_requires_a_session() {
        let app = actix_test::init_service(test_app(exporting_state(StubRecords::new()))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/records/export")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn export_of_an_empty_store_yields_a_workbook_attachment() {
        let app = actix_test::init_service(test_app(exporting_state(StubRecords::new()))).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/records/export")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        assert_eq!(content_type.as_deref(), Some(XLSX_CONTENT_TYPE));
        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        assert!(
            disposition
                .as_deref()
                .is_some_and(|value| value.contains("Mantenimiento.xlsx"))
        );
        let body = actix_test::read_body(response).await;
        assert_eq!(&body[..2], b"PK");
    }

    #[actix_web::test]
    async fn export_honours_the_sede_filter() {
        let records = StubRecords::new();
        let technician = TechnicianId::random();
        for (sede, equipment) in [("Bogota", "pc-sala-01"), ("Medellin", "pc-sala-02")] {
            let body = record_body(sede, equipment);
            let request: crate::inbound::http::records::RecordRequest =
                serde_json::from_value(body).expect("valid request body");
            let draft = crate::domain::RecordDraft::try_from(request).expect("valid draft");
            records
                .create(&technician, &draft)
                .await
                .expect("stub create");
        }
        let app = actix_test::init_service(test_app(exporting_state(records))).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/records/export?sede=Bogota")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        assert_eq!(&body[..2], b"PK");
    }
}
