//! HTTP adapter mapping for domain errors.
//!
//! The domain error type stays transport agnostic; this module decides the
//! status code, redacts internal failures and renders the JSON body.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::InvalidCredentials | ErrorCode::Conflict => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(error = %self, trace_id = ?self.trace_id(), "request failed");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(self.redacted())
    }
}

/// Turn body extraction failures into `invalid_request` errors.
///
/// Registered through [`actix_web::web::JsonConfig::error_handler`].
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request("Invalid request body")
        .with_detail(err.to_string())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    async fn body_of(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        serde_json::from_slice(&bytes).expect("error body is JSON")
    }

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::invalid_credentials(), StatusCode::BAD_REQUEST)]
    #[case(Error::conflict("User already exists"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("Product not found"), StatusCode::NOT_FOUND)]
    #[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
        assert_eq!(ResponseError::status_code(&err), status);
    }

    #[rstest]
    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let err = Error::internal("relation inventory_items does not exist")
            .with_detail("SQLSTATE 42P01")
            .with_trace_id(TRACE_ID);
        let response = ResponseError::error_response(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some(TRACE_ID)
        );
        assert_eq!(
            body_of(response).await,
            json!({"code": "internal_error", "message": "Server error", "traceId": TRACE_ID})
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn client_errors_keep_message_and_detail() {
        let err = Error::invalid_request("name must not be empty").with_detail("empty_name");
        let response = ResponseError::error_response(&err);
        assert!(response.headers().get(TRACE_ID_HEADER).is_none());
        assert_eq!(
            body_of(response).await,
            json!({
                "code": "invalid_request",
                "message": "name must not be empty",
                "error": "empty_name",
            })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_becomes_invalid_request() {
        use actix_web::{App, HttpResponse, test, web};

        let app = test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .route(
                    "/echo",
                    web::post().to(|body: web::Json<Value>| async move {
                        HttpResponse::Ok().json(body.into_inner())
                    }),
                ),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/echo")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], json!("invalid_request"));
        assert_eq!(body["message"], json!("Invalid request body"));
    }
}
