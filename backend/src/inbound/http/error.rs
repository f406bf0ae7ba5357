//! Maps domain errors onto HTTP responses.
//!
//! The domain error stays transport-agnostic; this module decides status
//! codes, strips internal details from the wire and echoes the trace id as a
//! response header.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal errors keep only their trace id on the wire.
fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    error!(message = error.message(), "internal error returned to client");
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    async fn decode(response: HttpResponse) -> Error {
        let bytes = to_bytes(response.into_body()).await.expect("body");
        serde_json::from_slice(&bytes).expect("error payload")
    }

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("taken"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_follows_error_code(#[case] error: Error, #[case] status: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), status);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted_but_keep_trace_id() {
        let error = Error::internal("db password is hunter2")
            .with_trace_id(TRACE_ID)
            .with_details(json!({ "secret": true }));

        let response = error.error_response();
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some(TRACE_ID)
        );
        let payload = decode(response).await;
        assert_eq!(payload.message(), "Internal server error");
        assert_eq!(payload.trace_id(), Some(TRACE_ID));
        assert!(payload.details().is_none());
    }

    #[actix_web::test]
    async fn client_errors_keep_message_and_details() {
        let error = Error::invalid_request("title must not be empty")
            .with_details(json!({ "field": "title", "code": "empty_title" }));

        let response = error.error_response();
        assert!(response.headers().get(TRACE_ID_HEADER).is_none());
        let payload = decode(response).await;
        assert_eq!(payload.code(), ErrorCode::InvalidRequest);
        assert_eq!(payload.message(), "title must not be empty");
        assert_eq!(
            payload.details(),
            Some(&json!({ "field": "title", "code": "empty_title" }))
        );
    }

    #[test]
    fn actix_errors_become_generic_internal_errors() {
        let err: Error = actix_web::error::ErrorBadRequest("boom").into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Internal server error");
    }
}
