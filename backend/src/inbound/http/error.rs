//! HTTP mapping for domain errors.
//!
//! Every failure a handler or extractor produces leaves as the same JSON
//! shape: `{ code, message, traceId?, details? }`, with the trace identifier
//! also echoed in the `trace-id` header.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::validation::{ValidationCode, malformed_request};

/// Result alias for guide handlers.
pub type ApiResult<T> = Result<T, Error>;

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal failures keep only the trace identifier; the message and
/// details may name storage paths or upstream responses.
fn client_view(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
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
        match self.code() {
            ErrorCode::InternalError => {
                error!(message = self.message(), trace_id = self.trace_id(), "internal error");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(message = self.message(), trace_id = self.trace_id(), "dependency unavailable");
            }
            ErrorCode::InvalidRequest | ErrorCode::NotFound | ErrorCode::Conflict => {}
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

/// Turn unreadable JSON bodies into `invalid_request` errors.
///
/// Register through [`actix_web::web::JsonConfig::error_handler`].
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed_request(err.to_string(), ValidationCode::MalformedBody).into()
}

/// Turn unparsable query strings into `invalid_request` errors.
///
/// Register through [`actix_web::web::QueryConfig::error_handler`].
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed_request(err.to_string(), ValidationCode::MalformedQuery).into()
}

#[cfg(test)]
mod tests;
