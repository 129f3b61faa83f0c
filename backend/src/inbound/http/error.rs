//! HTTP adapter mapping for domain errors.
//!
//! The controller contract is uniform: every failure becomes a 500 response
//! whose JSON body carries a `message` string. No distinction is made
//! between client-fault and server-fault conditions, and no error crosses
//! the request boundary unhandled.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::domain::DomainError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn every_domain_error_maps_to_a_500_message_body() {
        let err = DomainError::new("user repository query failed: boom");

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("body is JSON");
        assert_eq!(
            value.get("message").and_then(serde_json::Value::as_str),
            Some("user repository query failed: boom")
        );
    }
}
