use crate::models::ErrorDetail;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Hard failures of the match endpoint
///
/// Every variant stops request processing and is answered with a
/// `{"detail": ...}` body. Upstream soft failures are not represented here;
/// they become regular zero-score responses.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Validation(String),

    #[error("Forbidden origin")]
    OriginForbidden,

    #[error("Failed to contact Hugging Face API")]
    UpstreamUnreachable,
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RelayError::OriginForbidden => StatusCode::FORBIDDEN,
            RelayError::UpstreamUnreachable => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RelayError::Validation("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(RelayError::OriginForbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(RelayError::UpstreamUnreachable.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn test_forbidden_body() {
        let response = RelayError::OriginForbidden.error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&body[..], br#"{"detail":"Forbidden origin"}"#);
    }

    #[actix_web::test]
    async fn test_unreachable_body() {
        let response = RelayError::UpstreamUnreachable.error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let detail: ErrorDetail = serde_json::from_slice(&body).unwrap();
        assert_eq!(detail.detail, "Failed to contact Hugging Face API");
    }
}
