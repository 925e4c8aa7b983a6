//! Mapping of crate errors onto HTTP responses.

use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, warn};

use super::render;
use crate::entity::ValidationError;
use crate::error::NotesError;

/// Failure of a request handler.
#[derive(Debug)]
pub enum WebError {
    /// The submission was rejected; nothing was stored.
    Invalid(ValidationError),
    /// The request could not be extracted (bad content type, path or query).
    Rejected { status: StatusCode, detail: String },
    /// The store or something below it failed.
    Internal(NotesError),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WebError::Rejected { status, .. } => *status,
            WebError::Internal(NotesError::StoreUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for WebError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

impl WebError {
    fn rejected(status: StatusCode, detail: String) -> Self {
        Self::Rejected { status, detail }
    }
}

impl From<FormRejection> for WebError {
    fn from(rejection: FormRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for WebError {
    fn from(rejection: PathRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<NotesError> for WebError {
    fn from(err: NotesError) -> Self {
        match err {
            NotesError::Validation(invalid) => Self::Invalid(invalid),
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self {
            WebError::Invalid(err) => {
                warn!(field = err.field(), "rejected note submission: {}", err);
                render::error_page("Invalid note", &err.to_string())
            }
            WebError::Rejected { status, detail } => {
                warn!(%status, "rejected request: {}", detail);
                render::error_page("Request rejected", detail)
            }
            WebError::Internal(err) => {
                error!("request failed: {}", err);
                render::error_page("Something went wrong", &err.to_string())
            }
        };
        (status, Html(page)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            WebError::from(ValidationError::MissingField("title")).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            WebError::from(NotesError::StoreUnavailable("disk gone".to_string())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            WebError::from(NotesError::NotInitialized).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_wrapped_validation_is_client_error() {
        let err = WebError::from(NotesError::Validation(ValidationError::NotAString("title")));
        assert!(matches!(err, WebError::Invalid(_)));
        assert!(err.status().is_client_error());
    }

    #[test]
    fn test_rejection_keeps_status() {
        let err = WebError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            detail: "wrong content type".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = WebError::from(NotesError::StoreUnavailable("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
