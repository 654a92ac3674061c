use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use shared::config::ValidationError;
use shared::forward::ForwardError;
use shared::http::make_text_response;
use thiserror::Error;

pub type IncidentBody = BoxBody<Bytes, IncidentApiError>;

/// Errors that can occur while serving the incident API
#[derive(Error, Debug)]
pub enum IncidentApiError {
    /// The body could not be read or is not an incident document.
    /// The detail is kept for logs only.
    #[error("Invalid body")]
    InvalidBody(String),

    #[error("Missing query params")]
    MissingQueryParams,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Forward(#[from] ForwardError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IncidentApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IncidentApiError::InvalidBody(_) | IncidentApiError::MissingQueryParams => {
                StatusCode::BAD_REQUEST
            }
            IncidentApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            IncidentApiError::Forward(_)
            | IncidentApiError::Config(_)
            | IncidentApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> Response<IncidentBody> {
        make_text_response(self.status_code(), &self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            IncidentApiError::InvalidBody("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            IncidentApiError::MissingQueryParams.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            IncidentApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            IncidentApiError::Forward(ForwardError::Transport("connection refused".into()))
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        // Detail stays out of the client-facing message
        assert_eq!(
            IncidentApiError::InvalidBody("expected value at line 1".into()).to_string(),
            "Invalid body"
        );
        assert_eq!(
            IncidentApiError::Forward(ForwardError::Transport("connection refused".into()))
                .to_string(),
            "connection refused"
        );
    }
}
