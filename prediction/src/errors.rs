use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use shared::config::ValidationError;
use shared::forward::ForwardError;
use shared::http::make_text_response;

pub type PredictionBody = BoxBody<Bytes, PredictionError>;

#[derive(thiserror::Error, Debug)]
pub enum PredictionError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Forward(#[from] ForwardError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PredictionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PredictionError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> Response<PredictionBody> {
        make_text_response(self.status_code(), &self.to_string())
    }
}
