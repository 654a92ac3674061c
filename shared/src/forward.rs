//! Outbound half of every handler: send one request upstream and hand the
//! reply back to the caller unchanged.

use crate::config::ForwardingConfig;
use crate::http::full_body;
use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::{Method, Response, StatusCode};
use serde::Serialize;
use std::error::Error as _;
use std::time::Duration;
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum ForwardError {
    /// The upstream could not be reached or its reply could not be read.
    #[error("{0}")]
    Transport(String),
    #[error("could not serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not build HTTP client: {0}")]
    Client(String),
}

impl ForwardError {
    fn transport(error: reqwest::Error) -> Self {
        // reqwest keeps the interesting part (refused, dns, timeout) in the source chain
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ForwardError::Transport(message)
    }
}

/// Reply collected from the upstream.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

#[derive(Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    pass_through_status: bool,
}

impl Forwarder {
    pub fn new(config: &ForwardingConfig) -> Result<Self, ForwardError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ForwardError::Client(e.to_string()))?;

        Ok(Self {
            client,
            pass_through_status: config.pass_through_status,
        })
    }

    /// Send `payload` as JSON (or no body at all when `None`) and collect the reply.
    ///
    /// Any reply from the upstream is a success here, whatever its status;
    /// only transport failures are errors.
    pub async fn forward<T>(
        &self,
        method: Method,
        url: Url,
        payload: Option<&T>,
    ) -> Result<UpstreamResponse, ForwardError>
    where
        T: Serialize + ?Sized,
    {
        tracing::debug!(method = %method, url = %url, "Forwarding request upstream");

        let mut request = self.client.request(method, url);
        if let Some(payload) = payload {
            let body = serde_json::to_vec(payload)?;
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(ForwardError::transport)?;
        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(ForwardError::transport)?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }

    pub async fn get(&self, url: Url) -> Result<UpstreamResponse, ForwardError> {
        self.forward::<()>(Method::GET, url, None).await
    }

    /// Build the reply for the original caller from the upstream's reply.
    pub fn relay<E: 'static>(&self, upstream: UpstreamResponse) -> Response<BoxBody<Bytes, E>> {
        let status = if self.pass_through_status {
            upstream.status
        } else {
            if !upstream.status.is_success() {
                tracing::warn!(
                    status = %upstream.status,
                    "Upstream replied with non-success status, relaying body with 200"
                );
            }
            StatusCode::OK
        };

        let mut response = Response::new(full_body(upstream.body));
        *response.status_mut() = status;
        if let Some(content_type) = upstream.content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        response
    }
}
