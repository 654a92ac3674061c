pub mod config;
pub mod errors;

use config::PredictionConfig;
use errors::{PredictionBody, PredictionError};
use hyper::service::Service;
use hyper::{Method, Request, Response};
use shared::admin_service::AdminService;
use shared::forward::Forwarder;
use shared::http::run_http_service;
use std::future::Future;
use std::pin::Pin;
use url::Url;

/// Serves the prediction API and its admin endpoints until either listener fails.
pub async fn run(config: PredictionConfig) -> Result<(), PredictionError> {
    config.validate()?;

    tracing::info!(endpoint = %config.endpoint, "Starting prediction service");

    let service = PredictionService::new(&config)?;
    let prediction_task = run_http_service(&config.listener, service);
    let admin_task = run_http_service(
        &config.admin_listener,
        AdminService::<_, PredictionError>::new(|| true),
    );

    tokio::try_join!(prediction_task, admin_task)?;
    Ok(())
}

/// Read-only facade over the prediction function: every `GET` is sent to
/// the configured endpoint as is, without query or body.
#[derive(Clone)]
pub struct PredictionService {
    endpoint: Url,
    forwarder: Forwarder,
}

impl PredictionService {
    pub fn new(config: &PredictionConfig) -> Result<Self, PredictionError> {
        Ok(Self {
            endpoint: config.endpoint.clone(),
            forwarder: Forwarder::new(&config.forwarding)?,
        })
    }

    pub async fn handle<B>(
        &self,
        req: Request<B>,
    ) -> Result<Response<PredictionBody>, PredictionError> {
        if req.method() != Method::GET {
            return Err(PredictionError::MethodNotAllowed);
        }

        let upstream = self.forwarder.get(self.endpoint.clone()).await?;
        Ok(self.forwarder.relay(upstream))
    }
}

impl<B> Service<Request<B>> for PredictionService
where
    B: Send + 'static,
{
    type Response = Response<PredictionBody>;
    type Error = PredictionError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        let service = self.clone();

        Box::pin(async move {
            let method = req.method().clone();
            let path = req.uri().path().to_owned();

            match service.handle(req).await {
                Ok(response) => Ok(response),
                Err(e) => {
                    let status = e.status_code();
                    if status.is_server_error() {
                        tracing::error!(
                            method = %method,
                            path = %path,
                            error = %e,
                            "Prediction request failed"
                        );
                    } else {
                        tracing::info!(
                            method = %method,
                            path = %path,
                            status = %status,
                            error = ?e,
                            "Rejected prediction request"
                        );
                    }
                    Ok(e.into_response())
                }
            }
        })
    }
}
