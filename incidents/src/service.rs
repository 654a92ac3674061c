use crate::config::IncidentConfig;
use crate::errors::{IncidentApiError, IncidentBody};
use crate::incident::Incident;
use crate::store::IncidentStore;
use hyper::body::Body;
use hyper::service::Service;
use hyper::{Method, Request, Response, Uri};
use serde_json::json;
use shared::forward::Forwarder;
use shared::http::{collect_body, query_param};
use std::future::Future;
use std::pin::Pin;

/// Translates incident API calls into Realtime Database REST calls.
///
/// | Inbound | Outbound |
/// |---|---|
/// | `POST` + incident document | `PUT incidents/<id>.json` |
/// | `GET ?user_id=` | `GET incidents.json` (unfiltered) |
/// | `GET ?assignee_id=` | `GET incidents.json?orderBy="assignee_id"&equalTo=...` |
/// | `PATCH ?incident_id=&status=` | `PATCH incidents/<incident_id>.json` with `{"status": ...}` |
#[derive(Clone)]
pub struct IncidentService {
    store: IncidentStore,
    forwarder: Forwarder,
}

impl IncidentService {
    pub fn new(config: &IncidentConfig) -> Result<Self, IncidentApiError> {
        Ok(Self {
            store: IncidentStore::new(config.store.base_url.clone()),
            forwarder: Forwarder::new(&config.forwarding)?,
        })
    }

    pub async fn handle<B>(
        &self,
        req: Request<B>,
    ) -> Result<Response<IncidentBody>, IncidentApiError>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let method = req.method().clone();
        match method {
            Method::POST => self.upsert(req.into_body()).await,
            Method::GET => self.list(req.uri()).await,
            Method::PATCH => self.update_status(req.uri()).await,
            _ => Err(IncidentApiError::MethodNotAllowed),
        }
    }

    /// Full-replace write of the incident named by the document's `id`.
    async fn upsert<B>(&self, body: B) -> Result<Response<IncidentBody>, IncidentApiError>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let bytes = collect_body(body)
            .await
            .map_err(|e| IncidentApiError::InvalidBody(e.to_string()))?;
        let incident = Incident::from_json(&bytes)
            .map_err(|e| IncidentApiError::InvalidBody(e.to_string()))?;

        let url = self.store.record_url(&incident.id);
        let upstream = self
            .forwarder
            .forward(Method::PUT, url, Some(&incident))
            .await?;
        Ok(self.forwarder.relay(upstream))
    }

    async fn list(&self, uri: &Uri) -> Result<Response<IncidentBody>, IncidentApiError> {
        // user_id wins when both are given. It selects the whole collection:
        // existing callers rely on receiving every incident here.
        let url = if let Some(user_id) = query_param(uri, "user_id") {
            tracing::debug!(user_id = %user_id, "Listing incidents for user");
            self.store.collection_url()
        } else if let Some(assignee_id) = query_param(uri, "assignee_id") {
            self.store.assignee_url(&assignee_id)
        } else {
            return Err(IncidentApiError::MissingQueryParams);
        };

        let upstream = self.forwarder.get(url).await?;
        Ok(self.forwarder.relay(upstream))
    }

    async fn update_status(&self, uri: &Uri) -> Result<Response<IncidentBody>, IncidentApiError> {
        let (Some(incident_id), Some(status)) =
            (query_param(uri, "incident_id"), query_param(uri, "status"))
        else {
            return Err(IncidentApiError::MissingQueryParams);
        };

        let url = self.store.record_url(&incident_id);
        let patch = json!({ "status": status });
        let upstream = self
            .forwarder
            .forward(Method::PATCH, url, Some(&patch))
            .await?;
        Ok(self.forwarder.relay(upstream))
    }
}

impl<B> Service<Request<B>> for IncidentService
where
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    type Response = Response<IncidentBody>;
    type Error = IncidentApiError;
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
                            "Incident request failed"
                        );
                    } else {
                        tracing::info!(
                            method = %method,
                            path = %path,
                            status = %status,
                            error = ?e,
                            "Rejected incident request"
                        );
                    }
                    Ok(e.into_response())
                }
            }
        })
    }
}
