pub mod config;
pub mod errors;
pub mod incident;
mod service;
pub mod store;

use config::IncidentConfig;
use errors::IncidentApiError;
use shared::admin_service::AdminService;
use shared::http::run_http_service;

pub use service::IncidentService;

/// Serves the incident API and its admin endpoints until either listener fails.
pub async fn run(config: IncidentConfig) -> Result<(), IncidentApiError> {
    config.validate()?;

    tracing::info!(
        project_id = config.store.project_id.as_deref().unwrap_or("-"),
        base_url = %config.store.base_url,
        "Starting incident service"
    );

    let service = IncidentService::new(&config)?;
    let incident_task = run_http_service(&config.listener, service);
    let admin_task = run_http_service(
        &config.admin_listener,
        AdminService::<_, IncidentApiError>::new(|| true),
    );

    tokio::try_join!(incident_task, admin_task)?;
    Ok(())
}
