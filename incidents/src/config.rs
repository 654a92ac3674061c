use serde::Deserialize;
use shared::config::{ForwardingConfig, Listener, ValidationError, validate_http_url};
use url::Url;

/// Incident service configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct IncidentConfig {
    /// Main listener for incoming requests
    pub listener: Listener,
    /// Admin listener for health and readiness checks
    pub admin_listener: Listener,
    /// Realtime Database holding the incident records
    pub store: StoreConfig,
    #[serde(default)]
    pub forwarding: ForwardingConfig,
}

impl IncidentConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listener.validate()?;
        self.admin_listener.validate()?;
        validate_http_url(&self.store.base_url)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Firebase project the database belongs to. Only used in logs.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Root of the database REST API, e.g. `https://<db>.firebaseio.com`
    pub base_url: Url,
}
