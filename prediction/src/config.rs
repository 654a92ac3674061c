use serde::Deserialize;
use shared::config::{ForwardingConfig, Listener, ValidationError, validate_http_url};
use url::Url;

/// Prediction service configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PredictionConfig {
    pub listener: Listener,
    pub admin_listener: Listener,
    /// Cloud function returning the current prediction
    pub endpoint: Url,
    #[serde(default)]
    pub forwarding: ForwardingConfig,
}

impl PredictionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listener.validate()?;
        self.admin_listener.validate()?;
        validate_http_url(&self.endpoint)
    }
}
