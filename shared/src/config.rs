use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("Unsupported URL scheme for {0}: expected http or https")]
    UnsupportedScheme(String),
}

/// Network listener configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Listener {
    /// Host address to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

impl Listener {
    /// Validates the listener configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

/// Settings for the outbound client used to reach an upstream.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ForwardingConfig {
    /// Total time allowed for one outbound call. No limit when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Copy the upstream status line to the caller instead of always
    /// answering 200 once the upstream has replied.
    #[serde(default)]
    pub pass_through_status: bool,
}

/// Upstream URLs must be absolute http(s) URLs so that path segments can be appended.
pub fn validate_http_url(url: &Url) -> Result<(), ValidationError> {
    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() => Ok(()),
        _ => Err(ValidationError::UnsupportedScheme(url.to_string())),
    }
}
