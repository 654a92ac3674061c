use incidents::config::IncidentConfig;
use prediction::config::PredictionConfig;
use serde::Deserialize;
use std::fs::File;

#[derive(Deserialize, Debug, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,
    pub sentry_dsn: Option<String>,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            sentry_dsn: None,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub incidents: Option<IncidentConfig>,
    pub prediction: Option<PredictionConfig>,
}

impl Config {
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let data = serde_yaml::from_reader(file)?;

        Ok(data)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("config has no `{0}` section")]
    MissingSection(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", s).expect("write yaml");

        tmp
    }

    #[test]
    fn full_config() {
        let yaml = r#"
            logging:
                level: debug
                sentry_dsn: https://public@sentry.example.com/1
            incidents:
                listener:
                    host: 0.0.0.0
                    port: 8080
                admin_listener:
                    host: 127.0.0.1
                    port: 8081
                store:
                    project_id: silken-zenith-466515-b8
                    base_url: https://silken-zenith-466515-b8-default-rtdb.firebaseio.com
            prediction:
                listener:
                    host: 0.0.0.0
                    port: 8090
                admin_listener:
                    host: 127.0.0.1
                    port: 8091
                endpoint: https://us-central1-silken-zenith-466515-b8.cloudfunctions.net/predict
                forwarding:
                    timeout_secs: 30
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.sentry_dsn.is_some());

        let incidents = config.incidents.expect("incidents config");
        assert_eq!(incidents.listener.port, 8080);
        assert!(incidents.validate().is_ok());

        let prediction = config.prediction.expect("prediction config");
        assert_eq!(prediction.forwarding.timeout_secs, Some(30));
        assert!(prediction.validate().is_ok());
    }

    #[test]
    fn logging_defaults() {
        let yaml = r#"
            prediction:
                listener: {host: 0.0.0.0, port: 8090}
                admin_listener: {host: 127.0.0.1, port: 8091}
                endpoint: http://127.0.0.1:5001/predict
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.incidents.is_none());
    }

    #[test]
    fn load_errors() {
        let missing = Config::from_file(std::path::Path::new("/nonexistent/gateway.yaml"));
        assert!(matches!(missing, Err(ConfigError::LoadError(_))));

        let tmp = write_tmp_file("incidents: [1, 2]");
        assert!(matches!(
            Config::from_file(tmp.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
