mod config;
mod logging;

use clap::{Args, Parser};
use config::{Config, ConfigError};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "gateway", about = "Relays incident and prediction calls to Firebase")]
enum CliCommand {
    /// Serve the incident API backed by the Realtime Database
    Incidents(CliArgs),
    /// Serve the prediction API backed by the prediction function
    Prediction(CliArgs),
}

#[derive(Args)]
struct CliArgs {
    #[arg(long)]
    config_path: PathBuf,
}

#[derive(thiserror::Error, Debug)]
enum GatewayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
    #[error("could not start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("incident service error: {0}")]
    Incidents(#[from] incidents::errors::IncidentApiError),
    #[error("prediction service error: {0}")]
    Prediction(#[from] prediction::errors::PredictionError),
}

fn main() {
    let cli = CliCommand::parse();

    if let Err(e) = cli_main(cli) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn cli_main(cmd: CliCommand) -> Result<(), GatewayError> {
    let args = match &cmd {
        CliCommand::Incidents(args) | CliCommand::Prediction(args) => args,
    };
    let config = Config::from_file(&args.config_path)?;
    let _sentry_guard = logging::init(&config.logging)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cmd {
        CliCommand::Incidents(_) => {
            let incidents_config = config
                .incidents
                .ok_or(ConfigError::MissingSection("incidents"))?;
            tracing::info!("Starting incidents");
            rt.block_on(incidents::run(incidents_config))?;
        }
        CliCommand::Prediction(_) => {
            let prediction_config = config
                .prediction
                .ok_or(ConfigError::MissingSection("prediction"))?;
            tracing::info!("Starting prediction");
            rt.block_on(prediction::run(prediction_config))?;
        }
    }

    Ok(())
}
