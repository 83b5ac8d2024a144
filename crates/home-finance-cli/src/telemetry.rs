use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Environment variable that takes precedence over `--log-level`.
pub const LOG_ENV: &str = "HOMECALC_LOG";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log level '{level}'")]
    InvalidLevel {
        level: String,
        #[source]
        source: ParseError,
    },

    #[error("logging already initialised: {0}")]
    AlreadyInitialised(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Route `tracing` events to stderr so they never mix with rendered output.
///
/// `HOMECALC_LOG` wins when it holds a valid filter; otherwise `log_level`
/// from the command line is used.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| {
        EnvFilter::try_new(log_level).map_err(|source| TelemetryError::InvalidLevel {
            level: log_level.to_string(),
            source,
        })
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInitialised)
}
