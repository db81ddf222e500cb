//! Installs the global `tracing` subscriber of the command line tool.
//!
//! Log lines go to stderr. `RUST_LOG` selects the level (default `info`),
//! `SIR_NETWORK_LOG_FORMAT=json` switches to json lines.

use{
    std::{env, sync::OnceLock},
    thiserror::Error,
    tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt},
};

const LOG_FORMAT_ENV: &str = "SIR_NETWORK_LOG_FORMAT";

static INITIALISED: OnceLock<()> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggingError{
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode{
        name: &'static str,
        #[source]
        source: env::VarError
    },
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat{provided: String},
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed{
        #[source]
        source: tracing_subscriber::util::TryInitError
    },
}

/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging() -> Result<(), LoggingError>
{
    if INITIALISED.get().is_some() {
        return Ok(());
    }
    match install_subscriber(){
        Ok(()) => {},
        // somebody else (e.g. a test harness) owns the global subscriber
        Err(LoggingError::InstallFailed{..}) => {},
        Err(err) => return Err(err)
    }
    let _ = INITIALISED.set(());
    Ok(())
}

fn install_subscriber() -> Result<(), LoggingError>
{
    let use_json = match env::var(LOG_FORMAT_ENV){
        Ok(raw) => parse_log_format(&raw)?,
        Err(env::VarError::NotPresent) => false,
        Err(source @ env::VarError::NotUnicode(_)) => {
            return Err(
                LoggingError::InvalidUnicode{
                    name: LOG_FORMAT_ENV,
                    source
                }
            )
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let fmt_layer = if use_json {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed{source})
}

fn parse_log_format(raw: &str) -> Result<bool, LoggingError>
{
    match raw.trim().to_ascii_lowercase().as_str(){
        "human" => Ok(false),
        "json" => Ok(true),
        other => Err(LoggingError::UnsupportedFormat{provided: other.to_owned()})
    }
}
