//! Tracing subscriber setup
//!
//! Only available with the `telemetry` feature. Libraries embedding the engine
//! usually install their own subscriber and never call this.
//!
//! ```rust,ignore
//! use param_adapter::observability::{LogFormat, init_tracing};
//!
//! init_tracing(LogFormat::Json, "param_adapter=debug")?;
//! ```

use tracing_subscriber::EnvFilter;

use crate::error::AdapterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// One JSON object per event
    Json,
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = AdapterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" | "text" => Ok(Self::Compact),
            other => Err(AdapterError::ConfigurationError(format!(
                "invalid log format '{other}' (expected pretty, json or compact)"
            ))),
        }
    }
}

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. Calling this when a global
/// subscriber already exists is not an error.
pub fn init_tracing(format: LogFormat, default_filter: &str) -> Result<(), AdapterError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| AdapterError::ConfigurationError(format!("invalid log filter: {e}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let result = match format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.to_string().contains("already been set") => Ok(()),
        Err(e) => Err(AdapterError::ConfigurationError(format!(
            "failed to initialize tracing: {e}"
        ))),
    }
}
