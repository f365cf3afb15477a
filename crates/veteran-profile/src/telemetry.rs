use std::fmt;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Crates whose spans are worth seeing at the configured level.
const TRACED_TARGETS: [&str; 2] = ["veteran_profile", "veteran_profile_api"];

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "invalid log level '{value}': unable to build EnvFilter")
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// `RUST_LOG` wins; otherwise dependencies log at `warn` and this workspace at the configured level.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = config.log_level.trim();
    let directives = std::iter::once("warn".to_string())
        .chain(TRACED_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",");

    EnvFilter::try_new(directives).map_err(|source| TelemetryError::EnvFilter {
        value: config.log_level.clone(),
        source,
    })
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config)?)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env_guard;

    #[test]
    fn configured_level_scopes_workspace_targets() {
        let _lock = env_guard();
        std::env::remove_var("RUST_LOG");
        let filter = build_filter(&TelemetryConfig {
            log_level: "debug".to_string(),
        })
        .expect("valid level");
        let rendered = filter.to_string();
        assert!(rendered.contains("veteran_profile=debug"));
        assert!(rendered.contains("warn"));
    }

    #[test]
    fn invalid_level_is_reported() {
        let _lock = env_guard();
        std::env::remove_var("RUST_LOG");
        let error = build_filter(&TelemetryConfig {
            log_level: "loud=[".to_string(),
        })
        .expect_err("invalid directive");
        assert!(error.to_string().contains("loud=["));
    }

    #[test]
    fn rust_log_overrides_the_configured_level() {
        let _lock = env_guard();
        std::env::set_var("RUST_LOG", "trace");
        let filter = build_filter(&TelemetryConfig {
            log_level: "loud=[".to_string(),
        });
        std::env::remove_var("RUST_LOG");

        let rendered = filter.expect("RUST_LOG takes precedence").to_string();
        assert!(!rendered.contains("veteran_profile="));
    }
}
