use crate::model::NetworkError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LogConfig {
    fn env_filter(&self) -> Result<EnvFilter, NetworkError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(format!(
                "draft_session={level},draft_session_core={level},tower_http=debug,warn",
                level = self.level
            ))
            .map_err(|e| NetworkError::Logging(e.to_string())),
        }
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_telemetry(config: &LogConfig) -> Result<(), NetworkError> {
    let env_filter = config.env_filter()?;

    let result = if config.json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .json();
        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(true);
        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };
    result.map_err(|e| NetworkError::Logging(e.to_string()))?;

    tracing::info!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}
