use crate::model::NetworkError;
use crate::server::LogConfig;
use clap::{Parser, ValueEnum};
use draft_session_core::{EngineConfig, TurnPolicy, CATALOG, DEFAULT_DRAW_SIZE};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TurnPolicyArg {
    Enforced,
    Advisory,
}

impl From<TurnPolicyArg> for TurnPolicy {
    fn from(arg: TurnPolicyArg) -> Self {
        match arg {
            TurnPolicyArg::Enforced => TurnPolicy::Enforced,
            TurnPolicyArg::Advisory => TurnPolicy::Advisory,
        }
    }
}

/// Draft session server
#[derive(Debug, Clone, Parser)]
#[command(name = "draft-server", version, about)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Candidates drawn per session
    #[arg(long, env = "DRAW_SIZE", default_value_t = DEFAULT_DRAW_SIZE)]
    pub draw_size: usize,

    #[arg(long, env = "TURN_POLICY", value_enum, default_value_t = TurnPolicyArg::Enforced)]
    pub turn_policy: TurnPolicyArg,

    /// Directory served for every path other than the websocket route
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn engine_config(&self) -> Result<EngineConfig, NetworkError> {
        let config = EngineConfig {
            pool_size: CATALOG.len(),
            draw_size: self.draw_size,
            turn_policy: self.turn_policy.into(),
        };
        config
            .validate()
            .map_err(|e| NetworkError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, NetworkError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| NetworkError::InvalidConfig(format!("{}:{}: {}", self.host, self.port, e)))
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            json: self.log_json,
        }
    }
}
