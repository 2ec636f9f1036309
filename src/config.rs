//! Server configuration from CLI flags and environment variables.

use std::net::{IpAddr, SocketAddr};

use clap::ValueEnum;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid host address: {0}")]
    InvalidHost(String),
}

/// Verbosity accepted by `--log-level` / `FINPROJ_LOG_LEVEL`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[value(alias = "warning")]
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: LogLevel,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Raw settings as collected by the CLI; `None` means "use the default".
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<LogLevel>,
}

pub fn build_config(args: &ConfigArgs) -> Result<ServerConfig, ConfigError> {
    let host_text = args.host.as_deref().unwrap_or(DEFAULT_HOST);
    let host = host_text
        .trim()
        .parse::<IpAddr>()
        .map_err(|_| ConfigError::InvalidHost(host_text.to_string()))?;

    let port = args.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(ConfigError::InvalidPort(port));
    }

    Ok(ServerConfig {
        host,
        port,
        log_level: args.log_level.unwrap_or_default(),
    })
}
