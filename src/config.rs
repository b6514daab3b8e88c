use std::env;
use std::str::FromStr;

use crate::blockchain::{ADVANCE_INTERVAL_SECS, DEFAULT_RATE_DIV};
use crate::error::MinerError;

/// Diagnostic verbosity. Never changes behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Minimal,
    Debug,
}

impl LogMode {
    /// Default `env_logger` filter for this mode.
    pub fn filter(&self) -> &'static str {
        match self {
            LogMode::Minimal => "info",
            LogMode::Debug => "debug",
        }
    }
}

impl FromStr for LogMode {
    type Err = MinerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(LogMode::Minimal),
            "debug" => Ok(LogMode::Debug),
            other => Err(MinerError::InvalidConfig(format!(
                "LOG_MODE must be minimal or debug, got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rate_div: u64,
    pub log_mode: LogMode,
    pub advance_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8545,
            rate_div: DEFAULT_RATE_DIV,
            log_mode: LogMode::Minimal,
            advance_interval_secs: ADVANCE_INTERVAL_SECS,
        }
    }
}

impl Config {
    /// Read settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, MinerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MinerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(host) = lookup("HOST") {
            cfg.host = host;
        }
        if let Some(port) = lookup("PORT") {
            cfg.port = parse_number("PORT", &port)?;
        }
        if let Some(rate_div) = lookup("RATE_DIV") {
            cfg.rate_div = parse_positive("RATE_DIV", &rate_div)?;
        }
        if let Some(mode) = lookup("LOG_MODE") {
            cfg.log_mode = mode.parse()?;
        }
        if let Some(secs) = lookup("ADVANCE_INTERVAL_SECS") {
            cfg.advance_interval_secs = parse_positive("ADVANCE_INTERVAL_SECS", &secs)?;
        }
        Ok(cfg)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, MinerError> {
    value
        .trim()
        .parse()
        .map_err(|_| MinerError::InvalidConfig(format!("{key} is not a valid number: {value:?}")))
}

fn parse_positive(key: &str, value: &str) -> Result<u64, MinerError> {
    match parse_number::<u64>(key, value)? {
        0 => Err(MinerError::InvalidConfig(format!("{key} must be positive"))),
        n => Ok(n),
    }
}
