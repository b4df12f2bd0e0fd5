//! Process configuration, read from the environment.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which room id relayed frames are delivered to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RoutingPolicy {
    /// Use the room id carried in the frame, whether or not the sender joined it
    #[default]
    Payload,
    /// Only relay frames addressed to the room the sender is currently in
    Membership,
}

/// Relay behaviour knobs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayConfig {
    pub routing_policy: RoutingPolicy,
    /// Send `left` to the remaining members when a connection leaves a room
    pub announce_departures: bool,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
    pub relay: RelayConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    6001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            relay: RelayConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from `HOST`, `PORT`, `ROUTING_POLICY` and `ANNOUNCE_DEPARTURES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Load from an explicit variable map; unset keys fall back to defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = vars.get("HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = vars.get("PORT") {
            config.port = parse_value("PORT", port)?;
        }
        if let Some(policy) = vars.get("ROUTING_POLICY") {
            config.relay.routing_policy = parse_value("ROUTING_POLICY", policy)?;
        }
        if let Some(flag) = vars.get("ANNOUNCE_DEPARTURES") {
            config.relay.announce_departures = parse_flag("ANNOUNCE_DEPARTURES", flag)?;
        }

        Ok(config)
    }

    /// `host:port` as given to the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
