//! Configuration types for agentnet.
//!
//! The service runs with built-in defaults. A TOML file is read only when
//! `AGENTNET_CONFIG` points at one; every key in it is optional.
//!
//! # Example
//! ```toml
//! [server]
//! host      = "0.0.0.0"
//! port      = 8000
//! log_level = "agentnet=debug,tower_http=info"
//! ```

use std::{
    ffi::OsString,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "AGENTNET_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).context("parsing config TOML")
    }

    /// Load from the file named by [`CONFIG_ENV`], or fall back to defaults
    /// when the variable is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_var(std::env::var_os(CONFIG_ENV))
    }

    fn from_var(value: Option<OsString>) -> anyhow::Result<Self> {
        match value {
            Some(path) => {
                let path = PathBuf::from(path);
                Self::load(&path)
                    .with_context(|| format!("failed to load config from {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// The socket address the server binds to.
    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .with_context(|| format!("invalid listen host `{}`", self.server.host))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

/// Listener and logging settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// IP address to bind (default: `0.0.0.0`).
    #[serde(default = "defaults::host")]
    pub host: String,

    /// TCP port to bind (default: 8000).
    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Log filter directive, used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            log_level: None,
        }
    }
}

mod defaults {
    pub fn host() -> String { "0.0.0.0".into() }
    pub fn port() -> u16 { 8000 }
}
