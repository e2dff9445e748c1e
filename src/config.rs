use crate::constants::{DEFAULT_ALLOWED_ORIGINS, DEFAULT_WILDCARD_DOMAIN};
use crate::error::ConfigurationError;
use crate::gatekeeper::Gatekeeper;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Exposes the `/cors-config` diagnostics route and the policy in `/health`.
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Companion server settings, read from flags or the environment.
#[derive(Clone, Debug, Parser)]
#[command(name = "gatekeeper-server", version, about = "CORS-gated demo API server")]
pub struct ServerConfig {
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long = "bind", env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind_addr: IpAddr,

    #[arg(long = "env", env = "APP_ENV", value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,

    /// Extra exact-match origins trusted in addition to the built-in list.
    #[arg(long = "allowed-origin", env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Domain whose https subdomains are trusted.
    #[arg(long, env = "WILDCARD_DOMAIN", default_value = DEFAULT_WILDCARD_DOMAIN)]
    pub wildcard_domain: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            environment: Environment::default(),
            allowed_origins: Vec::new(),
            wildcard_domain: DEFAULT_WILDCARD_DOMAIN.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Built-in origins followed by configured extras; extras repeating a
    /// built-in entry are dropped.
    pub fn seed_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|origin| origin.to_string())
            .collect();
        for extra in &self.allowed_origins {
            let extra = extra.trim();
            if !origins.iter().any(|existing| existing == extra) {
                origins.push(extra.to_string());
            }
        }
        origins
    }

    pub fn build_gatekeeper(&self) -> Result<Gatekeeper, ConfigurationError> {
        Gatekeeper::with_origins(self.seed_origins(), &self.wildcard_domain)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
