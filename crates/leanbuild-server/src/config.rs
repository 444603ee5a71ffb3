//! Server configuration, read from the environment.

use leanbuild::{DbResult, ProxyConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to (`LEANBUILD_BIND_ADDR`).
    pub bind_addr: String,
    /// Database proxy connection settings.
    pub proxy: ProxyConfig,
}

impl ServerConfig {
    pub fn from_env() -> DbResult<Self> {
        let bind_addr = std::env::var("LEANBUILD_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        Ok(Self {
            bind_addr,
            proxy: ProxyConfig::from_env()?,
        })
    }
}
