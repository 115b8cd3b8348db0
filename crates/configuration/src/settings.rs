use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// The interface to bind, as an IP address (e.g., "0.0.0.0").
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl ServerSettings {
    /// Resolves the configured host and port into a socket address.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::Validation(format!("'{}' is not a valid listen host", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_resolves_host_and_port() {
        let server = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 9090,
        };
        assert_eq!(server.addr().unwrap(), "127.0.0.1:9090".parse().unwrap());
    }

    #[test]
    fn addr_rejects_a_non_ip_host() {
        let server = ServerSettings {
            host: "not-an-ip".to_string(),
            port: 9090,
        };
        assert!(matches!(server.addr(), Err(ConfigError::Validation(_))));
    }
}
