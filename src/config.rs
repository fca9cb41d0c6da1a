// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `INTMAX_ENVIRONMENT` | `mainnet` or `testnet` | `testnet` |
//! | `L1_RPC_URL` | Ethereum L1 RPC endpoint | Required |
//! | `INTMAX_SERVICE_URL` | INTMAX wallet service base URL | Required |
//! | `INTMAX_TIMEOUT_SECS` | Timeout for wallet service calls | `60` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `TLS_CERT_PATH` | PEM certificate chain; enables HTTPS with `TLS_KEY_PATH` | Optional |
//! | `TLS_KEY_PATH` | PEM private key | Optional |
//! | `ENABLE_DOCS` | Serve Swagger UI at `/docs` | `false` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use url::Url;

use crate::wallet::{Environment, NetworkConfig};

pub const ENVIRONMENT_ENV: &str = "INTMAX_ENVIRONMENT";
pub const L1_RPC_URL_ENV: &str = "L1_RPC_URL";
pub const SERVICE_URL_ENV: &str = "INTMAX_SERVICE_URL";
pub const TIMEOUT_ENV: &str = "INTMAX_TIMEOUT_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TLS_CERT_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_ENV: &str = "TLS_KEY_PATH";
pub const ENABLE_DOCS_ENV: &str = "ENABLE_DOCS";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// PEM files for HTTPS.
#[derive(Debug, Clone, PartialEq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub network: NetworkConfig,
    pub service_url: Url,
    pub service_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub tls: Option<TlsPaths>,
    pub enable_docs: bool,
}

impl GatewayConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let environment = match var(ENVIRONMENT_ENV) {
            Some(raw) => raw.parse::<Environment>().map_err(|reason| ConfigError::Invalid {
                name: ENVIRONMENT_ENV,
                reason,
            })?,
            None => Environment::Testnet,
        };

        let l1_rpc_url = parse_url(L1_RPC_URL_ENV, var(L1_RPC_URL_ENV))?;
        let service_url = parse_url(SERVICE_URL_ENV, var(SERVICE_URL_ENV))?;

        let timeout_secs = match var(TIMEOUT_ENV) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: TIMEOUT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let host = var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var(PORT_ENV) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let tls = match (var(TLS_CERT_ENV), var(TLS_KEY_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(TLS_KEY_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(TLS_CERT_ENV)),
        };

        let enable_docs = var(ENABLE_DOCS_ENV)
            .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            network: NetworkConfig {
                environment,
                l1_rpc_url,
            },
            service_url,
            service_timeout: Duration::from_secs(timeout_secs),
            bind_addr,
            tls,
            enable_docs,
        })
    }
}

fn parse_url(name: &'static str, raw: Option<String>) -> Result<Url, ConfigError> {
    let raw = raw.ok_or(ConfigError::Missing(name))?;
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            name,
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<GatewayConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GatewayConfig::from_lookup(|name| vars.get(name).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        (L1_RPC_URL_ENV, "https://sepolia.example/rpc"),
        (SERVICE_URL_ENV, "https://wallet.example/"),
    ];

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.network.environment, Environment::Testnet);
        assert_eq!(config.network.l1_rpc_url.as_str(), "https://sepolia.example/rpc");
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.service_timeout, Duration::from_secs(60));
        assert!(config.tls.is_none());
        assert!(!config.enable_docs);
    }

    #[test]
    fn overrides_are_honored() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            (ENVIRONMENT_ENV, "mainnet"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "8443"),
            (TIMEOUT_ENV, "5"),
            (TLS_CERT_ENV, "/tls/cert.pem"),
            (TLS_KEY_ENV, "/tls/key.pem"),
            (ENABLE_DOCS_ENV, "true"),
        ]);
        let config = load(&vars).unwrap();

        assert_eq!(config.network.environment, Environment::Mainnet);
        assert_eq!(config.bind_addr, "127.0.0.1:8443".parse().unwrap());
        assert_eq!(config.service_timeout, Duration::from_secs(5));
        assert_eq!(
            config.tls,
            Some(TlsPaths {
                cert: "/tls/cert.pem".into(),
                key: "/tls/key.pem".into(),
            })
        );
        assert!(config.enable_docs);
    }

    #[test]
    fn missing_rpc_url_is_an_error() {
        let err = load(&[(SERVICE_URL_ENV, "https://wallet.example/")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(L1_RPC_URL_ENV)));
        assert_eq!(err.to_string(), "L1_RPC_URL must be set");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push((PORT_ENV, "not-a-port"));
        assert!(matches!(
            load(&vars),
            Err(ConfigError::Invalid { name: PORT_ENV, .. })
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push((ENVIRONMENT_ENV, "devnet"));
        assert!(matches!(
            load(&vars),
            Err(ConfigError::Invalid { name: ENVIRONMENT_ENV, .. })
        ));

        assert!(matches!(
            load(&[
                (L1_RPC_URL_ENV, "ws://sepolia.example"),
                (SERVICE_URL_ENV, "https://wallet.example/"),
            ]),
            Err(ConfigError::Invalid { name: L1_RPC_URL_ENV, .. })
        ));
    }

    #[test]
    fn half_configured_tls_is_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push((TLS_CERT_ENV, "/tls/cert.pem"));
        assert!(matches!(load(&vars), Err(ConfigError::Missing(TLS_KEY_ENV))));
    }
}
