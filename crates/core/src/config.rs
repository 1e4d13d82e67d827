//! Service runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store and the
//! HTTP layer. Request handlers never read process environment variables.

use crate::{CoreError, CoreResult};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub const PORT_VAR: &str = "PORT";
pub const BIND_HOST_VAR: &str = "DIC_BIND_HOST";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const TLS_VERIFY_VAR: &str = "DATABASE_TLS_VERIFY";
pub const MAX_CONNECTIONS_VAR: &str = "DATABASE_MAX_CONNECTIONS";

/// Configuration for the HTTP service and its database pool.
#[derive(Clone)]
pub struct ServiceConfig {
    bind_host: String,
    port: u16,
    database_url: String,
    tls_verify: bool,
    max_connections: u32,
}

impl ServiceConfig {
    /// Create a new `ServiceConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` if the database url or bind host is blank, or if the
    /// pool size is zero.
    pub fn new(
        bind_host: String,
        port: u16,
        database_url: String,
        tls_verify: bool,
        max_connections: u32,
    ) -> CoreResult<Self> {
        if bind_host.trim().is_empty() {
            return Err(CoreError::InvalidConfig("bind host cannot be empty".into()));
        }
        if database_url.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "database url cannot be empty".into(),
            ));
        }
        if max_connections == 0 {
            return Err(CoreError::InvalidConfig(
                "max connections must be at least 1".into(),
            ));
        }

        Ok(Self {
            bind_host,
            port,
            database_url,
            tls_verify,
            max_connections,
        })
    }

    /// Resolve configuration from the process environment.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset. Only `DATABASE_URL` is required.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = get(DATABASE_URL_VAR).ok_or(CoreError::MissingVariable(DATABASE_URL_VAR))?;
        let bind_host = get(BIND_HOST_VAR).unwrap_or_else(|| DEFAULT_BIND_HOST.into());
        let port = parse_or(PORT_VAR, get(PORT_VAR), DEFAULT_PORT)?;
        let tls_verify = match get(TLS_VERIFY_VAR) {
            Some(value) => parse_flag(TLS_VERIFY_VAR, &value)?,
            None => true,
        };
        let max_connections =
            parse_or(MAX_CONNECTIONS_VAR, get(MAX_CONNECTIONS_VAR), DEFAULT_MAX_CONNECTIONS)?;

        Self::new(bind_host, port, database_url, tls_verify, max_connections)
    }

    pub fn bind_host(&self) -> &str {
        &self.bind_host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port` suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Whether the database server certificate must be verified.
    pub fn tls_verify(&self) -> bool {
        self.tls_verify
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The url carries the database password.
        f.debug_struct("ServiceConfig")
            .field("bind_host", &self.bind_host)
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("tls_verify", &self.tls_verify)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> CoreResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|e| CoreError::InvalidConfig(format!("{key}={raw}: {e}"))),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, value: &str) -> CoreResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CoreError::InvalidConfig(format!(
            "{key}={other}: expected true or false"
        ))),
    }
}
