use std::env;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the decision-support service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub audit: AuditConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("CDSS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("CDSS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("CDSS_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("CDSS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_assessments = match env::var("CDSS_AUDIT_LOG") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                key: "CDSS_AUDIT_LOG",
                value: raw,
            })?,
            Err(_) => false,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            audit: AuditConfig { log_assessments },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Whether every computed verdict is written to the log.
///
/// Audit events carry the verdict and score only; patient identifiers and
/// lab values never reach the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditConfig {
    pub log_assessments: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CDSS_PORT must be a valid u16")]
    InvalidPort,
    #[error("CDSS_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{key} must be a boolean flag, got '{value}'")]
    InvalidFlag { key: &'static str, value: String },
}
