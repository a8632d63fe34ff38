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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so tests can avoid the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment =
            AppEnvironment::from_str(&lookup("FORMS_ENV").unwrap_or_else(|| "development".into()));

        let host = lookup("FORMS_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("FORMS_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = lookup("FORMS_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let organization = lookup("FORMS_ORGANIZATION")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let pretty = match lookup("FORMS_REPORT_PRETTY") {
            Some(raw) => parse_flag("FORMS_REPORT_PRETTY", &raw)?,
            None => true,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            report: ReportConfig {
                organization,
                pretty,
            },
        })
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: raw.to_string(),
        }),
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

/// Export behavior for submission reports.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Replaces the detected organization name in exported reports.
    pub organization: Option<String>,
    pub pretty: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("FORMS_PORT must be a valid u16")]
    InvalidPort,
    #[error("FORMS_HOST must be an IP address or 'localhost': {source}")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{key} must be a boolean flag, found '{value}'")]
    InvalidFlag { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| values.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = load(&[]).expect("defaults load");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.report.pretty);
        assert!(config.report.organization.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("FORMS_ENV", "prod"),
            ("FORMS_PORT", "8080"),
            ("FORMS_ORGANIZATION", "  Harbour Youth Network "),
            ("FORMS_REPORT_PRETTY", "off"),
        ])
        .expect("overrides load");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.report.organization.as_deref(),
            Some("Harbour Youth Network")
        );
        assert!(!config.report.pretty);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("FORMS_PORT", "ninety")]),
            Err(ConfigError::InvalidPort)
        ));
        assert!(matches!(
            load(&[("FORMS_REPORT_PRETTY", "maybe")]),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }

    #[test]
    fn localhost_resolves_to_loopback() {
        let server = ServerConfig {
            host: "LOCALHOST".to_string(),
            port: 4000,
        };
        let addr = server.socket_addr().expect("loopback");
        assert_eq!(addr.to_string(), "127.0.0.1:4000");

        let invalid = ServerConfig {
            host: "not-an-ip".to_string(),
            port: 4000,
        };
        assert!(invalid.socket_addr().is_err());
    }
}
