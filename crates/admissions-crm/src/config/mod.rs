use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::admissions::{TransitionPolicyKind, UnknownStagePolicy};

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
    pub admissions: AdmissionsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let unknown_stage = env::var("ADMISSIONS_UNKNOWN_STAGE")
            .unwrap_or_else(|_| "reject".to_string());
        let unknown_stage = UnknownStagePolicy::parse(&unknown_stage)
            .ok_or(ConfigError::InvalidUnknownStagePolicy(unknown_stage))?;

        let transitions =
            env::var("ADMISSIONS_TRANSITIONS").unwrap_or_else(|_| "any".to_string());
        let transitions = TransitionPolicyKind::parse(&transitions)
            .ok_or(ConfigError::InvalidTransitionPolicy(transitions))?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            admissions: AdmissionsConfig {
                unknown_stage,
                transitions,
            },
        })
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

/// Policies applied by the admission stage workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdmissionsConfig {
    pub unknown_stage: UnknownStagePolicy,
    pub transitions: TransitionPolicyKind,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidUnknownStagePolicy(String),
    InvalidTransitionPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUnknownStagePolicy(value) => write!(
                f,
                "ADMISSIONS_UNKNOWN_STAGE must be 'reject' or 'fallback' (got '{}')",
                value
            ),
            ConfigError::InvalidTransitionPolicy(value) => write!(
                f,
                "ADMISSIONS_TRANSITIONS must be 'any' or 'forward' (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidUnknownStagePolicy(_)
            | ConfigError::InvalidTransitionPolicy(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("ADMISSIONS_UNKNOWN_STAGE");
        env::remove_var("ADMISSIONS_TRANSITIONS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.admissions.unknown_stage, UnknownStagePolicy::Reject);
        assert_eq!(config.admissions.transitions, TransitionPolicyKind::AnyToAny);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_admissions_policies() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ADMISSIONS_UNKNOWN_STAGE", "Fallback");
        env::set_var("ADMISSIONS_TRANSITIONS", "forward");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.admissions.unknown_stage,
            UnknownStagePolicy::FallbackToFirst
        );
        assert_eq!(config.admissions.transitions, TransitionPolicyKind::Forward);
        reset_env();
    }

    #[test]
    fn rejects_unknown_transition_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ADMISSIONS_TRANSITIONS", "sideways");
        match AppConfig::load() {
            Err(ConfigError::InvalidTransitionPolicy(value)) => assert_eq!(value, "sideways"),
            other => panic!("expected invalid transition policy, got {other:?}"),
        }
        reset_env();
    }
}
