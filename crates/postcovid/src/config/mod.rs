use crate::assessment::RegionPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_GENERATION_LATENCY_MS: u64 = 1500;
const DEFAULT_LOGIN_LATENCY_MS: u64 = 1000;

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
    pub assessment: AssessmentSettings,
    pub session: SessionSettings,
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

        let region_policy = match env::var("APP_REGION_POLICY") {
            Ok(raw) => RegionPolicy::parse(&raw).ok_or(ConfigError::InvalidRegionPolicy(raw))?,
            Err(_) => RegionPolicy::default(),
        };

        let generation_latency =
            latency_from_env("APP_GENERATION_LATENCY_MS", DEFAULT_GENERATION_LATENCY_MS)?;
        let login_latency = latency_from_env("APP_LOGIN_LATENCY_MS", DEFAULT_LOGIN_LATENCY_MS)?;

        let export_dir = env::var("APP_EXPORT_DIR").unwrap_or_else(|_| ".".to_string());
        let session_dir = env::var("APP_SESSION_DIR").unwrap_or_else(|_| ".postcovid".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            assessment: AssessmentSettings {
                region_policy,
                generation_latency,
                export_dir: PathBuf::from(export_dir),
            },
            session: SessionSettings {
                login_latency,
                store_dir: PathBuf::from(session_dir),
            },
        })
    }
}

fn latency_from_env(var: &'static str, default_ms: u64) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidLatency { var }),
        Err(_) => Ok(Duration::from_millis(default_ms)),
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

/// Knobs for assessment generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentSettings {
    pub region_policy: RegionPolicy,
    /// Artificial delay applied before results are computed.
    pub generation_latency: Duration,
    pub export_dir: PathBuf,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            region_policy: RegionPolicy::default(),
            generation_latency: Duration::from_millis(DEFAULT_GENERATION_LATENCY_MS),
            export_dir: PathBuf::from("."),
        }
    }
}

/// Mock login and local session storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub login_latency: Duration,
    pub store_dir: PathBuf,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            login_latency: Duration::from_millis(DEFAULT_LOGIN_LATENCY_MS),
            store_dir: PathBuf::from(".postcovid"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRegionPolicy(String),
    InvalidLatency { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRegionPolicy(value) => write!(
                f,
                "APP_REGION_POLICY '{value}' must be 'postcode-only' or 'postcode-or-place'"
            ),
            ConfigError::InvalidLatency { var } => {
                write!(f, "{var} must be a whole number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRegionPolicy(_)
            | ConfigError::InvalidLatency { .. } => None,
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
        for var in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_REGION_POLICY",
            "APP_GENERATION_LATENCY_MS",
            "APP_LOGIN_LATENCY_MS",
            "APP_EXPORT_DIR",
            "APP_SESSION_DIR",
        ] {
            env::remove_var(var);
        }
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
        assert_eq!(config.assessment.region_policy, RegionPolicy::PostcodeOnly);
        assert_eq!(
            config.assessment.generation_latency,
            Duration::from_millis(1500)
        );
        assert_eq!(config.session.login_latency, Duration::from_millis(1000));
        assert_eq!(config.session.store_dir, PathBuf::from(".postcovid"));
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
    fn reads_region_policy_and_latency_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_REGION_POLICY", "postcode-or-place");
        env::set_var("APP_GENERATION_LATENCY_MS", "0");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.assessment.region_policy,
            RegionPolicy::PostcodeOrPlaceName
        );
        assert_eq!(config.assessment.generation_latency, Duration::ZERO);
        reset_env();
    }

    #[test]
    fn rejects_unknown_region_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_REGION_POLICY", "everywhere");
        match AppConfig::load() {
            Err(ConfigError::InvalidRegionPolicy(value)) => assert_eq!(value, "everywhere"),
            other => panic!("expected region policy error, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_latency() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOGIN_LATENCY_MS", "soon");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidLatency {
                var: "APP_LOGIN_LATENCY_MS"
            })
        ));
        reset_env();
    }
}
