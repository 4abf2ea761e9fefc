use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::matching::{GeoPoint, NormalizationConfig};

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
    pub scoring: ScoringConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig::from_env()?,
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

/// Normalization constants plus the optional campus anchor used to derive commute distances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringConfig {
    pub normalization: NormalizationConfig,
    pub campus: Option<GeoPoint>,
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = NormalizationConfig::default();
        let normalization = NormalizationConfig {
            baseline_price: number_or("MATCH_BASELINE_PRICE", defaults.baseline_price)?,
            price_scale: number_or("MATCH_PRICE_SCALE", defaults.price_scale)?,
            distance_penalty_per_mile: number_or(
                "MATCH_DISTANCE_PENALTY_PER_MILE",
                defaults.distance_penalty_per_mile,
            )?,
        };

        let campus = match (
            optional_number("MATCH_CAMPUS_LAT")?,
            optional_number("MATCH_CAMPUS_LNG")?,
        ) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteCampus),
        };

        Ok(Self {
            normalization,
            campus,
        })
    }
}

fn optional_number(key: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Some)
            .ok_or(ConfigError::InvalidNumber { key }),
        Err(_) => Ok(None),
    }
}

fn number_or(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    Ok(optional_number(key)?.unwrap_or(default))
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
    IncompleteCampus,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a finite number"),
            ConfigError::IncompleteCampus => write!(
                f,
                "MATCH_CAMPUS_LAT and MATCH_CAMPUS_LNG must be set together"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::IncompleteCampus => None,
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
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "MATCH_BASELINE_PRICE",
            "MATCH_PRICE_SCALE",
            "MATCH_DISTANCE_PENALTY_PER_MILE",
            "MATCH_CAMPUS_LAT",
            "MATCH_CAMPUS_LNG",
        ] {
            env::remove_var(key);
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
        assert_eq!(config.scoring, ScoringConfig::default());
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
    fn reads_normalization_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MATCH_BASELINE_PRICE", "650");
        env::set_var("MATCH_DISTANCE_PENALTY_PER_MILE", "12.5");
        env::set_var("MATCH_CAMPUS_LAT", "41.6611");
        env::set_var("MATCH_CAMPUS_LNG", "-91.5302");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.scoring.normalization.baseline_price, 650.0);
        assert_eq!(config.scoring.normalization.price_scale, 10.0);
        assert_eq!(config.scoring.normalization.distance_penalty_per_mile, 12.5);
        assert_eq!(
            config.scoring.campus,
            Some(GeoPoint {
                latitude: 41.6611,
                longitude: -91.5302,
            })
        );
        reset_env();
    }

    #[test]
    fn rejects_half_configured_campus() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MATCH_CAMPUS_LAT", "41.6611");

        let err = AppConfig::load().expect_err("campus needs both coordinates");
        assert!(matches!(err, ConfigError::IncompleteCampus));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_scale() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MATCH_PRICE_SCALE", "ten");

        let err = AppConfig::load().expect_err("scale must be numeric");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                key: "MATCH_PRICE_SCALE"
            }
        ));
        reset_env();
    }
}
