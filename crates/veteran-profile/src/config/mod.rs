use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub personalization: PersonalizationConfig,
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
            personalization: PersonalizationConfig::from_env()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Classification vocabulary, discount schedule, and session limits.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalizationConfig {
    pub vocabulary_path: Option<PathBuf>,
    pub discounts: DiscountPolicy,
    pub session_capacity: usize,
}

impl Default for PersonalizationConfig {
    fn default() -> Self {
        Self {
            vocabulary_path: None,
            discounts: DiscountPolicy::default(),
            session_capacity: DEFAULT_SESSION_CAPACITY,
        }
    }
}

const DEFAULT_SESSION_CAPACITY: usize = 10_000;

impl PersonalizationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = DiscountPolicy::default();
        let discounts = DiscountPolicy {
            max_percentage: percentage_var("VETERAN_MAX_DISCOUNT", defaults.max_percentage)?,
            base_percentage: percentage_var("VETERAN_BASE_DISCOUNT", defaults.base_percentage)?,
            combat_bonus: percentage_var("VETERAN_COMBAT_BONUS", defaults.combat_bonus)?,
            disabled_bonus: percentage_var("VETERAN_DISABLED_BONUS", defaults.disabled_bonus)?,
            ..defaults
        };
        if discounts.base_percentage > discounts.max_percentage {
            return Err(ConfigError::InvalidPercentage {
                var: "VETERAN_BASE_DISCOUNT",
            });
        }

        let session_capacity = match env::var("SESSION_CAPACITY") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|capacity| *capacity > 0)
                .ok_or(ConfigError::InvalidCapacity)?,
            Err(_) => DEFAULT_SESSION_CAPACITY,
        };

        let vocabulary_path = env::var("VETERAN_VOCABULARY_PATH")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            vocabulary_path,
            discounts,
            session_capacity,
        })
    }
}

fn percentage_var(var: &'static str, default: u8) -> Result<u8, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|value| *value <= 100)
            .ok_or(ConfigError::InvalidPercentage { var }),
        Err(_) => Ok(default),
    }
}

/// Percentages and caps for veteran pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountPolicy {
    pub base_percentage: u8,
    pub combat_bonus: u8,
    pub disabled_bonus: u8,
    pub era_bonus: u8,
    pub family_percentage: u8,
    pub max_percentage: u8,
    pub emergency_percentage: u8,
    pub emergency_max_savings: u64,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            base_percentage: 8,
            combat_bonus: 4,
            disabled_bonus: 3,
            era_bonus: 2,
            family_percentage: 5,
            max_percentage: 15,
            emergency_percentage: 10,
            emergency_max_savings: 5_000,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPercentage { var: &'static str },
    InvalidCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPercentage { var } => {
                write!(f, "{var} must be a percentage between 0 and 100 within the discount cap")
            }
            ConfigError::InvalidCapacity => {
                write!(f, "SESSION_CAPACITY must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPercentage { .. }
            | ConfigError::InvalidCapacity => None,
        }
    }
}

/// Serializes every test in the crate that mutates process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock, PoisonError};

    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
