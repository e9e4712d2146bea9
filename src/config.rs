/// Configuration management for the WeColor backend
use crate::error::{ApiError, ApiResult};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub ledger: LedgerConfig,
    pub snapshot: SnapshotConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_directory: PathBuf,
    pub selections_db: PathBuf,
}

/// Ledger gateway configuration
///
/// When `gateway_url` is unset the service runs against an in-process
/// ledger, which is only suitable for local development.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub gateway_url: Option<String>,
    pub api_token: Option<String>,
    /// Per-request timeout for gateway calls, in seconds
    pub request_timeout_secs: u64,
    /// Upper bound on the write-and-confirm wait, in seconds.
    /// Elapsing means "outcome unknown", not failure.
    pub confirmation_timeout_secs: u64,
}

/// Daily snapshot schedule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Local wall-clock time at which the daily snapshot fires
    pub trigger_time: NaiveTime,
    /// Fixed UTC offset defining the service's local calendar day
    pub utc_offset_hours: i32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ApiResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("WECOLOR_HOSTNAME").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("WECOLOR_PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()
            .map_err(|_| ApiError::Validation("Invalid port number".to_string()))?;

        let data_directory: PathBuf = env::var("WECOLOR_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();
        let selections_db = env::var("WECOLOR_DB_LOCATION")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("selections.sqlite"));

        let gateway_url = env::var("WECOLOR_LEDGER_URL").ok();
        let api_token = env::var("WECOLOR_LEDGER_API_TOKEN").ok();
        let request_timeout_secs = env::var("WECOLOR_LEDGER_REQUEST_TIMEOUT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let confirmation_timeout_secs = env::var("WECOLOR_CONFIRMATION_TIMEOUT")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .unwrap_or(120);

        let trigger_time = env::var("WECOLOR_SNAPSHOT_TIME")
            .unwrap_or_else(|_| "23:59".to_string());
        let trigger_time = NaiveTime::parse_from_str(&trigger_time, "%H:%M").map_err(|_| {
            ApiError::Validation(format!(
                "Invalid snapshot trigger time: {} (expected HH:MM)",
                trigger_time
            ))
        })?;
        let utc_offset_hours = env::var("WECOLOR_UTC_OFFSET_HOURS")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .map_err(|_| ApiError::Validation("Invalid UTC offset".to_string()))?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(ServerConfig {
            service: ServiceConfig { hostname, port },
            storage: StorageConfig {
                data_directory,
                selections_db,
            },
            ledger: LedgerConfig {
                gateway_url,
                api_token,
                request_timeout_secs,
                confirmation_timeout_secs,
            },
            snapshot: SnapshotConfig {
                trigger_time,
                utc_offset_hours,
            },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.service.hostname.is_empty() {
            return Err(ApiError::Validation("Hostname cannot be empty".to_string()));
        }

        if !(-12..=14).contains(&self.snapshot.utc_offset_hours) {
            return Err(ApiError::Validation(
                "UTC offset must be between -12 and +14 hours".to_string(),
            ));
        }

        if let Some(url) = &self.ledger.gateway_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::Validation(format!(
                    "Ledger gateway URL must be http(s): {}",
                    url
                )));
            }
        }

        if self.ledger.confirmation_timeout_secs == 0 {
            return Err(ApiError::Validation(
                "Confirmation timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            service: ServiceConfig {
                hostname: "localhost".to_string(),
                port: 3001,
            },
            storage: StorageConfig {
                data_directory: "./data".into(),
                selections_db: "./data/selections.sqlite".into(),
            },
            ledger: LedgerConfig {
                gateway_url: None,
                api_token: None,
                request_timeout_secs: 10,
                confirmation_timeout_secs: 120,
            },
            snapshot: SnapshotConfig {
                trigger_time: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
                utc_offset_hours: 0,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_utc_offset() {
        let mut config = test_config();
        config.snapshot.utc_offset_hours = 15;
        assert!(config.validate().is_err());

        config.snapshot.utc_offset_hours = -13;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_gateway_url() {
        let mut config = test_config();
        config.ledger.gateway_url = Some("ftp://ledger.example".to_string());
        assert!(config.validate().is_err());

        config.ledger.gateway_url = Some("https://ledger.example".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trigger_time_parses_from_hh_mm() {
        let parsed = NaiveTime::parse_from_str("23:59", "%H:%M").unwrap();
        assert_eq!(parsed, NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert!(NaiveTime::parse_from_str("25:00", "%H:%M").is_err());
    }
}
