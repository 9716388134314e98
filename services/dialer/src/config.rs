use ringout_core::telephony::TwilioConfig;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Public host the provider streams connected calls to, without scheme.
    pub base_url: String,
    pub twilio: TwilioConfig,
    pub twilio_api_base: Option<String>,
    pub twilio_lookups_base: Option<String>,
    /// Caller id used when `--from` is not given.
    pub from_phone: Option<String>,
    pub sessions_dir: PathBuf,
    pub log_level: Level,
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let base_url = required_var("BASE_URL")?;
        let account_sid = required_var("TWILIO_ACCOUNT_SID")?;
        let auth_token = required_var("TWILIO_AUTH_TOKEN")?;

        let record_str = std::env::var("TWILIO_RECORD").unwrap_or_else(|_| "false".to_string());
        let record = record_str.to_lowercase().parse::<bool>().map_err(|_| {
            ConfigError::InvalidValue(
                "TWILIO_RECORD".to_string(),
                format!("'{}' is not 'true' or 'false'", record_str),
            )
        })?;

        let twilio_api_base = std::env::var("TWILIO_API_BASE").ok();
        let twilio_lookups_base = std::env::var("TWILIO_LOOKUPS_BASE").ok();
        let from_phone = std::env::var("FROM_PHONE").ok();

        let sessions_dir = std::env::var("SESSIONS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./sessions"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            base_url,
            twilio: TwilioConfig::new(account_sid, auth_token).with_record(record),
            twilio_api_base,
            twilio_lookups_base,
            from_phone,
            sessions_dir,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("BASE_URL");
            env::remove_var("TWILIO_ACCOUNT_SID");
            env::remove_var("TWILIO_AUTH_TOKEN");
            env::remove_var("TWILIO_RECORD");
            env::remove_var("TWILIO_API_BASE");
            env::remove_var("TWILIO_LOOKUPS_BASE");
            env::remove_var("FROM_PHONE");
            env::remove_var("SESSIONS_DIR");
            env::remove_var("RUST_LOG");
        }
    }

    fn set_minimal_env() {
        unsafe {
            env::set_var("BASE_URL", "calls.example.com");
            env::set_var("TWILIO_ACCOUNT_SID", "AC123");
            env::set_var("TWILIO_AUTH_TOKEN", "test-token");
        }
    }

    #[test]
    fn test_config_error_display() {
        let missing_var = ConfigError::MissingVar("TEST_VAR".to_string());
        assert_eq!(
            format!("{}", missing_var),
            "Missing environment variable: TEST_VAR"
        );

        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_minimal() {
        clear_env_vars();
        set_minimal_env();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.base_url, "calls.example.com");
        assert_eq!(config.twilio, TwilioConfig::new("AC123", "test-token"));
        assert!(!config.twilio.record);
        assert_eq!(config.twilio_api_base, None);
        assert_eq!(config.twilio_lookups_base, None);
        assert_eq!(config.from_phone, None);
        assert_eq!(config.sessions_dir, PathBuf::from("./sessions"));
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        set_minimal_env();
        unsafe {
            env::set_var("TWILIO_RECORD", "TRUE");
            env::set_var("TWILIO_API_BASE", "http://127.0.0.1:9000");
            env::set_var("TWILIO_LOOKUPS_BASE", "http://127.0.0.1:9001");
            env::set_var("FROM_PHONE", "+15550001111");
            env::set_var("SESSIONS_DIR", "/var/lib/ringout");
            env::set_var("RUST_LOG", "debug");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert!(config.twilio.record);
        assert_eq!(
            config.twilio_api_base.as_deref(),
            Some("http://127.0.0.1:9000")
        );
        assert_eq!(
            config.twilio_lookups_base.as_deref(),
            Some("http://127.0.0.1:9001")
        );
        assert_eq!(config.from_phone.as_deref(), Some("+15550001111"));
        assert_eq!(config.sessions_dir, PathBuf::from("/var/lib/ringout"));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    #[serial]
    fn test_config_missing_credentials() {
        clear_env_vars();
        unsafe {
            env::set_var("BASE_URL", "calls.example.com");
            env::set_var("TWILIO_ACCOUNT_SID", "AC123");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::MissingVar(var) => assert_eq!(var, "TWILIO_AUTH_TOKEN"),
            _ => panic!("Expected MissingVar for TWILIO_AUTH_TOKEN"),
        }
    }

    #[test]
    #[serial]
    fn test_config_missing_base_url() {
        clear_env_vars();
        unsafe {
            env::set_var("TWILIO_ACCOUNT_SID", "AC123");
            env::set_var("TWILIO_AUTH_TOKEN", "test-token");
        }

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(var) if var == "BASE_URL"));
    }

    #[test]
    #[serial]
    fn test_config_invalid_record_flag() {
        clear_env_vars();
        set_minimal_env();
        unsafe {
            env::set_var("TWILIO_RECORD", "sometimes");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "TWILIO_RECORD"),
            _ => panic!("Expected InvalidValue for TWILIO_RECORD"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        set_minimal_env();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
            _ => panic!("Expected InvalidValue for RUST_LOG"),
        }
    }
}
