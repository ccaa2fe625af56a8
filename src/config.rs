use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    /// Brevo API key. Left empty, every submission fails with a
    /// configuration error, matching the original deployment behavior.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_recipient_email")]
    pub recipient_email: String,
    #[serde(default = "default_recipient_name")]
    pub recipient_name: String,
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    #[serde(default = "default_sender_email")]
    pub sender_email: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: default_api_base_url(),
            recipient_email: default_recipient_email(),
            recipient_name: default_recipient_name(),
            sender_name: default_sender_name(),
            sender_email: default_sender_email(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.brevo.com".to_string()
}

fn default_recipient_email() -> String {
    "contato@acordi.com.br".to_string()
}

fn default_recipient_name() -> String {
    "Escritório Contábil Acordi".to_string()
}

fn default_sender_name() -> String {
    "Website Acordi".to_string()
}

fn default_sender_email() -> String {
    "noreply@acordi.com.br".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_secs() -> u64 {
    3600
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy flat environment variables (BREVO_API_KEY, etc.)
    /// 2. Environment variables (ACORDI__SERVER__PORT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("ACORDI")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy environment variables used by the original deployment
        if let Ok(api_key) = env::var("BREVO_API_KEY") {
            builder = builder.set_override("email.api_key", api_key)?;
        }
        if let Ok(recipient) = env::var("RECIPIENT_EMAIL") {
            builder = builder.set_override("email.recipient_email", recipient)?;
        }
        if let Ok(origins) = env::var("ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
            builder = builder.set_override("cors.allowed_origins", origins)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.rate_limit.max_requests < 1 {
            return Err("Rate limit max_requests must be at least 1".to_string());
        }
        if self.rate_limit.window_secs < 1 {
            return Err("Rate limit window_secs must be at least 1".to_string());
        }
        if !self.email.recipient_email.contains('@') {
            return Err("Recipient email must be a valid address".to_string());
        }
        if !self.email.sender_email.contains('@') {
            return Err("Sender email must be a valid address".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            email: EmailConfig::default(),
            cors: CorsConfig::default(),
            rate_limit: RateLimitConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_max_requests() {
        let mut config = valid_config();
        config.rate_limit.max_requests = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_recipient() {
        let mut config = valid_config();
        config.email.recipient_email = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_match_original_deployment() {
        let config = valid_config();
        assert_eq!(config.email.recipient_email, "contato@acordi.com.br");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:5173".to_string()]
        );
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_secs, 3600);
    }
}
