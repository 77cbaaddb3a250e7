//! Configuration management for the `NavMind` application
//!
//! Handles loading configuration from files, environment variables and `.env`
//! secrets, and validates every setting once at startup.

use crate::NavMindError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Root configuration structure for the `NavMind` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavMindConfig {
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// External service endpoints
    #[serde(default)]
    pub services: ServicesConfig,
    /// API secrets
    #[serde(default)]
    pub keys: KeysConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Trip planning settings
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for a whole `/api/plan` request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Base URLs of the external services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    #[serde(default = "default_encyclopedia_url")]
    pub encyclopedia_url: String,
    #[serde(default = "default_flights_url")]
    pub flights_url: String,
    #[serde(default = "default_inference_url")]
    pub inference_url: String,
    /// Hosted model used for itinerary refinement
    #[serde(default = "default_inference_model")]
    pub inference_model: String,
}

/// API secrets. `Debug` never prints the values.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct KeysConfig {
    #[serde(default)]
    pub locationiq: String,
    #[serde(default)]
    pub aviationstack: String,
    #[serde(default)]
    pub huggingface: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Trip planning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
    #[serde(default = "default_flight_limit")]
    pub flight_limit: u8,
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: u8,
    /// Currency label for budget and hotel prices
    #[serde(default = "default_currency")]
    pub currency: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_request_timeout() -> u32 {
    120
}

fn default_body_limit() -> usize {
    64 * 1024
}

fn default_http_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("NavMind/{}", crate::VERSION)
}

fn default_geocoding_url() -> String {
    "https://us1.locationiq.com".to_string()
}

fn default_weather_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_encyclopedia_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_flights_url() -> String {
    "http://api.aviationstack.com".to_string()
}

fn default_inference_url() -> String {
    "https://router.huggingface.co/hf-inference".to_string()
}

fn default_inference_model() -> String {
    "mistralai/Mistral-7B-Instruct".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_forecast_days() -> u8 {
    7
}

fn default_flight_limit() -> u8 {
    3
}

fn default_summary_sentences() -> u8 {
    3
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            weather_url: default_weather_url(),
            encyclopedia_url: default_encyclopedia_url(),
            flights_url: default_flights_url(),
            inference_url: default_inference_url(),
            inference_model: default_inference_model(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            forecast_days: default_forecast_days(),
            flight_limit: default_flight_limit(),
            summary_sentences: default_summary_sentences(),
            currency: default_currency(),
        }
    }
}

impl fmt::Debug for KeysConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.trim().is_empty() { "<unset>" } else { "<redacted>" }
        }
        f.debug_struct("KeysConfig")
            .field("locationiq", &redact(&self.locationiq))
            .field("aviationstack", &redact(&self.aviationstack))
            .field("huggingface", &redact(&self.huggingface))
            .finish()
    }
}

impl KeysConfig {
    /// Environment variables conventionally used for the three secrets
    pub const LOCATIONIQ_ENV: &'static str = "LOCATIONIQ_API_KEY";
    pub const AVIATIONSTACK_ENV: &'static str = "AVIATIONSTACK_API_KEY";
    pub const HUGGINGFACE_ENV: &'static str = "HUGGINGFACE_API_KEY";

    /// Fill blank keys from the conventional environment variables
    pub fn apply_env_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let slots = [
            (&mut self.locationiq, Self::LOCATIONIQ_ENV),
            (&mut self.aviationstack, Self::AVIATIONSTACK_ENV),
            (&mut self.huggingface, Self::HUGGINGFACE_ENV),
        ];
        for (slot, var) in slots {
            if slot.trim().is_empty() {
                if let Some(value) = lookup(var) {
                    *slot = value.trim().to_string();
                }
            }
        }
    }
}

impl NavMindConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // NAVMIND_KEYS__LOCATIONIQ=... overrides keys.locationiq
        builder = builder.add_source(
            Environment::with_prefix("NAVMIND")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: NavMindConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config
            .keys
            .apply_env_fallbacks(|var| std::env::var(var).ok());

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("navmind").join("config.toml"))
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.services.inference_model.is_empty() {
            self.services.inference_model = default_inference_model();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.planner.currency.is_empty() {
            self.planner.currency = default_currency();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Every secret must be present; a missing key fails here, not on first use
    pub fn validate_api_keys(&self) -> Result<()> {
        let keys = [
            ("LocationIQ", KeysConfig::LOCATIONIQ_ENV, &self.keys.locationiq),
            ("AviationStack", KeysConfig::AVIATIONSTACK_ENV, &self.keys.aviationstack),
            ("Hugging Face", KeysConfig::HUGGINGFACE_ENV, &self.keys.huggingface),
        ];

        let missing: Vec<String> = keys
            .iter()
            .filter(|(_, _, value)| value.trim().is_empty())
            .map(|(name, var, _)| format!("{name} ({var})"))
            .collect();

        if !missing.is_empty() {
            return Err(NavMindError::config(format!(
                "Missing API keys: {}",
                missing.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(NavMindError::config("Server port cannot be 0").into());
        }

        if self.http.timeout_seconds > 300 {
            return Err(NavMindError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        if self.server.request_timeout_seconds == 0 || self.server.request_timeout_seconds > 600 {
            return Err(NavMindError::config(
                "Server request timeout must be between 1 and 600 seconds",
            )
            .into());
        }

        if !(1..=16).contains(&self.planner.forecast_days) {
            return Err(
                NavMindError::config("Forecast days must be between 1 and 16").into(),
            );
        }

        if !(1..=100).contains(&self.planner.flight_limit) {
            return Err(NavMindError::config("Flight limit must be between 1 and 100").into());
        }

        if !(1..=10).contains(&self.planner.summary_sentences) {
            return Err(
                NavMindError::config("Summary sentences must be between 1 and 10").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(NavMindError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(NavMindError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("geocoding", &self.services.geocoding_url),
            ("weather", &self.services.weather_url),
            ("encyclopedia", &self.services.encyclopedia_url),
            ("flights", &self.services.flights_url),
            ("inference", &self.services.inference_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(NavMindError::config(format!(
                    "The {name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
