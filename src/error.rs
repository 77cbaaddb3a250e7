//! Error types and handling for the `NavMind` application

use std::fmt;

use thiserror::Error;

/// External service a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Geocoding,
    Weather,
    Encyclopedia,
    Flights,
    LanguageModel,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Geocoding => "LocationIQ",
            Service::Weather => "Open-Meteo",
            Service::Encyclopedia => "Wikipedia",
            Service::Flights => "AviationStack",
            Service::LanguageModel => "Hugging Face",
        };
        f.write_str(name)
    }
}

/// Main error type for the `NavMind` application
#[derive(Error, Debug)]
pub enum NavMindError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Failed call to an external service (transport, status or payload)
    #[error("{service} error: {message}")]
    Api { service: Service, message: String },

    /// The service answered but had nothing for the query
    #[error("{service} has no result for '{query}'")]
    NotFound { service: Service, query: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl NavMindError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error for the given service
    pub fn api<S: Into<String>>(service: Service, message: S) -> Self {
        Self::Api {
            service,
            message: message.into(),
        }
    }

    /// Wrap a transport-level `reqwest` failure
    pub fn transport(service: Service, err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else if err.is_decode() {
            format!("malformed response: {err}")
        } else {
            err.to_string()
        };
        Self::api(service, message)
    }

    pub fn not_found<S: Into<String>>(service: Service, query: S) -> Self {
        Self::NotFound {
            service,
            query: query.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// The service involved, if any
    #[must_use]
    pub fn service(&self) -> Option<Service> {
        match self {
            NavMindError::Api { service, .. } | NavMindError::NotFound { service, .. } => {
                Some(*service)
            }
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            NavMindError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            NavMindError::Api { service, .. } => {
                format!("Unable to reach {service}. Please try again later.")
            }
            NavMindError::NotFound { service, query } => {
                format!("{service} found nothing for '{query}'.")
            }
            NavMindError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            NavMindError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            NavMindError::General { message } => message.clone(),
        }
    }
}
