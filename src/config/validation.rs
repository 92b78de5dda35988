//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Ensure the backend pool is non-empty
//! - Ensure every backend URL is an absolute http URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: BalancerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::BalancerConfig;

/// A single semantic validation failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("backend pool is empty; at least one backend is required")]
    EmptyPool,

    #[error("backend url '{url}' is not a valid absolute URL: {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("backend url '{url}' uses unsupported scheme '{scheme}'; only http is supported")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("backend url '{url}' has no host")]
    MissingHost { url: String },
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &BalancerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.backends.is_empty() {
        errors.push(ValidationError::EmptyPool);
    }

    for backend in &config.backends {
        match Url::parse(&backend.url) {
            Ok(url) => {
                // The upstream client speaks plain TCP, so https backends
                // would fail on every request. Reject them up front.
                if url.scheme() != "http" {
                    errors.push(ValidationError::UnsupportedScheme {
                        url: backend.url.clone(),
                        scheme: url.scheme().to_string(),
                    });
                } else if url.host_str().is_none() {
                    errors.push(ValidationError::MissingHost {
                        url: backend.url.clone(),
                    });
                }
            }
            Err(e) => {
                errors.push(ValidationError::InvalidBackendUrl {
                    url: backend.url.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
