//! Configuration loaded from environment variables.
//!
//! ## Optional Variables
//!
//! - `BASE_URL` - Absolute base for generated links (default: `http://localhost:3000/`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `ROLLBACK_ON_VALIDATION_ERROR` - Roll back unit-of-work scopes on 400/422
//!   responses (default: `true`)

use anyhow::{Context, Result};
use std::env;
use url::Url;

use crate::uri::UriBuilder;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/";

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    /// Passed to [`crate::transaction::UnitOfWorkLayer::from_config`].
    pub rollback_on_validation_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            rollback_on_validation_error: true,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `ROLLBACK_ON_VALIDATION_ERROR` is not a boolean.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let rollback_on_validation_error = match env::var("ROLLBACK_ON_VALIDATION_ERROR") {
            Ok(v) => parse_bool(&v)
                .with_context(|| format!("ROLLBACK_ON_VALIDATION_ERROR must be a boolean, got '{v}'"))?,
            Err(_) => true,
        };

        Ok(Self {
            base_url,
            log_level,
            log_format,
            rollback_on_validation_error,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `base_url` is not an absolute `http`/`https` URL
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL must be an absolute URL, got '{}'", self.base_url))?;

        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!(
                "BASE_URL must use http or https, got '{}'",
                self.base_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// A fresh builder positioned at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn uri_builder(&self) -> Result<UriBuilder> {
        UriBuilder::parse(&self.base_url).context("Invalid BASE_URL")
    }

    /// Absolute link made of `base_url` followed by `segments`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn link<I, S>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = self.uri_builder()?;
        builder.append_path_segments(segments);
        Ok(builder.into_url())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Rollback on validation error: {}",
            self.rollback_on_validation_error
        );
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Some(false)
    } else {
        None
    }
}

/// Loads and validates configuration from environment variables.
///
/// Variables from a `.env` file in the working directory are loaded first, if
/// the file exists.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
pub fn load_from_env() -> Result<Config> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
