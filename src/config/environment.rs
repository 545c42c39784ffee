// ABOUTME: Environment configuration for deployment-specific settings
// ABOUTME: Database URL and logging settings with documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

//! Environment-based configuration.

use std::env;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

/// Default database when `DATABASE_URL` is unset.
const DEFAULT_DATABASE_URL: &str = "sqlite:fitmarket.db";

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection URL for the relational store (`DATABASE_URL`)
    pub database_url: String,
    /// Logging level and format (`LOG_LEVEL`, `LOG_FORMAT`)
    #[serde(skip)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Resolve configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when `DATABASE_URL` is set but empty.
    pub fn from_env() -> Result<Self> {
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => {
                if url.trim().is_empty() {
                    anyhow::bail!("DATABASE_URL is set but empty");
                }
                url
            }
            Err(env::VarError::NotPresent) => DEFAULT_DATABASE_URL.to_owned(),
            Err(e) => {
                return Err(anyhow::Error::new(e).context("DATABASE_URL is not valid unicode"));
            }
        };

        Ok(Self {
            database_url,
            logging: LoggingConfig::from_env(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_database_url_is_sqlite_file() {
        let config = Config::default();
        assert_eq!(config.database_url, "sqlite:fitmarket.db");
    }
}
