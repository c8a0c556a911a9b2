// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Server Configuration
//!
//! Connection configuration arriving through
//! `workspace/didChangeConfiguration`, under the `sqls` settings key:
//!
//! ```json
//! {
//!   "sqls": {
//!     "connections": [
//!       { "driver": "mysql", "dataSourceName": "root:root@tcp(127.0.0.1:3306)/world" },
//!       { "driver": "mock", "dataSourceName": "", "alias": "fixture" }
//!     ],
//!     "default_connection": 1
//!   }
//! }
//! ```
//!
//! `default_connection` is a 1-based index into `connections`; when
//! absent the first connection is used. Reconfiguration replaces the
//! active catalog loader.

use serde::Deserialize;
use serde_json::Value;
use squill_catalog::CatalogError;

/// One configured database connection.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConnectionConfig {
    /// Driver name: `mysql`, `postgresql`, `sqlite3`, `mssql`, or `mock`
    pub driver: String,

    /// Driver-specific data source name
    #[serde(rename = "dataSourceName", default)]
    pub data_source_name: String,

    /// Optional display alias for this connection
    #[serde(default)]
    pub alias: Option<String>,
}

impl ConnectionConfig {
    /// Name shown in logs and messages: the alias when set, else the
    /// driver name.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.driver)
    }
}

/// Full server configuration under `settings.sqls`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,

    /// 1-based index of the connection to activate
    #[serde(default)]
    pub default_connection: Option<usize>,
}

impl ServerConfig {
    /// Extract the configuration from an LSP settings payload.
    ///
    /// Returns `Ok(None)` when the payload has no `sqls` section (the
    /// change concerned some other tool).
    pub fn from_lsp_settings(settings: &Value) -> Result<Option<Self>, ConfigError> {
        let section = match settings.get("sqls") {
            Some(section) if !section.is_null() => section,
            _ => return Ok(None),
        };
        let config: ServerConfig = serde_json::from_value(section.clone())
            .map_err(|e| ConfigError::InvalidPayload(e.to_string()))?;
        config.validate()?;
        Ok(Some(config))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.default_connection {
            if index == 0 || index > self.connections.len() {
                return Err(ConfigError::ConnectionIndexOutOfRange {
                    index,
                    count: self.connections.len(),
                });
            }
        }
        Ok(())
    }

    /// The connection to activate: `default_connection` when set (1-based),
    /// else the first configured connection.
    pub fn active_connection(&self) -> Option<&ConnectionConfig> {
        match self.default_connection {
            Some(index) => self.connections.get(index.saturating_sub(1)),
            None => self.connections.first(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Settings payload did not match the expected shape
    #[error("Invalid sqls settings: {0}")]
    InvalidPayload(String),

    /// default_connection points outside the connections list
    #[error("default_connection {index} out of range (1..={count})")]
    ConnectionIndexOutOfRange { index: usize, count: usize },

    /// Catalog-level failure while applying the configuration
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
