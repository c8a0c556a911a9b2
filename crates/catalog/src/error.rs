// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for catalog operations

use serde::Serialize;
use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading schema information
#[derive(Debug, Error, Clone, Serialize)]
pub enum CatalogError {
    /// Failed to connect to the database
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Schema query failed
    #[error("Schema query failed: {0}")]
    QueryFailed(String),

    /// Requested table was not found
    #[error("Table '{0}' not found in database '{1}'")]
    TableNotFound(String, String),

    /// Requested database does not exist
    #[error("Unknown database: {0}")]
    UnknownDatabase(String),

    /// Driver name is recognized but no loader is registered for it
    #[error("No catalog loader available for driver '{0}'")]
    DriverUnavailable(String),

    /// Driver name is not one of the recognized drivers
    #[error("Unrecognized driver '{0}' (expected mysql, postgresql, sqlite3, mssql, or mock)")]
    UnrecognizedDriver(String),

    /// Invalid loader configuration
    #[error("Invalid catalog configuration: {0}")]
    ConfigurationError(String),
}
