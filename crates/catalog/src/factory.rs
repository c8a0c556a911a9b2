// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Loader factory
//!
//! Constructs [`SchemaLoader`]s by driver name. The factory replaces a
//! dynamic driver registry: recognized drivers are a closed set, only the
//! `mock` driver is built in, and live drivers register a constructor at
//! startup.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{CatalogError, CatalogResult};
use crate::loader::SchemaLoader;
use crate::mock::MockLoader;

/// Recognized driver names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    MySql,
    PostgreSql,
    Sqlite3,
    MsSql,
    Mock,
}

impl Driver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::MySql => "mysql",
            Driver::PostgreSql => "postgresql",
            Driver::Sqlite3 => "sqlite3",
            Driver::MsSql => "mssql",
            Driver::Mock => "mock",
        }
    }
}

impl FromStr for Driver {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(Driver::MySql),
            "postgresql" => Ok(Driver::PostgreSql),
            "sqlite3" => Ok(Driver::Sqlite3),
            "mssql" => Ok(Driver::MsSql),
            "mock" => Ok(Driver::Mock),
            other => Err(CatalogError::UnrecognizedDriver(other.to_string())),
        }
    }
}

/// Constructor for a loader, given the data source name.
pub type LoaderConstructor =
    dyn Fn(&str) -> CatalogResult<Arc<dyn SchemaLoader>> + Send + Sync;

/// Driver-name-keyed loader factory.
pub struct LoaderFactory {
    constructors: HashMap<Driver, Box<LoaderConstructor>>,
}

impl Default for LoaderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderFactory {
    /// A factory with the built-in `mock` driver registered. The mock
    /// ignores its data source name and serves the `world` dataset.
    pub fn new() -> Self {
        let mut factory = Self {
            constructors: HashMap::new(),
        };
        factory.register(Driver::Mock, |_dsn| {
            Ok(Arc::new(MockLoader::with_world_schema()) as Arc<dyn SchemaLoader>)
        });
        factory
    }

    /// Register (or replace) the constructor for a driver.
    pub fn register<F>(&mut self, driver: Driver, constructor: F)
    where
        F: Fn(&str) -> CatalogResult<Arc<dyn SchemaLoader>> + Send + Sync + 'static,
    {
        self.constructors.insert(driver, Box::new(constructor));
    }

    /// Construct a loader for `driver` with the given data source name.
    ///
    /// # Errors
    ///
    /// [`CatalogError::UnrecognizedDriver`] for names outside the
    /// recognized set; [`CatalogError::DriverUnavailable`] for recognized
    /// drivers with no registered constructor.
    pub fn create(&self, driver: &str, data_source_name: &str) -> CatalogResult<Arc<dyn SchemaLoader>> {
        let driver = Driver::from_str(driver)?;
        let constructor = self
            .constructors
            .get(&driver)
            .ok_or_else(|| CatalogError::DriverUnavailable(driver.as_str().to_string()))?;
        constructor(data_source_name)
    }
}
