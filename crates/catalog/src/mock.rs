// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Mock schema loader
//!
//! Deterministic in-memory [`SchemaLoader`] behind the `mock` driver,
//! used by the test corpus and by anyone wanting a fixed catalog without
//! a live database. [`MockLoader::with_world_schema`] reproduces the
//! MySQL `world` sample dataset the reference tests run against.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{CatalogError, CatalogResult};
use crate::loader::SchemaLoader;
use crate::metadata::ColumnDesc;

/// In-memory schema loader with a switchable current database.
#[derive(Debug)]
pub struct MockLoader {
    databases: Vec<String>,
    /// lowercase database name → tables in insertion order
    tables: HashMap<String, Vec<String>>,
    /// (lowercase database, lowercase table) → columns
    columns: HashMap<(String, String), Vec<ColumnDesc>>,
    current: Mutex<String>,
}

impl MockLoader {
    pub fn builder() -> MockLoaderBuilder {
        MockLoaderBuilder::new()
    }

    /// The MySQL `world` sample schema: `city`, `country`, and
    /// `countrylanguage` in database `world`, plus the standard system
    /// databases, with `world` current.
    pub fn with_world_schema() -> Self {
        MockLoaderBuilder::new()
            .database("information_schema")
            .database("mysql")
            .database("performance_schema")
            .database("sys")
            .database("world")
            .default_database("world")
            .table(
                "world",
                "city",
                vec![
                    ColumnDesc::new("ID", "int(11)")
                        .primary_key()
                        .with_extra("auto_increment"),
                    ColumnDesc::new("Name", "char(35)").not_null().with_default(""),
                    ColumnDesc::new("CountryCode", "char(3)")
                        .not_null()
                        .indexed()
                        .with_default(""),
                    ColumnDesc::new("District", "char(20)").not_null().with_default(""),
                    ColumnDesc::new("Population", "int(11)").not_null().with_default("0"),
                ],
            )
            .table(
                "world",
                "country",
                vec![
                    ColumnDesc::new("Code", "char(3)").primary_key().with_default(""),
                    ColumnDesc::new("Name", "char(52)").not_null().with_default(""),
                    ColumnDesc::new("CountryCode", "char(3)").not_null().with_default(""),
                    ColumnDesc::new("Continent", "enum('Asia','Europe','North America','Africa','Oceania','Antarctica','South America')")
                        .not_null()
                        .with_default("Asia"),
                    ColumnDesc::new("Region", "char(26)").not_null().with_default(""),
                    ColumnDesc::new("SurfaceArea", "decimal(10,2)").not_null().with_default("0.00"),
                    ColumnDesc::new("IndepYear", "smallint(6)"),
                    ColumnDesc::new("LifeExpectancy", "decimal(3,1)"),
                    ColumnDesc::new("GNP", "decimal(10,2)"),
                    ColumnDesc::new("GNPOld", "decimal(10,2)"),
                    ColumnDesc::new("LocalName", "char(45)").not_null().with_default(""),
                    ColumnDesc::new("GovernmentForm", "char(45)").not_null().with_default(""),
                    ColumnDesc::new("HeadOfState", "char(60)"),
                    ColumnDesc::new("Capital", "int(11)"),
                    ColumnDesc::new("Code2", "char(2)").not_null().with_default(""),
                ],
            )
            .table(
                "world",
                "countrylanguage",
                vec![
                    ColumnDesc::new("CountryCode", "char(3)")
                        .primary_key()
                        .with_default(""),
                    ColumnDesc::new("Language", "char(30)").primary_key().with_default(""),
                    ColumnDesc::new("IsOfficial", "enum('T','F')")
                        .not_null()
                        .with_default("F"),
                    ColumnDesc::new("Percentage", "float(4,1)").not_null().with_default("0.0"),
                ],
            )
            .build()
    }
}

#[async_trait::async_trait]
impl SchemaLoader for MockLoader {
    async fn databases(&self) -> CatalogResult<Vec<String>> {
        Ok(self.databases.clone())
    }

    async fn tables(&self) -> CatalogResult<Vec<String>> {
        let current = self.current_database().unwrap_or_default();
        Ok(self
            .tables
            .get(&current.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    async fn describe_table(&self, table: &str) -> CatalogResult<Vec<ColumnDesc>> {
        let current = self.current_database().unwrap_or_default();
        self.columns
            .get(&(current.to_lowercase(), table.to_lowercase()))
            .cloned()
            .ok_or_else(|| CatalogError::TableNotFound(table.to_string(), current))
    }

    async fn switch_db(&self, database: &str) -> CatalogResult<()> {
        if !self
            .databases
            .iter()
            .any(|d| d.eq_ignore_ascii_case(database))
        {
            return Err(CatalogError::UnknownDatabase(database.to_string()));
        }
        if let Ok(mut current) = self.current.lock() {
            *current = database.to_string();
        }
        Ok(())
    }

    fn current_database(&self) -> Option<String> {
        self.current.lock().ok().map(|c| c.clone())
    }
}

/// Fluent builder for [`MockLoader`].
#[derive(Debug, Default)]
pub struct MockLoaderBuilder {
    databases: Vec<String>,
    default_database: Option<String>,
    tables: HashMap<String, Vec<String>>,
    columns: HashMap<(String, String), Vec<ColumnDesc>>,
}

impl MockLoaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database(mut self, name: impl Into<String>) -> Self {
        self.databases.push(name.into());
        self
    }

    pub fn default_database(mut self, name: impl Into<String>) -> Self {
        self.default_database = Some(name.into());
        self
    }

    /// Add a table with its columns; the database is added implicitly if
    /// it has not been declared.
    pub fn table(
        mut self,
        database: impl Into<String>,
        name: impl Into<String>,
        columns: Vec<ColumnDesc>,
    ) -> Self {
        let database = database.into();
        let name = name.into();
        if !self
            .databases
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&database))
        {
            self.databases.push(database.clone());
        }
        let db_key = database.to_lowercase();
        self.columns
            .insert((db_key.clone(), name.to_lowercase()), columns);
        self.tables.entry(db_key).or_default().push(name);
        self
    }

    pub fn build(self) -> MockLoader {
        let current = self
            .default_database
            .or_else(|| self.databases.first().cloned())
            .unwrap_or_default();
        MockLoader {
            databases: self.databases,
            tables: self.tables,
            columns: self.columns,
            current: Mutex::new(current),
        }
    }
}
