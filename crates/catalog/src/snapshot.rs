// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog snapshot
//!
//! The immutable in-memory schema cache: database names, the default
//! database, and per-database table and column lists in loader order.
//! A snapshot is built in one pass over a [`SchemaLoader`] and replaced
//! wholesale on reconnect, refresh, or database switch; readers never
//! observe a partially loaded catalog.

use std::collections::HashMap;

use crate::error::CatalogResult;
use crate::loader::SchemaLoader;
use crate::metadata::ColumnDesc;

/// Immutable schema cache. Lookups are case-insensitive; stored names
/// keep their original spelling and order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    databases: Vec<String>,
    default_database: Option<String>,
    /// lowercase database name → table names in loader order
    tables: HashMap<String, Vec<String>>,
    /// (lowercase database, lowercase table) → columns in loader order
    columns: HashMap<(String, String), Vec<ColumnDesc>>,
}

impl CatalogSnapshot {
    /// The empty catalog, used before any load and after load failures.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot by walking `loader` across every database it
    /// reports, restoring the loader's original database afterwards.
    pub async fn load(loader: &dyn SchemaLoader) -> CatalogResult<Self> {
        let databases = loader.databases().await?;
        let default_database = loader.current_database();

        let mut tables = HashMap::new();
        let mut columns = HashMap::new();

        let mut walk: Vec<&String> = databases.iter().collect();
        // a default database missing from the enumeration still gets loaded
        if let Some(default) = &default_database {
            if !databases.iter().any(|d| d.eq_ignore_ascii_case(default)) {
                walk.push(default);
            }
        }

        for database in walk {
            loader.switch_db(database).await?;
            let names = loader.tables().await?;
            let db_key = database.to_lowercase();
            for table in &names {
                let described = loader.describe_table(table).await?;
                columns.insert((db_key.clone(), table.to_lowercase()), described);
            }
            tables.insert(db_key, names);
        }

        if let Some(default) = &default_database {
            loader.switch_db(default).await?;
        }

        Ok(Self {
            databases,
            default_database,
            tables,
            columns,
        })
    }

    pub fn databases(&self) -> &[String] {
        &self.databases
    }

    pub fn default_database(&self) -> Option<&str> {
        self.default_database.as_deref()
    }

    pub fn has_database(&self, name: &str) -> bool {
        self.databases.iter().any(|d| d.eq_ignore_ascii_case(name))
    }

    /// Table names of `database`, in loader order.
    pub fn tables_of(&self, database: &str) -> &[String] {
        self.tables
            .get(&database.to_lowercase())
            .map(|t| t.as_slice())
            .unwrap_or(&[])
    }

    /// Table names of the default database.
    pub fn default_tables(&self) -> &[String] {
        match &self.default_database {
            Some(db) => self.tables_of(db),
            None => &[],
        }
    }

    /// Columns of `table` in `database` (default database when `None`).
    pub fn columns_of(&self, database: Option<&str>, table: &str) -> Option<&[ColumnDesc]> {
        let db = match database.or(self.default_database()) {
            Some(db) => db.to_lowercase(),
            None => return None,
        };
        self.columns
            .get(&(db, table.to_lowercase()))
            .map(|c| c.as_slice())
    }

    /// Total number of cached tables, across all databases.
    pub fn table_count(&self) -> usize {
        self.tables.values().map(|t| t.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty() && self.tables.is_empty()
    }
}
