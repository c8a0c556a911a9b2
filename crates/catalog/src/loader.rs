// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema loader contract
//!
//! The narrow async contract a database driver implements to feed the
//! catalog cache. Drivers themselves live outside this crate; the
//! in-tree [`crate::mock::MockLoader`] is the only built-in
//! implementation.

use crate::error::CatalogResult;
use crate::metadata::ColumnDesc;

/// Async schema source behind the catalog cache.
///
/// `tables` and `describe_table` operate against the loader's current
/// database; `switch_db` changes it. Implementations must preserve the
/// order the underlying source reports tables and columns in — the
/// completion engine surfaces candidates in catalog order.
///
/// # Examples
///
/// ```rust,ignore
/// use squill_catalog::{CatalogError, SchemaLoader};
///
/// async fn world_tables(loader: &dyn SchemaLoader) -> Result<Vec<String>, CatalogError> {
///     loader.switch_db("world").await?;
///     loader.tables().await
/// }
/// ```
#[async_trait::async_trait]
pub trait SchemaLoader: Send + Sync + std::fmt::Debug {
    /// List all database (schema) names visible to the connection.
    ///
    /// # Returns
    ///
    /// Database names in the order the source reports them.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::ConnectionFailed`] if the source is
    /// unreachable.
    /// Returns [`crate::CatalogError::QueryFailed`] if the enumeration
    /// query fails.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let databases = loader.databases().await?;
    /// for database in databases {
    ///     println!("{database}");
    /// }
    /// ```
    async fn databases(&self) -> CatalogResult<Vec<String>>;

    /// List table names in the current database.
    ///
    /// # Returns
    ///
    /// Table names in the order the source reports them; the completion
    /// engine preserves this order in its candidate lists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::ConnectionFailed`] if the source is
    /// unreachable.
    /// Returns [`crate::CatalogError::QueryFailed`] if the enumeration
    /// query fails.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let tables = loader.tables().await?;
    /// assert!(tables.contains(&"city".to_string()));
    /// ```
    async fn tables(&self) -> CatalogResult<Vec<String>>;

    /// Describe the columns of `table` in the current database.
    ///
    /// # Arguments
    ///
    /// * `table` - Table name, unqualified; matched case-insensitively
    ///
    /// # Returns
    ///
    /// Column descriptions in table order, shaped like `DESC` rows.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::TableNotFound`] when the table does
    /// not exist in the current database.
    /// Returns [`crate::CatalogError::QueryFailed`] if the description
    /// query fails.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let columns = loader.describe_table("city").await?;
    /// for column in columns {
    ///     println!("{}: {}", column.name, column.col_type);
    /// }
    /// ```
    async fn describe_table(&self, table: &str) -> CatalogResult<Vec<ColumnDesc>>;

    /// Change the current database.
    ///
    /// # Arguments
    ///
    /// * `database` - Database name to make current
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::UnknownDatabase`] when no such
    /// database exists.
    /// Returns [`crate::CatalogError::ConnectionFailed`] if the source is
    /// unreachable.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// loader.switch_db("world").await?;
    /// assert_eq!(loader.current_database().as_deref(), Some("world"));
    /// ```
    async fn switch_db(&self, database: &str) -> CatalogResult<()>;

    /// The current database, if one is selected. The snapshot records it
    /// as the default database for unqualified lookups.
    fn current_database(&self) -> Option<String>;
}
