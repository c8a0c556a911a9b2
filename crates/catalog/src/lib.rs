// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # squill catalog layer
//!
//! Database schema abstraction for the squill language server:
//!
//! - [`SchemaLoader`]: the narrow async contract a driver implements
//!   (`databases`, `tables`, `describe_table`, `switch_db`)
//! - [`CatalogSnapshot`]: the immutable in-memory cache the completion
//!   engine reads, swapped wholesale on reload
//! - [`MockLoader`]: deterministic in-memory loader behind the `mock`
//!   driver, serving the MySQL `world` dataset
//! - [`LoaderFactory`]: driver-name-keyed construction
//!
//! Live database drivers are external collaborators; they implement
//! [`SchemaLoader`] and register with the factory at startup. A load
//! failure never poisons readers: the server falls back to
//! [`CatalogSnapshot::empty`] and surfaces a warning.

pub mod error;
pub mod factory;
pub mod loader;
pub mod metadata;
pub mod mock;
pub mod snapshot;

pub use error::{CatalogError, CatalogResult};
pub use factory::{Driver, LoaderFactory};
pub use loader::SchemaLoader;
pub use metadata::ColumnDesc;
pub use mock::{MockLoader, MockLoaderBuilder};
pub use snapshot::CatalogSnapshot;
