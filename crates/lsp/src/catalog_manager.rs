// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog manager
//!
//! Owns the active schema loader and the catalog snapshot the completion
//! engine reads. Loading runs without holding the snapshot lock, so a
//! slow database walk never blocks a completion request: readers keep
//! the previous (or empty) snapshot until the swap.
//!
//! A failed load swaps in the empty snapshot — completion degrades to
//! keyword candidates instead of erroring.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use squill_catalog::{CatalogResult, CatalogSnapshot, LoaderFactory, SchemaLoader};

use crate::config::ConnectionConfig;

/// Active loader plus the atomically swapped snapshot.
pub struct CatalogManager {
    factory: LoaderFactory,
    loader: RwLock<Option<Arc<dyn SchemaLoader>>>,
    snapshot: RwLock<Arc<CatalogSnapshot>>,
}

impl Default for CatalogManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogManager {
    /// Manager with the default factory (built-in `mock` driver only).
    pub fn new() -> Self {
        Self::with_factory(LoaderFactory::new())
    }

    /// Manager with a caller-supplied factory, e.g. one with live
    /// drivers registered.
    pub fn with_factory(factory: LoaderFactory) -> Self {
        Self {
            factory,
            loader: RwLock::new(None),
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::empty())),
        }
    }

    /// The latest fully-loaded snapshot. Never waits on a load in
    /// progress.
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Construct a loader for `connection` and load the catalog.
    pub async fn configure(&self, connection: &ConnectionConfig) -> CatalogResult<()> {
        let loader = match self
            .factory
            .create(&connection.driver, &connection.data_source_name)
        {
            Ok(loader) => loader,
            Err(e) => {
                self.clear().await;
                return Err(e);
            }
        };
        *self.loader.write().await = Some(loader);
        self.reload().await
    }

    /// Rebuild the snapshot from the active loader and swap it in.
    pub async fn reload(&self) -> CatalogResult<()> {
        let loader = self.loader.read().await.clone();
        let loader = match loader {
            Some(loader) => loader,
            None => {
                self.clear().await;
                return Ok(());
            }
        };

        match CatalogSnapshot::load(loader.as_ref()).await {
            Ok(snapshot) => {
                info!(
                    "Catalog loaded: {} databases, {} tables (default: {:?})",
                    snapshot.databases().len(),
                    snapshot.table_count(),
                    snapshot.default_database()
                );
                *self.snapshot.write().await = Arc::new(snapshot);
                Ok(())
            }
            Err(e) => {
                warn!("Catalog load failed, falling back to empty catalog: {e}");
                self.clear().await;
                Err(e)
            }
        }
    }

    /// Switch the active loader's database and reload.
    pub async fn switch_database(&self, database: &str) -> CatalogResult<()> {
        let loader = self.loader.read().await.clone();
        if let Some(loader) = loader {
            loader.switch_db(database).await?;
        }
        self.reload().await
    }

    /// Drop to the empty snapshot.
    pub async fn clear(&self) {
        *self.snapshot.write().await = Arc::new(CatalogSnapshot::empty());
    }
}
