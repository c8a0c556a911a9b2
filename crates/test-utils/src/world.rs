// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # world schema fixture
//!
//! The MySQL `world` sample dataset (the schema the reference completion
//! corpus runs against), exposed both as a loader and as a fully loaded
//! snapshot.

use squill_catalog::{CatalogSnapshot, MockLoader};

/// The `world` mock loader: databases `information_schema`, `mysql`,
/// `performance_schema`, `sys`, `world`; tables `city`, `country`,
/// `countrylanguage` with their full column sets; current database
/// `world`.
pub fn world_loader() -> MockLoader {
    MockLoader::with_world_schema()
}

/// A loaded snapshot of the `world` schema.
pub async fn world_snapshot() -> CatalogSnapshot {
    CatalogSnapshot::load(&world_loader())
        .await
        .expect("world fixture always loads")
}
