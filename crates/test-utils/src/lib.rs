// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # squill test utilities
//!
//! The deterministic `world` catalog fixture and label assertions shared
//! by the completion test corpus.

pub mod assertions;
pub mod world;

pub use assertions::{assert_labels_exact, assert_labels_include};
pub use world::{world_loader, world_snapshot};
