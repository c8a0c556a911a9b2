// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Scope analysis
//!
//! Computes, for a focused statement and cursor offset, the ordered set of
//! table references visible to the completion engine: plain tables,
//! database-qualified tables, aliased tables, and subquery-derived
//! references with their projected column names.
//!
//! Scope is strictly per-statement. A cursor inside a subquery sees only
//! the subquery's own references; outer references do not cross the
//! boundary.

pub mod scope;

pub use scope::{analyze, projection_of, Scope, TableRef};
