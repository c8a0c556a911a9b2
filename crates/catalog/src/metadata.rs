// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Column metadata
//!
//! The column description a schema loader reports for each table, shaped
//! like a MySQL `DESC` row: name, raw type, nullability, key kind,
//! default, and the extra attributes column.

use serde::{Deserialize, Serialize};

/// Description of one table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDesc {
    /// Column name
    pub name: String,
    /// Raw type as the database reports it, e.g. `int(11)`, `char(35)`
    pub col_type: String,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Key kind: `PRI`, `UNI`, `MUL`, or empty
    pub key: String,
    /// Default value, if any
    pub default_value: Option<String>,
    /// Extra attributes, e.g. `auto_increment`
    pub extra: String,
}

impl ColumnDesc {
    /// Create a column description with builder-style refinement.
    pub fn new(name: impl Into<String>, col_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            col_type: col_type.into(),
            nullable: true,
            key: String::new(),
            default_value: None,
            extra: String::new(),
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.key = "PRI".to_string();
        self.nullable = false;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.key = "MUL".to_string();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    pub fn is_primary_key(&self) -> bool {
        self.key == "PRI"
    }
}
