// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # squill - SQL Language Server
//!
//! Schema-aware SQL completion over the Language Server Protocol.
//!
//! ## Overview
//!
//! Editors connect over JSON-RPC (stdio) and receive context-aware
//! completion while editing SQL: columns, tables, aliases,
//! subquery-derived columns, and keywords, resolved against a cached
//! snapshot of the connected database's schema.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Client (VS Code, etc.)          │
//! └──────────────┬──────────────────────────┘
//!                │ LSP Protocol (stdio)
//!                ↓
//! ┌─────────────────────────────────────────┐
//! │         LSP Backend (tower-lsp)         │
//! ├─────────────────────────────────────────┤
//! │  • did_open / did_change / did_close    │
//! │  • completion / executeCommand          │
//! └──────┬───────────────┬──────────────────┘
//!        ↓               ↓
//! ┌────────────┐  ┌──────────────────┐
//! │  Document  │  │ Catalog Manager  │
//! │   Store    │  │ (snapshot swap)  │
//! └──────┬─────┘  └────────┬─────────┘
//!        ↓                 ↓
//! ┌─────────────────────────────────────────┐
//! │ Completion Engine                       │
//! │ locate → scope → generate → render      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! The server degrades gracefully:
//! - Parse problems never fail a request — the parser is permissive
//! - Catalog load failures surface a warning and fall back to the empty
//!   catalog (keyword-only completion)
//! - Completion itself is infallible and always answers with a list
//!
//! ## Modules
//!
//! - [`backend`]: tower-lsp `LanguageServer` implementation
//! - [`document`]: rope-backed document store, LSP position conversion
//! - [`config`]: `settings.sqls` connection configuration
//! - [`catalog_manager`]: loader lifecycle and snapshot swapping
//! - [`completion`]: the completion engine and candidate generation

pub mod backend;
pub mod catalog_manager;
pub mod completion;
pub mod config;
pub mod document;

pub use backend::LspBackend;
pub use catalog_manager::CatalogManager;
pub use completion::{Candidate, CandidateKind, CompletionEngine};
pub use config::{ConfigError, ConnectionConfig, ServerConfig};
pub use document::{Document, DocumentError, DocumentMetadata, DocumentStore, ParseMetadata};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name
pub const SERVER_NAME: &str = "squill";
