// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion engine
//!
//! Orchestrates a completion request end to end:
//!
//! ```text
//! 1. Convert the LSP position to a character offset
//!    ↓
//! 2. Locate the focused statement and cursor context (syntax)
//!    ↓
//! 3. Build the visible table scope (semantic)
//!    ↓
//! 4. Generate + prefix-filter candidates against the catalog snapshot
//!    ↓
//! 5. Render LSP completion items
//! ```
//!
//! The engine performs no I/O and never fails: it reads the snapshot it
//! was given and returns a (possibly empty) list for every input.

pub mod candidates;
pub mod render;

use std::sync::Arc;

use tower_lsp::lsp_types::{CompletionItem, Position};

use squill_catalog::CatalogSnapshot;
use squill_semantic::{analyze, Scope};
use squill_syntax::locate;

use crate::completion::candidates::{filter_by_prefix, generate};
use crate::completion::render::CompletionRenderer;
use crate::document::Document;

pub use crate::completion::candidates::{Candidate, CandidateKind};

/// Completion engine bound to one catalog snapshot.
pub struct CompletionEngine {
    snapshot: Arc<CatalogSnapshot>,
}

impl CompletionEngine {
    pub fn new(snapshot: Arc<CatalogSnapshot>) -> Self {
        Self { snapshot }
    }

    /// Compute completion items for `document` at `position`.
    ///
    /// Always returns a list; an unparseable position clamps to the end
    /// of the document.
    pub fn complete(&self, document: &Document, position: Position) -> Vec<CompletionItem> {
        let offset = document
            .offset_at(position)
            .unwrap_or_else(|| document.len_chars());
        let source = document.get_content();
        let statements = document.statements();

        let (focused, context) = locate(statements.as_slice(), &source, offset);
        let scope = match focused {
            Some(index) => analyze(&statements[index], offset),
            None => Scope::default(),
        };

        let generated = generate(&context, &scope, &self.snapshot);
        let filtered = filter_by_prefix(generated, &context.prefix_text);
        CompletionRenderer::render(&filtered)
    }

    /// Candidate labels for `document` at `position`, before rendering.
    /// Test-facing convenience.
    pub fn complete_labels(&self, document: &Document, position: Position) -> Vec<String> {
        self.complete(document, position)
            .into_iter()
            .map(|item| item.label)
            .collect()
    }
}
