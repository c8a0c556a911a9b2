// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion rendering
//!
//! Converts generated candidates into LSP `CompletionItem`s. Kind
//! mapping follows the protocol's completion-item-kind numbers: Field
//! for columns, Class for tables and views, Variable for aliases,
//! Module for databases and subqueries.
//!
//! `sort_text` encodes the generation index so editors preserve the
//! engine's ordering instead of re-sorting alphabetically.

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

use crate::completion::candidates::{Candidate, CandidateKind};

pub struct CompletionRenderer;

impl CompletionRenderer {
    /// Render candidates in order.
    pub fn render(candidates: &[Candidate]) -> Vec<CompletionItem> {
        candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| Self::item(candidate, index))
            .collect()
    }

    fn item(candidate: &Candidate, index: usize) -> CompletionItem {
        CompletionItem {
            label: candidate.label.clone(),
            kind: Some(Self::kind(candidate.kind)),
            detail: candidate.detail.clone(),
            sort_text: Some(format!("{index:04}")),
            filter_text: Some(candidate.label.clone()),
            ..Default::default()
        }
    }

    fn kind(kind: CandidateKind) -> CompletionItemKind {
        match kind {
            CandidateKind::Column | CandidateKind::SubQueryColumn => CompletionItemKind::FIELD,
            CandidateKind::Table | CandidateKind::View => CompletionItemKind::CLASS,
            CandidateKind::Alias => CompletionItemKind::VARIABLE,
            CandidateKind::Keyword => CompletionItemKind::KEYWORD,
            CandidateKind::Function => CompletionItemKind::FUNCTION,
            CandidateKind::SubQuery | CandidateKind::Database => CompletionItemKind::MODULE,
        }
    }
}
