// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Candidate generation
//!
//! Maps a cursor context, the statement scope, and the catalog snapshot
//! to an ordered candidate list. Generation never fails: contexts that
//! offer nothing produce an empty list, and an empty scope in an
//! expression context degrades to keyword candidates.
//!
//! Ordering is deliberate and observable: within a group candidates keep
//! catalog order (tables and columns as the loader reported them);
//! across groups the order is fixed (columns, then scope labels, then
//! other tables; tables, then databases).

use squill_catalog::{CatalogSnapshot, ColumnDesc};
use squill_semantic::{Scope, TableRef};
use squill_syntax::{CompletionContext, ContextKind, KEYWORDS, STATEMENT_KEYWORDS};

/// Candidate classification, mapped to LSP completion-item kinds by the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Column,
    Table,
    Alias,
    View,
    Keyword,
    Function,
    SubQuery,
    SubQueryColumn,
    Database,
}

/// One completion candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub label: String,
    pub kind: CandidateKind,
    pub detail: Option<String>,
}

impl Candidate {
    fn new(label: impl Into<String>, kind: CandidateKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Generate the ordered candidate list for `context`.
pub fn generate(
    context: &CompletionContext,
    scope: &Scope,
    catalog: &CatalogSnapshot,
) -> Vec<Candidate> {
    match &context.kind {
        ContextKind::SelectListItem
        | ContextKind::WhereOperand
        | ContextKind::JoinOnOperand
        | ContextKind::GroupByItem
        | ContextKind::OrderByItem
        | ContextKind::CaseOperand => expression_candidates(context, scope, catalog),

        ContextKind::FromTable
        | ContextKind::JoinTable
        | ContextKind::InsertTargetTable
        | ContextKind::UpdateTargetTable
        | ContextKind::DeleteFromTable => table_candidates(context, catalog),

        ContextKind::InsertColumn | ContextKind::UpdateSetColumn => {
            target_column_candidates(context, scope, catalog)
        }

        // delegate to the inner context; the scope was already computed
        // against the subquery
        ContextKind::SubqueryBody(inner) => generate(inner, scope, catalog),

        ContextKind::Unknown => keyword_candidates(STATEMENT_KEYWORDS),
    }
}

/// Retain candidates whose label contains `prefix` as a case-insensitive
/// substring; an empty prefix keeps everything.
pub fn filter_by_prefix(candidates: Vec<Candidate>, prefix: &str) -> Vec<Candidate> {
    if prefix.is_empty() {
        return candidates;
    }
    let needle = prefix.to_lowercase();
    candidates
        .into_iter()
        .filter(|c| c.label.to_lowercase().contains(&needle))
        .collect()
}

/// Column operand position: columns of everything in scope, then the
/// scope labels themselves, then the remaining tables of the default
/// database. A dotted prefix restricts to its owner.
fn expression_candidates(
    context: &CompletionContext,
    scope: &Scope,
    catalog: &CatalogSnapshot,
) -> Vec<Candidate> {
    if let Some(owner) = &context.dotted_prefix {
        if let Some(table_ref) = scope.resolve(owner) {
            return ref_columns(table_ref, catalog);
        }
        if catalog.has_database(owner) {
            return catalog
                .tables_of(owner)
                .iter()
                .map(|t| table_candidate(t))
                .collect();
        }
        return Vec::new();
    }

    if scope.is_empty() {
        // no tables to draw columns from: offer tables and keywords so
        // the editor still gets a useful list
        let mut out: Vec<Candidate> = catalog
            .default_tables()
            .iter()
            .map(|t| table_candidate(t))
            .collect();
        out.extend(keyword_candidates(KEYWORDS));
        return out;
    }

    let mut out = Vec::new();
    for table_ref in &scope.refs {
        out.extend(ref_columns(table_ref, catalog));
    }
    for table_ref in &scope.refs {
        out.push(scope_label_candidate(table_ref));
    }
    for table in catalog.default_tables() {
        if !scope.references_table(table) {
            out.push(table_candidate(table));
        }
    }
    out
}

/// Table position: tables of the default database, then database names.
/// A dotted prefix is meaningful only when it names a database.
fn table_candidates(context: &CompletionContext, catalog: &CatalogSnapshot) -> Vec<Candidate> {
    if let Some(owner) = &context.dotted_prefix {
        if catalog.has_database(owner) {
            return catalog
                .tables_of(owner)
                .iter()
                .map(|t| table_candidate(t))
                .collect();
        }
        return Vec::new();
    }

    let mut out: Vec<Candidate> = catalog
        .default_tables()
        .iter()
        .map(|t| table_candidate(t))
        .collect();
    for database in catalog.databases() {
        out.push(
            Candidate::new(database.clone(), CandidateKind::Database).with_detail("database"),
        );
    }
    out
}

/// INSERT column list / UPDATE SET position: columns of the statement's
/// target table.
fn target_column_candidates(
    context: &CompletionContext,
    scope: &Scope,
    catalog: &CatalogSnapshot,
) -> Vec<Candidate> {
    if context.dotted_prefix.is_some() {
        return Vec::new();
    }
    let target = match scope.refs.iter().find(|r| !r.is_derived()) {
        Some(target) => target,
        None => return Vec::new(),
    };
    ref_columns(target, catalog)
}

fn ref_columns(table_ref: &TableRef, catalog: &CatalogSnapshot) -> Vec<Candidate> {
    if let Some(derived) = &table_ref.derived_columns {
        return derived
            .iter()
            .map(|name| {
                Candidate::new(name.clone(), CandidateKind::SubQueryColumn)
                    .with_detail(format!("subquery {}", table_ref.label()))
            })
            .collect();
    }
    let columns = catalog
        .columns_of(table_ref.database.as_deref(), &table_ref.table)
        .unwrap_or(&[]);
    columns
        .iter()
        .map(|column| column_candidate(column, &table_ref.table))
        .collect()
}

fn column_candidate(column: &ColumnDesc, table: &str) -> Candidate {
    let detail = if column.key.is_empty() {
        format!("{} {}", table, column.col_type)
    } else {
        format!("{} {} {}", table, column.col_type, column.key)
    };
    Candidate::new(column.name.clone(), CandidateKind::Column).with_detail(detail)
}

fn table_candidate(name: &str) -> Candidate {
    Candidate::new(name, CandidateKind::Table).with_detail("table")
}

fn scope_label_candidate(table_ref: &TableRef) -> Candidate {
    if table_ref.is_derived() {
        return Candidate::new(table_ref.label(), CandidateKind::SubQuery)
            .with_detail("subquery");
    }
    match &table_ref.alias {
        Some(alias) => Candidate::new(alias.clone(), CandidateKind::Alias)
            .with_detail(format!("alias for {}", table_ref.table)),
        None => table_candidate(&table_ref.table),
    }
}

fn keyword_candidates(words: &[&str]) -> Vec<Candidate> {
    words
        .iter()
        .map(|w| Candidate::new(*w, CandidateKind::Keyword))
        .collect()
}
