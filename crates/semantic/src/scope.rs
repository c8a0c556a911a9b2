// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Table reference scope
//!
//! Builds the ordered [`TableRef`] list for a statement from every
//! table-reference position (FROM, JOIN, INSERT/UPDATE/DELETE targets)
//! reachable without crossing into a subquery that does not enclose the
//! cursor.

use squill_syntax::ast::{ClauseKind, Node};
use squill_syntax::cursor::scope_statement;

/// Column name a projection item exposes when it has neither an alias nor
/// an identifier to take a name from.
const SYNTHETIC_COLUMN: &str = "?column?";

/// One table reference visible in a statement's scope.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    /// Database qualifier, e.g. `world` in `world.city`.
    pub database: Option<String>,
    /// Table name; for a subquery reference this is the alias.
    pub table: String,
    /// Whether the table name was quoted in the source.
    pub table_quoted: bool,
    /// Alias, which shadows the table name as this reference's label.
    pub alias: Option<String>,
    pub alias_quoted: bool,
    /// Projected column names when this reference is a subquery;
    /// `None` for catalog-backed tables.
    pub derived_columns: Option<Vec<String>>,
}

impl TableRef {
    fn table(name: impl Into<String>, quoted: bool) -> Self {
        Self {
            database: None,
            table: name.into(),
            table_quoted: quoted,
            alias: None,
            alias_quoted: false,
            derived_columns: None,
        }
    }

    /// The name this reference answers to inside the statement.
    pub fn label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }

    pub fn is_derived(&self) -> bool {
        self.derived_columns.is_some()
    }

    /// Does `name` refer to this table? Aliases shadow the table name;
    /// unquoted labels compare case-insensitively, quoted ones exactly.
    pub fn matches(&self, name: &str) -> bool {
        let quoted = if self.alias.is_some() {
            self.alias_quoted
        } else {
            self.table_quoted
        };
        if quoted {
            self.label() == name
        } else {
            self.label().eq_ignore_ascii_case(name)
        }
    }
}

/// The ordered table references visible at the cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    pub refs: Vec<TableRef>,
}

impl Scope {
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Resolve a name (alias or table) to its reference.
    pub fn resolve(&self, name: &str) -> Option<&TableRef> {
        self.refs.iter().find(|r| r.matches(name))
    }

    /// Whether the scope already references catalog table `name` (by the
    /// underlying table name, regardless of alias).
    pub fn references_table(&self, name: &str) -> bool {
        self.refs
            .iter()
            .any(|r| !r.is_derived() && r.table.eq_ignore_ascii_case(name))
    }
}

/// Build the scope governing `offset` within `statement`.
///
/// When the cursor sits inside a subquery, only that subquery's references
/// are visible; otherwise the statement's own references are collected in
/// source order.
pub fn analyze(statement: &Node, offset: usize) -> Scope {
    let stmt = scope_statement(statement, offset);
    let mut refs = Vec::new();
    collect(stmt, offset, &mut refs);
    Scope { refs }
}

fn collect(stmt: &Node, offset: usize, refs: &mut Vec<TableRef>) {
    for child in stmt.children() {
        match child {
            Node::Clause { kind, children, .. } => match kind {
                ClauseKind::From
                | ClauseKind::Join
                | ClauseKind::InsertTarget
                | ClauseKind::UpdateTarget
                | ClauseKind::DeleteTarget => {
                    for node in children {
                        if let Some(table_ref) = table_ref_from_node(node) {
                            refs.push(table_ref);
                        }
                    }
                }
                _ => {}
            },
            // INSERT ... SELECT: the nested select contributes its own
            // references when the cursor is inside it
            Node::Statement { .. } if child.span().touches(offset) => {
                collect(child, offset, refs);
            }
            _ => {}
        }
    }
}

fn table_ref_from_node(node: &Node) -> Option<TableRef> {
    match node {
        Node::Identifier { name, quoted, .. } => Some(TableRef::table(name.clone(), *quoted)),
        Node::MemberRef { parent, child, .. } => {
            let child = child.as_ref()?;
            let mut table_ref =
                TableRef::table(child.identifier_name()?.to_string(), child.identifier_quoted());
            table_ref.database = parent.identifier_name().map(|s| s.to_string());
            Some(table_ref)
        }
        Node::AliasedItem { expr, alias, .. } => {
            let alias_node = alias.as_ref();
            if let Node::Subquery { statement, .. } = &**expr {
                let alias_node = alias_node?;
                let mut table_ref = TableRef::table(
                    alias_node.identifier_name()?.to_string(),
                    alias_node.identifier_quoted(),
                );
                table_ref.derived_columns = Some(projection_of(statement));
                Some(table_ref)
            } else {
                let mut table_ref = table_ref_from_node(expr)?;
                if let Some(alias_node) = alias_node {
                    table_ref.alias = alias_node.identifier_name().map(|s| s.to_string());
                    table_ref.alias_quoted = alias_node.identifier_quoted();
                }
                Some(table_ref)
            }
        }
        _ => None,
    }
}

/// Column names a SELECT statement exposes to an enclosing query: the
/// alias if present, else the rightmost identifier of the expression,
/// else a synthetic `?column?`.
pub fn projection_of(stmt: &Node) -> Vec<String> {
    let list = match stmt.find_clause(ClauseKind::SelectList) {
        Some(clause) => clause,
        None => return Vec::new(),
    };
    let items = match list.children().first() {
        Some(Node::IdentifierList { items, .. }) => items.iter().collect::<Vec<_>>(),
        _ => Vec::new(),
    };

    let mut columns = Vec::new();
    for item in items {
        if matches!(item, Node::Placeholder { .. }) {
            continue;
        }
        let name = match item {
            Node::AliasedItem {
                alias: Some(alias), ..
            } => alias.identifier_name().map(|s| s.to_string()),
            other => other
                .rightmost_identifier()
                .and_then(|n| n.identifier_name())
                .map(|s| s.to_string()),
        };
        columns.push(name.unwrap_or_else(|| SYNTHETIC_COLUMN.to_string()));
    }
    columns
}
