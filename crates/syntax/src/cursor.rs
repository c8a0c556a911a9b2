// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Cursor locator
//!
//! Given the parsed statement list and a cursor offset, select the focused
//! statement and classify the syntactic context at the cursor: which kind
//! of completion is valid there, whether a dotted prefix restricts the
//! owner, and what partial word the user has typed.
//!
//! Containment is inclusive at span ends ([`Span::touches`]): a cursor at
//! the very end of an unclosed clause behaves as if a placeholder
//! identifier existed at the cursor.

use crate::ast::{ClauseKind, Node};
use crate::token::Span;

/// What kind of completion is syntactically valid at the cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextKind {
    SelectListItem,
    FromTable,
    JoinTable,
    InsertTargetTable,
    InsertColumn,
    UpdateTargetTable,
    UpdateSetColumn,
    DeleteFromTable,
    WhereOperand,
    JoinOnOperand,
    GroupByItem,
    OrderByItem,
    CaseOperand,
    /// The cursor is inside a subquery; the payload is the context computed
    /// against the inner statement.
    SubqueryBody(Box<CompletionContext>),
    Unknown,
}

/// The classified cursor context.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionContext {
    pub kind: ContextKind,
    /// Identifier before a `.` at the cursor, restricting candidates to
    /// that owner (table alias, table, or database).
    pub dotted_prefix: Option<String>,
    /// Contiguous identifier characters immediately left of the cursor,
    /// used for filtering. Empty when the cursor follows whitespace or
    /// punctuation.
    pub prefix_text: String,
    /// Span of the deepest node the cursor sits in.
    pub span: Span,
}

impl CompletionContext {
    fn unknown(offset: usize, prefix_text: String) -> Self {
        Self {
            kind: ContextKind::Unknown,
            dotted_prefix: None,
            prefix_text,
            span: Span::empty_at(offset),
        }
    }
}

/// Select the focused statement for `offset`.
///
/// A cursor exactly on a `;` boundary belongs to the statement on the
/// left; a cursor past the last statement focuses the last one.
pub fn focused_statement_index(statements: &[Node], offset: usize) -> Option<usize> {
    if statements.is_empty() {
        return None;
    }
    let idx = statements
        .iter()
        .position(|stmt| offset <= stmt.span().end)
        .unwrap_or(statements.len() - 1);
    Some(idx)
}

/// Compute the completion context at `offset`.
///
/// Returns the focused statement index (if any statement exists) together
/// with the classified context. `source` is the document text the
/// statements were parsed from; it supplies the typed prefix.
pub fn locate(
    statements: &[Node],
    source: &str,
    offset: usize,
) -> (Option<usize>, CompletionContext) {
    let prefix = prefix_text(source, offset);
    let idx = match focused_statement_index(statements, offset) {
        Some(idx) => idx,
        None => return (None, CompletionContext::unknown(offset, prefix)),
    };
    let context = context_in_statement(&statements[idx], source, offset);
    (Some(idx), context)
}

/// The statement whose scope governs `offset`: the statement of the
/// innermost subquery containing the offset, or `stmt` itself.
///
/// The scope analyzer uses this so that completion inside a subquery sees
/// only the subquery's own table references.
pub fn scope_statement<'a>(stmt: &'a Node, offset: usize) -> &'a Node {
    let path = descend(stmt, offset);
    let mut result = stmt;
    for node in path {
        if let Node::Subquery { statement, .. } = node {
            result = statement.as_ref();
        }
    }
    result
}

fn context_in_statement(stmt: &Node, source: &str, offset: usize) -> CompletionContext {
    let path = descend(stmt, offset);
    let prefix = prefix_text(source, offset);
    let deepest_span = path
        .last()
        .map(|n| n.span())
        .unwrap_or_else(|| Span::empty_at(offset));

    // A cursor inside a subquery classifies against the inner statement.
    if let Some(Node::Subquery { statement, .. }) = path
        .iter()
        .rev()
        .find(|n| matches!(n, Node::Subquery { .. }))
    {
        let inner = context_in_statement(statement, source, offset);
        return CompletionContext {
            dotted_prefix: inner.dotted_prefix.clone(),
            prefix_text: inner.prefix_text.clone(),
            span: inner.span,
            kind: ContextKind::SubqueryBody(Box::new(inner)),
        };
    }

    let dotted_prefix = path.iter().rev().find_map(|node| match node {
        Node::MemberRef { parent, dot, .. } if offset >= dot.end => {
            parent.identifier_name().map(|s| s.to_string())
        }
        _ => None,
    });

    let mut kind = ContextKind::Unknown;
    for node in path.iter().rev() {
        match node {
            Node::CaseExpr { .. } => {
                kind = ContextKind::CaseOperand;
                break;
            }
            Node::Clause { kind: clause, .. } => {
                kind = clause_context(*clause);
                break;
            }
            _ => {}
        }
    }

    CompletionContext {
        kind,
        dotted_prefix,
        prefix_text: prefix,
        span: deepest_span,
    }
}

fn clause_context(kind: ClauseKind) -> ContextKind {
    match kind {
        ClauseKind::SelectList => ContextKind::SelectListItem,
        ClauseKind::From => ContextKind::FromTable,
        ClauseKind::Join => ContextKind::JoinTable,
        ClauseKind::JoinOn => ContextKind::JoinOnOperand,
        // HAVING completes like a WHERE operand
        ClauseKind::Where | ClauseKind::Having => ContextKind::WhereOperand,
        ClauseKind::GroupBy => ContextKind::GroupByItem,
        ClauseKind::OrderBy => ContextKind::OrderByItem,
        ClauseKind::InsertTarget => ContextKind::InsertTargetTable,
        ClauseKind::InsertColumns => ContextKind::InsertColumn,
        ClauseKind::UpdateTarget => ContextKind::UpdateTargetTable,
        ClauseKind::UpdateSet => ContextKind::UpdateSetColumn,
        ClauseKind::DeleteTarget => ContextKind::DeleteFromTable,
        ClauseKind::Limit | ClauseKind::Values => ContextKind::Unknown,
    }
}

/// Root-to-leaf path of nodes touching `offset`. When adjacent siblings
/// share a boundary the rightmost one wins, so a cursor at the end of a
/// just-typed identifier stays with it.
fn descend(stmt: &Node, offset: usize) -> Vec<&Node> {
    let mut path: Vec<&Node> = vec![stmt];
    loop {
        let current = match path.last() {
            Some(node) => *node,
            None => break,
        };
        let next = current
            .children()
            .into_iter()
            .filter(|child| child.span().touches(offset))
            .last();
        match next {
            Some(child) => path.push(child),
            None => break,
        }
    }
    path
}

/// The identifier-character run immediately left of the cursor.
fn prefix_text(source: &str, offset: usize) -> String {
    let chars: Vec<char> = source.chars().collect();
    let offset = offset.min(chars.len());
    let mut start = offset;
    while start > 0 {
        let ch = chars[start - 1];
        if ch.is_alphanumeric() || ch == '_' || ch == '$' {
            start -= 1;
        } else {
            break;
        }
    }
    chars[start..offset].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::StatementKind;
    use crate::parser::parse;

    fn context_at(input: &str, offset: usize) -> CompletionContext {
        let statements = parse(input);
        locate(&statements, input, offset).1
    }

    #[test]
    fn test_select_list_item_in_empty_list() {
        let ctx = context_at("select  from city", 7);
        assert_eq!(ctx.kind, ContextKind::SelectListItem);
        assert_eq!(ctx.prefix_text, "");
        assert!(ctx.dotted_prefix.is_none());
    }

    #[test]
    fn test_select_list_prefix() {
        let ctx = context_at("select Cou from city", 10);
        assert_eq!(ctx.kind, ContextKind::SelectListItem);
        assert_eq!(ctx.prefix_text, "Cou");
    }

    #[test]
    fn test_dotted_prefix_after_dot() {
        let ctx = context_at("select c. from city as c", 9);
        assert_eq!(ctx.kind, ContextKind::SelectListItem);
        assert_eq!(ctx.dotted_prefix.as_deref(), Some("c"));
        assert_eq!(ctx.prefix_text, "");
    }

    #[test]
    fn test_dotted_prefix_with_partial_child() {
        let ctx = context_at("select c.C from city as c", 10);
        assert_eq!(ctx.dotted_prefix.as_deref(), Some("c"));
        assert_eq!(ctx.prefix_text, "C");
    }

    #[test]
    fn test_cursor_before_dot_is_not_dotted() {
        // cursor between `c` and `.` completes on the identifier itself
        let ctx = context_at("select c. from city as c", 8);
        assert!(ctx.dotted_prefix.is_none());
        assert_eq!(ctx.prefix_text, "c");
    }

    #[test]
    fn test_statement_boundary_prefers_left() {
        let input = "SELECT c. FROM city as c;SELECT c. FROM country as c;";
        let statements = parse(input);
        assert_eq!(focused_statement_index(&statements, 9), Some(0));
        assert_eq!(focused_statement_index(&statements, 25), Some(0));
        assert_eq!(focused_statement_index(&statements, 34), Some(1));
    }

    #[test]
    fn test_from_table_at_end_of_input() {
        let ctx = context_at("select CountryCode from ", 24);
        assert_eq!(ctx.kind, ContextKind::FromTable);
    }

    #[test]
    fn test_from_table_with_prefix() {
        let ctx = context_at("select CountryCode from co", 26);
        assert_eq!(ctx.kind, ContextKind::FromTable);
        assert_eq!(ctx.prefix_text, "co");
    }

    #[test]
    fn test_join_table() {
        let ctx = context_at("select CountryCode from city join ", 34);
        assert_eq!(ctx.kind, ContextKind::JoinTable);
    }

    #[test]
    fn test_join_on_operand() {
        let ctx = context_at("select * from city left join country on ", 40);
        assert_eq!(ctx.kind, ContextKind::JoinOnOperand);
    }

    #[test]
    fn test_where_operand_left_of_comparison() {
        let ctx = context_at("select * from city where  = ID", 25);
        assert_eq!(ctx.kind, ContextKind::WhereOperand);
    }

    #[test]
    fn test_where_operand_right_of_comparison() {
        let ctx = context_at("select * from city where ID = ", 30);
        assert_eq!(ctx.kind, ContextKind::WhereOperand);
    }

    #[test]
    fn test_where_dotted_table() {
        let ctx = context_at("select * from city where city.", 30);
        assert_eq!(ctx.kind, ContextKind::WhereOperand);
        assert_eq!(ctx.dotted_prefix.as_deref(), Some("city"));
    }

    #[test]
    fn test_identifier_list_keeps_owning_clause() {
        let ctx = context_at("select id,  from city", 11);
        assert_eq!(ctx.kind, ContextKind::SelectListItem);
    }

    #[test]
    fn test_insert_contexts() {
        assert_eq!(
            context_at("INSERT INTO ", 12).kind,
            ContextKind::InsertTargetTable
        );
        assert_eq!(
            context_at("INSERT INTO city (", 18).kind,
            ContextKind::InsertColumn
        );
        let ctx = context_at("INSERT INTO city (cou", 21);
        assert_eq!(ctx.kind, ContextKind::InsertColumn);
        assert_eq!(ctx.prefix_text, "cou");
    }

    #[test]
    fn test_update_contexts() {
        assert_eq!(
            context_at("UPDATE ", 7).kind,
            ContextKind::UpdateTargetTable
        );
        assert_eq!(
            context_at("UPDATE city SET ", 16).kind,
            ContextKind::UpdateSetColumn
        );
        let ctx = context_at("UPDATE city SET CountryCode=12, Na", 34);
        assert_eq!(ctx.kind, ContextKind::UpdateSetColumn);
        assert_eq!(ctx.prefix_text, "Na");
    }

    #[test]
    fn test_delete_context() {
        assert_eq!(
            context_at("DELETE FROM ", 12).kind,
            ContextKind::DeleteFromTable
        );
    }

    #[test]
    fn test_group_by_and_order_by() {
        assert_eq!(
            context_at("SELECT CountryCode, COUNT(*) FROM city GROUP BY ", 48).kind,
            ContextKind::GroupByItem
        );
        assert_eq!(
            context_at("SELECT ID, Name FROM city ORDER BY ", 35).kind,
            ContextKind::OrderByItem
        );
    }

    #[test]
    fn test_case_positions_all_yield_case_operand() {
        // after CASE
        let ctx = context_at(
            "SELECT `Language`, CASE Is WHEN 'T' THEN 'official' END AS o FROM countrylanguage;",
            26,
        );
        assert_eq!(ctx.kind, ContextKind::CaseOperand);
        assert_eq!(ctx.prefix_text, "Is");

        // in a WHEN condition
        let ctx = context_at(
            "SELECT CASE IsOfficial WHEN Is THEN 'official' END AS o FROM countrylanguage;",
            30,
        );
        assert_eq!(ctx.kind, ContextKind::CaseOperand);

        // in a THEN result
        let ctx = context_at(
            "SELECT CASE IsOfficial WHEN 'T' THEN Is END AS o FROM countrylanguage;",
            39,
        );
        assert_eq!(ctx.kind, ContextKind::CaseOperand);
    }

    #[test]
    fn test_subquery_body_wraps_inner_context() {
        let ctx = context_at("SELECT * FROM (SELECT Cou FROM city)", 25);
        match ctx.kind {
            ContextKind::SubqueryBody(inner) => {
                assert_eq!(inner.kind, ContextKind::SelectListItem);
                assert_eq!(inner.prefix_text, "Cou");
            }
            other => panic!("expected SubqueryBody, got {other:?}"),
        }
        assert_eq!(ctx.prefix_text, "Cou");
    }

    #[test]
    fn test_subquery_from_context() {
        let ctx = context_at("SELECT * FROM (SELECT * FROM ", 29);
        match ctx.kind {
            ContextKind::SubqueryBody(inner) => {
                assert_eq!(inner.kind, ContextKind::FromTable);
            }
            other => panic!("expected SubqueryBody, got {other:?}"),
        }
    }

    #[test]
    fn test_outer_select_next_to_subquery() {
        // cursor in the outer select list, not inside the subquery
        let ctx = context_at(
            "SELECT  FROM (SELECT ID as city_id FROM city) as t",
            7,
        );
        assert_eq!(ctx.kind, ContextKind::SelectListItem);
    }

    #[test]
    fn test_scope_statement_picks_innermost_subquery() {
        let input = "SELECT * FROM (SELECT Cou FROM city)";
        let statements = parse(input);
        let inner = scope_statement(&statements[0], 25);
        assert!(matches!(
            inner,
            Node::Statement {
                kind: StatementKind::Select,
                ..
            }
        ));
        assert_ne!(inner.span(), statements[0].span());
    }

    #[test]
    fn test_unknown_for_other_statements() {
        let ctx = context_at("CREATE TABLE foo (id int)", 13);
        assert_eq!(ctx.kind, ContextKind::Unknown);
    }

    #[test]
    fn test_empty_input() {
        let statements = parse("");
        let (idx, ctx) = locate(&statements, "", 0);
        assert!(idx.is_none());
        assert_eq!(ctx.kind, ContextKind::Unknown);
    }
}
