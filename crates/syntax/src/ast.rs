// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Loose SQL syntax tree
//!
//! Tagged node variants with source spans. The tree is "loose": the parser
//! records whatever structure it can recover and fills gaps with
//! [`Node::Placeholder`] nodes, so every cursor offset falls inside some
//! meaningful node. Nodes hold no parent pointers; walks pass ancestry
//! explicitly.
//!
//! Invariants kept by the parser:
//! - every child's span lies within its parent's span;
//! - sibling spans never overlap and appear in source order.

use crate::token::Span;

/// Top-level statement classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    /// Anything else (DDL, SET, ...): tokens consumed to the statement
    /// boundary without further structure.
    Other,
}

/// Clause classification within a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    SelectList,
    From,
    Join,
    JoinOn,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    InsertTarget,
    InsertColumns,
    Values,
    UpdateTarget,
    UpdateSet,
    DeleteTarget,
}

/// One `WHEN condition THEN result` arm of a CASE expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseWhen {
    pub condition: Node,
    pub result: Node,
}

/// A node in the loose syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Statement {
        kind: StatementKind,
        children: Vec<Node>,
        span: Span,
    },
    Clause {
        kind: ClauseKind,
        children: Vec<Node>,
        span: Span,
    },
    Identifier {
        name: String,
        quoted: bool,
        span: Span,
    },
    /// `parent.child`; `child` is `None` when nothing follows the dot yet,
    /// which is exactly the state the completer cares about.
    MemberRef {
        parent: Box<Node>,
        child: Option<Box<Node>>,
        /// Span of the `.` token, used to decide whether the cursor sits
        /// before or after the dot.
        dot: Span,
        span: Span,
    },
    /// `expr [AS] alias`, e.g. `city c`, `city AS c`, `(SELECT ...) AS t`.
    AliasedItem {
        expr: Box<Node>,
        alias: Option<Box<Node>>,
        keyword_as: bool,
        span: Span,
    },
    /// A parenthesized SELECT.
    Subquery {
        statement: Box<Node>,
        span: Span,
    },
    /// Parenthesized expression or list that is not a subquery.
    Parenthesis {
        children: Vec<Node>,
        span: Span,
    },
    /// Comma-separated items: select lists, insert column lists, GROUP
    /// BY / ORDER BY lists, SET assignment lists.
    IdentifierList {
        items: Vec<Node>,
        span: Span,
    },
    CaseExpr {
        operand: Option<Box<Node>>,
        whens: Vec<CaseWhen>,
        else_expr: Option<Box<Node>>,
        span: Span,
    },
    /// `name(args)`.
    FunctionCall {
        name: Box<Node>,
        args: Box<Node>,
        span: Span,
    },
    /// Arithmetic or logical connective: `+ - * / % AND OR IS IN LIKE ...`.
    Operator {
        op: String,
        lhs: Box<Node>,
        rhs: Box<Node>,
        span: Span,
    },
    /// Comparison: `= < > <= >= <> !=`.
    Comparison {
        op: String,
        lhs: Box<Node>,
        rhs: Box<Node>,
        span: Span,
    },
    /// Number, string, `*`, NULL.
    Literal {
        text: String,
        span: Span,
    },
    /// Synthesized where the grammar expected a construct that is absent.
    /// The span is empty, anchored where the construct would start.
    Placeholder {
        span: Span,
    },
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Statement { span, .. }
            | Node::Clause { span, .. }
            | Node::Identifier { span, .. }
            | Node::MemberRef { span, .. }
            | Node::AliasedItem { span, .. }
            | Node::Subquery { span, .. }
            | Node::Parenthesis { span, .. }
            | Node::IdentifierList { span, .. }
            | Node::CaseExpr { span, .. }
            | Node::FunctionCall { span, .. }
            | Node::Operator { span, .. }
            | Node::Comparison { span, .. }
            | Node::Literal { span, .. }
            | Node::Placeholder { span } => *span,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Statement { children, .. }
            | Node::Clause { children, .. }
            | Node::Parenthesis { children, .. } => children.iter().collect(),
            Node::IdentifierList { items, .. } => items.iter().collect(),
            Node::MemberRef { parent, child, .. } => {
                let mut out: Vec<&Node> = vec![parent.as_ref()];
                if let Some(child) = child {
                    out.push(child.as_ref());
                }
                out
            }
            Node::AliasedItem { expr, alias, .. } => {
                let mut out: Vec<&Node> = vec![expr.as_ref()];
                if let Some(alias) = alias {
                    out.push(alias.as_ref());
                }
                out
            }
            Node::Subquery { statement, .. } => vec![statement.as_ref()],
            Node::CaseExpr {
                operand,
                whens,
                else_expr,
                ..
            } => {
                let mut out: Vec<&Node> = Vec::new();
                if let Some(operand) = operand {
                    out.push(operand.as_ref());
                }
                for when in whens {
                    out.push(&when.condition);
                    out.push(&when.result);
                }
                if let Some(else_expr) = else_expr {
                    out.push(else_expr.as_ref());
                }
                out
            }
            Node::FunctionCall { name, args, .. } => vec![name.as_ref(), args.as_ref()],
            Node::Operator { lhs, rhs, .. } | Node::Comparison { lhs, rhs, .. } => {
                vec![lhs.as_ref(), rhs.as_ref()]
            }
            Node::Identifier { .. } | Node::Literal { .. } | Node::Placeholder { .. } => {
                Vec::new()
            }
        }
    }

    /// Name of this node if it is an identifier.
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Node::Identifier { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether this identifier was quoted in the source.
    pub fn identifier_quoted(&self) -> bool {
        matches!(self, Node::Identifier { quoted: true, .. })
    }

    /// The rightmost identifier anywhere in this subtree.
    ///
    /// Used to derive a column name from a subquery projection item that
    /// has no alias (`SELECT t.Name` exposes `Name`).
    pub fn rightmost_identifier(&self) -> Option<&Node> {
        if matches!(self, Node::Identifier { .. }) {
            return Some(self);
        }
        self.children()
            .iter()
            .rev()
            .find_map(|child| child.rightmost_identifier())
    }

    /// Clause lookup helper for statements.
    pub fn find_clause(&self, kind: ClauseKind) -> Option<&Node> {
        match self {
            Node::Statement { children, .. } => children.iter().find(|c| {
                matches!(c, Node::Clause { kind: k, .. } if *k == kind)
            }),
            _ => None,
        }
    }
}
