// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Permissive SQL parser
//!
//! Recursive descent over the token stream with error recovery as a
//! first-class concern: wherever the grammar expects a construct that is
//! absent (identifier after a dot, expression after `=`, table name after
//! FROM), the parser emits an empty-span [`Node::Placeholder`] and
//! continues. The parser never rejects input; mid-edit SQL still produces
//! a tree the cursor locator can classify.
//!
//! Statements split on `;` at depth zero. Clause spans extend from the
//! introducing keyword up to the start of the next clause (or the end of
//! input), so a cursor in the whitespace after an unfinished clause still
//! falls inside it.

use crate::ast::{CaseWhen, ClauseKind, Node, StatementKind};
use crate::lexer::tokenize;
use crate::token::{Span, Token, TokenKind};

/// Parse `input` into a list of top-level statements. Never fails.
pub fn parse(input: &str) -> Vec<Node> {
    let tokens: Vec<Token> = tokenize(input)
        .into_iter()
        .filter(|t| !t.is_trivia())
        .collect();
    Parser::new(tokens).parse_statements()
}

/// Keywords that connect two expressions infix-style.
const INFIX_KEYWORDS: &[&str] = &["AND", "OR", "IS", "IN", "LIKE", "BETWEEN", "NOT"];

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// End offset of the most recently consumed token.
    last_end: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            last_end: 0,
        }
    }

    fn cur(&self) -> &Token {
        // the token stream always ends with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self, ahead: usize) -> &Token {
        let idx = (self.pos + ahead).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn at_eof(&self) -> bool {
        self.cur().kind == TokenKind::Eof
    }

    fn at_keyword(&self, word: &str) -> bool {
        self.cur().is_keyword(word)
    }

    fn at_punct(&self, ch: char) -> bool {
        self.cur().is_punct(ch)
    }

    fn bump(&mut self) -> Token {
        let token = self.cur().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        self.last_end = token.span.end.max(self.last_end);
        token
    }

    /// Start offset of the current token; for `Eof` this is the end of
    /// input. Clause spans end here, which stretches them across any
    /// trailing whitespace.
    fn boundary(&self) -> usize {
        self.cur().span.start
    }

    fn placeholder_here(&self) -> Node {
        Node::Placeholder {
            span: Span::empty_at(self.boundary()),
        }
    }

    /// Statement span: clause spans stretch to the next-token boundary, so
    /// the statement must cover its children, not just consumed tokens.
    fn statement_span(&self, start: usize, children: &[Node]) -> Span {
        let end = children
            .iter()
            .map(|c| c.span().end)
            .max()
            .unwrap_or(start)
            .max(self.last_end)
            .max(start);
        Span::new(start, end)
    }

    // ---- statements ----------------------------------------------------

    fn parse_statements(mut self) -> Vec<Node> {
        let mut statements = Vec::new();
        while !self.at_eof() {
            statements.push(self.parse_statement());
        }
        statements
    }

    fn parse_statement(&mut self) -> Node {
        let mut stmt = if self.at_keyword("SELECT") {
            self.parse_select()
        } else if self.at_keyword("INSERT") {
            self.parse_insert()
        } else if self.at_keyword("UPDATE") {
            self.parse_update()
        } else if self.at_keyword("DELETE") {
            self.parse_delete()
        } else {
            self.parse_other()
        };

        if self.at_punct(';') {
            let semi = self.bump();
            if let Node::Statement { span, .. } = &mut stmt {
                span.end = semi.span.end;
            }
        }
        stmt
    }

    fn parse_select(&mut self) -> Node {
        let start = self.cur().span.start;
        let mut children = Vec::new();
        self.parse_select_core(&mut children);
        self.parse_select_tail(&mut children);
        let span = self.statement_span(start, &children);
        Node::Statement {
            kind: StatementKind::Select,
            children,
            span,
        }
    }

    /// `SELECT [DISTINCT|ALL] <list>` — pushes the select-list clause.
    fn parse_select_core(&mut self, children: &mut Vec<Node>) {
        let select_kw = self.bump();
        if self.at_keyword("DISTINCT") || self.at_keyword("ALL") {
            self.bump();
        }
        let list_start = self.last_end.max(select_kw.span.end);
        let list = self.parse_expression_list();
        let span = Span::new(list_start, self.boundary().max(list_start));
        children.push(Node::Clause {
            kind: ClauseKind::SelectList,
            children: vec![list],
            span,
        });
    }

    /// Clauses after the select list; also reused for the tails of UPDATE
    /// and DELETE, which permissively accept the same set.
    fn parse_select_tail(&mut self, children: &mut Vec<Node>) {
        loop {
            if self.at_keyword("FROM") {
                children.push(self.parse_from_clause());
            } else if self.at_join_start() {
                children.push(self.parse_join_clause());
            } else if self.at_keyword("WHERE") {
                children.push(self.parse_expr_clause(ClauseKind::Where));
            } else if self.at_keyword("HAVING") {
                children.push(self.parse_expr_clause(ClauseKind::Having));
            } else if self.at_keyword("GROUP") {
                children.push(self.parse_by_list_clause(ClauseKind::GroupBy));
            } else if self.at_keyword("ORDER") {
                children.push(self.parse_by_list_clause(ClauseKind::OrderBy));
            } else if self.at_keyword("LIMIT") {
                children.push(self.parse_limit_clause());
            } else if self.at_keyword("UNION") {
                self.bump();
                if self.at_keyword("ALL") || self.at_keyword("DISTINCT") {
                    self.bump();
                }
                if self.at_keyword("SELECT") {
                    self.parse_select_core(children);
                } else {
                    break;
                }
            } else {
                break;
            }
        }
    }

    fn at_join_start(&self) -> bool {
        self.at_keyword("JOIN")
            || self.at_keyword("LEFT")
            || self.at_keyword("RIGHT")
            || self.at_keyword("INNER")
            || self.at_keyword("OUTER")
    }

    fn parse_from_clause(&mut self) -> Node {
        let start = self.cur().span.start;
        self.bump(); // FROM
        let refs = self.parse_table_ref_list();
        Node::Clause {
            kind: ClauseKind::From,
            children: refs,
            span: Span::new(start, self.boundary().max(start)),
        }
    }

    fn parse_join_clause(&mut self) -> Node {
        let start = self.cur().span.start;
        while self.at_keyword("LEFT")
            || self.at_keyword("RIGHT")
            || self.at_keyword("INNER")
            || self.at_keyword("OUTER")
        {
            self.bump();
        }
        if self.at_keyword("JOIN") {
            self.bump();
        }
        let mut children = vec![self.parse_table_ref()];
        if self.at_keyword("ON") {
            let on_start = self.cur().span.start;
            self.bump();
            let expr = self.parse_expression();
            children.push(Node::Clause {
                kind: ClauseKind::JoinOn,
                children: vec![expr],
                span: Span::new(on_start, self.boundary().max(on_start)),
            });
        }
        Node::Clause {
            kind: ClauseKind::Join,
            children,
            span: Span::new(start, self.boundary().max(start)),
        }
    }

    fn parse_expr_clause(&mut self, kind: ClauseKind) -> Node {
        let start = self.cur().span.start;
        self.bump(); // WHERE / HAVING
        let expr = self.parse_expression();
        Node::Clause {
            kind,
            children: vec![expr],
            span: Span::new(start, self.boundary().max(start)),
        }
    }

    /// `GROUP BY <list>` / `ORDER BY <list>`.
    fn parse_by_list_clause(&mut self, kind: ClauseKind) -> Node {
        let start = self.cur().span.start;
        self.bump(); // GROUP / ORDER
        if self.at_keyword("BY") {
            self.bump();
        }
        let list = self.parse_expression_list();
        Node::Clause {
            kind,
            children: vec![list],
            span: Span::new(start, self.boundary().max(start)),
        }
    }

    fn parse_limit_clause(&mut self) -> Node {
        let start = self.cur().span.start;
        self.bump(); // LIMIT
        let mut children = Vec::new();
        while matches!(self.cur().kind, TokenKind::Number) || self.at_punct(',') {
            let token = self.bump();
            if let TokenKind::Number = token.kind {
                children.push(Node::Literal {
                    text: token.text,
                    span: token.span,
                });
            }
        }
        Node::Clause {
            kind: ClauseKind::Limit,
            children,
            span: Span::new(start, self.boundary().max(start)),
        }
    }

    fn parse_insert(&mut self) -> Node {
        let start = self.cur().span.start;
        self.bump(); // INSERT
        if self.at_keyword("INTO") {
            self.bump();
        }
        let mut children = Vec::new();

        let target_start = self.last_end;
        let target = self.parse_table_ref();
        children.push(Node::Clause {
            kind: ClauseKind::InsertTarget,
            children: vec![target],
            span: Span::new(target_start, self.boundary().max(target_start)),
        });

        if self.at_punct('(') {
            let open = self.bump();
            let list = self.parse_expression_list();
            let end = if self.at_punct(')') {
                self.bump().span.end
            } else {
                self.boundary()
            };
            children.push(Node::Clause {
                kind: ClauseKind::InsertColumns,
                children: vec![list],
                span: Span::new(open.span.start, end.max(open.span.start)),
            });
        }

        if self.at_keyword("VALUES") {
            let values_start = self.cur().span.start;
            self.bump();
            let mut rows = Vec::new();
            while self.at_punct('(') {
                rows.push(self.parse_parenthesis());
                if self.at_punct(',') {
                    self.bump();
                } else {
                    break;
                }
            }
            children.push(Node::Clause {
                kind: ClauseKind::Values,
                children: rows,
                span: Span::new(values_start, self.boundary().max(values_start)),
            });
        } else if self.at_keyword("SELECT") {
            children.push(self.parse_select());
        }

        let span = self.statement_span(start, &children);
        Node::Statement {
            kind: StatementKind::Insert,
            children,
            span,
        }
    }

    fn parse_update(&mut self) -> Node {
        let start = self.cur().span.start;
        self.bump(); // UPDATE
        let mut children = Vec::new();

        let target_start = self.last_end;
        let target = self.parse_table_ref();
        children.push(Node::Clause {
            kind: ClauseKind::UpdateTarget,
            children: vec![target],
            span: Span::new(target_start, self.boundary().max(target_start)),
        });

        if self.at_keyword("SET") {
            let set_start = self.cur().span.start;
            self.bump();
            let list = self.parse_expression_list();
            children.push(Node::Clause {
                kind: ClauseKind::UpdateSet,
                children: vec![list],
                span: Span::new(set_start, self.boundary().max(set_start)),
            });
        }

        self.parse_select_tail(&mut children);

        let span = self.statement_span(start, &children);
        Node::Statement {
            kind: StatementKind::Update,
            children,
            span,
        }
    }

    fn parse_delete(&mut self) -> Node {
        let start = self.cur().span.start;
        self.bump(); // DELETE
        if self.at_keyword("FROM") {
            self.bump();
        }
        let mut children = Vec::new();

        let target_start = self.last_end;
        let target = self.parse_table_ref();
        children.push(Node::Clause {
            kind: ClauseKind::DeleteTarget,
            children: vec![target],
            span: Span::new(target_start, self.boundary().max(target_start)),
        });

        self.parse_select_tail(&mut children);

        let span = self.statement_span(start, &children);
        Node::Statement {
            kind: StatementKind::Delete,
            children,
            span,
        }
    }

    /// Unrecognized statement: consume to the boundary, keeping identifier
    /// atoms so spans exist for the locator.
    fn parse_other(&mut self) -> Node {
        let start = self.cur().span.start;
        let mut children = Vec::new();
        while !self.at_eof() && !self.at_punct(';') {
            let token = self.bump();
            if token.is_name() {
                children.push(Node::Identifier {
                    name: token.name(),
                    quoted: token.kind == TokenKind::QuotedIdentifier,
                    span: token.span,
                });
            }
        }
        let span = self.statement_span(start, &children);
        Node::Statement {
            kind: StatementKind::Other,
            children,
            span,
        }
    }

    // ---- table references ----------------------------------------------

    fn parse_table_ref_list(&mut self) -> Vec<Node> {
        let mut refs = Vec::new();
        loop {
            let before = self.pos;
            refs.push(self.parse_table_ref());
            let progressed = self.pos > before;
            if self.at_punct(',') {
                self.bump();
                continue;
            }
            if !progressed {
                break;
            }
            break;
        }
        refs
    }

    /// `ident`, `db.ident`, `(subquery)`, each optionally `[AS] alias`.
    fn parse_table_ref(&mut self) -> Node {
        let base = if self.at_punct('(') && self.peek(1).is_keyword("SELECT") {
            self.parse_subquery()
        } else if self.cur().is_name() {
            self.parse_dotted_name()
        } else {
            return self.placeholder_here();
        };
        self.attach_alias(base)
    }

    /// Wrap `expr` in an AliasedItem when `[AS] alias` follows.
    fn attach_alias(&mut self, expr: Node) -> Node {
        let keyword_as = if self.at_keyword("AS") {
            self.bump();
            true
        } else {
            false
        };
        let alias = if self.cur().is_name() {
            let token = self.bump();
            Some(Box::new(Node::Identifier {
                name: token.name(),
                quoted: token.kind == TokenKind::QuotedIdentifier,
                span: token.span,
            }))
        } else {
            None
        };
        if !keyword_as && alias.is_none() {
            return expr;
        }
        let start = expr.span().start;
        let end = alias
            .as_ref()
            .map(|a| a.span().end)
            .unwrap_or(self.last_end)
            .max(start);
        Node::AliasedItem {
            expr: Box::new(expr),
            alias,
            keyword_as,
            span: Span::new(start, end),
        }
    }

    /// Identifier, possibly dotted. Nothing after a dot yields a
    /// `MemberRef` with no child — the cursor anchor the completer needs.
    fn parse_dotted_name(&mut self) -> Node {
        let token = self.bump();
        let mut node = Node::Identifier {
            name: token.name(),
            quoted: token.kind == TokenKind::QuotedIdentifier,
            span: token.span,
        };
        while self.at_punct('.') {
            let dot = self.bump();
            let child = if self.cur().is_name() {
                let t = self.bump();
                Some(Box::new(Node::Identifier {
                    name: t.name(),
                    quoted: t.kind == TokenKind::QuotedIdentifier,
                    span: t.span,
                }))
            } else {
                None
            };
            let start = node.span().start;
            let end = child.as_ref().map(|c| c.span().end).unwrap_or(dot.span.end);
            // keep the last two components; `a.b.c` resolves as `b.c`
            let parent = match node {
                Node::MemberRef {
                    child: Some(inner), ..
                } => inner,
                Node::MemberRef { parent, .. } => parent,
                other => Box::new(other),
            };
            node = Node::MemberRef {
                parent,
                child,
                dot: dot.span,
                span: Span::new(start, end),
            };
        }
        node
    }

    fn parse_subquery(&mut self) -> Node {
        let open = self.bump(); // (
        let statement = self.parse_select();
        let end = if self.at_punct(')') {
            self.bump().span.end
        } else {
            statement.span().end.max(open.span.end)
        };
        Node::Subquery {
            statement: Box::new(statement),
            span: Span::new(open.span.start, end),
        }
    }

    // ---- expressions ---------------------------------------------------

    /// Comma-separated expression items wrapped in an IdentifierList.
    fn parse_expression_list(&mut self) -> Node {
        let start = self.boundary();
        let mut items = Vec::new();
        loop {
            let before = self.pos;
            items.push(self.parse_aliased_expression());
            if self.at_keyword("ASC") || self.at_keyword("DESC") {
                self.bump();
            }
            let progressed = self.pos > before;
            if self.at_punct(',') {
                self.bump();
                continue;
            }
            if !progressed {
                break;
            }
            break;
        }
        let span = items
            .iter()
            .map(|i| i.span())
            .reduce(Span::cover)
            .unwrap_or_else(|| Span::empty_at(start));
        Node::IdentifierList { items, span }
    }

    fn parse_aliased_expression(&mut self) -> Node {
        let expr = self.parse_expression();
        if matches!(expr, Node::Placeholder { .. }) {
            return expr;
        }
        self.attach_alias(expr)
    }

    fn parse_expression(&mut self) -> Node {
        let mut lhs = self.parse_primary();
        loop {
            if self.at_comparison_start() {
                let op = self.take_comparison_op();
                let rhs = self.parse_primary();
                let span = lhs.span().cover(rhs.span());
                lhs = Node::Comparison {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                    span,
                };
            } else if self.at_arithmetic_op() {
                let token = self.bump();
                let rhs = self.parse_primary();
                let span = lhs.span().cover(rhs.span());
                lhs = Node::Operator {
                    op: token.text,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                    span,
                };
            } else if self.at_infix_keyword() {
                let token = self.bump();
                let rhs = self.parse_primary();
                let span = lhs.span().cover(rhs.span());
                lhs = Node::Operator {
                    op: token.text.to_uppercase(),
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                    span,
                };
            } else {
                break;
            }
        }
        lhs
    }

    fn at_comparison_start(&self) -> bool {
        matches!(
            self.cur().kind,
            TokenKind::Punct('=') | TokenKind::Punct('<') | TokenKind::Punct('>')
        ) || (self.at_punct('!') && self.peek(1).is_punct('='))
    }

    /// Fuse adjacent punct tokens into one comparison operator
    /// (`<=`, `>=`, `<>`, `!=`); spans must be contiguous.
    fn take_comparison_op(&mut self) -> String {
        let first = self.bump();
        let mut op = first.text.clone();
        let adjacent = self.cur().span.start == first.span.end;
        let second_ok = match first.kind {
            TokenKind::Punct('<') => self.at_punct('=') || self.at_punct('>'),
            TokenKind::Punct('>') | TokenKind::Punct('!') => self.at_punct('='),
            _ => false,
        };
        if adjacent && second_ok {
            op.push_str(&self.bump().text);
        }
        op
    }

    fn at_arithmetic_op(&self) -> bool {
        matches!(
            self.cur().kind,
            TokenKind::Punct('+')
                | TokenKind::Punct('-')
                | TokenKind::Punct('*')
                | TokenKind::Punct('/')
                | TokenKind::Punct('%')
        )
    }

    fn at_infix_keyword(&self) -> bool {
        INFIX_KEYWORDS.iter().any(|k| self.at_keyword(k))
    }

    fn parse_primary(&mut self) -> Node {
        if self.cur().is_name() {
            let name = self.parse_dotted_name();
            if self.at_punct('(') {
                let args = self.parse_parenthesis();
                let span = name.span().cover(args.span());
                return Node::FunctionCall {
                    name: Box::new(name),
                    args: Box::new(args),
                    span,
                };
            }
            return name;
        }
        match self.cur().kind {
            TokenKind::Number | TokenKind::String => {
                let token = self.bump();
                Node::Literal {
                    text: token.text,
                    span: token.span,
                }
            }
            TokenKind::Punct('*') => {
                let token = self.bump();
                Node::Literal {
                    text: token.text,
                    span: token.span,
                }
            }
            TokenKind::Punct('(') => {
                if self.peek(1).is_keyword("SELECT") {
                    self.parse_subquery()
                } else {
                    self.parse_parenthesis()
                }
            }
            TokenKind::Keyword if self.at_keyword("CASE") => self.parse_case(),
            TokenKind::Keyword if self.at_keyword("NULL") => {
                let token = self.bump();
                Node::Literal {
                    text: token.text,
                    span: token.span,
                }
            }
            TokenKind::Keyword if self.at_keyword("NOT") => {
                let token = self.bump();
                let rhs = self.parse_primary();
                let span = token.span.cover(rhs.span());
                Node::Operator {
                    op: token.text.to_uppercase(),
                    lhs: Box::new(Node::Placeholder {
                        span: Span::empty_at(token.span.start),
                    }),
                    rhs: Box::new(rhs),
                    span,
                }
            }
            // cannot start an expression: placeholder without consuming,
            // callers guarantee progress
            _ => self.placeholder_here(),
        }
    }

    fn parse_parenthesis(&mut self) -> Node {
        let open = self.bump(); // (
        let mut children = Vec::new();
        if !self.at_punct(')') {
            children.push(self.parse_expression_list());
        }
        let end = if self.at_punct(')') {
            self.bump().span.end
        } else {
            self.boundary().max(open.span.end)
        };
        Node::Parenthesis {
            children,
            span: Span::new(open.span.start, end),
        }
    }

    fn parse_case(&mut self) -> Node {
        let case_kw = self.bump(); // CASE
        let operand = if !self.at_keyword("WHEN") && !self.at_keyword("END") {
            let before = self.pos;
            let expr = self.parse_expression();
            if self.pos > before {
                Some(Box::new(expr))
            } else {
                None
            }
        } else {
            None
        };

        let mut whens = Vec::new();
        while self.at_keyword("WHEN") {
            self.bump();
            let condition = self.parse_expression();
            if self.at_keyword("THEN") {
                self.bump();
            }
            let result = self.parse_expression();
            whens.push(CaseWhen { condition, result });
        }

        let else_expr = if self.at_keyword("ELSE") {
            self.bump();
            Some(Box::new(self.parse_expression()))
        } else {
            None
        };

        let end = if self.at_keyword("END") {
            self.bump().span.end
        } else {
            self.last_end.max(case_kw.span.end)
        };

        Node::CaseExpr {
            operand,
            whens,
            else_expr,
            span: Span::new(case_kw.span.start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_statement(input: &str) -> Node {
        let mut statements = parse(input);
        assert!(!statements.is_empty(), "no statements for {input:?}");
        statements.remove(0)
    }

    fn clause<'a>(stmt: &'a Node, kind: ClauseKind) -> &'a Node {
        stmt.find_clause(kind)
            .unwrap_or_else(|| panic!("missing {kind:?} in {stmt:?}"))
    }

    #[test]
    fn test_statement_split_on_semicolon() {
        let statements = parse("SELECT 1;SELECT 2;");
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].span().end, 9);
        assert_eq!(statements[1].span().start, 9);
    }

    #[test]
    fn test_subquery_stays_in_one_statement() {
        let statements = parse("SELECT * FROM (SELECT 1) t");
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_order_by_direction_keywords_stay_in_clause() {
        let statements = parse("SELECT * FROM city ORDER BY Name DESC, ID ASC");
        assert_eq!(statements.len(), 1);
        let list = statements[0]
            .find_clause(ClauseKind::OrderBy)
            .expect("order by clause")
            .children()[0]
            .children();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_select_from_basic() {
        let stmt = first_statement("SELECT id FROM city");
        assert!(matches!(
            stmt,
            Node::Statement {
                kind: StatementKind::Select,
                ..
            }
        ));
        let from = clause(&stmt, ClauseKind::From);
        let refs = from.children();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].identifier_name(), Some("city"));
    }

    #[test]
    fn test_empty_select_list_gets_placeholder() {
        let stmt = first_statement("select  from city");
        let list = clause(&stmt, ClauseKind::SelectList);
        // clause span stretches from after SELECT to the start of FROM
        assert_eq!(list.span(), Span::new(6, 8));
        let items = list.children()[0].children();
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Node::Placeholder { .. }));
    }

    #[test]
    fn test_dangling_dot_yields_childless_member_ref() {
        let stmt = first_statement("select c. from city as c");
        let list = clause(&stmt, ClauseKind::SelectList);
        let item = list.children()[0].children()[0];
        match item {
            Node::MemberRef { parent, child, .. } => {
                assert_eq!(parent.identifier_name(), Some("c"));
                assert!(child.is_none());
            }
            other => panic!("expected MemberRef, got {other:?}"),
        }
    }

    #[test]
    fn test_aliased_table_with_and_without_as() {
        for input in ["select * from city as c", "select * from city c"] {
            let stmt = first_statement(input);
            let from = clause(&stmt, ClauseKind::From);
            match from.children()[0] {
                Node::AliasedItem { expr, alias, .. } => {
                    assert_eq!(expr.identifier_name(), Some("city"));
                    assert_eq!(
                        alias.as_ref().and_then(|a| a.identifier_name()),
                        Some("c")
                    );
                }
                other => panic!("expected AliasedItem, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_database_qualified_table() {
        let stmt = first_statement("select * from world.city");
        let from = clause(&stmt, ClauseKind::From);
        match from.children()[0] {
            Node::MemberRef { parent, child, .. } => {
                assert_eq!(parent.identifier_name(), Some("world"));
                assert_eq!(
                    child.as_ref().and_then(|c| c.identifier_name()),
                    Some("city")
                );
            }
            other => panic!("expected MemberRef, got {other:?}"),
        }
    }

    #[test]
    fn test_join_with_on_condition() {
        let stmt =
            first_statement("select * from city left join country on city.CountryCode = country.Code");
        let join = clause(&stmt, ClauseKind::Join);
        let children = join.children();
        assert_eq!(children[0].identifier_name(), Some("country"));
        assert!(matches!(
            children[1],
            Node::Clause {
                kind: ClauseKind::JoinOn,
                ..
            }
        ));
    }

    #[test]
    fn test_unclosed_join_extends_to_input_end() {
        let input = "select CountryCode from city join ";
        let stmt = first_statement(input);
        let join = clause(&stmt, ClauseKind::Join);
        assert_eq!(join.span().end, input.chars().count());
        assert!(matches!(join.children()[0], Node::Placeholder { .. }));
    }

    #[test]
    fn test_where_with_missing_left_operand() {
        let stmt = first_statement("select * from city where  = ID");
        let where_clause = clause(&stmt, ClauseKind::Where);
        match where_clause.children()[0] {
            Node::Comparison { op, lhs, rhs, .. } => {
                assert_eq!(op, "=");
                assert!(matches!(**lhs, Node::Placeholder { .. }));
                assert_eq!(rhs.identifier_name(), Some("ID"));
            }
            other => panic!("expected Comparison, got {other:?}"),
        }
    }

    #[test]
    fn test_fused_comparison_operators() {
        let stmt = first_statement("select * from city where ID <= 10");
        let where_clause = clause(&stmt, ClauseKind::Where);
        match where_clause.children()[0] {
            Node::Comparison { op, .. } => assert_eq!(op, "<="),
            other => panic!("expected Comparison, got {other:?}"),
        }
    }

    #[test]
    fn test_subquery_in_from_with_alias() {
        let stmt = first_statement(
            "SELECT  FROM (SELECT ID as city_id, Name as city_name FROM city) as t",
        );
        let from = clause(&stmt, ClauseKind::From);
        match from.children()[0] {
            Node::AliasedItem { expr, alias, .. } => {
                assert!(matches!(**expr, Node::Subquery { .. }));
                assert_eq!(
                    alias.as_ref().and_then(|a| a.identifier_name()),
                    Some("t")
                );
            }
            other => panic!("expected AliasedItem, got {other:?}"),
        }
    }

    #[test]
    fn test_case_expression_shape() {
        let stmt = first_statement(
            "SELECT CASE IsOfficial WHEN 'T' THEN 'official' ELSE 'no' END AS label FROM countrylanguage",
        );
        let list = clause(&stmt, ClauseKind::SelectList);
        let item = list.children()[0].children()[0];
        match item {
            Node::AliasedItem { expr, .. } => match &**expr {
                Node::CaseExpr {
                    operand,
                    whens,
                    else_expr,
                    ..
                } => {
                    assert!(operand.is_some());
                    assert_eq!(whens.len(), 1);
                    assert!(else_expr.is_some());
                }
                other => panic!("expected CaseExpr, got {other:?}"),
            },
            other => panic!("expected AliasedItem, got {other:?}"),
        }
    }

    #[test]
    fn test_function_call() {
        let stmt = first_statement("SELECT COUNT(*) FROM city");
        let list = clause(&stmt, ClauseKind::SelectList);
        let item = list.children()[0].children()[0];
        assert!(matches!(item, Node::FunctionCall { .. }));
    }

    #[test]
    fn test_insert_with_column_list() {
        let stmt = first_statement("INSERT INTO city (ID, Name) VALUES (1, 'x')");
        assert!(matches!(
            stmt,
            Node::Statement {
                kind: StatementKind::Insert,
                ..
            }
        ));
        let target = clause(&stmt, ClauseKind::InsertTarget);
        assert_eq!(target.children()[0].identifier_name(), Some("city"));
        let cols = clause(&stmt, ClauseKind::InsertColumns);
        let names: Vec<_> = cols.children()[0]
            .children()
            .iter()
            .filter_map(|c| c.identifier_name())
            .collect();
        assert_eq!(names, vec!["ID", "Name"]);
        assert!(stmt.find_clause(ClauseKind::Values).is_some());
    }

    #[test]
    fn test_unterminated_insert_column_list() {
        let input = "INSERT INTO city (cou";
        let stmt = first_statement(input);
        let cols = clause(&stmt, ClauseKind::InsertColumns);
        assert_eq!(cols.span().end, input.chars().count());
    }

    #[test]
    fn test_update_set_assignments() {
        let stmt = first_statement("UPDATE city SET CountryCode=12, Na");
        let target = clause(&stmt, ClauseKind::UpdateTarget);
        assert_eq!(target.children()[0].identifier_name(), Some("city"));
        let set = clause(&stmt, ClauseKind::UpdateSet);
        let items = set.children()[0].children();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Node::Comparison { .. }));
        assert_eq!(items[1].identifier_name(), Some("Na"));
    }

    #[test]
    fn test_delete_from() {
        let stmt = first_statement("DELETE FROM city WHERE ID = 1");
        assert!(matches!(
            stmt,
            Node::Statement {
                kind: StatementKind::Delete,
                ..
            }
        ));
        let target = clause(&stmt, ClauseKind::DeleteTarget);
        assert_eq!(target.children()[0].identifier_name(), Some("city"));
        assert!(stmt.find_clause(ClauseKind::Where).is_some());
    }

    #[test]
    fn test_other_statement_never_rejected() {
        let statements = parse("CREATE TABLE foo (id int); SELECT 1");
        assert_eq!(statements.len(), 2);
        assert!(matches!(
            statements[0],
            Node::Statement {
                kind: StatementKind::Other,
                ..
            }
        ));
    }

    #[test]
    fn test_garbage_input_terminates() {
        // the parser must make progress on arbitrary junk
        let statements = parse(") ) ;; select ~~ from ? where");
        assert!(!statements.is_empty());
    }

    #[test]
    fn test_child_spans_within_parent() {
        fn check(node: &Node) {
            let span = node.span();
            for child in node.children() {
                assert!(
                    child.span().start >= span.start && child.span().end <= span.end,
                    "child {:?} outside parent {:?}",
                    child.span(),
                    span
                );
                check(child);
            }
        }
        for input in [
            "SELECT c. FROM city as c;SELECT c. FROM country as c;",
            "SELECT * FROM (SELECT ID as city_id FROM city) as t WHERE t.city_id = 1",
            "INSERT INTO city (ID, Name) VALUES (1, 'x')",
            "UPDATE city SET Name = 'a' WHERE ID = 1",
        ] {
            for stmt in parse(input) {
                check(&stmt);
            }
        }
    }
}
