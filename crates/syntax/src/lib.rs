// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # squill syntax layer
//!
//! Permissive SQL front end for the squill language server.
//!
//! ## Overview
//!
//! The pipeline runs per keystroke, so every stage is total: it always
//! produces output, however broken the input.
//!
//! ```text
//! text ──tokenize──▶ tokens ──parse──▶ statements ──locate──▶ context
//! ```
//!
//! - [`lexer`]: single-pass scanner; unknown characters become one-char
//!   punct tokens instead of errors
//! - [`parser`]: recursive descent with placeholder-based recovery; never
//!   rejects, splits statements on `;` at depth zero
//! - [`ast`]: tagged node variants carrying spans
//! - [`cursor`]: focused-statement selection and completion-context
//!   classification at a cursor offset
//! - [`keywords`]: the closed keyword set shared by tokenizer and
//!   keyword completion
//!
//! The parser is not a validator: malformed SQL still yields a tree, and
//! nothing here checks that names exist — that is the catalog's job.

pub mod ast;
pub mod cursor;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{CaseWhen, ClauseKind, Node, StatementKind};
pub use cursor::{
    focused_statement_index, locate, scope_statement, CompletionContext, ContextKind,
};
pub use keywords::{is_keyword, KEYWORDS, STATEMENT_KEYWORDS};
pub use lexer::tokenize;
pub use parser::parse;
pub use token::{Span, Token, TokenKind};
