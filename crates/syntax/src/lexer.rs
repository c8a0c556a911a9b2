// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL tokenizer
//!
//! Single-pass scanner producing [`Token`]s with character-offset spans.
//! The scanner never fails: any character it does not recognize becomes a
//! single-character `Punct` token. Token spans are disjoint and cover the
//! whole input, with a trailing empty-span `Eof` token.

use crate::keywords::is_keyword;
use crate::token::{Span, Token, TokenKind};

/// Tokenize `input` into a complete token stream ending with `Eof`.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn run(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while self.pos < self.chars.len() {
            let token = self.next_token();
            tokens.push(token);
        }
        tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::empty_at(self.chars.len()),
        ));
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn text(&self, span: Span) -> String {
        self.chars[span.start..span.end].iter().collect()
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let ch = match self.peek() {
            Some(c) => c,
            None => return Token::new(TokenKind::Eof, "", Span::empty_at(start)),
        };

        if ch.is_whitespace() {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.bump();
            }
            let span = Span::new(start, self.pos);
            return Token::new(TokenKind::Whitespace, self.text(span), span);
        }

        // -- line comment, to end of line (newline stays whitespace)
        if ch == '-' && self.peek_at(1) == Some('-') {
            while matches!(self.peek(), Some(c) if c != '\n') {
                self.bump();
            }
            let span = Span::new(start, self.pos);
            return Token::new(TokenKind::Comment, self.text(span), span);
        }

        // /* block comment */, unterminated runs to end of input
        if ch == '/' && self.peek_at(1) == Some('*') {
            self.bump();
            self.bump();
            loop {
                match self.peek() {
                    None => break,
                    Some('*') if self.peek_at(1) == Some('/') => {
                        self.bump();
                        self.bump();
                        break;
                    }
                    Some(_) => {
                        self.bump();
                    }
                }
            }
            let span = Span::new(start, self.pos);
            return Token::new(TokenKind::Comment, self.text(span), span);
        }

        // single-quoted string, '' escapes a quote
        if ch == '\'' {
            self.bump();
            loop {
                match self.peek() {
                    None => break,
                    Some('\'') => {
                        self.bump();
                        if self.peek() == Some('\'') {
                            self.bump();
                        } else {
                            break;
                        }
                    }
                    Some(_) => {
                        self.bump();
                    }
                }
            }
            let span = Span::new(start, self.pos);
            return Token::new(TokenKind::String, self.text(span), span);
        }

        // quoted identifiers: `name`, "name", [name]
        if ch == '`' || ch == '"' || ch == '[' {
            let close = match ch {
                '`' => '`',
                '"' => '"',
                _ => ']',
            };
            self.bump();
            while matches!(self.peek(), Some(c) if c != close) {
                self.bump();
            }
            self.bump(); // closing quote, if present
            let span = Span::new(start, self.pos);
            return Token::new(TokenKind::QuotedIdentifier, self.text(span), span);
        }

        if ch.is_ascii_digit() {
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
            if self.peek() == Some('.')
                && matches!(self.peek_at(1), Some(c) if c.is_ascii_digit())
            {
                self.bump();
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.bump();
                }
            }
            let span = Span::new(start, self.pos);
            return Token::new(TokenKind::Number, self.text(span), span);
        }

        if ch.is_alphabetic() || ch == '_' {
            while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '$') {
                self.bump();
            }
            let span = Span::new(start, self.pos);
            let text = self.text(span);
            let kind = if is_keyword(&text) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            return Token::new(kind, text, span);
        }

        // anything else is a one-character punct token
        self.bump();
        let span = Span::new(start, self.pos);
        Token::new(TokenKind::Punct(ch), self.text(span), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_select() {
        let tokens = tokenize("SELECT id FROM city");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["SELECT", " ", "id", " ", "FROM", " ", "city", ""]);
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[6].kind, TokenKind::Identifier);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_spans_cover_input() {
        let input = "select a, b from t where a = 'x''y' -- c\n/* d */;";
        let tokens = tokenize(input);
        let mut offset = 0;
        for token in &tokens {
            assert_eq!(token.span.start, offset, "gap before {:?}", token);
            offset = token.span.end;
        }
        assert_eq!(offset, input.chars().count());
    }

    #[test]
    fn test_quoted_identifiers() {
        let tokens = tokenize("`Language` \"col\" [Name]");
        assert_eq!(tokens[0].kind, TokenKind::QuotedIdentifier);
        assert_eq!(tokens[0].name(), "Language");
        assert_eq!(tokens[2].name(), "col");
        assert_eq!(tokens[4].name(), "Name");
    }

    #[test]
    fn test_string_with_doubled_quote() {
        let tokens = tokenize("'it''s'");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "'it''s'");
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("-- line\nselect /* block */ 1");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "-- line");
        assert!(tokens.iter().any(|t| t.text == "/* block */"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tokens = tokenize("select /* open");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Comment));
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("12 3.5");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "12");
        assert_eq!(tokens[2].text, "3.5");
    }

    #[test]
    fn test_punct_and_unknown_bytes() {
        let tokens = tokenize("a.b <= 1; ~");
        assert!(tokens.iter().any(|t| t.is_punct('.')));
        assert!(tokens.iter().any(|t| t.is_punct('<')));
        assert!(tokens.iter().any(|t| t.is_punct('=')));
        assert!(tokens.iter().any(|t| t.is_punct(';')));
        // unknown character degrades to a punct token instead of an error
        assert!(tokens.iter().any(|t| t.is_punct('~')));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            kinds("select SeLeCt SELECT")
                .into_iter()
                .filter(|k| *k == TokenKind::Keyword)
                .count(),
            3
        );
    }

    #[test]
    fn test_keyword_set_is_closed() {
        // OFFSET is real SQL but outside the closed set; it must lex as an
        // identifier.
        let tokens = tokenize("offset");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }
}
