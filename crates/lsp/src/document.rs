// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Document Management
//!
//! This module provides document management for the LSP server.
//!
//! ## Overview
//!
//! The document manager handles:
//! - Multiple open documents identified by URI
//! - Document synchronization (open, change, close)
//! - Text content management using Ropey for efficient edits
//! - Statement reparsing on every change
//!
//! Positions arriving from the client are zero-based UTF-16 code units
//! per the LSP specification; this module converts them to the character
//! offsets the syntax layer works in.
//!
//! Tokens and the statement list are rebuilt on each open/change. The
//! parser is permissive, so a parse always succeeds; `ParseMetadata`
//! records timing and statement counts for logging.

use ropey::Rope;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::{
    Position, TextDocumentContentChangeEvent, Url, VersionedTextDocumentIdentifier,
};

use squill_syntax::{parse, Node};

/// Parse metadata
///
/// Records the most recent reparse of a document.
#[derive(Debug, Clone)]
pub struct ParseMetadata {
    /// When the document was parsed
    pub parsed_at: std::time::SystemTime,

    /// Time taken to parse (milliseconds)
    pub parse_time_ms: u64,

    /// Number of top-level statements
    pub statement_count: usize,
}

/// Document metadata
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// Document URI
    pub uri: Url,

    /// Language identifier (e.g., "sql")
    pub language_id: String,

    /// Document version, incremented by the client on each change
    pub version: i32,

    /// Line count
    pub line_count: usize,
}

/// A document managed by the LSP server
///
/// Holds the rope-backed content and the parsed statement list. The
/// statements are behind an `Arc` so a completion request can keep
/// reading a consistent tree while the store clones documents around.
#[derive(Debug, Clone)]
pub struct Document {
    metadata: DocumentMetadata,
    content: Rope,
    statements: Arc<Vec<Node>>,
    parse_metadata: Arc<ParseMetadata>,
}

impl Document {
    /// Create a new document, parsing its content.
    pub fn new(uri: Url, content: String, version: i32, language_id: String) -> Self {
        let rope = Rope::from_str(&content);
        let line_count = rope.len_lines();
        let (statements, parse_metadata) = reparse(&rope);

        Self {
            metadata: DocumentMetadata {
                uri,
                language_id,
                version,
                line_count,
            },
            content: rope,
            statements,
            parse_metadata,
        }
    }

    pub fn uri(&self) -> &Url {
        &self.metadata.uri
    }

    pub fn language_id(&self) -> &str {
        &self.metadata.language_id
    }

    pub fn version(&self) -> i32 {
        self.metadata.version
    }

    pub fn line_count(&self) -> usize {
        self.metadata.line_count
    }

    /// Full document content as a string.
    pub fn get_content(&self) -> String {
        self.content.to_string()
    }

    /// Parsed top-level statements.
    pub fn statements(&self) -> Arc<Vec<Node>> {
        self.statements.clone()
    }

    pub fn parse_metadata(&self) -> &ParseMetadata {
        &self.parse_metadata
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Character length of the document.
    pub fn len_chars(&self) -> usize {
        self.content.len_chars()
    }

    /// Convert an LSP position (zero-based UTF-16 code units) to a
    /// character offset, clamped to the position's line.
    ///
    /// Returns `None` when the line does not exist.
    pub fn offset_at(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        if line >= self.content.len_lines() {
            return None;
        }
        let line_start_char = self.content.line_to_char(line);
        let line_start_utf16 = self.content.char_to_utf16_cu(line_start_char);
        let target = (line_start_utf16 + position.character as usize)
            .min(self.content.len_utf16_cu());
        let offset = self.content.utf16_cu_to_char(target);

        let line_end_char = self.content.line_to_char(line + 1);
        Some(offset.min(line_end_char))
    }

    /// Apply content changes and reparse.
    pub fn apply_changes(
        &mut self,
        changes: &[TextDocumentContentChangeEvent],
        new_version: i32,
    ) -> Result<(), DocumentError> {
        for change in changes {
            match &change.range {
                Some(range) => {
                    let start = self.offset_at(range.start).ok_or(DocumentError::InvalidRange {
                        start: (range.start.line, range.start.character),
                        end: (range.end.line, range.end.character),
                    })?;
                    let end = self.offset_at(range.end).ok_or(DocumentError::InvalidRange {
                        start: (range.start.line, range.start.character),
                        end: (range.end.line, range.end.character),
                    })?;
                    if start > end || end > self.content.len_chars() {
                        return Err(DocumentError::InvalidRange {
                            start: (range.start.line, range.start.character),
                            end: (range.end.line, range.end.character),
                        });
                    }
                    self.content.remove(start..end);
                    self.content.insert(start, &change.text);
                }
                None => {
                    // full document replacement
                    self.content = Rope::from_str(&change.text);
                }
            }
        }

        self.metadata.version = new_version;
        self.metadata.line_count = self.content.len_lines();
        let (statements, parse_metadata) = reparse(&self.content);
        self.statements = statements;
        self.parse_metadata = parse_metadata;

        Ok(())
    }
}

fn reparse(content: &Rope) -> (Arc<Vec<Node>>, Arc<ParseMetadata>) {
    let source = content.to_string();
    let started = Instant::now();
    let statements = parse(&source);
    let metadata = ParseMetadata {
        parsed_at: std::time::SystemTime::now(),
        parse_time_ms: started.elapsed().as_millis() as u64,
        statement_count: statements.len(),
    };
    (Arc::new(statements), Arc::new(metadata))
}

/// Document store for managing multiple documents
///
/// Thread-safe store for all open documents. Mutations happen only from
/// the request loop; readers clone the document out.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<HashMap<Url, Document>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or replace) a document.
    pub async fn open_document(
        &self,
        uri: Url,
        content: String,
        version: i32,
        language_id: String,
    ) -> Document {
        let document = Document::new(uri.clone(), content, version, language_id);
        let mut docs = self.documents.write().await;
        docs.insert(uri, document.clone());
        document
    }

    /// Close a document; returns whether it existed.
    pub async fn close_document(&self, uri: &Url) -> bool {
        let mut docs = self.documents.write().await;
        docs.remove(uri).is_some()
    }

    /// Apply changes to a document; returns the updated document.
    pub async fn update_document(
        &self,
        identifier: &VersionedTextDocumentIdentifier,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Result<Document, DocumentError> {
        let mut docs = self.documents.write().await;
        let document = docs
            .get_mut(&identifier.uri)
            .ok_or_else(|| DocumentError::DocumentNotFound(identifier.uri.clone()))?;
        document.apply_changes(changes, identifier.version)?;
        Ok(document.clone())
    }

    pub async fn get_document(&self, uri: &Url) -> Option<Document> {
        let docs = self.documents.read().await;
        docs.get(uri).cloned()
    }

    pub async fn has_document(&self, uri: &Url) -> bool {
        let docs = self.documents.read().await;
        docs.contains_key(uri)
    }

    pub async fn list_uris(&self) -> Vec<Url> {
        let docs = self.documents.read().await;
        docs.keys().cloned().collect()
    }

    pub async fn document_count(&self) -> usize {
        let docs = self.documents.read().await;
        docs.len()
    }
}

/// Document-related errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(Url),

    /// Invalid range for text operation
    #[error("Invalid range: start={start:?}, end={end:?}")]
    InvalidRange { start: (u32, u32), end: (u32, u32) },
}
