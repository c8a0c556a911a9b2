// Copyright (c) 2025 squill contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # LSP Backend Implementation
//!
//! This module provides the main LSP server backend using tower-lsp.
//!
//! ## Overview
//!
//! The backend handles:
//! - LSP protocol communication via tower-lsp
//! - Document lifecycle (open, change, close) with reparse per change
//! - Connection configuration through `workspace/didChangeConfiguration`
//! - Completion against the current catalog snapshot
//! - `switchDatabase` / `refreshCatalog` workspace commands
//!
//! ## Architecture
//!
//! ```text
//! Client → LSP Backend → Document Store (rope + parsed statements)
//!                ↓
//!         Catalog Manager (loader + snapshot swap)
//!                ↓
//!         Completion Engine (locate → scope → generate → render)
//! ```
//!
//! Messages are processed sequentially off the transport; catalog loads
//! run on spawned tasks so completion never waits behind database I/O.

use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{error, info, warn};

use crate::catalog_manager::CatalogManager;
use crate::completion::CompletionEngine;
use crate::config::ServerConfig;
use crate::document::DocumentStore;

/// Workspace command: switch the active database and reload the catalog.
pub const COMMAND_SWITCH_DATABASE: &str = "switchDatabase";
/// Workspace command: reload the catalog from the active connection.
pub const COMMAND_REFRESH_CATALOG: &str = "refreshCatalog";

/// LSP backend implementation
///
/// Main entry point for all LSP protocol operations.
pub struct LspBackend {
    /// LSP client for sending notifications and requests
    client: Client,

    /// Document store for managing open documents
    documents: Arc<DocumentStore>,

    /// Current server configuration
    config: Arc<RwLock<Option<ServerConfig>>>,

    /// Catalog manager for schema snapshots
    catalog: Arc<CatalogManager>,
}

impl LspBackend {
    /// Create a new LSP backend
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(DocumentStore::new()),
            config: Arc::new(RwLock::new(None)),
            catalog: Arc::new(CatalogManager::new()),
        }
    }

    /// Get the document store
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Get the catalog manager
    pub fn catalog(&self) -> &Arc<CatalogManager> {
        &self.catalog
    }

    async fn show_message(&self, message: &str, message_type: MessageType) {
        self.client.show_message(message_type, message).await;
    }

    /// Apply a new configuration: pick the active connection and load its
    /// catalog on a separate task so the notification handler returns
    /// immediately.
    async fn apply_config(&self, config: ServerConfig) {
        let connection = match config.active_connection() {
            Some(connection) => connection.clone(),
            None => {
                warn!("Configuration has no connections; clearing catalog");
                self.catalog.clear().await;
                self.show_message(
                    "sqls settings contain no connections; completion is limited to keywords",
                    MessageType::WARNING,
                )
                .await;
                *self.config.write().await = Some(config);
                return;
            }
        };

        info!(
            "Activating connection '{}' (driver: {})",
            connection.display_name(),
            connection.driver
        );
        *self.config.write().await = Some(config);

        let catalog = self.catalog.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = catalog.configure(&connection).await {
                error!("Failed to load catalog: {e}");
                client
                    .show_message(
                        MessageType::WARNING,
                        format!("Failed to load database schema: {e}"),
                    )
                    .await;
            }
        });
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspBackend {
    /// Initialize the LSP server
    ///
    /// Returns server capabilities and configuration.
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Initializing LSP server");
        info!("Client info: {:?}", params.client_info);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),

                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec![".".to_string()]),
                    work_done_progress_options: WorkDoneProgressOptions {
                        work_done_progress: Some(false),
                    },
                    all_commit_characters: None,
                    completion_item: None,
                }),

                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![
                        COMMAND_SWITCH_DATABASE.to_string(),
                        COMMAND_REFRESH_CATALOG.to_string(),
                    ],
                    work_done_progress_options: WorkDoneProgressOptions {
                        work_done_progress: Some(false),
                    },
                }),

                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "squill".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("LSP server initialized successfully");
        self.show_message(
            "squill ready. Configure connections under the 'sqls' settings key.",
            MessageType::INFO,
        )
        .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down LSP server");
        Ok(())
    }

    /// Configuration change notification
    ///
    /// Reconfiguration replaces the active catalog loader.
    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        match ServerConfig::from_lsp_settings(&params.settings) {
            Ok(Some(config)) => self.apply_config(config).await,
            Ok(None) => {
                // settings change did not concern us
            }
            Err(e) => {
                warn!("Rejected sqls settings: {e}");
                self.show_message(&format!("Invalid sqls settings: {e}"), MessageType::WARNING)
                    .await;
            }
        }
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        info!(
            "Document opened: uri={}, language={}, version={}",
            doc.uri, doc.language_id, doc.version
        );

        let document = self
            .documents
            .open_document(doc.uri, doc.text, doc.version, doc.language_id)
            .await;
        let meta = document.parse_metadata();
        info!(
            "Parsed {} statement(s) in {}ms",
            meta.statement_count, meta.parse_time_ms
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let identifier = params.text_document;
        match self
            .documents
            .update_document(&identifier, &params.content_changes)
            .await
        {
            Ok(document) => {
                let meta = document.parse_metadata();
                info!(
                    "Document changed: uri={}, version={}, {} statement(s), reparse {}ms",
                    identifier.uri,
                    identifier.version,
                    meta.statement_count,
                    meta.parse_time_ms
                );
            }
            Err(e) => {
                error!("Failed to update document {}: {e}", identifier.uri);
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        if self.documents.close_document(&uri).await {
            info!("Document closed: uri={uri}");
        } else {
            warn!("Document not found for close: {uri}");
        }
    }

    /// Completion request
    ///
    /// Reads the latest catalog snapshot; never blocks behind a catalog
    /// load in progress.
    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let document = match self.documents.get_document(&uri).await {
            Some(document) => document,
            None => {
                warn!("Document not found for completion: {uri}");
                return Ok(None);
            }
        };

        let snapshot = self.catalog.snapshot().await;
        let engine = CompletionEngine::new(snapshot);
        let items = engine.complete(&document, position);
        info!(
            "Completion at {}:{}:{} returned {} items",
            uri,
            position.line,
            position.character,
            items.len()
        );
        Ok(Some(CompletionResponse::Array(items)))
    }

    /// Workspace command execution: `switchDatabase`, `refreshCatalog`.
    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        match params.command.as_str() {
            COMMAND_SWITCH_DATABASE => {
                let database = params
                    .arguments
                    .first()
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string());
                let database = match database {
                    Some(database) => database,
                    None => {
                        self.show_message(
                            "switchDatabase requires a database name argument",
                            MessageType::WARNING,
                        )
                        .await;
                        return Ok(None);
                    }
                };
                match self.catalog.switch_database(&database).await {
                    Ok(()) => {
                        info!("Switched database to {database}");
                        self.show_message(
                            &format!("Switched to database '{database}'"),
                            MessageType::INFO,
                        )
                        .await;
                    }
                    Err(e) => {
                        warn!("switchDatabase failed: {e}");
                        self.show_message(
                            &format!("Could not switch database: {e}"),
                            MessageType::WARNING,
                        )
                        .await;
                    }
                }
            }
            COMMAND_REFRESH_CATALOG => {
                if let Err(e) = self.catalog.reload().await {
                    warn!("refreshCatalog failed: {e}");
                    self.show_message(
                        &format!("Could not refresh schema: {e}"),
                        MessageType::WARNING,
                    )
                    .await;
                } else {
                    info!("Catalog refreshed");
                }
            }
            other => {
                warn!("Unknown command: {other}");
            }
        }
        Ok(None)
    }
}
