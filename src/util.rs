/// Utility functions for the GraphQL docs server.
///
/// This module contains helper methods for position/offset conversion,
/// logging, and loading config and schema into the backend.
use std::path::PathBuf;

use serde::Deserialize;
use tower_lsp::lsp_types::*;

use crate::config::{self, Config};
use crate::explorer::{SchemaSlot, SchemaSource};
use crate::schema;
use crate::{Backend, SchemaGraph};

/// Client-supplied `initializationOptions`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct InitOptions {
    pub schema: Option<PathBuf>,
}

impl Backend {
    /// Convert an LSP Position (line, character) to a byte offset in content.
    ///
    /// `character` counts UTF-16 code units, the protocol's default
    /// position encoding.  A column inside a surrogate pair lands on the
    /// start of that char.
    pub(crate) fn position_to_offset(content: &str, position: Position) -> usize {
        let mut offset = 0;
        for (i, line) in content.split('\n').enumerate() {
            if i == position.line as usize {
                let target = position.character as usize;
                let mut units = 0;
                for (idx, c) in line.char_indices() {
                    if units + c.len_utf16() > target {
                        return offset + idx;
                    }
                    units += c.len_utf16();
                }
                return offset + line.len();
            }
            // +1 for the newline character
            offset += line.len() + 1;
        }
        content.len()
    }

    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }

    /// Public helper for tests: the currently loaded schema, if any.
    pub fn loaded_schema(&self) -> Option<std::sync::Arc<SchemaGraph>> {
        self.schema.lock().graph().cloned()
    }

    /// Public helper for tests: a copy of the active config.
    pub fn active_config(&self) -> Config {
        self.config.lock().clone()
    }

    pub(crate) fn apply_init_options(&self, options: Option<serde_json::Value>) {
        let Some(value) = options else {
            return;
        };
        match serde_json::from_value::<InitOptions>(value) {
            Ok(InitOptions {
                schema: Some(path),
            }) => *self.schema_override.lock() = Some(path),
            Ok(_) => {}
            Err(e) => tracing::warn!("ignoring malformed initializationOptions: {e}"),
        }
    }

    /// Load config and schema, replacing whatever was loaded before.
    ///
    /// Returns a one-line summary for the client log.  Failures never
    /// abort: a bad config falls back to defaults, a bad schema becomes
    /// the errored schema state.
    pub(crate) fn load_workspace(&self) -> String {
        let root = self.workspace_root.lock().clone();

        let (config, config_note) = match config::load(self.config_path.as_deref(), root.as_deref()) {
            Ok(config) => (config, None),
            Err(e) => {
                tracing::warn!("{e}; using default config");
                (Config::default(), Some(e.to_string()))
            }
        };

        let schema_path = self
            .schema_override
            .lock()
            .clone()
            .or_else(|| config.schema_path(root.as_deref()));

        self.explorer.lock().set_search_limit(config.search_limit);
        *self.config.lock() = config;

        let (source, summary) = match schema_path {
            None => (
                SchemaSource {
                    schema: SchemaSlot::Absent,
                    errors: None,
                },
                "no schema configured".to_string(),
            ),
            Some(path) => match schema::load_introspection(&path) {
                Ok(graph) => {
                    let summary = format!(
                        "loaded schema {} ({} types)",
                        path.display(),
                        graph.user_types().count()
                    );
                    (SchemaSource::loaded(graph), summary)
                }
                Err(e) => {
                    tracing::error!("{e}");
                    (SchemaSource::errored(vec![e.to_string()]), e.to_string())
                }
            },
        };
        tracing::info!("{summary}");
        *self.schema.lock() = source;

        match config_note {
            Some(note) => format!("{summary}; config error: {note}"),
            None => summary,
        }
    }
}
