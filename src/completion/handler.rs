/// Completion request orchestration.
///
/// `handle_completion` finds the selection set (or argument list) at the
/// cursor, resolves it against the loaded schema and offers its members.
/// `handle_completion_resolve` fills in documentation for the item the
/// client highlights, using the same composition rules as the overlay.
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::completion::builder::ItemData;
use crate::completion::context::{CompletionContext, extract_completion_context, resolve_path};
use crate::markup::{MarkdownRenderer, Verbatim};
use crate::overlay::compose::{self, OverlayStyle};

impl Backend {
    /// Main completion handler, called by `LanguageServer::completion`.
    pub(crate) async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri.to_string();
        let position = params.text_document_position.position;

        let Some(content) = self.open_files.lock().get(&uri).cloned() else {
            return Ok(None);
        };
        let Some(schema) = self.schema.lock().graph().cloned() else {
            tracing::debug!(%uri, "completion requested before a schema is loaded");
            return Ok(None);
        };

        let offset = Self::position_to_offset(&content, position);
        let Some(context) = extract_completion_context(&content, offset) else {
            return Ok(None);
        };

        let items = match context {
            CompletionContext::SelectionSet(path) => {
                match resolve_path(&schema, &path) {
                    Some(parent) => Self::build_field_items(&parent),
                    None => {
                        tracing::debug!(?path, "selection path does not resolve");
                        Vec::new()
                    }
                }
            }
            CompletionContext::Arguments { path, field } => {
                let parent = resolve_path(&schema, &path);
                match parent.as_ref().and_then(|p| Some((p, p.field(&field)?))) {
                    Some((parent, field)) => Self::build_argument_items(parent, field),
                    None => Vec::new(),
                }
            }
        };

        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(CompletionResponse::Array(items)))
    }

    /// Attach documentation to a highlighted completion item.
    ///
    /// Items without resolvable `data` (such as `__typename`) come back
    /// unchanged.
    pub(crate) async fn handle_completion_resolve(
        &self,
        mut item: CompletionItem,
    ) -> Result<CompletionItem> {
        let Some(data) = item
            .data
            .clone()
            .and_then(|d| serde_json::from_value::<ItemData>(d).ok())
        else {
            return Ok(item);
        };
        let Some(schema) = self.schema.lock().graph().cloned() else {
            return Ok(item);
        };
        let Some(suggestion) = Self::suggestion_for(&schema, &data) else {
            tracing::debug!(?data, "completion item no longer matches the schema");
            return Ok(item);
        };

        let (style, fallback) = {
            let config = self.config.lock();
            (config.markup.overlay_style(), config.fallback_description.clone())
        };
        let content = match style {
            OverlayStyle::Markdown => compose::compose(&suggestion, &Verbatim, style, &fallback),
            OverlayStyle::Html => compose::compose(&suggestion, &MarkdownRenderer, style, &fallback),
        };

        let value = match content.deprecation {
            Some(deprecation) => format!("{}\n\n{}", content.info, deprecation),
            None => content.info,
        };
        item.documentation = Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }));
        Ok(item)
    }
}
