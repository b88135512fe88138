/// The `graphqlDocs/explore` custom request.
///
/// Clients drive the documentation explorer with navigation actions and
/// get the re-rendered panel back.  The explorer's navigation history
/// lives in the backend and is only changed through this request.
use serde::{Deserialize, Serialize};
use tower_lsp::jsonrpc::{Error, Result};

use crate::Backend;
use crate::explorer::panel::Panel;
use crate::navigation::NavigationEntry;
use crate::types::{Definition, SchemaGraph};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ExploreAction {
    /// Re-render if anything changed since the last render.
    Refresh,
    /// Back to the schema root.
    Reset,
    /// One step back.
    Pop,
    /// Set (or clear, with an empty term) the current entry's search.
    Search { term: String },
    OpenType { name: String },
    OpenField { type_name: String, field: String },
    OpenArgument {
        type_name: String,
        field: String,
        argument: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExploreParams {
    pub action: ExploreAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExploreResponse {
    /// `None` when nothing changed since the previous render.
    pub panel: Option<Panel>,
}

/// Find the schema node an `Open*` action points at.
fn lookup(schema: &SchemaGraph, action: &ExploreAction) -> Option<Definition> {
    match action {
        ExploreAction::OpenType { name } => schema.get_type(name).cloned().map(Definition::Type),
        ExploreAction::OpenField { type_name, field } => schema
            .get_type(type_name)?
            .field(field)
            .cloned()
            .map(Definition::Field),
        ExploreAction::OpenArgument {
            type_name,
            field,
            argument,
        } => schema
            .get_type(type_name)?
            .field(field)?
            .args
            .iter()
            .find(|a| &a.name == argument)
            .cloned()
            .map(Definition::Argument),
        ExploreAction::Refresh
        | ExploreAction::Reset
        | ExploreAction::Pop
        | ExploreAction::Search { .. } => None,
    }
}

impl Backend {
    pub async fn explore(&self, params: ExploreParams) -> Result<ExploreResponse> {
        let source = self.schema.lock().clone();
        let mut explorer = self.explorer.lock();
        let action = params.action;
        tracing::debug!(?action, "explore");

        match action {
            ExploreAction::Refresh => {}
            ExploreAction::Reset => explorer.navigation_mut().reset(),
            ExploreAction::Pop => {
                explorer.navigation_mut().pop();
            }
            ExploreAction::Search { ref term } => explorer.navigation_mut().set_search(term),
            ExploreAction::OpenType { .. }
            | ExploreAction::OpenField { .. }
            | ExploreAction::OpenArgument { .. } => {
                let schema = source
                    .graph()
                    .ok_or_else(|| Error::invalid_params("no schema loaded"))?;
                let def = lookup(schema, &action)
                    .ok_or_else(|| Error::invalid_params(format!("unknown schema member: {action:?}")))?;
                explorer
                    .navigation_mut()
                    .push(NavigationEntry::for_definition(def));
            }
        }

        Ok(ExploreResponse {
            panel: explorer.render(&source),
        })
    }
}
