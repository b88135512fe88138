/// Completion item building.
///
/// This module contains the logic for constructing LSP `CompletionItem`s
/// from schema members (fields of a parent type, arguments of a field),
/// and the `data` payload that lets `completionItem/resolve` find the
/// member again.
use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::overlay::compose::Suggestion;
use crate::signature::{render_field_signature, render_type_plain};
use crate::types::*;

/// The meta field every composite type answers.
const TYPENAME_FIELD: &str = "__typename";

/// Identifies the schema member behind a completion item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemData {
    #[serde(rename = "type")]
    pub type_name: String,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
}

fn deprecated_tags(reason: Option<&str>) -> Option<Vec<CompletionItemTag>> {
    reason.map(|_| vec![CompletionItemTag::DEPRECATED])
}

impl Backend {
    /// Build completion items for the fields of `parent`.
    ///
    /// Unions have no fields of their own, so only `__typename` is
    /// offered for them.
    pub(crate) fn build_field_items(parent: &NamedType) -> Vec<CompletionItem> {
        let mut items: Vec<CompletionItem> = parent
            .fields
            .iter()
            .map(|field| CompletionItem {
                label: field.name.clone(),
                kind: Some(CompletionItemKind::FIELD),
                detail: Some(render_field_signature(field)),
                tags: deprecated_tags(field.deprecation_reason.as_deref()),
                data: serde_json::to_value(ItemData {
                    type_name: parent.name.clone(),
                    field: field.name.clone(),
                    argument: None,
                })
                .ok(),
                ..CompletionItem::default()
            })
            .collect();

        if parent.is_composite() {
            items.push(CompletionItem {
                label: TYPENAME_FIELD.to_string(),
                kind: Some(CompletionItemKind::FIELD),
                detail: Some(format!("{}: String!", TYPENAME_FIELD)),
                documentation: Some(Documentation::String(format!(
                    "The name of the current Object type at runtime ({}).",
                    parent.name
                ))),
                ..CompletionItem::default()
            });
        }
        items
    }

    /// Build completion items for the arguments of `field` on `parent`.
    pub(crate) fn build_argument_items(parent: &NamedType, field: &FieldInfo) -> Vec<CompletionItem> {
        field
            .args
            .iter()
            .map(|arg| CompletionItem {
                label: arg.name.clone(),
                kind: Some(CompletionItemKind::PROPERTY),
                detail: Some(render_type_plain(&arg.ty)),
                insert_text: Some(format!("{}: ", arg.name)),
                filter_text: Some(arg.name.clone()),
                tags: deprecated_tags(arg.deprecation_reason.as_deref()),
                data: serde_json::to_value(ItemData {
                    type_name: parent.name.clone(),
                    field: field.name.clone(),
                    argument: Some(arg.name.clone()),
                })
                .ok(),
                ..CompletionItem::default()
            })
            .collect()
    }

    /// Look the member behind `data` up in `schema` and describe it as a
    /// suggestion.
    pub(crate) fn suggestion_for(schema: &SchemaGraph, data: &ItemData) -> Option<Suggestion> {
        let field = schema.get_type(&data.type_name)?.field(&data.field)?;
        match data.argument {
            Some(ref name) => {
                let arg = field.args.iter().find(|a| &a.name == name)?;
                Some(Suggestion {
                    label: arg.name.clone(),
                    ty: Some(arg.ty.clone()),
                    description: arg.description.clone(),
                    deprecation_reason: arg.deprecation_reason.clone(),
                })
            }
            None => Some(Suggestion {
                label: field.name.clone(),
                ty: Some(field.ty.clone()),
                description: field.description.clone(),
                deprecation_reason: field.deprecation_reason.clone(),
            }),
        }
    }
}
