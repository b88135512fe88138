/// Schema loading from standard GraphQL introspection results.
///
/// Accepts either the full response shape (`{"data": {"__schema": …}}`)
/// or the bare `{"__schema": …}` object, as written by most schema
/// download tools.
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::SchemaError;
use crate::types::*;

/// The reason GraphQL reports for `@deprecated` without an explicit reason.
const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

#[derive(Debug, Deserialize)]
struct Response {
    data: Option<Envelope>,
    #[serde(rename = "__schema")]
    schema: Option<RawSchema>,
    errors: Option<Vec<RawError>>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "__schema")]
    schema: Option<RawSchema>,
}

#[derive(Debug, Deserialize)]
struct RawError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    description: Option<String>,
    query_type: Option<RawName>,
    mutation_type: Option<RawName>,
    subscription_type: Option<RawName>,
    #[serde(default)]
    types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
struct RawName {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum RawKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawType {
    kind: RawKind,
    name: Option<String>,
    description: Option<String>,
    fields: Option<Vec<RawField>>,
    input_fields: Option<Vec<RawInputValue>>,
    interfaces: Option<Vec<RawTypeRef>>,
    enum_values: Option<Vec<RawEnumValue>>,
    possible_types: Option<Vec<RawTypeRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeRef {
    kind: RawKind,
    name: Option<String>,
    of_type: Option<Box<RawTypeRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    description: Option<String>,
    #[serde(default)]
    args: Vec<RawInputValue>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInputValue {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    default_value: Option<String>,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnumValue {
    name: String,
    description: Option<String>,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

/// Read and parse an introspection result from disk.
pub fn load_introspection(path: &Path) -> Result<SchemaGraph, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_introspection(&content)
}

/// Parse an introspection result from JSON text.
pub fn parse_introspection(json: &str) -> Result<SchemaGraph, SchemaError> {
    let response: Response = serde_json::from_str(json)?;

    let raw = match (response.data.and_then(|d| d.schema), response.schema) {
        (Some(schema), _) | (None, Some(schema)) => schema,
        (None, None) => {
            return Err(match response.errors {
                Some(errors) if !errors.is_empty() => SchemaError::Reported(
                    errors
                        .into_iter()
                        .map(|e| e.message)
                        .collect::<Vec<_>>()
                        .join("; "),
                ),
                _ => SchemaError::MissingSchema,
            });
        }
    };

    let mut graph = SchemaGraph {
        description: raw.description,
        query_type: raw.query_type.map(|n| n.name),
        mutation_type: raw.mutation_type.map(|n| n.name),
        subscription_type: raw.subscription_type.map(|n| n.name),
        ..SchemaGraph::default()
    };

    for raw_type in raw.types {
        if let Some(ty) = convert_type(raw_type) {
            graph.insert_type(ty);
        }
    }

    Ok(graph)
}

fn convert_type(raw: RawType) -> Option<NamedType> {
    let kind = match raw.kind {
        RawKind::Scalar => TypeKind::Scalar,
        RawKind::Object => TypeKind::Object,
        RawKind::Interface => TypeKind::Interface,
        RawKind::Union => TypeKind::Union,
        RawKind::Enum => TypeKind::Enum,
        RawKind::InputObject => TypeKind::InputObject,
        // Wrappers never appear as top-level schema types.
        RawKind::List | RawKind::NonNull => return None,
    };

    let mut ty = NamedType::new(raw.name?, kind);
    ty.description = raw.description;
    ty.fields = raw
        .fields
        .unwrap_or_default()
        .into_iter()
        .filter_map(|f| {
            Some(Arc::new(FieldInfo {
                ty: convert_type_ref(f.ty)?,
                deprecation_reason: deprecation(f.is_deprecated, f.deprecation_reason),
                args: f.args.into_iter().filter_map(convert_input_value).collect(),
                name: f.name,
                description: f.description,
            }))
        })
        .collect();
    ty.input_fields = raw
        .input_fields
        .unwrap_or_default()
        .into_iter()
        .filter_map(convert_input_value)
        .collect();
    ty.enum_values = raw
        .enum_values
        .unwrap_or_default()
        .into_iter()
        .map(|v| EnumValueInfo {
            deprecation_reason: deprecation(v.is_deprecated, v.deprecation_reason),
            name: v.name,
            description: v.description,
        })
        .collect();
    ty.interfaces = raw
        .interfaces
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| r.name)
        .collect();
    ty.possible_types = raw
        .possible_types
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| r.name)
        .collect();
    Some(ty)
}

fn convert_input_value(raw: RawInputValue) -> Option<Arc<InputValueInfo>> {
    Some(Arc::new(InputValueInfo {
        ty: convert_type_ref(raw.ty)?,
        deprecation_reason: deprecation(raw.is_deprecated, raw.deprecation_reason),
        name: raw.name,
        description: raw.description,
        default_value: raw.default_value,
    }))
}

/// Convert an introspection type reference.  Returns `None` for a
/// malformed reference (a wrapper without `ofType`, a named kind without
/// a name).
fn convert_type_ref(raw: RawTypeRef) -> Option<TypeRef> {
    match raw.kind {
        RawKind::NonNull => Some(TypeRef::non_null(convert_type_ref(*raw.of_type?)?)),
        RawKind::List => Some(TypeRef::list(convert_type_ref(*raw.of_type?)?)),
        _ => raw.name.map(TypeRef::Named),
    }
}

fn deprecation(is_deprecated: bool, reason: Option<String>) -> Option<String> {
    match (is_deprecated, reason) {
        (_, Some(reason)) if !reason.is_empty() => Some(reason),
        (true, _) => Some(DEFAULT_DEPRECATION_REASON.to_string()),
        (false, _) => None,
    }
}
