/// Member search for the explorer's search results view.
///
/// The matching rule itself is pluggable through [`MemberMatcher`]; this
/// module only decides what gets matched and in which groups.
use std::sync::Arc;

use crate::types::{Definition, FieldInfo, InputValueInfo, NamedType, SchemaGraph};

pub trait MemberMatcher {
    fn is_match(&self, candidate: &str, term: &str) -> bool;
}

/// Case-insensitive substring match.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl MemberMatcher for SubstringMatcher {
    fn is_match(&self, candidate: &str, term: &str) -> bool {
        candidate.to_lowercase().contains(&term.to_lowercase())
    }
}

/// A field hit, remembering which type it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub owner: Arc<NamedType>,
    pub field: Arc<FieldInfo>,
    /// Arguments of the field whose names matched, if the match came
    /// through its arguments.
    pub args: Vec<Arc<InputValueInfo>>,
}

/// An input-object field hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFieldMatch {
    pub owner: Arc<NamedType>,
    pub input: Arc<InputValueInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Types whose name matched (root scope only).
    pub types: Vec<Arc<NamedType>>,
    /// Fields whose name matched.
    pub fields: Vec<FieldMatch>,
    /// Fields matched only through an argument name.
    pub arguments: Vec<FieldMatch>,
    /// Input fields of input objects whose name matched.
    pub input_fields: Vec<InputFieldMatch>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.fields.is_empty()
            && self.arguments.is_empty()
            && self.input_fields.is_empty()
    }
}

/// Search the schema for `term`.
///
/// With a type scope, only that type's fields and input fields are
/// searched.  Without one (or with a field/argument scope, which has no
/// members of its own), the whole schema is searched.  Each group is capped at `limit`.
pub fn search(
    schema: &SchemaGraph,
    term: &str,
    scope: Option<&Definition>,
    matcher: &impl MemberMatcher,
    limit: usize,
) -> SearchResults {
    let mut results = SearchResults::default();

    let within: Vec<&Arc<NamedType>> = match scope.and_then(Definition::as_type) {
        Some(ty) => vec![ty],
        None => {
            for ty in schema.user_types() {
                if results.types.len() >= limit {
                    break;
                }
                if matcher.is_match(&ty.name, term) {
                    results.types.push(Arc::clone(ty));
                }
            }
            schema.user_types().collect()
        }
    };

    for owner in within {
        for input in &owner.input_fields {
            if results.input_fields.len() < limit && matcher.is_match(&input.name, term) {
                results.input_fields.push(InputFieldMatch {
                    owner: Arc::clone(owner),
                    input: Arc::clone(input),
                });
            }
        }
        for field in &owner.fields {
            if matcher.is_match(&field.name, term) {
                if results.fields.len() < limit {
                    results.fields.push(FieldMatch {
                        owner: Arc::clone(owner),
                        field: Arc::clone(field),
                        args: Vec::new(),
                    });
                }
                continue;
            }
            let args: Vec<_> = field
                .args
                .iter()
                .filter(|a| matcher.is_match(&a.name, term))
                .cloned()
                .collect();
            if !args.is_empty() && results.arguments.len() < limit {
                results.arguments.push(FieldMatch {
                    owner: Arc::clone(owner),
                    field: Arc::clone(field),
                    args,
                });
            }
        }
    }

    results
}
