/// Completion context extraction.
///
/// Scans the document text up to the cursor and works out where in the
/// selection-set structure the cursor sits: which operation or type
/// condition the outermost `{` belongs to, and which field opened each
/// nested `{`.  The scan is purely lexical; it never builds an AST, so it
/// keeps working on the half-typed documents completion runs against.
use std::sync::Arc;

use crate::types::{NamedType, SchemaGraph};

/// One level of selection-set nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The root selection set of an operation (`query`, `mutation`,
    /// `subscription`; a bare `{` is a query).
    Operation(String),
    /// A fragment or inline fragment with a type condition.
    TypeCondition(String),
    /// The selection set of a field.
    Field(String),
}

/// Where the cursor is, as far as completion cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// Inside a selection set reached through `path`.
    SelectionSet(Vec<Step>),
    /// Inside the argument list of `field`, in the selection set at `path`.
    Arguments { path: Vec<Step>, field: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Frame {
    Selection(Step),
    /// `( … )`; `field` is set for field arguments, `None` for directive
    /// arguments and variable definitions.
    Args { field: Option<String> },
    /// `[ … ]`, or `{ … }` inside an argument value.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    Punct(char),
    Spread,
}

/// Split GraphQL source into the tokens the context scan needs.
/// Strings, comments, numbers and variables are dropped.
fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '"' => {
                if chars[i..].starts_with(&['"', '"', '"']) {
                    i += 3;
                    while i < chars.len() && !chars[i..].starts_with(&['"', '"', '"']) {
                        i += if chars[i] == '\\' { 2 } else { 1 };
                    }
                    i += 3;
                } else {
                    i += 1;
                    while i < chars.len() && chars[i] != '"' && chars[i] != '\n' {
                        i += if chars[i] == '\\' { 2 } else { 1 };
                    }
                    i += 1;
                }
            }
            '.' if chars[i..].starts_with(&['.', '.', '.']) => {
                tokens.push(Token::Spread);
                i += 3;
            }
            '$' => {
                // Variables are never field names; skip `$name` whole.
                i += 1;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
            }
            '{' | '}' | '(' | ')' | '[' | ']' | ':' | '@' => {
                tokens.push(Token::Punct(c));
                i += 1;
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Name(chars[start..i].iter().collect()));
            }
            _ => i += 1,
        }
    }

    tokens
}

/// Extract the completion context at a byte offset.
///
/// Returns `None` outside any selection set or argument list (top level,
/// inside variable definitions, inside list/object argument values).
pub fn extract_completion_context(content: &str, offset: usize) -> Option<CompletionContext> {
    let end = content.len().min(offset);
    // Clamp to a char boundary so slicing never panics.
    let end = (0..=end).rev().find(|&i| content.is_char_boundary(i))?;
    let tokens = tokenize(&content[..end]);

    let mut frames: Vec<Frame> = Vec::new();
    // Pending state for the next `{` at the top level.
    let mut operation: Option<String> = None;
    let mut fragment_type: Option<String> = None;
    // Pending state for the next `{` inside a selection set.
    let mut field: Option<String> = None;
    let mut type_condition: Option<String> = None;
    let mut expect_type = false;
    let mut in_directive = false;
    let mut prev: Option<Token> = None;

    for token in tokens {
        let in_selection = matches!(frames.last(), Some(Frame::Selection(_)));
        match &token {
            Token::Name(name) => {
                let after = |p: &Token| prev.as_ref() == Some(p);
                if after(&Token::Punct('@')) {
                    in_directive = true;
                } else if frames.is_empty() {
                    match name.as_str() {
                        "query" | "mutation" | "subscription" => {
                            operation = Some(name.clone());
                            fragment_type = None;
                        }
                        "fragment" => {
                            operation = None;
                            fragment_type = None;
                        }
                        "on" => expect_type = true,
                        _ if expect_type => {
                            fragment_type = Some(name.clone());
                            expect_type = false;
                        }
                        _ => {}
                    }
                } else if in_selection {
                    if after(&Token::Spread) && name == "on" {
                        expect_type = true;
                        field = None;
                    } else if after(&Token::Spread) {
                        // Named fragment spread.
                        field = None;
                        type_condition = None;
                    } else if expect_type {
                        type_condition = Some(name.clone());
                        expect_type = false;
                    } else {
                        // A plain field, or the real field after `alias:`.
                        field = Some(name.clone());
                        type_condition = None;
                        in_directive = false;
                    }
                }
            }
            Token::Punct('{') => {
                let frame = if frames.is_empty() {
                    let step = match (fragment_type.take(), operation.take()) {
                        (Some(ty), _) => Step::TypeCondition(ty),
                        (None, Some(op)) => Step::Operation(op),
                        (None, None) => Step::Operation("query".to_string()),
                    };
                    Frame::Selection(step)
                } else if in_selection {
                    match (type_condition.take(), field.take()) {
                        (Some(ty), _) => Frame::Selection(Step::TypeCondition(ty)),
                        (None, Some(f)) => Frame::Selection(Step::Field(f)),
                        (None, None) => Frame::Other,
                    }
                } else {
                    Frame::Other
                };
                frames.push(frame);
                expect_type = false;
                in_directive = false;
            }
            Token::Punct('}') => {
                frames.pop();
                field = None;
                type_condition = None;
                expect_type = false;
                in_directive = false;
            }
            Token::Punct('(') => {
                let owner = if in_selection && !in_directive {
                    field.clone()
                } else {
                    None
                };
                frames.push(Frame::Args { field: owner });
            }
            Token::Punct(')') => {
                frames.pop();
                in_directive = false;
            }
            Token::Punct('[') => frames.push(Frame::Other),
            Token::Punct(']') => {
                frames.pop();
            }
            Token::Punct(_) | Token::Spread => {}
        }
        prev = Some(token);
    }

    let (innermost, outer) = frames.split_last()?;
    let path = outer
        .iter()
        .map(|f| match f {
            Frame::Selection(step) => Some(step.clone()),
            Frame::Args { .. } | Frame::Other => None,
        })
        .collect::<Option<Vec<_>>>()?;

    match innermost {
        Frame::Selection(step) => {
            let mut path = path;
            path.push(step.clone());
            Some(CompletionContext::SelectionSet(path))
        }
        Frame::Args {
            field: Some(field),
        } => Some(CompletionContext::Arguments {
            path,
            field: field.clone(),
        }),
        Frame::Args { field: None } | Frame::Other => None,
    }
}

/// Walk a selection path through the schema to the type whose members
/// are being completed.
pub fn resolve_path(schema: &SchemaGraph, path: &[Step]) -> Option<Arc<NamedType>> {
    let mut current: Option<&Arc<NamedType>> = None;
    for step in path {
        current = Some(match step {
            Step::Operation(op) => schema.root_type(op)?,
            Step::TypeCondition(name) => schema.get_type(name)?,
            Step::Field(name) => {
                let field = current?.field(name)?;
                schema.get_type(field.ty.named_type())?
            }
        });
    }
    current.cloned()
}
