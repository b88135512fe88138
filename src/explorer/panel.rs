/// Rendering of explorer views into a navigable panel.
///
/// A [`Panel`] is a title bar (back button, title, caller-supplied
/// trailing slot), an optional search box and a content region of HTML
/// markup.  Type names in the content carry `data-type` / `data-field`
/// attributes so the client can turn clicks into navigation requests.
use serde::Serialize;

use crate::explorer::resolver::{ExplorerView, ViewMode};
use crate::explorer::search::{self, FieldMatch, MemberMatcher};
use crate::markup::{TextRenderer, escape};
use crate::signature::{TypeNameFormat, render_type_with};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBox {
    pub placeholder: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub back_label: Option<String>,
    pub title: String,
    pub trailing: Option<String>,
    pub search: Option<SearchBox>,
    /// The view mode identifier (e.g. `"type"`, `"spinner"`).
    pub mode: &'static str,
    pub content: String,
}

/// Type names in explorer content: a link carrying the type name.
struct ExplorerTypeName;

impl TypeNameFormat for ExplorerTypeName {
    fn named(&self, name: &str) -> String {
        let name = escape(name);
        format!(r#"<a class="type-name" data-type="{name}">{name}</a>"#)
    }
}

/// Shared inputs for turning a view into markup.
pub struct PanelContext<'a, T: TextRenderer, M: MemberMatcher> {
    pub schema: Option<&'a SchemaGraph>,
    pub text: &'a T,
    pub matcher: &'a M,
    pub search_limit: usize,
    pub trailing: Option<&'a str>,
}

pub fn render_panel<T: TextRenderer, M: MemberMatcher>(
    view: &ExplorerView,
    cx: &PanelContext<'_, T, M>,
) -> Panel {
    let search = view.shows_search.then(|| SearchBox {
        placeholder: search_placeholder(&view.mode),
        value: match &view.mode {
            ViewMode::SearchResultsView { term, .. } => term.clone(),
            _ => String::new(),
        },
    });

    let content = match &view.mode {
        ViewMode::ErrorView(errors) => render_errors(errors),
        ViewMode::SpinnerView => r#"<div class="spinner-container"><div class="spinner"></div></div>"#.to_string(),
        ViewMode::NoSchemaView => r#"<div class="no-schema">No schema available</div>"#.to_string(),
        ViewMode::SearchResultsView { term, scope } => match cx.schema {
            Some(schema) => {
                let results = search::search(schema, term, scope.as_ref(), cx.matcher, cx.search_limit);
                render_search_results(&results, term, scope.is_some())
            }
            None => String::new(),
        },
        ViewMode::SchemaRootView => cx.schema.map(|s| render_schema(s, cx.text)).unwrap_or_default(),
        ViewMode::TypeDetailView(ty) => render_type_detail(ty, cx.text),
        ViewMode::FieldDetailView(def) => render_field_detail(def.as_ref(), cx.text),
    };

    Panel {
        back_label: view.back_label.clone(),
        title: view.title.clone(),
        trailing: cx.trailing.map(str::to_string),
        search,
        mode: view.mode.kind(),
        content,
    }
}

fn search_placeholder(mode: &ViewMode) -> String {
    match mode {
        ViewMode::TypeDetailView(ty) => format!("Search {}...", ty.name),
        ViewMode::SearchResultsView {
            scope: Some(scope), ..
        } => format!("Search {}...", scope.name()),
        _ => "Search Schema...".to_string(),
    }
}

fn render_errors(errors: &[String]) -> String {
    let mut out = String::from(r#"<div class="error-container">"#);
    for error in errors {
        out.push_str(&format!(r#"<div class="error">{}</div>"#, escape(error)));
    }
    out.push_str("</div>");
    out
}

fn section(out: &mut String, title: &str, body: &str) {
    out.push_str(&format!(
        r#"<div class="doc-section"><div class="doc-section-title">{}</div>{}</div>"#,
        escape(title),
        body
    ));
}

fn description(out: &mut String, text: Option<&str>, renderer: &impl TextRenderer) {
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        out.push_str(&format!(
            r#"<div class="doc-description">{}</div>"#,
            renderer.render(text)
        ));
    }
}

fn deprecation(out: &mut String, reason: Option<&str>, renderer: &impl TextRenderer) {
    if let Some(reason) = reason {
        out.push_str(&format!(
            r#"<div class="doc-deprecation"><span class="deprecation-label">Deprecated</span>{}</div>"#,
            renderer.render(reason)
        ));
    }
}

fn type_link(name: &str) -> String {
    ExplorerTypeName.named(name)
}

fn field_link(owner: &str, field: &str) -> String {
    format!(
        r#"<a class="field-name" data-type="{}" data-field="{}">{}</a>"#,
        escape(owner),
        escape(field),
        escape(field)
    )
}

fn arguments(args: &[std::sync::Arc<InputValueInfo>]) -> String {
    args.iter()
        .map(|a| {
            let mut out = format!(
                r#"<span class="arg"><span class="arg-name">{}</span>: {}"#,
                escape(&a.name),
                render_type_with(&a.ty, &ExplorerTypeName)
            );
            if let Some(ref default) = a.default_value {
                out.push_str(&format!(" = {}", escape(default)));
            }
            out.push_str("</span>");
            out
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn field_line(owner: &str, field: &FieldInfo) -> String {
    let args = if field.args.is_empty() {
        String::new()
    } else {
        format!("({})", arguments(&field.args))
    };
    format!(
        r#"<div class="doc-field">{}{}: {}</div>"#,
        field_link(owner, &field.name),
        args,
        render_type_with(&field.ty, &ExplorerTypeName)
    )
}

fn render_schema(schema: &SchemaGraph, text: &impl TextRenderer) -> String {
    let mut out = String::new();
    description(
        &mut out,
        Some(
            schema
                .description
                .as_deref()
                .unwrap_or("A GraphQL schema provides a root type for each kind of operation."),
        ),
        text,
    );

    let roots: String = schema
        .root_types()
        .into_iter()
        .map(|(op, ty)| {
            format!(
                r#"<div class="doc-root"><span class="keyword">{}</span>: {}</div>"#,
                op,
                type_link(&ty.name)
            )
        })
        .collect();
    section(&mut out, "Root Types", &roots);

    let all: String = schema
        .user_types()
        .map(|ty| format!(r#"<div class="doc-type">{}</div>"#, type_link(&ty.name)))
        .collect();
    section(&mut out, "All Schema Types", &all);
    out
}

fn render_type_detail(ty: &NamedType, text: &impl TextRenderer) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<div class="doc-kind">{}</div>"#,
        ty.kind.as_str().to_lowercase()
    ));
    description(&mut out, ty.description.as_deref(), text);

    if !ty.interfaces.is_empty() {
        let body: String = ty.interfaces.iter().map(|i| type_link(i)).collect::<Vec<_>>().join(", ");
        section(&mut out, "Implements", &body);
    }

    let (deprecated, active): (Vec<_>, Vec<_>) =
        ty.fields.iter().partition(|f| f.deprecation_reason.is_some());
    if !active.is_empty() {
        let body: String = active.iter().map(|f| field_line(&ty.name, f)).collect();
        section(&mut out, "Fields", &body);
    }
    if !deprecated.is_empty() {
        let body: String = deprecated.iter().map(|f| field_line(&ty.name, f)).collect();
        section(&mut out, "Deprecated Fields", &body);
    }

    if !ty.input_fields.is_empty() {
        let body: String = ty
            .input_fields
            .iter()
            .map(|f| format!(r#"<div class="doc-field">{}</div>"#, arguments(std::slice::from_ref(f))))
            .collect();
        section(&mut out, "Fields", &body);
    }

    let (deprecated, active): (Vec<_>, Vec<_>) =
        ty.enum_values.iter().partition(|v| v.deprecation_reason.is_some());
    let enum_line = |v: &EnumValueInfo| {
        let mut line = format!(r#"<div class="doc-enum-value"><span class="enum-value">{}</span>"#, escape(&v.name));
        description(&mut line, v.description.as_deref(), text);
        deprecation(&mut line, v.deprecation_reason.as_deref(), text);
        line.push_str("</div>");
        line
    };
    if !active.is_empty() {
        section(&mut out, "Enum Values", &active.into_iter().map(enum_line).collect::<String>());
    }
    if !deprecated.is_empty() {
        section(
            &mut out,
            "Deprecated Enum Values",
            &deprecated.into_iter().map(enum_line).collect::<String>(),
        );
    }

    if !ty.possible_types.is_empty() {
        let title = match ty.kind {
            TypeKind::Interface => "Implementations",
            _ => "Possible Types",
        };
        let body: String = ty
            .possible_types
            .iter()
            .map(|t| format!(r#"<div class="doc-type">{}</div>"#, type_link(t)))
            .collect();
        section(&mut out, title, &body);
    }
    out
}

fn render_field_detail(def: Option<&Definition>, text: &impl TextRenderer) -> String {
    let mut out = String::new();
    match def {
        Some(Definition::Field(field)) => {
            description(&mut out, field.description.as_deref(), text);
            deprecation(&mut out, field.deprecation_reason.as_deref(), text);
            section(&mut out, "Type", &render_type_with(&field.ty, &ExplorerTypeName));
            if !field.args.is_empty() {
                let body: String = field
                    .args
                    .iter()
                    .map(|a| {
                        let mut line = format!(r#"<div class="doc-arg">{}"#, arguments(std::slice::from_ref(a)));
                        description(&mut line, a.description.as_deref(), text);
                        deprecation(&mut line, a.deprecation_reason.as_deref(), text);
                        line.push_str("</div>");
                        line
                    })
                    .collect();
                section(&mut out, "Arguments", &body);
            }
        }
        Some(Definition::Argument(arg)) => {
            description(&mut out, arg.description.as_deref(), text);
            deprecation(&mut out, arg.deprecation_reason.as_deref(), text);
            section(&mut out, "Type", &render_type_with(&arg.ty, &ExplorerTypeName));
            if let Some(ref default) = arg.default_value {
                section(&mut out, "Default Value", &format!("<code>{}</code>", escape(default)));
            }
        }
        Some(Definition::Type(ty)) => {
            // Types resolve to the type view; only reachable if a caller
            // builds a field view by hand.
            section(&mut out, "Type", &type_link(&ty.name));
        }
        None => {}
    }
    out
}

fn render_search_results(results: &search::SearchResults, term: &str, scoped: bool) -> String {
    if results.is_empty() {
        return format!(
            r#"<div class="search-empty">No results found for <strong>{}</strong></div>"#,
            escape(term)
        );
    }

    let mut out = String::new();
    if !results.types.is_empty() {
        let body: String = results
            .types
            .iter()
            .map(|t| format!(r#"<div class="doc-type">{}</div>"#, type_link(&t.name)))
            .collect();
        section(&mut out, "Types", &body);
    }

    let match_line = |m: &FieldMatch| {
        let owner = if scoped {
            String::new()
        } else {
            format!("{}.", type_link(&m.owner.name))
        };
        let args = if m.args.is_empty() {
            String::new()
        } else {
            format!("({})", arguments(&m.args))
        };
        format!(
            r#"<div class="doc-field">{}{}{}</div>"#,
            owner,
            field_link(&m.owner.name, &m.field.name),
            args
        )
    };

    if !results.fields.is_empty() {
        section(&mut out, "Fields", &results.fields.iter().map(match_line).collect::<String>());
    }
    if !results.arguments.is_empty() {
        section(&mut out, "Arguments", &results.arguments.iter().map(match_line).collect::<String>());
    }
    if !results.input_fields.is_empty() {
        let body: String = results
            .input_fields
            .iter()
            .map(|m| {
                let owner = if scoped {
                    String::new()
                } else {
                    format!("{}.", type_link(&m.owner.name))
                };
                format!(
                    r#"<div class="doc-field">{}{}</div>"#,
                    owner,
                    arguments(std::slice::from_ref(&m.input))
                )
            })
            .collect();
        section(&mut out, "Input Fields", &body);
    }
    out
}
