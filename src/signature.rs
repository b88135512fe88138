/// Type signature rendering.
///
/// Turns a [`TypeRef`] into GraphQL notation: `T!` for non-null,
/// `[T]` for lists, and the type name for named types.  The named-type
/// leaf is formatted by a [`TypeNameFormat`], so the same recursion backs
/// both the HTML overlay (clickable, escaped type names) and plain-text
/// completion details.
use crate::markup::escape;
use crate::types::{FieldInfo, InputValueInfo, TypeRef};

/// Formats the leaf named type of a signature.
pub trait TypeNameFormat {
    fn named(&self, name: &str) -> String;
}

/// `<a class="type-name">Name</a>` with the name escaped, so a consumer
/// can style or hit-test type names apart from surrounding text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTypeName;

impl TypeNameFormat for HtmlTypeName {
    fn named(&self, name: &str) -> String {
        format!(r#"<a class="type-name">{}</a>"#, escape(name))
    }
}

/// The bare type name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainName;

impl TypeNameFormat for PlainName {
    fn named(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Render a type as HTML markup.
pub fn render_type(ty: &TypeRef) -> String {
    render_type_with(ty, &HtmlTypeName)
}

/// Render a type as plain text, e.g. `[User!]!`.
pub fn render_type_plain(ty: &TypeRef) -> String {
    render_type_with(ty, &PlainName)
}

pub fn render_type_with(ty: &TypeRef, format: &impl TypeNameFormat) -> String {
    match ty {
        TypeRef::NonNull(inner) => format!("{}!", render_type_with(inner, format)),
        TypeRef::List(inner) => format!("[{}]", render_type_with(inner, format)),
        TypeRef::Named(name) => format.named(name),
    }
}

/// Render `name: Type = default` for an argument or input field.
pub fn render_input_value_with(arg: &InputValueInfo, format: &impl TypeNameFormat) -> String {
    let mut out = format!("{}: {}", arg.name, render_type_with(&arg.ty, format));
    if let Some(ref default) = arg.default_value {
        out.push_str(" = ");
        out.push_str(default);
    }
    out
}

/// Build the plain signature of a field.
///
/// Example: `posts(first: Int = 10, after: String): [Post!]!`
pub fn render_field_signature(field: &FieldInfo) -> String {
    let ret = render_type_plain(&field.ty);
    if field.args.is_empty() {
        return format!("{}: {}", field.name, ret);
    }
    let args: Vec<String> = field
        .args
        .iter()
        .map(|a| render_input_value_with(a, &PlainName))
        .collect();
    format!("{}({}): {}", field.name, args.join(", "), ret)
}
