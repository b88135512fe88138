/// Composition of completion documentation.
///
/// Shared by the overlay controller (HTML into surface nodes) and the
/// language server's `completionItem/resolve` (Markdown documentation).
use crate::markup::TextRenderer;
use crate::signature::{render_type, render_type_plain};
use crate::types::TypeRef;

/// Shown when a suggestion has no description.
pub const DEFAULT_FALLBACK_DESCRIPTION: &str = "no description available";

/// The marker a text renderer opens a paragraph with.
const PARAGRAPH_OPEN: &str = "<p>";

/// A highlighted autocomplete candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    /// The suggestion's type, if it has one (fields, arguments).
    pub ty: Option<TypeRef>,
    pub description: Option<String>,
    pub deprecation_reason: Option<String>,
}

/// The markup dialect documentation is composed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayStyle {
    #[default]
    Html,
    Markdown,
}

impl OverlayStyle {
    fn badge(self, ty: &TypeRef) -> String {
        match self {
            OverlayStyle::Html => format!(r#"<span class="info-type">{}</span>"#, render_type(ty)),
            OverlayStyle::Markdown => format!("`{}` ", render_type_plain(ty)),
        }
    }

    fn deprecation_label(self) -> &'static str {
        match self {
            OverlayStyle::Html => r#"<span class="deprecation-label">Deprecated</span>"#,
            OverlayStyle::Markdown => "**Deprecated** ",
        }
    }
}

/// Composed overlay content for one suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoContent {
    pub info: String,
    /// `None` when the suggestion is not deprecated.
    pub deprecation: Option<String>,
}

/// Put the type badge in front of rendered description text.
///
/// When the text opens with a paragraph, the badge goes just inside it so
/// it leads the first line instead of sitting on a line of its own.
pub fn splice_badge(badge: &str, rendered: &str) -> String {
    match rendered.strip_prefix(PARAGRAPH_OPEN) {
        Some(rest) => format!("{PARAGRAPH_OPEN}{badge}{rest}"),
        None => format!("{badge}{rendered}"),
    }
}

/// Compose the info text: fallback, render, badge, splice.
pub fn compose_info(
    suggestion: &Suggestion,
    renderer: &impl TextRenderer,
    style: OverlayStyle,
    fallback: &str,
) -> String {
    let text = suggestion
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(fallback);
    let rendered = renderer.render(text);
    match suggestion.ty {
        Some(ref ty) => splice_badge(&style.badge(ty), &rendered),
        None => rendered,
    }
}

pub fn compose_deprecation(
    suggestion: &Suggestion,
    renderer: &impl TextRenderer,
    style: OverlayStyle,
) -> Option<String> {
    let reason = suggestion.deprecation_reason.as_deref()?;
    Some(format!(
        "{}{}",
        style.deprecation_label(),
        renderer.render(reason)
    ))
}

pub fn compose(
    suggestion: &Suggestion,
    renderer: &impl TextRenderer,
    style: OverlayStyle,
    fallback: &str,
) -> InfoContent {
    InfoContent {
        info: compose_info(suggestion, renderer, style, fallback),
        deprecation: compose_deprecation(suggestion, renderer, style),
    }
}
