/// Markup helpers: escaping and the text-rendering service.
///
/// Descriptions in a schema are free text (usually Markdown) that may come
/// from untrusted sources.  Everything that lands in HTML output either
/// goes through [`escape`] or through a [`TextRenderer`].
use pulldown_cmark::{Options, Parser, html};

/// Turns free text into display markup.
pub trait TextRenderer {
    fn render(&self, text: &str) -> String;
}

/// Renders Markdown to HTML.  Raw HTML in the source is escaped rather
/// than passed through.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl TextRenderer for MarkdownRenderer {
    fn render(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH).map(|event| {
            match event {
                pulldown_cmark::Event::Html(raw) | pulldown_cmark::Event::InlineHtml(raw) => {
                    pulldown_cmark::Event::Text(raw)
                }
                other => other,
            }
        });
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Passes text through untouched, for clients that render Markdown
/// themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl TextRenderer for Verbatim {
    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}

impl<F> TextRenderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, text: &str) -> String {
        self(text)
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
