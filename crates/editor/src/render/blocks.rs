//! Renderers for the standard block library.
//!
//! Each renderer produces one inner markup fragment for a block. Rich text
//! props pass through `ammonia` so only safe inline HTML survives; URLs and
//! attribute values are escaped. Code blocks use `syntect` for syntax
//! highlighting with a plain escaped fallback.

use std::sync::LazyLock;

use serde_json::Value;

use crate::document::BlockInstance;

/// Sanitize user-provided rich text, allowing only safe inline HTML.
pub(crate) fn sanitize_text(input: &str) -> String {
    ammonia::clean(input)
}

/// Escape a string for use in HTML text or attribute position.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Validate that a URL uses a safe scheme (http, https, mailto, or a
/// relative path). Rejects javascript: and friends.
pub(crate) fn is_safe_url(url: &str) -> bool {
    let trimmed = url.trim();
    trimmed.starts_with("https://")
        || trimmed.starts_with("http://")
        || trimmed.starts_with("mailto:")
        || trimmed.starts_with('/')
        || trimmed.starts_with('#')
}

// Pre-loaded syntect resources; loading per call is prohibitively slow.
static SYNTAX_SET: LazyLock<syntect::parsing::SyntaxSet> =
    LazyLock::new(syntect::parsing::SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<syntect::highlighting::ThemeSet> =
    LazyLock::new(syntect::highlighting::ThemeSet::load_defaults);

/// Render a heading block.
/// Props: `{ "content": "...", "level": 2 }`
pub fn render_heading(block: &BlockInstance, _columns: &[String]) -> String {
    let content = block.prop_str("content").unwrap_or("");
    let level = block.prop_u64("level").unwrap_or(2).clamp(1, 6);
    let clean = sanitize_text(content);
    format!("<h{level}>{clean}</h{level}>")
}

/// Render a text paragraph block.
/// Props: `{ "content": "..." }`
pub fn render_text(block: &BlockInstance, _columns: &[String]) -> String {
    let content = block.prop_str("content").unwrap_or("");
    format!("<p>{}</p>", sanitize_text(content))
}

/// Render a list block (ordered or unordered).
/// Props: `{ "style": "ordered"|"unordered", "items": ["...", ...] }`
pub fn render_list(block: &BlockInstance, _columns: &[String]) -> String {
    let tag = if block.prop_str("style") == Some("ordered") {
        "ol"
    } else {
        "ul"
    };
    let mut html = format!("<{tag}>");
    if let Some(items) = block.props.get("items").and_then(Value::as_array) {
        for item in items {
            // Items can be plain strings or objects with a "content" field.
            let content = item
                .as_str()
                .or_else(|| item.get("content").and_then(Value::as_str))
                .unwrap_or("");
            html.push_str(&format!("<li>{}</li>", sanitize_text(content)));
        }
    }
    html.push_str(&format!("</{tag}>"));
    html
}

/// Render a quote block.
/// Props: `{ "content": "...", "citation": "..." }`
pub fn render_quote(block: &BlockInstance, _columns: &[String]) -> String {
    let content = sanitize_text(block.prop_str("content").unwrap_or(""));
    let citation = sanitize_text(block.prop_str("citation").unwrap_or(""));
    if citation.is_empty() {
        format!("<blockquote><p>{content}</p></blockquote>")
    } else {
        format!("<blockquote><p>{content}</p><cite>{citation}</cite></blockquote>")
    }
}

/// Render a code block with syntax highlighting.
/// Props: `{ "content": "...", "language": "rust" }`
///
/// Unknown or missing languages fall back to HTML-escaped plain text.
pub fn render_code(block: &BlockInstance, _columns: &[String]) -> String {
    let code = block.prop_str("content").unwrap_or("");
    let lang = block.prop_str("language").unwrap_or("").trim();

    if lang.is_empty() {
        return format!("<pre><code>{}</code></pre>", html_escape(code));
    }

    let ss = &*SYNTAX_SET;
    let ts = &*THEME_SET;

    let syntax = ss
        .find_syntax_by_token(lang)
        .or_else(|| ss.find_syntax_by_name(lang));
    let Some(syntax) = syntax else {
        return format!("<pre><code>{}</code></pre>", html_escape(code));
    };

    // syntect ships built-in themes; falls back through known names.
    #[allow(clippy::expect_used)]
    let theme = ts
        .themes
        .get("InspiredGitHub")
        .or_else(|| ts.themes.get("base16-ocean.dark"))
        .expect("syntect must ship at least one default theme");

    match syntect::html::highlighted_html_for_string(code, ss, syntax, theme) {
        Ok(highlighted) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            html_escape(lang),
            highlighted
        ),
        Err(_) => format!("<pre><code>{}</code></pre>", html_escape(code)),
    }
}

/// Render an image block with a figure/figcaption wrapper.
/// Props: `{ "url": "...", "alt": "...", "caption": "..." }`
pub fn render_image(block: &BlockInstance, _columns: &[String]) -> String {
    let url = block.prop_str("url").unwrap_or("");
    let alt = block.prop_str("alt").unwrap_or("");
    let caption = block.prop_str("caption").unwrap_or("");
    let escaped_url = html_escape(url);
    let escaped_alt = html_escape(alt);
    let mut html = format!("<figure><img src=\"{escaped_url}\" alt=\"{escaped_alt}\">");
    if !caption.is_empty() {
        html.push_str(&format!("<figcaption>{}</figcaption>", sanitize_text(caption)));
    }
    html.push_str("</figure>");
    html
}

/// Render a button block as a styled link.
/// Props: `{ "label": "...", "url": "..." }`
pub fn render_button(block: &BlockInstance, _columns: &[String]) -> String {
    let label = sanitize_text(block.prop_str("label").unwrap_or(""));
    let url = block.prop_str("url").unwrap_or("");
    if is_safe_url(url) {
        format!(
            "<a class=\"sv-button\" href=\"{}\">{label}</a>",
            html_escape(url)
        )
    } else {
        // Unsafe scheme: render the label without a link.
        format!("<span class=\"sv-button\">{label}</span>")
    }
}

/// Render a divider block as a horizontal rule.
pub fn render_divider(_block: &BlockInstance, _columns: &[String]) -> String {
    "<hr>".to_string()
}

/// Render a spacer block.
/// Props: `{ "height": 32 }`
pub fn render_spacer(block: &BlockInstance, _columns: &[String]) -> String {
    let height = block.prop_u64("height").unwrap_or(32).clamp(1, 600);
    format!("<div class=\"sv-spacer\" style=\"height:{height}px\"></div>")
}

/// Render a columns block: each column's pre-rendered markup nested in a
/// column wrapper.
pub fn render_columns(_block: &BlockInstance, columns: &[String]) -> String {
    let mut html = String::from("<div class=\"sv-columns\">");
    for column in columns {
        html.push_str("<div class=\"sv-column\">");
        html.push_str(column);
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

/// Render the inert placeholder for a block whose type is missing from the
/// catalog. Visibly marked, never aborts the walk.
pub fn render_placeholder(block: &BlockInstance) -> String {
    format!(
        "<div class=\"sv-block-unavailable\" data-block-type=\"{}\">\
         This block type is unavailable.</div>",
        html_escape(&block.block_type)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::document::Props;

    fn block(block_type: &str, props: &[(&str, Value)]) -> BlockInstance {
        let mut map = Props::new();
        for (key, value) in props {
            map.insert((*key).to_string(), value.clone());
        }
        BlockInstance::new(block_type, map)
    }

    #[test]
    fn heading_clamps_level() {
        let b = block("heading", &[("content", "Title".into()), ("level", 9u64.into())]);
        assert_eq!(render_heading(&b, &[]), "<h6>Title</h6>");

        let b = block("heading", &[("content", "Default".into())]);
        assert_eq!(render_heading(&b, &[]), "<h2>Default</h2>");
    }

    #[test]
    fn text_strips_script_but_keeps_inline_tags() {
        let b = block(
            "text",
            &[("content", "This is <b>bold</b><script>alert(1)</script>".into())],
        );
        let html = render_text(&b, &[]);
        assert!(html.contains("<b>bold</b>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn list_renders_ordered_and_unordered() {
        let b = block(
            "list",
            &[
                ("style", "ordered".into()),
                ("items", serde_json::json!(["First", "Second"])),
            ],
        );
        let html = render_list(&b, &[]);
        assert!(html.starts_with("<ol>"));
        assert!(html.contains("<li>First</li>"));

        let b = block("list", &[("items", serde_json::json!(["Only"]))]);
        assert!(render_list(&b, &[]).starts_with("<ul>"));
    }

    #[test]
    fn list_accepts_object_items() {
        let b = block(
            "list",
            &[("items", serde_json::json!([{ "content": "Wrapped" }]))],
        );
        assert!(render_list(&b, &[]).contains("<li>Wrapped</li>"));
    }

    #[test]
    fn quote_with_and_without_citation() {
        let b = block(
            "quote",
            &[("content", "Words.".into()), ("citation", "Someone".into())],
        );
        let html = render_quote(&b, &[]);
        assert!(html.contains("<cite>Someone</cite>"));

        let b = block("quote", &[("content", "Words.".into())]);
        assert!(!render_quote(&b, &[]).contains("<cite>"));
    }

    #[test]
    fn code_highlights_known_language() {
        let b = block(
            "code",
            &[
                ("content", "fn main() {}".into()),
                ("language", "rust".into()),
            ],
        );
        let html = render_code(&b, &[]);
        assert!(html.contains("language-rust"));
        assert!(html.contains("<span"));
    }

    #[test]
    fn code_falls_back_to_escaped_plain_text() {
        let b = block("code", &[("content", "<script>".into())]);
        let html = render_code(&b, &[]);
        assert_eq!(html, "<pre><code>&lt;script&gt;</code></pre>");

        let b = block(
            "code",
            &[
                ("content", "x".into()),
                ("language", "no_such_language_xyz".into()),
            ],
        );
        assert_eq!(render_code(&b, &[]), "<pre><code>x</code></pre>");
    }

    #[test]
    fn image_escapes_url_and_caption() {
        let b = block(
            "image",
            &[
                ("url", "https://example.com/a.jpg?x=1&y=2".into()),
                ("alt", "An image".into()),
                ("caption", "A photo".into()),
            ],
        );
        let html = render_image(&b, &[]);
        assert!(html.contains("&amp;y=2"));
        assert!(html.contains("alt=\"An image\""));
        assert!(html.contains("<figcaption>A photo</figcaption>"));
    }

    #[test]
    fn button_rejects_unsafe_url() {
        let b = block(
            "button",
            &[
                ("label", "Click".into()),
                ("url", "javascript:alert(1)".into()),
            ],
        );
        let html = render_button(&b, &[]);
        assert!(!html.contains("href"));
        assert!(html.contains("Click"));

        let b = block("button", &[("label", "Go".into()), ("url", "/page".into())]);
        assert!(render_button(&b, &[]).contains("href=\"/page\""));
    }

    #[test]
    fn spacer_clamps_height() {
        let b = block("spacer", &[("height", 10_000u64.into())]);
        assert!(render_spacer(&b, &[]).contains("height:600px"));
        let b = block("spacer", &[]);
        assert!(render_spacer(&b, &[]).contains("height:32px"));
    }

    #[test]
    fn columns_nest_prerendered_fragments() {
        let b = block("columns", &[]);
        let html = render_columns(&b, &["<p>a</p>".to_string(), "<p>b</p>".to_string()]);
        assert_eq!(
            html,
            "<div class=\"sv-columns\"><div class=\"sv-column\"><p>a</p></div>\
             <div class=\"sv-column\"><p>b</p></div></div>"
        );
    }

    #[test]
    fn placeholder_marks_unknown_type() {
        let b = block("mystery<x>", &[]);
        let html = render_placeholder(&b);
        assert!(html.contains("sv-block-unavailable"));
        assert!(html.contains("data-block-type=\"mystery&lt;x&gt;\""));
    }
}
