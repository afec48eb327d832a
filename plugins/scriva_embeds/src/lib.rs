//! Embed block types for the Scriva editor.
//!
//! Registers an `embed` block (whitelisted video embeds rendered as
//! responsive iframes, anything else as a safe link) through the editor's
//! public registration surface, the same way any third-party block pack
//! would. Embeds rely on iframes, so the type declares the post and page
//! contexts only — email clients strip them.

use scriva_editor::catalog::{BlockSupports, EditorContext, FieldDefinition};
use scriva_editor::{BlockDescriptor, BlockInstance, Editor};

/// Register the embed block types with an editor session.
pub fn register(editor: &mut Editor) {
    editor.register_block(embed_descriptor());
}

fn embed_descriptor() -> BlockDescriptor {
    BlockDescriptor::new("embed", "Embed", render_embed)
        .icon("embed")
        .category("media")
        .contexts(vec![EditorContext::Post, EditorContext::Page])
        .supports(BlockSupports {
            custom_class: true,
            spacing: true,
            ..BlockSupports::default()
        })
        .default_prop("url", "")
        .default_prop("caption", "")
        .fields(vec![
            FieldDefinition::url("url", "Embed URL"),
            FieldDefinition::text("caption", "Caption"),
        ])
}

/// Whitelisted embed URL patterns.
const EMBED_WHITELIST: &[&str] = &[
    "youtube.com/watch",
    "youtube.com/embed/",
    "youtu.be/",
    "vimeo.com/",
    "player.vimeo.com/",
];

/// Check whether the given URL matches one of the whitelisted embed patterns.
fn is_whitelisted_embed(url: &str) -> bool {
    // Normalise: strip protocol prefix for matching.
    let normalised = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    EMBED_WHITELIST
        .iter()
        .any(|pattern| normalised.starts_with(pattern))
}

fn is_safe_url(url: &str) -> bool {
    let trimmed = url.trim();
    trimmed.starts_with("https://") || trimmed.starts_with("http://")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render an embed block.
///
/// Whitelisted sources are rendered as responsive iframes; other http(s)
/// URLs as safe anchor links; anything else (e.g. javascript:) as plain
/// text only.
fn render_embed(block: &BlockInstance, _columns: &[String]) -> String {
    let url = block.prop_str("url").unwrap_or("");
    if url.is_empty() {
        return String::new();
    }
    let caption = block.prop_str("caption").unwrap_or("");

    if is_whitelisted_embed(url) {
        let escaped_url = html_escape(url);
        let mut html = format!(
            "<div class=\"sv-embed\">\
             <iframe src=\"{escaped_url}\" frameborder=\"0\" allowfullscreen></iframe>\
             </div>"
        );
        if !caption.is_empty() {
            html.push_str(&format!(
                "<p class=\"sv-embed-caption\">{}</p>",
                html_escape(caption)
            ));
        }
        html
    } else if is_safe_url(url) {
        let escaped_url = html_escape(url);
        format!("<a href=\"{escaped_url}\">{escaped_url}</a>")
    } else {
        let escaped_url = html_escape(url);
        format!("<span>{escaped_url}</span>")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use scriva_editor::document::{InsertPosition, Props};
    use scriva_editor::document::path::ParentRef;
    use scriva_editor::{EditorConfig, EditorContext};
    use serde_json::Value;

    fn embed_block(url: &str) -> BlockInstance {
        let mut props = Props::new();
        props.insert("url".to_string(), Value::from(url));
        BlockInstance::new("embed", props)
    }

    #[test]
    fn registration_fires_block_registered() {
        let mut editor = Editor::with_standard_blocks();
        let seen = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&seen);
        editor.hooks_mut().add_action("block-registered", move |args| {
            if args.first().and_then(Value::as_str) == Some("embed") {
                flag.store(true, Ordering::SeqCst);
            }
            Ok(())
        });

        register(&mut editor);
        assert!(seen.load(Ordering::SeqCst));
        assert!(editor.catalog().contains("embed"));
    }

    #[test]
    fn embed_is_not_offered_in_email_context() {
        let mut editor = Editor::new(
            scriva_editor::BlockCatalog::with_standard_blocks(),
            EditorConfig::for_context(EditorContext::Email),
        );
        register(&mut editor);
        assert!(editor.palette().iter().all(|d| d.type_name != "embed"));

        let mut web = Editor::new(
            scriva_editor::BlockCatalog::with_standard_blocks(),
            EditorConfig::for_context(EditorContext::Post),
        );
        register(&mut web);
        assert!(web.palette().iter().any(|d| d.type_name == "embed"));
    }

    #[test]
    fn registered_embed_inserts_and_renders() {
        let mut editor = Editor::with_standard_blocks();
        register(&mut editor);
        let id = editor
            .add_block("embed", InsertPosition::End, &ParentRef::Root)
            .unwrap();
        let mut props = Props::new();
        props.insert(
            "url".to_string(),
            Value::from("https://www.youtube.com/watch?v=abc123"),
        );
        editor.update_block(id, props);

        let html = editor.export_html();
        assert!(html.contains("<iframe"));
        assert!(html.contains("allowfullscreen"));
    }

    #[test]
    fn whitelisted_sources_render_iframes() {
        let html = render_embed(&embed_block("https://youtu.be/abc"), &[]);
        assert!(html.contains("<iframe"));

        let html = render_embed(&embed_block("https://vimeo.com/123456"), &[]);
        assert!(html.contains("<iframe"));
    }

    #[test]
    fn non_whitelisted_urls_render_as_links() {
        let html = render_embed(&embed_block("https://example.com/page"), &[]);
        assert!(!html.contains("<iframe"));
        assert!(html.contains("<a href=\"https://example.com/page\""));
    }

    #[test]
    fn javascript_uris_render_as_plain_text() {
        let html = render_embed(&embed_block("javascript:alert(1)"), &[]);
        assert!(!html.contains("href"));
        assert!(html.contains("<span>"));
    }

    #[test]
    fn lookalike_domains_are_rejected() {
        assert!(!is_whitelisted_embed("https://notyoutube.com/watch?v=a"));
        assert!(!is_whitelisted_embed("https://youtube.com.evil.com/watch"));
        assert!(is_whitelisted_embed("https://www.youtube.com/watch?v=a"));
    }

    #[test]
    fn empty_url_renders_nothing() {
        assert!(render_embed(&embed_block(""), &[]).is_empty());
    }

    #[test]
    fn caption_is_escaped() {
        let mut block = embed_block("https://youtu.be/abc");
        block
            .props
            .insert("caption".to_string(), Value::from("<b>cap</b>"));
        let html = render_embed(&block, &[]);
        assert!(html.contains("&lt;b&gt;cap&lt;/b&gt;"));
    }
}
