//! Markdown-to-blocks conversion.
//!
//! Converts markdown text — typically an AI draft or pasted content — into
//! block instances: headings, paragraphs, lists, quotes, fenced code,
//! images, and thematic breaks. Inline emphasis, strong, code, and links
//! survive as safe inline HTML inside text props (sanitised again at render
//! time). Anything the block model cannot express is flattened rather than
//! dropped silently.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
use serde_json::Value;

use crate::catalog::BlockCatalog;
use crate::document::{BlockInstance, Props};
use crate::render::blocks::html_escape;

/// Convert markdown into a flat list of block instances.
///
/// Types present in the catalog are instantiated with their defaults merged
/// in; a catalog without a type still yields a bare instance so no content
/// is lost.
pub fn blocks_from_markdown(input: &str, catalog: &BlockCatalog) -> Vec<BlockInstance> {
    let mut out = Vec::new();
    let mut inline = String::new();
    let mut heading: Option<u64> = None;
    let mut quote_depth: usize = 0;
    let mut quote_text: Vec<String> = Vec::new();
    let mut code: Option<(String, String)> = None;
    let mut image: Option<(String, String)> = None;
    let mut list: Option<(bool, Vec<String>)> = None;
    let mut list_depth: usize = 0;

    for event in Parser::new(input) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    inline.clear();
                    heading = Some(heading_level(level));
                }
                Tag::Paragraph => {
                    if list_depth == 0 {
                        inline.clear();
                    }
                }
                Tag::BlockQuote { .. } => {
                    quote_depth += 1;
                    inline.clear();
                }
                Tag::CodeBlock(kind) => {
                    let language = match kind {
                        CodeBlockKind::Fenced(lang) => lang.trim().to_string(),
                        CodeBlockKind::Indented => String::new(),
                    };
                    code = Some((language, String::new()));
                }
                Tag::List(start) => {
                    list_depth += 1;
                    if list_depth == 1 {
                        list = Some((start.is_some(), Vec::new()));
                    }
                }
                Tag::Item => {
                    if list_depth == 1 {
                        inline.clear();
                    }
                }
                Tag::Strong => inline.push_str("<b>"),
                Tag::Emphasis => inline.push_str("<i>"),
                Tag::Link { dest_url, .. } => {
                    inline.push_str(&format!("<a href=\"{}\">", html_escape(&dest_url)));
                }
                Tag::Image { dest_url, .. } => {
                    image = Some((dest_url.to_string(), String::new()));
                }
                _ => {}
            },
            Event::End(end) => match end {
                TagEnd::Heading { .. } => {
                    if let Some(level) = heading.take() {
                        let mut props = Props::new();
                        props.insert("content".to_string(), Value::from(inline.trim()));
                        props.insert("level".to_string(), Value::from(level));
                        out.push(instance(catalog, "heading", props));
                        inline.clear();
                    }
                }
                TagEnd::Paragraph => {
                    if quote_depth > 0 {
                        quote_text.push(inline.trim().to_string());
                        inline.clear();
                    } else if list_depth == 0 {
                        let content = inline.trim();
                        if !content.is_empty() {
                            let mut props = Props::new();
                            props.insert("content".to_string(), Value::from(content));
                            out.push(instance(catalog, "text", props));
                        }
                        inline.clear();
                    }
                }
                TagEnd::BlockQuote { .. } => {
                    quote_depth = quote_depth.saturating_sub(1);
                    if quote_depth == 0 {
                        let content = quote_text.join("<br>");
                        quote_text.clear();
                        if !content.is_empty() {
                            let mut props = Props::new();
                            props.insert("content".to_string(), Value::from(content));
                            out.push(instance(catalog, "quote", props));
                        }
                    }
                }
                TagEnd::CodeBlock => {
                    if let Some((language, buffer)) = code.take() {
                        let mut props = Props::new();
                        props.insert(
                            "content".to_string(),
                            Value::from(buffer.trim_end_matches('\n')),
                        );
                        props.insert("language".to_string(), Value::from(language));
                        out.push(instance(catalog, "code", props));
                    }
                }
                TagEnd::Item => {
                    if list_depth == 1 {
                        if let Some((_, items)) = &mut list {
                            items.push(inline.trim().to_string());
                        }
                        inline.clear();
                    }
                }
                TagEnd::List { .. } => {
                    list_depth = list_depth.saturating_sub(1);
                    if list_depth == 0 {
                        if let Some((ordered, items)) = list.take() {
                            let mut props = Props::new();
                            props.insert(
                                "style".to_string(),
                                Value::from(if ordered { "ordered" } else { "unordered" }),
                            );
                            props.insert("items".to_string(), Value::from(items));
                            out.push(instance(catalog, "list", props));
                        }
                    }
                }
                TagEnd::Strong => inline.push_str("</b>"),
                TagEnd::Emphasis => inline.push_str("</i>"),
                TagEnd::Link => inline.push_str("</a>"),
                TagEnd::Image => {
                    if let Some((url, alt)) = image.take() {
                        let mut props = Props::new();
                        props.insert("url".to_string(), Value::from(url));
                        props.insert("alt".to_string(), Value::from(alt.trim()));
                        out.push(instance(catalog, "image", props));
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                if let Some((_, buffer)) = &mut code {
                    buffer.push_str(&text);
                } else if let Some((_, alt)) = &mut image {
                    alt.push_str(&text);
                } else {
                    inline.push_str(&html_escape(&text));
                }
            }
            Event::Code(text) => {
                inline.push_str(&format!("<code>{}</code>", html_escape(&text)));
            }
            Event::SoftBreak => inline.push(' '),
            Event::HardBreak => inline.push_str("<br>"),
            Event::Rule => out.push(instance(catalog, "divider", Props::new())),
            _ => {}
        }
    }
    out
}

fn heading_level(level: HeadingLevel) -> u64 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn instance(catalog: &BlockCatalog, block_type: &str, props: Props) -> BlockInstance {
    catalog
        .create_instance(block_type, props.clone())
        .unwrap_or_else(|| BlockInstance::new(block_type, props))
}
