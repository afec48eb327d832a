//! Serialization and export.
//!
//! [`render_document`] walks the tree depth-first and renders each block
//! through its type's renderer; the walk is side-effect-free and idempotent,
//! so serializing the same document twice yields byte-identical output.
//! Block ids never appear in the markup. The structured `{type, props,
//! children}` form for persistence and re-import lives in [`export`].

pub mod blocks;
mod export;

pub use export::{BlockNode, DocumentExport, document_from_json, document_to_json, from_export, to_export};

use crate::catalog::BlockCatalog;
use crate::document::{BlockInstance, Document, LayoutStyle};

/// Render a whole document to markup: a canvas wrapper sized from the
/// canvas settings around every top-level block.
pub fn render_document(doc: &Document, catalog: &BlockCatalog) -> String {
    let settings = &doc.settings;
    let mut html = match settings.layout {
        LayoutStyle::Contained => format!(
            "<div class=\"sv-canvas\" style=\"max-width:{}px;padding:{}px\">",
            settings.width, settings.padding
        ),
        LayoutStyle::FullWidth => format!(
            "<div class=\"sv-canvas sv-canvas-full\" style=\"padding:{}px\">",
            settings.padding
        ),
    };
    for block in &doc.blocks {
        html.push_str(&render_block(block, catalog));
    }
    html.push_str("</div>");
    html
}

/// Render one block (and its subtree) to markup.
///
/// The block's inner fragment comes from its type's renderer — or the inert
/// placeholder when the type is missing from the catalog — wrapped in an
/// element carrying the type class, the custom class, and the layout-style
/// overrides as inline styles.
pub fn render_block(block: &BlockInstance, catalog: &BlockCatalog) -> String {
    let columns: Vec<String> = block
        .children
        .iter()
        .map(|column| {
            column
                .iter()
                .map(|child| render_block(child, catalog))
                .collect::<String>()
        })
        .collect();

    let inner = match catalog.get(&block.block_type) {
        Some(descriptor) => (descriptor.render)(block, &columns),
        None => blocks::render_placeholder(block),
    };

    let mut classes = format!("sv-block sv-block-{}", blocks::html_escape(&block.block_type));
    if let Some(custom) = &block.css_class {
        let custom = custom.trim();
        if !custom.is_empty() {
            classes.push(' ');
            classes.push_str(&blocks::html_escape(custom));
        }
    }
    match block.style.to_inline() {
        Some(style) => format!("<div class=\"{classes}\" style=\"{style}\">{inner}</div>"),
        None => format!("<div class=\"{classes}\">{inner}</div>"),
    }
}
