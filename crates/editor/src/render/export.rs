//! Structured `{type, props, children}` export and re-import.
//!
//! The structured form carries no block ids or selection: ids are a
//! session-lifetime concern and are minted fresh on import. Import tolerates
//! unknown block types (kept inert in the tree) and malformed or missing
//! props (filled from the type's defaults) — a document must never become
//! unrecoverable because of one bad payload field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::catalog::BlockCatalog;
use crate::document::{BlockInstance, CanvasSettings, Document, Props, StyleOverrides};
use crate::error::EditorResult;

/// One block in the structured export tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    /// Block type machine name.
    #[serde(rename = "type")]
    pub block_type: String,

    /// Block props.
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,

    /// Layout-style overrides.
    #[serde(default, skip_serializing_if = "StyleOverrides::is_empty")]
    pub style: StyleOverrides,

    /// Custom CSS class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,

    /// Column child lists for composite blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Vec<BlockNode>>,
}

/// The structured form of a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentExport {
    /// Canvas-level settings.
    #[serde(default)]
    pub settings: CanvasSettings,

    /// Top-level blocks.
    #[serde(default)]
    pub blocks: Vec<BlockNode>,
}

/// Produce the structured form of a document.
pub fn to_export(doc: &Document) -> DocumentExport {
    DocumentExport {
        settings: doc.settings.clone(),
        blocks: doc.blocks.iter().map(node_from_block).collect(),
    }
}

fn node_from_block(block: &BlockInstance) -> BlockNode {
    BlockNode {
        block_type: block.block_type.clone(),
        props: block.props.clone(),
        style: block.style.clone(),
        css_class: block.css_class.clone(),
        children: block
            .children
            .iter()
            .map(|column| column.iter().map(node_from_block).collect())
            .collect(),
    }
}

/// Rehydrate a document from its structured form. Every block gets a fresh
/// id; selection starts clear.
pub fn from_export(export: DocumentExport, catalog: &BlockCatalog) -> Document {
    Document {
        blocks: export
            .blocks
            .into_iter()
            .map(|node| block_from_node(node, catalog))
            .collect(),
        settings: export.settings,
        selected: None,
    }
}

fn block_from_node(node: BlockNode, catalog: &BlockCatalog) -> BlockInstance {
    let BlockNode {
        block_type,
        mut props,
        style,
        css_class,
        children,
    } = node;

    let mut children: Vec<Vec<BlockInstance>> = children
        .into_iter()
        .map(|column| {
            column
                .into_iter()
                .map(|child| block_from_node(child, catalog))
                .collect()
        })
        .collect();

    match catalog.get(&block_type) {
        Some(descriptor) => {
            for (key, value) in &descriptor.default_props {
                if !props.contains_key(key) {
                    props.insert(key.clone(), value.clone());
                }
            }
            if descriptor.supports.column_count {
                // Reconcile the columns prop with the imported child lists.
                let count = if children.is_empty() {
                    props.get("columns").and_then(Value::as_u64).unwrap_or(2).max(1) as usize
                } else {
                    children.len()
                };
                children.resize_with(count, Vec::new);
                props.insert("columns".to_string(), Value::from(count as u64));
            }
        }
        None => {
            warn!(block_type = %block_type, "unknown block type on import, kept inert");
        }
    }

    let mut block = BlockInstance::new(block_type, props);
    block.style = style;
    block.css_class = css_class;
    block.children = children;
    block
}

/// Serialize a document's structured form to a JSON string.
pub fn document_to_json(doc: &Document) -> EditorResult<String> {
    Ok(serde_json::to_string(&to_export(doc))?)
}

/// Rehydrate a document from a structured JSON string.
pub fn document_from_json(payload: &str, catalog: &BlockCatalog) -> EditorResult<Document> {
    let export: DocumentExport = serde_json::from_str(payload)?;
    Ok(from_export(export, catalog))
}
