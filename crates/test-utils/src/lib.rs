//! Integration testing helpers for Scriva.
//!
//! Builders for documents and common block shapes, plus one-time tracing
//! initialisation so test runs honour `RUST_LOG`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Once;

use serde_json::Value;

use scriva_editor::document::Props;
use scriva_editor::{BlockInstance, Document};

static TRACING: Once = Once::new();

/// Initialise tracing once for the whole test binary, honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A text block with the given content.
pub fn text_block(content: &str) -> BlockInstance {
    let mut props = Props::new();
    props.insert("content".to_string(), Value::from(content));
    BlockInstance::new("text", props)
}

/// A heading block with the given content and level.
pub fn heading_block(content: &str, level: u64) -> BlockInstance {
    let mut props = Props::new();
    props.insert("content".to_string(), Value::from(content));
    props.insert("level".to_string(), Value::from(level));
    BlockInstance::new("heading", props)
}

/// A columns block holding the given child lists, with its `columns` prop
/// kept in sync.
pub fn columns_block(columns: Vec<Vec<BlockInstance>>) -> BlockInstance {
    let mut props = Props::new();
    props.insert("columns".to_string(), Value::from(columns.len() as u64));
    let mut block = BlockInstance::new("columns", props);
    block.children = columns;
    block
}

/// A document holding the given top-level blocks.
pub fn document(blocks: Vec<BlockInstance>) -> Document {
    Document::with_blocks(blocks)
}
