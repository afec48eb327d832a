//! Document tree model.
//!
//! A [`Document`] is the full ordered tree of [`BlockInstance`]s plus
//! canvas-level settings for one edited artifact (a post, a page, or a
//! transactional email). Composite blocks hold one child list per column in
//! [`BlockInstance::children`]; every child list obeys the same invariants as
//! the document root.
//!
//! Mutation verbs are methods on [`Document`] returning new values; the
//! shared path/visitor primitives used by every verb live in [`path`].

mod engine;
pub mod path;

pub use engine::{Direction, InsertPosition};
pub(crate) use engine::regenerate_ids;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Block properties: a typed key-value map, JSON-shaped.
pub type Props = Map<String, Value>;

/// Per-block layout overrides, rendered as inline styles on export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
}

impl StyleOverrides {
    /// True when no override is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Build an inline CSS declaration list, in a fixed property order so
    /// repeated exports are byte-identical. Returns `None` when empty.
    pub fn to_inline(&self) -> Option<String> {
        let pairs = [
            ("margin-top", &self.margin_top),
            ("margin-bottom", &self.margin_bottom),
            ("padding", &self.padding),
            ("text-align", &self.text_align),
            ("color", &self.text_color),
            ("background-color", &self.background_color),
            ("font-size", &self.font_size),
        ];
        let css: Vec<String> = pairs
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| format!("{name}:{v}")))
            .collect();
        if css.is_empty() { None } else { Some(css.join(";")) }
    }
}

/// One block in the tree.
///
/// Composite blocks (e.g. `columns`) carry one ordered child list per column
/// in `children`; every other block keeps `children` empty. The `columns`
/// prop and the length of `children` are kept in sync by the column-count
/// verb, which is the only operation allowed to resize the child lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    /// Stable unique id, unique across the whole document including nested
    /// columns, for the document's lifetime.
    pub id: Uuid,

    /// Block type machine name (e.g. "heading", "columns").
    #[serde(rename = "type")]
    pub block_type: String,

    /// Typed key-value props.
    #[serde(default)]
    pub props: Props,

    /// Layout-style overrides, rendered as inline styles.
    #[serde(default, skip_serializing_if = "StyleOverrides::is_empty")]
    pub style: StyleOverrides,

    /// Optional custom CSS class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,

    /// Child lists, one per column, for composite blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Vec<BlockInstance>>,
}

impl BlockInstance {
    /// Create a block with a fresh time-sortable id and the given props.
    pub fn new(block_type: impl Into<String>, props: Props) -> Self {
        Self {
            id: Uuid::now_v7(),
            block_type: block_type.into(),
            props,
            style: StyleOverrides::default(),
            css_class: None,
            children: Vec::new(),
        }
    }

    /// Whether this block holds nested child lists.
    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }

    /// Get a string prop.
    pub fn prop_str(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(Value::as_str)
    }

    /// Get an integer prop.
    pub fn prop_u64(&self, name: &str) -> Option<u64> {
        self.props.get(name).and_then(Value::as_u64)
    }
}

/// Global layout style of the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStyle {
    /// Content constrained to the canvas width.
    #[default]
    Contained,
    /// Content spans the full viewport width.
    FullWidth,
}

/// Canvas-level settings for the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas padding in pixels.
    pub padding: u32,
    /// Global layout style.
    pub layout: LayoutStyle,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 640,
            padding: 24,
            layout: LayoutStyle::Contained,
        }
    }
}

/// The full ordered tree of blocks plus canvas settings and selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Top-level blocks, in document order.
    #[serde(default)]
    pub blocks: Vec<BlockInstance>,

    /// Canvas-level settings.
    #[serde(default)]
    pub settings: CanvasSettings,

    /// Currently selected block, if any. At most one block is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<Uuid>,
}

impl Document {
    /// Create an empty document with default canvas settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from top-level blocks.
    pub fn with_blocks(blocks: Vec<BlockInstance>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    /// Whether a block with the given id exists anywhere in the tree.
    pub fn contains(&self, id: Uuid) -> bool {
        path::contains(self, id)
    }

    /// Find a block by id anywhere in the tree.
    pub fn find(&self, id: Uuid) -> Option<&BlockInstance> {
        path::find_block(self, id)
    }

    /// Total number of blocks in the tree, nested columns included.
    pub fn block_count(&self) -> usize {
        path::all_ids(self).len()
    }
}
