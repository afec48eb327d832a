//! Block type descriptors.
//!
//! A descriptor is the static catalog entry for one block type: identity,
//! palette metadata, capability flags, default props, the prop editor UI,
//! and the markup renderer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{BlockInstance, Props};

/// Editing context a block type applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorContext {
    Post,
    Page,
    Email,
    /// Applies everywhere.
    Any,
}

/// Capability flags a block type declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockSupports {
    /// Rich inline formatting of text props.
    pub text_formatting: bool,
    /// Text alignment control.
    pub alignment: bool,
    /// Column count control; marks the type as composite.
    pub column_count: bool,
    /// Custom CSS class input.
    pub custom_class: bool,
    /// Margin/padding controls.
    pub spacing: bool,
}

/// Renderer for one block type. Receives the block and its columns'
/// pre-rendered markup (empty slice for non-composite blocks) and returns
/// the block's inner markup fragment.
pub type RenderFn = fn(&BlockInstance, &[String]) -> String;

/// Renderer for a custom prop editor.
pub type CustomEditorFn = fn(&BlockInstance) -> String;

/// How a block type's props are edited: a declarative field list resolved by
/// the generic prop form, or a custom editor function.
#[derive(Debug, Clone)]
pub enum EditorUi {
    Declarative(Vec<FieldDefinition>),
    Custom(CustomEditorFn),
}

/// Kind of a declarative prop editor field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea { rows: u32 },
    Number { min: Option<i64>, max: Option<i64> },
    Select { options: Vec<(String, String)> },
    Checkbox,
    Color,
    Url,
}

/// One field of a declarative prop editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Prop key this field edits.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Field kind with type-specific configuration.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Default shown when the prop is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldDefinition {
    fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            default: None,
        }
    }

    /// Create a single-line text field.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Create a multi-line text field.
    pub fn textarea(name: impl Into<String>, label: impl Into<String>, rows: u32) -> Self {
        Self::new(name, label, FieldKind::Textarea { rows })
    }

    /// Create a bounded number field.
    pub fn number(
        name: impl Into<String>,
        label: impl Into<String>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Self {
        Self::new(name, label, FieldKind::Number { min, max })
    }

    /// Create a select field from `(value, label)` options.
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<(String, String)>,
    ) -> Self {
        Self::new(name, label, FieldKind::Select { options })
    }

    /// Create a checkbox field.
    pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    /// Create a color field.
    pub fn color(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Color)
    }

    /// Create a URL field.
    pub fn url(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Url)
    }

    /// Set the field default.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Static description of one block type.
#[derive(Debug, Clone)]
pub struct BlockDescriptor {
    /// Machine name (e.g. "heading", "columns").
    pub type_name: String,
    /// Human-readable palette label.
    pub label: String,
    /// Palette icon name.
    pub icon: String,
    /// Palette category (e.g. "text", "media", "layout").
    pub category: String,
    /// Contexts this type applies to.
    pub contexts: Vec<EditorContext>,
    /// Declared capability flags.
    pub supports: BlockSupports,
    /// Default props for new instances.
    pub default_props: Props,
    /// Prop editor UI, resolved once at registration.
    pub editor: EditorUi,
    /// Markup renderer.
    pub render: RenderFn,
}

impl BlockDescriptor {
    /// Start a descriptor with the given identity and renderer. Defaults:
    /// empty icon/"common" category, applicable to any context, no supports,
    /// no default props, an empty declarative editor.
    pub fn new(type_name: impl Into<String>, label: impl Into<String>, render: RenderFn) -> Self {
        Self {
            type_name: type_name.into(),
            label: label.into(),
            icon: String::new(),
            category: "common".to_string(),
            contexts: vec![EditorContext::Any],
            supports: BlockSupports::default(),
            default_props: Props::new(),
            editor: EditorUi::Declarative(Vec::new()),
            render,
        }
    }

    /// Set the palette icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the palette category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Restrict the type to the given contexts.
    pub fn contexts(mut self, contexts: Vec<EditorContext>) -> Self {
        self.contexts = contexts;
        self
    }

    /// Set the capability flags.
    pub fn supports(mut self, supports: BlockSupports) -> Self {
        self.supports = supports;
        self
    }

    /// Add one default prop.
    pub fn default_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_props.insert(name.into(), value.into());
        self
    }

    /// Use a declarative field list as the prop editor.
    pub fn fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.editor = EditorUi::Declarative(fields);
        self
    }

    /// Use a custom editor function as the prop editor.
    pub fn custom_editor(mut self, editor: CustomEditorFn) -> Self {
        self.editor = EditorUi::Custom(editor);
        self
    }

    /// Whether the type applies to a context: it declares that context, or
    /// declares `Any`, or the query itself is `Any`.
    pub fn applies_to(&self, context: EditorContext) -> bool {
        context == EditorContext::Any
            || self
                .contexts
                .iter()
                .any(|c| *c == EditorContext::Any || *c == context)
    }
}
