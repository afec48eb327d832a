//! Block catalog: the registry of block types.
//!
//! The catalog is an explicit value owned by the editor session; a shared
//! default instance pre-populated with the standard block library is exposed
//! for convenience, but the type stays plain and injectable for tests.

mod descriptor;
mod standard;

pub use descriptor::{
    BlockDescriptor, BlockSupports, CustomEditorFn, EditorContext, EditorUi, FieldDefinition,
    FieldKind, RenderFn,
};
pub use standard::register_standard_blocks;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::document::{BlockInstance, Props, StyleOverrides};

/// Registry of block type descriptors, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    types: BTreeMap<String, BlockDescriptor>,
}

impl BlockCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with the standard block library.
    pub fn with_standard_blocks() -> Self {
        let mut catalog = Self::new();
        register_standard_blocks(&mut catalog);
        catalog
    }

    /// Register a block type. Idempotent per type name; the latest
    /// registration wins.
    pub fn register(&mut self, descriptor: BlockDescriptor) {
        debug!(block_type = %descriptor.type_name, "registering block type");
        self.types.insert(descriptor.type_name.clone(), descriptor);
    }

    /// Look up a block type by name.
    pub fn get(&self, type_name: &str) -> Option<&BlockDescriptor> {
        self.types.get(type_name)
    }

    /// Check whether a block type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Number of registered block types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All descriptors, in type-name order.
    pub fn all(&self) -> impl Iterator<Item = &BlockDescriptor> {
        self.types.values()
    }

    /// Descriptors applicable to a context, in type-name order.
    pub fn for_context(&self, context: EditorContext) -> Vec<&BlockDescriptor> {
        self.types
            .values()
            .filter(|d| d.applies_to(context))
            .collect()
    }

    /// All registered type names.
    pub fn type_names(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    /// Create a new instance of a type: fresh id, defaults merged with
    /// `overrides`. Returns `None` for an unknown type — callers treat this
    /// as a legal no-op, not an error. Composite types get their column
    /// child lists initialised from the `columns` prop.
    pub fn create_instance(&self, type_name: &str, overrides: Props) -> Option<BlockInstance> {
        let Some(descriptor) = self.get(type_name) else {
            debug!(block_type = %type_name, "unknown block type, no instance created");
            return None;
        };
        let mut props = descriptor.default_props.clone();
        for (key, value) in overrides {
            props.insert(key, value);
        }
        let children = if descriptor.supports.column_count {
            let count = props
                .get("columns")
                .and_then(Value::as_u64)
                .unwrap_or(2)
                .max(1) as usize;
            props.insert("columns".to_string(), Value::from(count as u64));
            vec![Vec::new(); count]
        } else {
            Vec::new()
        };
        Some(BlockInstance {
            id: Uuid::now_v7(),
            block_type: descriptor.type_name.clone(),
            props,
            style: StyleOverrides::default(),
            css_class: None,
            children,
        })
    }
}

static SHARED_CATALOG: LazyLock<RwLock<BlockCatalog>> =
    LazyLock::new(|| RwLock::new(BlockCatalog::with_standard_blocks()));

/// The shared default catalog, pre-populated with the standard block
/// library. Editor sessions that want isolation construct their own
/// [`BlockCatalog`] instead.
pub fn shared_catalog() -> &'static RwLock<BlockCatalog> {
    &SHARED_CATALOG
}
