//! Editor session configuration.

use crate::catalog::EditorContext;

/// Configuration for one editor session.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Editing context, used to filter the block palette.
    pub context: EditorContext,

    /// Maximum retained history entries (default: unbounded). A memory
    /// knob for long-running deployments, not a correctness requirement.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            context: EditorContext::Any,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Configuration for the given editing context.
    pub fn for_context(context: EditorContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }
}
