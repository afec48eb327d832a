//! Scriva Block Editor Engine
//!
//! A visual, block-based content editor core for embedding in a content
//! management platform. Operators compose documents from typed content
//! units arranged in a tree — composite column blocks included — with
//! undo/redo, drag-and-drop reordering, a hook bus for third-party
//! extension, and export to markup and a structured re-importable form.

pub mod assist;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod document;
pub mod drag;
pub mod editor;
pub mod error;
pub mod history;
pub mod hooks;
pub mod markdown;
pub mod render;

pub use catalog::{BlockCatalog, BlockDescriptor, EditorContext, shared_catalog};
pub use config::EditorConfig;
pub use document::path::ParentRef;
pub use document::{
    BlockInstance, CanvasSettings, Direction, Document, InsertPosition, Props, StyleOverrides,
};
pub use editor::Editor;
pub use error::{EditorError, EditorResult};
pub use history::{History, HistoryEntry};
pub use hooks::HookBus;
