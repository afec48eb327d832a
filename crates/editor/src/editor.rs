//! The editor session.
//!
//! An [`Editor`] owns the block catalog, the hook bus, and the undo history,
//! and exposes the mutation verb surface. Every verb computes a new document
//! through the pure engine, pushes it into history only when it actually
//! differs, and fires the `document-changed` action after every effective
//! mutation. Registration fires `block-registered` so dependent palettes can
//! refresh when types are added lazily after initial load.

use serde_json::Value;
use uuid::Uuid;

use crate::catalog::{BlockCatalog, BlockDescriptor, EditorContext};
use crate::commands;
use crate::config::EditorConfig;
use crate::document::path::ParentRef;
use crate::document::{BlockInstance, CanvasSettings, Direction, Document, InsertPosition, Props};
use crate::document::regenerate_ids;
use crate::drag::{self, DragCommand, DragSource, DropZone};
use crate::error::EditorResult;
use crate::history::History;
use crate::hooks::HookBus;
use crate::render;

/// Hook fired after a block type registration.
pub const HOOK_BLOCK_REGISTERED: &str = "block-registered";
/// Hook fired after every effective document mutation, undo and redo
/// included.
pub const HOOK_DOCUMENT_CHANGED: &str = "document-changed";
/// Filter applied to the final markup of every HTML export.
pub const FILTER_DOCUMENT_HTML: &str = "document-html";

/// One editing session over one document.
pub struct Editor {
    catalog: BlockCatalog,
    hooks: HookBus,
    history: History,
    config: EditorConfig,
}

impl Editor {
    /// Create a session over an empty document.
    pub fn new(catalog: BlockCatalog, config: EditorConfig) -> Self {
        Self::from_document(catalog, config, Document::new())
    }

    /// Create a session over an existing document.
    pub fn from_document(catalog: BlockCatalog, config: EditorConfig, document: Document) -> Self {
        let history = History::new(document, config.history_limit);
        Self {
            catalog,
            hooks: HookBus::new(),
            history,
            config,
        }
    }

    /// Create a session with the standard block library and defaults.
    pub fn with_standard_blocks() -> Self {
        Self::new(BlockCatalog::with_standard_blocks(), EditorConfig::default())
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        self.history.current()
    }

    /// The session's block catalog.
    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    /// The session's hook bus.
    pub fn hooks(&self) -> &HookBus {
        &self.hooks
    }

    /// The session's hook bus, for registering listeners.
    pub fn hooks_mut(&mut self) -> &mut HookBus {
        &mut self.hooks
    }

    /// The session's editing context.
    pub fn context(&self) -> EditorContext {
        self.config.context
    }

    /// Descriptors offered by the palette in this session's context.
    pub fn palette(&self) -> Vec<&BlockDescriptor> {
        self.catalog.for_context(self.config.context)
    }

    /// Register a block type and fire `block-registered`.
    pub fn register_block(&mut self, descriptor: BlockDescriptor) {
        let type_name = descriptor.type_name.clone();
        self.catalog.register(descriptor);
        self.hooks
            .do_action(HOOK_BLOCK_REGISTERED, &[Value::from(type_name)]);
    }

    /// Push a computed document, firing `document-changed` when it differs.
    fn commit(&mut self, next: Document) -> bool {
        if self.history.push(next) {
            self.hooks.do_action(HOOK_DOCUMENT_CHANGED, &[]);
            true
        } else {
            false
        }
    }

    /// Insert a fresh instance of a type. Returns the new block's id, or
    /// `None` for an unknown type or a vanished parent list (legal no-ops).
    pub fn add_block(
        &mut self,
        type_name: &str,
        position: InsertPosition,
        parent: &ParentRef,
    ) -> Option<Uuid> {
        self.add_block_with_props(type_name, Props::new(), position, parent)
    }

    /// Insert a fresh instance with prop overrides merged over the type's
    /// defaults.
    pub fn add_block_with_props(
        &mut self,
        type_name: &str,
        overrides: Props,
        position: InsertPosition,
        parent: &ParentRef,
    ) -> Option<Uuid> {
        let block = self.catalog.create_instance(type_name, overrides)?;
        let id = block.id;
        let next = self.document().with_block_inserted(block, position, parent);
        self.commit(next).then_some(id)
    }

    /// Replace a block's props.
    pub fn update_block(&mut self, id: Uuid, props: Props) -> bool {
        let next = self.document().with_block_props(id, props);
        self.commit(next)
    }

    /// Move a block one step within its sibling list.
    pub fn move_block(&mut self, id: Uuid, direction: Direction) -> bool {
        let next = self.document().with_block_moved(id, direction);
        self.commit(next)
    }

    /// Move a block to an index within the list addressed by `parent`.
    pub fn move_block_to(&mut self, id: Uuid, index: usize, parent: &ParentRef) -> bool {
        let next = self.document().with_block_moved_to(id, index, parent);
        self.commit(next)
    }

    /// Duplicate a subtree, fresh ids included, right after the original.
    pub fn duplicate_block(&mut self, id: Uuid) -> bool {
        let next = self.document().with_block_duplicated(id);
        self.commit(next)
    }

    /// Delete a subtree.
    pub fn delete_block(&mut self, id: Uuid) -> bool {
        let next = self.document().with_block_deleted(id);
        self.commit(next)
    }

    /// Swap a block's type in place, carrying shared props over. An unknown
    /// new type is a no-op.
    pub fn replace_block(&mut self, id: Uuid, new_type: &str) -> bool {
        let Some(template) = self.catalog.create_instance(new_type, Props::new()) else {
            return false;
        };
        let next = self.document().with_block_replaced(id, template);
        self.commit(next)
    }

    /// Select a block, or clear the selection.
    pub fn select(&mut self, id: Option<Uuid>) -> bool {
        let next = self.document().with_selection(id);
        self.commit(next)
    }

    /// Resize a composite block's column count. Only types declaring
    /// column-count support respond; growing appends empty columns and
    /// shrinking discards trailing columns' content (undo-recoverable).
    pub fn set_column_count(&mut self, id: Uuid, count: usize) -> bool {
        let supports_columns = self
            .document()
            .find(id)
            .and_then(|block| self.catalog.get(&block.block_type))
            .is_some_and(|descriptor| descriptor.supports.column_count);
        if !supports_columns {
            return false;
        }
        let next = self.document().with_column_count(id, count);
        self.commit(next)
    }

    /// Replace the canvas-level settings.
    pub fn update_canvas(&mut self, settings: CanvasSettings) -> bool {
        let next = self.document().with_settings(settings);
        self.commit(next)
    }

    /// Append pasted blocks at the end of the document. Ids are regenerated
    /// so pasting the same clipboard twice keeps ids unique.
    pub fn paste_blocks(&mut self, blocks: Vec<BlockInstance>) -> bool {
        if blocks.is_empty() {
            return false;
        }
        let mut next = self.document().clone();
        for mut block in blocks {
            regenerate_ids(&mut block);
            next.blocks.push(block);
        }
        self.commit(next)
    }

    /// Parse a slash command and insert the block it names at the end of
    /// the document. Returns the new block's id.
    pub fn insert_command(&mut self, input: &str) -> Option<Uuid> {
        let command = commands::parse(&self.catalog, input)?;
        self.add_block_with_props(
            &command.block_type,
            command.props,
            InsertPosition::End,
            &ParentRef::Root,
        )
    }

    /// Resolve and apply a completed drag gesture. A drop that resolves to
    /// no command — adjacent to itself, structurally invalid, stale — is a
    /// no-op and creates no history entry.
    pub fn apply_drop(&mut self, source: &DragSource, zone: &DropZone) -> bool {
        match drag::resolve(self.document(), source, zone) {
            Some(DragCommand::Insert {
                block_type,
                index,
                parent,
            }) => self
                .add_block(&block_type, InsertPosition::At(index), &parent)
                .is_some(),
            Some(DragCommand::Move { id, index, parent }) => {
                self.move_block_to(id, index, &parent)
            }
            None => false,
        }
    }

    /// The drop zones offered while dragging `source`.
    pub fn drop_zones_for(&self, source: &DragSource) -> Vec<DropZone> {
        drag::allowed_zones(self.document(), source)
    }

    /// Step back one history entry and republish it as current.
    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_some() {
            self.hooks.do_action(HOOK_DOCUMENT_CHANGED, &[]);
            true
        } else {
            false
        }
    }

    /// Step forward one history entry and republish it as current.
    pub fn redo(&mut self) -> bool {
        if self.history.redo().is_some() {
            self.hooks.do_action(HOOK_DOCUMENT_CHANGED, &[]);
            true
        } else {
            false
        }
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply a refined text result to the block that requested it. A target
    /// deleted while the request was in flight is a no-op.
    pub fn apply_refined_text(&mut self, id: Uuid, text: &str) -> bool {
        let next = crate::assist::apply_refined_text(self.document(), id, text);
        self.commit(next)
    }

    /// Append the blocks of a draft response to the document.
    pub fn insert_draft(&mut self, response: &crate::assist::DraftResponse) -> bool {
        let blocks = crate::assist::draft_blocks(response, &self.catalog);
        self.paste_blocks(blocks)
    }

    /// Export the document to markup, then pipe it through the
    /// `document-html` filter so extensions can rewrite the final output.
    pub fn export_html(&self) -> String {
        let html = render::render_document(self.document(), &self.catalog);
        match self
            .hooks
            .apply_filters(FILTER_DOCUMENT_HTML, Value::from(html.clone()), &[])
        {
            Value::String(filtered) => filtered,
            // A filter that breaks the type contract is ignored.
            _ => html,
        }
    }

    /// Export the document's structured `{type, props, children}` form.
    pub fn export_structured(&self) -> render::DocumentExport {
        render::to_export(self.document())
    }

    /// Export the structured form as a JSON string.
    pub fn export_json(&self) -> EditorResult<String> {
        render::document_to_json(self.document())
    }

    /// Replace the document with one rehydrated from a structured JSON
    /// payload. Unknown types are kept inert; missing props are filled from
    /// defaults.
    pub fn import_json(&mut self, payload: &str) -> EditorResult<()> {
        let document = render::document_from_json(payload, &self.catalog)?;
        self.commit(document);
        Ok(())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_standard_blocks()
    }
}
