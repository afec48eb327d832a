//! Pure document mutation verbs.
//!
//! Every verb takes `&self` and returns a new [`Document`]; the stored tree
//! is never aliased or mutated in place, so history snapshots stay cheap to
//! compare. All verbs are total: a target id that no longer exists returns
//! the document unchanged — by the time a user-triggered event reaches this
//! layer its target may already have been removed by a prior event in the
//! same interaction.

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::path::{self, ParentRef};
use super::{BlockInstance, CanvasSettings, Document, Props};

/// Direction for single-step moves within a sibling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Insertion position within a child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Append after the last block.
    End,
    /// Insert at the given index, clamped to the list length.
    At(usize),
}

impl Document {
    /// Insert a block into the list addressed by `parent`.
    ///
    /// A missing parent list (deleted composite block, out-of-range column)
    /// is a no-op.
    pub fn with_block_inserted(
        &self,
        block: BlockInstance,
        position: InsertPosition,
        parent: &ParentRef,
    ) -> Document {
        let mut next = self.clone();
        let Some(list) = path::child_list_mut(&mut next, parent) else {
            debug!(parent = ?parent, "insertion target list missing, no-op");
            return self.clone();
        };
        let index = match position {
            InsertPosition::End => list.len(),
            InsertPosition::At(index) => index.min(list.len()),
        };
        list.insert(index, block);
        next
    }

    /// Replace the props of the block with the given id, wherever it is in
    /// the tree. Typed children are untouched.
    pub fn with_block_props(&self, id: Uuid, props: Props) -> Document {
        let mut next = self.clone();
        let Some(block) = path::find_block_mut(&mut next, id) else {
            debug!(%id, "update target missing, no-op");
            return next;
        };
        block.props = props;
        next
    }

    /// Move a block one step up or down within its sibling list. Moves past
    /// either end are no-ops.
    pub fn with_block_moved(&self, id: Uuid, direction: Direction) -> Document {
        let mut next = self.clone();
        let Some((parent, index)) = path::parent_of(&next, id) else {
            debug!(%id, "move target missing, no-op");
            return next;
        };
        let Some(list) = path::child_list_mut(&mut next, &parent) else {
            return next;
        };
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < list.len() => index + 1,
            _ => return next,
        };
        list.swap(index, target);
        next
    }

    /// Move a block to `index` within the list addressed by `parent`,
    /// within or across lists. `index` counts positions in the destination
    /// list after the block has been detached. Content and id are unchanged.
    ///
    /// A destination inside the moved block's own subtree would create a
    /// cycle and is refused before any mutation.
    pub fn with_block_moved_to(&self, id: Uuid, index: usize, parent: &ParentRef) -> Document {
        if let ParentRef::Column { block: host, .. } = parent {
            let Some(moved) = path::find_block(self, id) else {
                debug!(%id, "move target missing, no-op");
                return self.clone();
            };
            if moved.id == *host || path::contains_id(moved, *host) {
                debug!(%id, "destination lies inside the moved subtree, no-op");
                return self.clone();
            }
        }
        let mut next = self.clone();
        let Some(block) = path::detach(&mut next, id) else {
            debug!(%id, "move target missing, no-op");
            return next;
        };
        let Some(list) = path::child_list_mut(&mut next, parent) else {
            debug!(parent = ?parent, "move destination missing, no-op");
            return self.clone();
        };
        let index = index.min(list.len());
        list.insert(index, block);
        next
    }

    /// Deep-clone the subtree rooted at `id`, assigning fresh ids
    /// recursively, and insert the copy immediately after the original.
    pub fn with_block_duplicated(&self, id: Uuid) -> Document {
        let mut next = self.clone();
        let Some((parent, index)) = path::parent_of(&next, id) else {
            debug!(%id, "duplicate target missing, no-op");
            return next;
        };
        let copy = match path::find_block(&next, id) {
            Some(original) => {
                let mut copy = original.clone();
                regenerate_ids(&mut copy);
                copy
            }
            None => return next,
        };
        let Some(list) = path::child_list_mut(&mut next, &parent) else {
            return next;
        };
        list.insert(index + 1, copy);
        next
    }

    /// Remove the subtree rooted at `id`. Selection is cleared when the
    /// selected block was inside the removed subtree.
    pub fn with_block_deleted(&self, id: Uuid) -> Document {
        let mut next = self.clone();
        let Some(removed) = path::detach(&mut next, id) else {
            debug!(%id, "delete target missing, no-op");
            return next;
        };
        if let Some(selected) = next.selected {
            if selected == removed.id || path::contains_id(&removed, selected) {
                next.selected = None;
            }
        }
        next
    }

    /// Swap a block's type in place, at the same position with the same id.
    ///
    /// `template` is a fresh instance of the new type carrying its default
    /// props. Prop keys shared between the old block and the new defaults
    /// carry over (e.g. a common `content` field); everything else falls
    /// back to the new type's defaults. Child lists survive only when both
    /// types are composite.
    pub fn with_block_replaced(&self, id: Uuid, template: BlockInstance) -> Document {
        let BlockInstance {
            block_type,
            props: mut new_props,
            children: new_children,
            ..
        } = template;
        let mut next = self.clone();
        let Some(block) = path::find_block_mut(&mut next, id) else {
            debug!(%id, "replace target missing, no-op");
            return next;
        };
        for (key, value) in &block.props {
            if new_props.contains_key(key) {
                new_props.insert(key.clone(), value.clone());
            }
        }
        if block.children.is_empty() || new_children.is_empty() {
            block.children = new_children;
        }
        block.block_type = block_type;
        block.props = new_props;
        next
    }

    /// Select a block, or clear the selection with `None`. Selecting an id
    /// that is not in the tree is a no-op.
    pub fn with_selection(&self, id: Option<Uuid>) -> Document {
        if let Some(id) = id {
            if !path::contains(self, id) {
                debug!(%id, "selection target missing, no-op");
                return self.clone();
            }
        }
        let mut next = self.clone();
        next.selected = id;
        next
    }

    /// Resize a composite block to `count` columns (minimum 1). Growing
    /// appends empty columns; shrinking discards trailing columns' content.
    /// Blocks without child lists are left unchanged.
    pub fn with_column_count(&self, id: Uuid, count: usize) -> Document {
        let count = count.max(1);
        let mut next = self.clone();
        let Some(block) = path::find_block_mut(&mut next, id) else {
            debug!(%id, "column-count target missing, no-op");
            return next;
        };
        if block.children.is_empty() && !block.props.contains_key("columns") {
            return next;
        }
        block.children.resize_with(count, Vec::new);
        block
            .props
            .insert("columns".to_string(), Value::from(count as u64));
        next
    }

    /// Replace the canvas-level settings.
    pub fn with_settings(&self, settings: CanvasSettings) -> Document {
        let mut next = self.clone();
        next.settings = settings;
        next
    }
}

/// Assign fresh ids to a subtree, recursively, so a copy is independently
/// addressable.
pub(crate) fn regenerate_ids(block: &mut BlockInstance) {
    block.id = Uuid::now_v7();
    for column in &mut block.children {
        for child in column {
            regenerate_ids(child);
        }
    }
}
