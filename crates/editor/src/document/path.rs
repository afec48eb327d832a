//! Shared tree-visitor and path primitives.
//!
//! Every mutation verb locates its target through these functions instead of
//! carrying its own recursive search. A [`BlockPath`] is the address of a
//! block: an index into the root list followed by `(column, index)` steps
//! descending through composite children. A [`ParentRef`] addresses one child
//! list — the root list, or one column of a composite block.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BlockInstance, Document};

/// Reference to one ordered child list in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentRef {
    /// The document's top-level block list.
    Root,
    /// One column of a composite block.
    Column {
        /// Id of the composite block.
        block: Uuid,
        /// Column index within that block.
        column: usize,
    },
}

/// Address of a block within the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPath {
    /// Index into the root block list.
    pub root: usize,
    /// Descent through composite children as `(column, index)` steps.
    pub descent: Vec<(usize, usize)>,
}

impl BlockPath {
    /// Depth of the block: 0 for a top-level block.
    pub fn depth(&self) -> usize {
        self.descent.len()
    }
}

/// Find the path of the block with the given id, searching nested columns.
pub fn find_path(doc: &Document, id: Uuid) -> Option<BlockPath> {
    for (root, block) in doc.blocks.iter().enumerate() {
        if block.id == id {
            return Some(BlockPath {
                root,
                descent: Vec::new(),
            });
        }
        if let Some(descent) = descend(block, id) {
            return Some(BlockPath { root, descent });
        }
    }
    None
}

fn descend(block: &BlockInstance, id: Uuid) -> Option<Vec<(usize, usize)>> {
    for (column, list) in block.children.iter().enumerate() {
        for (index, child) in list.iter().enumerate() {
            if child.id == id {
                return Some(vec![(column, index)]);
            }
            if let Some(mut rest) = descend(child, id) {
                rest.insert(0, (column, index));
                return Some(rest);
            }
        }
    }
    None
}

/// Resolve a path to the block it addresses.
pub fn block_at<'a>(doc: &'a Document, path: &BlockPath) -> Option<&'a BlockInstance> {
    let mut block = doc.blocks.get(path.root)?;
    for &(column, index) in &path.descent {
        block = block.children.get(column)?.get(index)?;
    }
    Some(block)
}

/// Find a block by id anywhere in the tree.
pub fn find_block(doc: &Document, id: Uuid) -> Option<&BlockInstance> {
    find_in_list(&doc.blocks, id)
}

fn find_in_list(list: &[BlockInstance], id: Uuid) -> Option<&BlockInstance> {
    for block in list {
        if block.id == id {
            return Some(block);
        }
        for column in &block.children {
            if let Some(found) = find_in_list(column, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Find a block by id anywhere in the tree, mutably.
pub fn find_block_mut(doc: &mut Document, id: Uuid) -> Option<&mut BlockInstance> {
    find_in_list_mut(&mut doc.blocks, id)
}

fn find_in_list_mut(list: &mut [BlockInstance], id: Uuid) -> Option<&mut BlockInstance> {
    for block in list.iter_mut() {
        if block.id == id {
            return Some(block);
        }
        for column in &mut block.children {
            if let Some(found) = find_in_list_mut(column, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Whether a block with the given id exists anywhere in the tree.
pub fn contains(doc: &Document, id: Uuid) -> bool {
    find_block(doc, id).is_some()
}

/// Whether the subtree rooted at `block` contains the given id (the root's
/// own id does not count).
pub fn contains_id(block: &BlockInstance, id: Uuid) -> bool {
    block
        .children
        .iter()
        .any(|column| find_in_list(column, id).is_some())
}

/// Resolve a [`ParentRef`] to its child list.
pub fn child_list<'a>(doc: &'a Document, parent: &ParentRef) -> Option<&'a Vec<BlockInstance>> {
    match parent {
        ParentRef::Root => Some(&doc.blocks),
        ParentRef::Column { block, column } => find_block(doc, *block)?.children.get(*column),
    }
}

/// Resolve a [`ParentRef`] to its child list, mutably.
pub fn child_list_mut<'a>(
    doc: &'a mut Document,
    parent: &ParentRef,
) -> Option<&'a mut Vec<BlockInstance>> {
    match parent {
        ParentRef::Root => Some(&mut doc.blocks),
        ParentRef::Column { block, column } => {
            find_block_mut(doc, *block)?.children.get_mut(*column)
        }
    }
}

/// Locate the list containing the block with the given id, returning the
/// list's [`ParentRef`] and the block's index within it.
pub fn parent_of(doc: &Document, id: Uuid) -> Option<(ParentRef, usize)> {
    if let Some(index) = doc.blocks.iter().position(|b| b.id == id) {
        return Some((ParentRef::Root, index));
    }
    for block in &doc.blocks {
        if let Some(found) = parent_in(block, id) {
            return Some(found);
        }
    }
    None
}

fn parent_in(block: &BlockInstance, id: Uuid) -> Option<(ParentRef, usize)> {
    for (column, list) in block.children.iter().enumerate() {
        if let Some(index) = list.iter().position(|b| b.id == id) {
            return Some((
                ParentRef::Column {
                    block: block.id,
                    column,
                },
                index,
            ));
        }
        for child in list {
            if let Some(found) = parent_in(child, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Remove the block with the given id from wherever it is in the tree,
/// returning the detached subtree.
pub fn detach(doc: &mut Document, id: Uuid) -> Option<BlockInstance> {
    detach_from_list(&mut doc.blocks, id)
}

fn detach_from_list(list: &mut Vec<BlockInstance>, id: Uuid) -> Option<BlockInstance> {
    if let Some(index) = list.iter().position(|b| b.id == id) {
        return Some(list.remove(index));
    }
    for block in list {
        for column in &mut block.children {
            if let Some(found) = detach_from_list(column, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Every id in the subtree rooted at `block`, root included, depth-first.
pub fn subtree_ids(block: &BlockInstance) -> Vec<Uuid> {
    let mut ids = Vec::new();
    collect_ids(block, &mut ids);
    ids
}

fn collect_ids(block: &BlockInstance, ids: &mut Vec<Uuid>) {
    ids.push(block.id);
    for column in &block.children {
        for child in column {
            collect_ids(child, ids);
        }
    }
}

/// Every id in the document, depth-first.
pub fn all_ids(doc: &Document) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for block in &doc.blocks {
        collect_ids(block, &mut ids);
    }
    ids
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::document::Props;

    fn columns(columns: Vec<Vec<BlockInstance>>) -> BlockInstance {
        let mut props = Props::new();
        props.insert("columns".to_string(), columns.len().into());
        let mut block = BlockInstance::new("columns", props);
        block.children = columns;
        block
    }

    fn sample() -> (Document, Uuid, Uuid, Uuid) {
        let a = BlockInstance::new("text", Props::new());
        let b = BlockInstance::new("text", Props::new());
        let (a_id, b_id) = (a.id, b.id);
        let cols = columns(vec![vec![a], vec![b]]);
        let cols_id = cols.id;
        (Document::with_blocks(vec![cols]), cols_id, a_id, b_id)
    }

    #[test]
    fn find_path_descends_into_columns() {
        let (doc, _, a_id, b_id) = sample();
        let path = find_path(&doc, b_id).unwrap();
        assert_eq!(path.root, 0);
        assert_eq!(path.descent, vec![(1, 0)]);
        assert_eq!(path.depth(), 1);
        assert_eq!(block_at(&doc, &path).unwrap().id, b_id);
        assert_eq!(find_path(&doc, a_id).unwrap().descent, vec![(0, 0)]);
    }

    #[test]
    fn find_path_missing_id_is_none() {
        let (doc, ..) = sample();
        assert!(find_path(&doc, Uuid::now_v7()).is_none());
        assert!(!contains(&doc, Uuid::now_v7()));
    }

    #[test]
    fn parent_of_column_child() {
        let (doc, cols_id, a_id, _) = sample();
        let (parent, index) = parent_of(&doc, a_id).unwrap();
        assert_eq!(
            parent,
            ParentRef::Column {
                block: cols_id,
                column: 0
            }
        );
        assert_eq!(index, 0);

        let (parent, index) = parent_of(&doc, cols_id).unwrap();
        assert_eq!(parent, ParentRef::Root);
        assert_eq!(index, 0);
    }

    #[test]
    fn detach_removes_nested_block() {
        let (mut doc, _, a_id, b_id) = sample();
        let removed = detach(&mut doc, a_id).unwrap();
        assert_eq!(removed.id, a_id);
        assert!(!contains(&doc, a_id));
        assert!(contains(&doc, b_id));
    }

    #[test]
    fn subtree_ids_include_nested_columns() {
        let (doc, cols_id, a_id, b_id) = sample();
        let block = find_block(&doc, cols_id).unwrap();
        let ids = subtree_ids(block);
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&cols_id));
        assert!(ids.contains(&a_id));
        assert!(ids.contains(&b_id));
        assert!(contains_id(block, a_id));
        assert!(!contains_id(block, cols_id));
    }

    #[test]
    fn child_list_resolves_columns() {
        let (doc, cols_id, a_id, _) = sample();
        let list = child_list(
            &doc,
            &ParentRef::Column {
                block: cols_id,
                column: 0,
            },
        )
        .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, a_id);

        assert!(
            child_list(
                &doc,
                &ParentRef::Column {
                    block: cols_id,
                    column: 5
                }
            )
            .is_none()
        );
    }
}
