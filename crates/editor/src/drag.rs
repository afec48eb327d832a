//! Drag/position resolver.
//!
//! Maps a pointer-drag gesture over the rendered canvas to one discrete
//! mutation on release. The canvas renders a sentinel drop zone before the
//! first block and after every block — N blocks mean N+1 zones — plus one
//! such set per column of every composite block. On release the zone under
//! the pointer resolves to an insertion (palette drag) or a move (existing
//! block drag); zones inside the dragged block's own subtree are simply not
//! offered, and a drop adjacent to the dragged block itself resolves to no
//! command at all.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::path::{self, ParentRef};
use crate::document::Document;

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A new block dragged out of the palette.
    Palette(String),
    /// An existing block dragged by id.
    Block(Uuid),
}

/// One sentinel insertion point in a rendered child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropZone {
    /// The list this zone belongs to.
    pub parent: ParentRef,
    /// Position within the list: 0 = before the first block, N = after the
    /// last of N blocks.
    pub index: usize,
}

impl fmt::Display for DropZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parent {
            ParentRef::Root => write!(f, "zone-root-{}", self.index),
            ParentRef::Column { block, column } => {
                write!(f, "zone-{block}-c{column}-{}", self.index)
            }
        }
    }
}

/// The discrete mutation a completed drag resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragCommand {
    /// Insert a fresh instance of a palette type.
    Insert {
        block_type: String,
        index: usize,
        parent: ParentRef,
    },
    /// Reposition an existing block. `index` counts positions in the
    /// destination list after the block has been detached.
    Move {
        id: Uuid,
        index: usize,
        parent: ParentRef,
    },
}

/// Enumerate every drop zone of the document: N+1 per child list, root
/// first, then each composite block's columns depth-first.
pub fn drop_zones(doc: &Document) -> Vec<DropZone> {
    let mut zones = Vec::new();
    zones_for_list(ParentRef::Root, doc, &mut zones);
    zones
}

fn zones_for_list(parent: ParentRef, doc: &Document, zones: &mut Vec<DropZone>) {
    let Some(list) = path::child_list(doc, &parent) else {
        return;
    };
    for index in 0..=list.len() {
        zones.push(DropZone { parent, index });
    }
    // Clone the block/column addresses first; the recursion re-resolves them.
    let column_refs: Vec<ParentRef> = list
        .iter()
        .flat_map(|block| {
            (0..block.children.len()).map(|column| ParentRef::Column {
                block: block.id,
                column,
            })
        })
        .collect();
    for column in column_refs {
        zones_for_list(column, doc, zones);
    }
}

/// The zones offered while dragging `source`: every zone, minus — for an
/// existing block — the zones inside its own subtree, which would create a
/// cycle on drop.
pub fn allowed_zones(doc: &Document, source: &DragSource) -> Vec<DropZone> {
    let zones = drop_zones(doc);
    let DragSource::Block(id) = source else {
        return zones;
    };
    let Some(dragged) = path::find_block(doc, *id) else {
        return zones;
    };
    let forbidden: HashSet<Uuid> = path::subtree_ids(dragged).into_iter().collect();
    zones
        .into_iter()
        .filter(|zone| match zone.parent {
            ParentRef::Root => true,
            ParentRef::Column { block, .. } => !forbidden.contains(&block),
        })
        .collect()
}

/// Resolve a release over `zone` to a mutation command.
///
/// Returns `None` — a legal no-op, never an error — when the drop would
/// change nothing (a block dropped on a zone adjacent to itself) or is
/// structurally invalid (a zone inside the dragged block's own subtree, or
/// a dragged id that has already vanished).
pub fn resolve(doc: &Document, source: &DragSource, zone: &DropZone) -> Option<DragCommand> {
    match source {
        DragSource::Palette(block_type) => Some(DragCommand::Insert {
            block_type: block_type.clone(),
            index: zone.index,
            parent: zone.parent,
        }),
        DragSource::Block(id) => {
            let (current_parent, current_index) = path::parent_of(doc, *id)?;
            if let ParentRef::Column { block: host, .. } = zone.parent {
                let dragged = path::find_block(doc, *id)?;
                if dragged.id == host || path::contains_id(dragged, host) {
                    return None;
                }
            }
            if zone.parent == current_parent {
                // The zones at the block's own index and just past it are
                // the two positions that leave the list unchanged.
                if zone.index == current_index || zone.index == current_index + 1 {
                    return None;
                }
                let index = if zone.index > current_index {
                    zone.index - 1
                } else {
                    zone.index
                };
                Some(DragCommand::Move {
                    id: *id,
                    index,
                    parent: zone.parent,
                })
            } else {
                Some(DragCommand::Move {
                    id: *id,
                    index: zone.index,
                    parent: zone.parent,
                })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::document::{BlockInstance, Props};
    use serde_json::Value;

    fn text(content: &str) -> BlockInstance {
        let mut props = Props::new();
        props.insert("content".to_string(), Value::from(content));
        BlockInstance::new("text", props)
    }

    fn columns(lists: Vec<Vec<BlockInstance>>) -> BlockInstance {
        let mut props = Props::new();
        props.insert("columns".to_string(), Value::from(lists.len() as u64));
        let mut block = BlockInstance::new("columns", props);
        block.children = lists;
        block
    }

    #[test]
    fn zone_count_is_n_plus_one_per_list() {
        // Three root blocks, one of them a 2-column block with one child.
        let cols = columns(vec![vec![text("in")], vec![]]);
        let doc = Document::with_blocks(vec![text("a"), cols, text("b")]);

        let zones = drop_zones(&doc);
        // Root: 3 blocks -> 4 zones. Column 0: 1 block -> 2 zones.
        // Column 1: 0 blocks -> 1 zone.
        assert_eq!(zones.len(), 4 + 2 + 1);
        assert_eq!(
            zones.iter().filter(|z| z.parent == ParentRef::Root).count(),
            4
        );
    }

    #[test]
    fn zones_inside_own_subtree_are_not_offered() {
        let inner = columns(vec![vec![]]);
        let inner_id = inner.id;
        let outer = columns(vec![vec![inner], vec![]]);
        let outer_id = outer.id;
        let doc = Document::with_blocks(vec![outer, text("after")]);

        let zones = allowed_zones(&doc, &DragSource::Block(outer_id));
        assert!(
            zones.iter().all(|z| match z.parent {
                ParentRef::Root => true,
                ParentRef::Column { block, .. } => block != outer_id && block != inner_id,
            }),
            "no zone may lie inside the dragged subtree"
        );

        // A palette drag is offered everything.
        let all = drop_zones(&doc);
        let palette = allowed_zones(&doc, &DragSource::Palette("text".to_string()));
        assert_eq!(all, palette);
    }

    #[test]
    fn drop_adjacent_to_itself_resolves_to_none() {
        let (a, b) = (text("a"), text("b"));
        let a_id = a.id;
        let doc = Document::with_blocks(vec![a, b]);

        // Block "a" sits at index 0: zones 0 and 1 are adjacent to it.
        for index in [0, 1] {
            let zone = DropZone {
                parent: ParentRef::Root,
                index,
            };
            assert_eq!(resolve(&doc, &DragSource::Block(a_id), &zone), None);
        }
    }

    #[test]
    fn move_past_a_following_block_adjusts_the_index() {
        let (a, b, c) = (text("a"), text("b"), text("c"));
        let a_id = a.id;
        let doc = Document::with_blocks(vec![a, b, c]);

        // Drop "a" on the zone after "c" (zone index 3); once "a" is
        // detached the insertion index is 2.
        let zone = DropZone {
            parent: ParentRef::Root,
            index: 3,
        };
        let command = resolve(&doc, &DragSource::Block(a_id), &zone).unwrap();
        assert_eq!(
            command,
            DragCommand::Move {
                id: a_id,
                index: 2,
                parent: ParentRef::Root
            }
        );
    }

    #[test]
    fn move_into_a_column_keeps_the_zone_index() {
        let a = text("a");
        let a_id = a.id;
        let cols = columns(vec![vec![], vec![text("b")]]);
        let cols_id = cols.id;
        let doc = Document::with_blocks(vec![a, cols]);

        let zone = DropZone {
            parent: ParentRef::Column {
                block: cols_id,
                column: 1,
            },
            index: 0,
        };
        let command = resolve(&doc, &DragSource::Block(a_id), &zone).unwrap();
        assert_eq!(
            command,
            DragCommand::Move {
                id: a_id,
                index: 0,
                parent: zone.parent
            }
        );
    }

    #[test]
    fn drop_into_own_column_resolves_to_none() {
        let cols = columns(vec![vec![], vec![]]);
        let cols_id = cols.id;
        let doc = Document::with_blocks(vec![cols]);

        let zone = DropZone {
            parent: ParentRef::Column {
                block: cols_id,
                column: 0,
            },
            index: 0,
        };
        assert_eq!(resolve(&doc, &DragSource::Block(cols_id), &zone), None);
    }

    #[test]
    fn palette_drag_resolves_to_insert() {
        let doc = Document::with_blocks(vec![text("a")]);
        let zone = DropZone {
            parent: ParentRef::Root,
            index: 1,
        };
        let command = resolve(&doc, &DragSource::Palette("heading".to_string()), &zone);
        assert_eq!(
            command,
            Some(DragCommand::Insert {
                block_type: "heading".to_string(),
                index: 1,
                parent: ParentRef::Root
            })
        );
    }

    #[test]
    fn vanished_block_resolves_to_none() {
        let doc = Document::with_blocks(vec![text("a")]);
        let zone = DropZone {
            parent: ParentRef::Root,
            index: 0,
        };
        assert_eq!(
            resolve(&doc, &DragSource::Block(Uuid::now_v7()), &zone),
            None
        );
    }

    #[test]
    fn zone_ids_are_stable_strings() {
        let zone = DropZone {
            parent: ParentRef::Root,
            index: 2,
        };
        assert_eq!(zone.to_string(), "zone-root-2");
    }
}
