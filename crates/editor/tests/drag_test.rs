#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Drag gesture resolution over the session surface.

use scriva_editor::drag::{DragSource, DropZone};
use scriva_editor::{Editor, InsertPosition, ParentRef};
use scriva_test_utils::init_tracing;

/// Root list with two blocks and a 2-column block: the canvas offers N+1
/// zones per list.
#[test]
fn zones_offered_match_the_rendered_lists() {
    init_tracing();
    let mut editor = Editor::with_standard_blocks();
    editor
        .add_block("text", InsertPosition::End, &ParentRef::Root)
        .unwrap();
    editor
        .add_block("text", InsertPosition::End, &ParentRef::Root)
        .unwrap();
    editor
        .add_block("columns", InsertPosition::End, &ParentRef::Root)
        .unwrap();

    let zones = editor.drop_zones_for(&DragSource::Palette("text".to_string()));
    // Root: 3 blocks -> 4 zones; two empty columns -> 1 zone each.
    assert_eq!(zones.len(), 6);
}

#[test]
fn dragging_a_block_never_offers_its_own_columns() {
    let mut editor = Editor::with_standard_blocks();
    let cols_id = editor
        .add_block("columns", InsertPosition::End, &ParentRef::Root)
        .unwrap();
    editor
        .add_block("text", InsertPosition::End, &ParentRef::Root)
        .unwrap();

    let zones = editor.drop_zones_for(&DragSource::Block(cols_id));
    assert!(zones.iter().all(|zone| match zone.parent {
        ParentRef::Root => true,
        ParentRef::Column { block, .. } => block != cols_id,
    }));
}

/// Dropping a block on the zone immediately following itself changes
/// nothing and creates no history entry.
#[test]
fn self_adjacent_drop_is_a_noop_without_history() {
    let mut editor = Editor::with_standard_blocks();
    let a = editor
        .add_block("text", InsertPosition::End, &ParentRef::Root)
        .unwrap();
    editor
        .add_block("text", InsertPosition::End, &ParentRef::Root)
        .unwrap();

    let before = editor.document().clone();
    editor.undo();
    editor.redo(); // park the cursor at the tip with a known entry count

    let applied = editor.apply_drop(
        &DragSource::Block(a),
        &DropZone {
            parent: ParentRef::Root,
            index: 1,
        },
    );
    assert!(!applied);
    assert_eq!(editor.document(), &before);
    assert!(!editor.can_redo());
    // One undo steps over the second insertion, not over any drop entry.
    editor.undo();
    assert_eq!(editor.document().blocks.len(), 1);
}

#[test]
fn palette_drop_inserts_at_the_zone() {
    let mut editor = Editor::with_standard_blocks();
    editor
        .add_block("text", InsertPosition::End, &ParentRef::Root)
        .unwrap();

    let applied = editor.apply_drop(
        &DragSource::Palette("heading".to_string()),
        &DropZone {
            parent: ParentRef::Root,
            index: 0,
        },
    );
    assert!(applied);
    assert_eq!(editor.document().blocks[0].block_type, "heading");
}

#[test]
fn palette_drop_of_unknown_type_is_a_noop() {
    let mut editor = Editor::with_standard_blocks();
    let applied = editor.apply_drop(
        &DragSource::Palette("warpdrive".to_string()),
        &DropZone {
            parent: ParentRef::Root,
            index: 0,
        },
    );
    assert!(!applied);
    assert!(editor.document().blocks.is_empty());
}

/// A 2-column block holding [[A],[B]]: dropping A at the top of column 1
/// yields [[],[A,B]].
#[test]
fn cross_column_drop_moves_the_block() {
    let mut editor = Editor::with_standard_blocks();
    let cols_id = editor
        .add_block("columns", InsertPosition::End, &ParentRef::Root)
        .unwrap();
    let a = editor
        .add_block(
            "text",
            InsertPosition::End,
            &ParentRef::Column {
                block: cols_id,
                column: 0,
            },
        )
        .unwrap();
    let b = editor
        .add_block(
            "text",
            InsertPosition::End,
            &ParentRef::Column {
                block: cols_id,
                column: 1,
            },
        )
        .unwrap();

    let applied = editor.apply_drop(
        &DragSource::Block(a),
        &DropZone {
            parent: ParentRef::Column {
                block: cols_id,
                column: 1,
            },
            index: 0,
        },
    );
    assert!(applied);

    let cols = editor.document().find(cols_id).unwrap();
    assert!(cols.children[0].is_empty());
    let second: Vec<_> = cols.children[1].iter().map(|block| block.id).collect();
    assert_eq!(second, vec![a, b]);
}

#[test]
fn drop_out_of_a_column_promotes_the_block() {
    let mut editor = Editor::with_standard_blocks();
    let cols_id = editor
        .add_block("columns", InsertPosition::End, &ParentRef::Root)
        .unwrap();
    let inner = editor
        .add_block(
            "text",
            InsertPosition::End,
            &ParentRef::Column {
                block: cols_id,
                column: 0,
            },
        )
        .unwrap();

    let applied = editor.apply_drop(
        &DragSource::Block(inner),
        &DropZone {
            parent: ParentRef::Root,
            index: 0,
        },
    );
    assert!(applied);
    assert_eq!(editor.document().blocks[0].id, inner);
}

#[test]
fn drop_of_a_vanished_block_is_a_noop() {
    let mut editor = Editor::with_standard_blocks();
    editor
        .add_block("text", InsertPosition::End, &ParentRef::Root)
        .unwrap();
    let before = editor.document().clone();

    let applied = editor.apply_drop(
        &DragSource::Block(uuid::Uuid::now_v7()),
        &DropZone {
            parent: ParentRef::Root,
            index: 0,
        },
    );
    assert!(!applied);
    assert_eq!(editor.document(), &before);
}
