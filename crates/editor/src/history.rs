//! Undo/redo over document snapshots.
//!
//! History is append-only going forward: entries are immutable snapshots and
//! undo/redo only move a read cursor. Pushing while the cursor is behind the
//! tip discards the orphaned forward branch (linear history, no branching).

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::document::Document;

/// One immutable document snapshot.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Monotonic sequence number, unique within the session.
    pub sequence: u64,
    /// When the entry was pushed. Diagnostic only; never part of equality.
    pub pushed_at: DateTime<Utc>,
    /// The snapshot itself.
    pub document: Document,
}

/// Linear undo/redo history with a read cursor.
///
/// An optional entry limit caps memory on long sessions; it is a deployment
/// knob, not a correctness requirement, and defaults to unbounded.
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    next_sequence: u64,
    limit: Option<usize>,
}

impl History {
    /// Start a history at the given initial document.
    pub fn new(initial: Document, limit: Option<usize>) -> Self {
        // A limit below 2 would make undo impossible; clamp it.
        let limit = limit.map(|l| l.max(2));
        Self {
            entries: vec![HistoryEntry {
                sequence: 0,
                pushed_at: Utc::now(),
                document: initial,
            }],
            cursor: 0,
            next_sequence: 1,
            limit,
        }
    }

    /// The document at the cursor.
    pub fn current(&self) -> &Document {
        // The entry vector is never empty: new() seeds it and push/undo/redo
        // never drain it below one entry.
        &self.entries[self.cursor].document
    }

    /// Push a new snapshot. Returns `false` without recording anything when
    /// the document equals the current one, so true no-ops never pollute
    /// undo. Discards any forward branch past the cursor.
    pub fn push(&mut self, document: Document) -> bool {
        if document == *self.current() {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry {
            sequence: self.next_sequence,
            pushed_at: Utc::now(),
            document,
        });
        self.next_sequence += 1;
        self.cursor = self.entries.len() - 1;

        if let Some(limit) = self.limit {
            let overflow = self.entries.len().saturating_sub(limit);
            if overflow > 0 {
                debug!(overflow, "evicting oldest history entries");
                self.entries.drain(0..overflow);
                self.cursor -= overflow;
            }
        }
        true
    }

    /// Step the cursor back one entry, returning the republished document.
    pub fn undo(&mut self) -> Option<&Document> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step the cursor forward one entry, returning the republished document.
    pub fn redo(&mut self) -> Option<&Document> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Whether the cursor can move back.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether the cursor can move forward.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: history holds at least the initial snapshot.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sequence number of the entry at the cursor.
    pub fn current_sequence(&self) -> u64 {
        self.entries[self.cursor].sequence
    }
}
