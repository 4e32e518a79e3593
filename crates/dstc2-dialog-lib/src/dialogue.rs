//! Dialogue boundary detection over a flat turn list.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::model::normalized_turn::NormalizedTurn;

/// Half-open `[start, end)` range of one dialogue inside a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueIndex {
    pub start: usize,
    pub end: usize,
}

impl DialogueIndex {
    pub fn new(start: usize, end: usize) -> Self {
        DialogueIndex { start, end }
    }

    /// Number of turns in the dialogue.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The dialogue's turns within `turns`.
    ///
    /// Panics if the range lies outside `turns`; indices produced by
    /// [`dialogue_indices`] on the same slice are always in bounds.
    pub fn dialogue<'a>(&self, turns: &'a [NormalizedTurn]) -> &'a [NormalizedTurn] {
        &turns[self.range()]
    }
}

impl fmt::Display for DialogueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{start: {}, end: {}}}", self.start, self.end)
    }
}

/// Split `turns` into contiguous dialogues.
///
/// A turn whose metadata has `episode_done` closes the current dialogue; the
/// next turn opens a new one. Whatever is still open after the scan is closed
/// at `turns.len()`. The returned ranges cover `[0, turns.len())` exactly once
/// and are never empty, so an empty split yields no dialogues.
pub fn dialogue_indices(turns: &[NormalizedTurn]) -> Vec<DialogueIndex> {
    let mut indices = Vec::new();
    let mut start = 0;
    for (i, turn) in turns.iter().enumerate() {
        if turn.episode_done() {
            indices.push(DialogueIndex::new(start, i + 1));
            start = i + 1;
        }
    }
    if start < turns.len() {
        indices.push(DialogueIndex::new(start, turns.len()));
    }
    indices
}
