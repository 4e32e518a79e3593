//! Whole-dialogue mini-batches.
//!
//! A batch is the flattened turns of up to `batch_size` dialogues. Dialogue
//! order is drawn once when the iterator is built; the iterator then walks the
//! permutation in fixed-size chunks and is exhausted after `ceil(N / batch_size)`
//! batches.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::dialogue::{dialogue_indices, DialogueIndex};
use crate::error::{DatasetError, Result};
use crate::model::normalized_turn::NormalizedTurn;

/// One batch: the concatenated turns of the selected dialogues.
pub type Batch<'a> = Vec<&'a NormalizedTurn>;

/// Lazy iterator over whole-dialogue batches of one split.
#[derive(Debug)]
pub struct DialogueBatches<'a> {
    turns: &'a [NormalizedTurn],
    indices: Vec<DialogueIndex>,
    order: Vec<usize>,
    batch_size: usize,
    pos: usize,
}

impl<'a> DialogueBatches<'a> {
    /// Index `turns` into dialogues and fix the dialogue order.
    ///
    /// With `shuffle` the order is a uniform permutation drawn from `rng`;
    /// otherwise dialogues are visited in corpus order and `rng` is untouched.
    pub fn new<R: Rng + ?Sized>(
        turns: &'a [NormalizedTurn],
        batch_size: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(DatasetError::ZeroBatchSize);
        }
        let indices = dialogue_indices(turns);
        let mut order: Vec<usize> = (0..indices.len()).collect();
        if shuffle {
            order.shuffle(rng);
        }
        Ok(DialogueBatches {
            turns,
            indices,
            order,
            batch_size,
            pos: 0,
        })
    }

    /// Number of dialogues found in the split.
    pub fn num_dialogues(&self) -> usize {
        self.indices.len()
    }

    /// Total number of batches this iterator produces from the start.
    pub fn num_batches(&self) -> usize {
        self.indices.len().div_ceil(self.batch_size)
    }

    /// Like [`Iterator::next`] but also returns the dialogue ranges the batch was built from.
    pub fn next_with_indices(&mut self) -> Option<(Vec<DialogueIndex>, Batch<'a>)> {
        if self.pos >= self.order.len() {
            return None;
        }
        let end = (self.pos + self.batch_size).min(self.order.len());
        let picked: Vec<DialogueIndex> = self.order[self.pos..end]
            .iter()
            .map(|&o| self.indices[o])
            .collect();
        self.pos = end;

        tracing::info!("Getting dialogs = [{}]", format_indices(&picked));

        let turns = self.turns;
        let batch = picked
            .iter()
            .flat_map(|idx| idx.dialogue(turns).iter())
            .collect();
        Some((picked, batch))
    }
}

impl<'a> Iterator for DialogueBatches<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_indices().map(|(_, batch)| batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.order.len() - self.pos).div_ceil(self.batch_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DialogueBatches<'_> {}

fn format_indices(indices: &[DialogueIndex]) -> String {
    indices
        .iter()
        .map(|idx| idx.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
