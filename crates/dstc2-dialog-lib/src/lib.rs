//! Library entry point for the DSTC2 dialogue dataset adapter.
//!
//! Raw `(user_turn, system_turn)` records are normalized into
//! `(input_text, output_text, metadata)` triples, grouped into dialogues by
//! their `episode_done` markers, and served as mini-batches of whole
//! dialogues. This file re-exports the core types and provides helpers to
//! load a corpus from a JSON file.
//
// Public modules
pub mod batch;
pub mod config;
pub mod dataset;
pub mod dialogue;
pub mod error;
pub mod model;
pub mod normalize;
pub mod split;
pub mod vocab;

// Re-export primary types for ergonomic use.
pub use batch::{Batch, DialogueBatches};
pub use config::{BatchConfig, SplitConfig};
pub use dataset::{DataType, DialogueDataset, SplitSummary};
pub use dialogue::{dialogue_indices, DialogueIndex};
pub use error::{DatasetError, Result};
pub use model::{
    normalized_turn::{NormalizedTurn, TurnMetadata},
    raw_turn::{RawTurn, SystemTurn, UserTurn},
};
pub use normalize::RawDataset;
pub use split::{DialogueRatioSplit, KeepSplits, SplitPolicy};
pub use vocab::{build_vocab, load_vocab, save_vocab};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a raw corpus document from a JSON file.
///
/// The file holds an object with optional `train`, `valid` and `test` arrays of
/// `[user_turn, system_turn]` pairs. Individual records are validated later by
/// [`DialogueDataset::new`].
pub fn load_raw_dataset_json(path: &Path) -> Result<RawDataset> {
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    let raw: RawDataset =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(
        path = %path.display(),
        train = raw.train.len(),
        valid = raw.valid.len(),
        test = raw.test.len(),
        "loaded raw corpus"
    );
    Ok(raw)
}

/// Load and build a [`DialogueDataset`] from a JSON corpus file.
pub fn load_dataset_json(path: &Path, policy: &dyn SplitPolicy) -> Result<DialogueDataset> {
    DialogueDataset::new(load_raw_dataset_json(path)?, policy)
}
