//! The dialogue dataset: normalized splits plus whole-dialogue batching.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::batch::DialogueBatches;
use crate::dialogue::dialogue_indices;
use crate::error::{DatasetError, Result};
use crate::model::normalized_turn::NormalizedTurn;
use crate::normalize::{normalize_split, RawDataset};
use crate::split::SplitPolicy;

/// Named partition of the dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Train,
    Valid,
    Test,
    /// `train ++ test ++ valid`.
    All,
}

impl DataType {
    pub const ALL_TYPES: [DataType; 4] =
        [DataType::Train, DataType::Valid, DataType::Test, DataType::All];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Valid => "valid",
            Self::Test => "test",
            Self::All => "all",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "train" => Ok(Self::Train),
            "valid" => Ok(Self::Valid),
            "test" => Ok(Self::Test),
            "all" => Ok(Self::All),
            other => Err(DatasetError::UnknownSplit(other.to_string())),
        }
    }
}

/// Turn and dialogue counts of one split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub split: DataType,
    pub turns: usize,
    pub dialogues: usize,
}

/// Normalized DSTC2 turns grouped into train/valid/test, with `all` derived once.
///
/// The lists are fixed after construction; dialogue boundaries are recomputed
/// on every [`DialogueDataset::batch_generator`] call.
#[derive(Debug, Clone)]
pub struct DialogueDataset {
    train: Vec<NormalizedTurn>,
    valid: Vec<NormalizedTurn>,
    test: Vec<NormalizedTurn>,
    all: Vec<NormalizedTurn>,
}

impl DialogueDataset {
    /// Normalize each raw split, let `policy` re-partition them, then derive `all`.
    pub fn new(raw: RawDataset, policy: &dyn SplitPolicy) -> Result<Self> {
        let mut train = normalize_split("train", raw.train)?;
        let mut valid = normalize_split("valid", raw.valid)?;
        let mut test = normalize_split("test", raw.test)?;
        policy.apply(&mut train, &mut valid, &mut test)?;

        let mut all = Vec::with_capacity(train.len() + test.len() + valid.len());
        all.extend(train.iter().cloned());
        all.extend(test.iter().cloned());
        all.extend(valid.iter().cloned());

        tracing::info!(
            "Dataset ready: {} train, {} valid, {} test turns",
            train.len(),
            valid.len(),
            test.len()
        );

        Ok(DialogueDataset {
            train,
            valid,
            test,
            all,
        })
    }

    /// Build from an untyped `{"train": [...], "valid": [...], "test": [...]}` value.
    pub fn from_value(value: Value, policy: &dyn SplitPolicy) -> Result<Self> {
        let raw: RawDataset = serde_json::from_value(value).map_err(DatasetError::Document)?;
        Self::new(raw, policy)
    }

    pub fn train(&self) -> &[NormalizedTurn] {
        &self.train
    }

    pub fn valid(&self) -> &[NormalizedTurn] {
        &self.valid
    }

    pub fn test(&self) -> &[NormalizedTurn] {
        &self.test
    }

    pub fn all(&self) -> &[NormalizedTurn] {
        &self.all
    }

    pub fn data(&self, data_type: DataType) -> &[NormalizedTurn] {
        match data_type {
            DataType::Train => &self.train,
            DataType::Valid => &self.valid,
            DataType::Test => &self.test,
            DataType::All => &self.all,
        }
    }

    /// Look a split up by name; unknown names fail with [`DatasetError::UnknownSplit`].
    pub fn data_by_name(&self, name: &str) -> Result<&[NormalizedTurn]> {
        Ok(self.data(name.parse()?))
    }

    pub fn summary(&self) -> Vec<SplitSummary> {
        DataType::ALL_TYPES
            .iter()
            .map(|&split| {
                let turns = self.data(split);
                SplitSummary {
                    split,
                    turns: turns.len(),
                    dialogues: dialogue_indices(turns).len(),
                }
            })
            .collect()
    }

    /// Batches of whole dialogues from `data_type`, at most `batch_size` dialogues each.
    ///
    /// `rng` is only consulted when `shuffle` is set. Two calls are independent
    /// draws; pass a seeded generator for reproducible order.
    pub fn batch_generator<'a, R: Rng + ?Sized>(
        &'a self,
        batch_size: usize,
        data_type: DataType,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<DialogueBatches<'a>> {
        DialogueBatches::new(self.data(data_type), batch_size, shuffle, rng)
    }
}
