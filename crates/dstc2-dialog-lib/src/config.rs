/*
Batching and re-splitting configuration.

Both structs are serde-(de)serializable so callers can load them from JSON or
print the effective configuration for diagnostics. Defaults: batch_size=8,
data_type=train, shuffle=true, no seed (fresh entropy per run); split ratios
of zero keep the corpus partitions untouched.
*/

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::dataset::DataType;
use crate::error::Result;
use crate::split::{DialogueRatioSplit, KeepSplits, SplitPolicy};

/// Default number of dialogues per batch.
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// How batches are drawn from the dataset.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of dialogues per batch.
    pub batch_size: usize,
    pub data_type: DataType,
    pub shuffle: bool,
    /// Seed for the shuffling generator. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            data_type: DataType::Train,
            shuffle: true,
            seed: None,
        }
    }
}

impl BatchConfig {
    /// Generator for the shuffling step.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Optional re-partitioning of the corpus by dialogue.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub valid_ratio: f64,
    pub test_ratio: f64,
    pub seed: u64,
}

impl SplitConfig {
    /// `KeepSplits` when both ratios are zero, a seeded `DialogueRatioSplit` otherwise.
    pub fn policy(&self) -> Result<Box<dyn SplitPolicy>> {
        if self.valid_ratio == 0.0 && self.test_ratio == 0.0 {
            return Ok(Box::new(KeepSplits));
        }
        let policy = DialogueRatioSplit::new(self.valid_ratio, self.test_ratio, self.seed)?;
        Ok(Box::new(policy))
    }
}
