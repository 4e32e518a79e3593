//! Re-partitioning policies applied to the normalized splits before `all` is derived.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dialogue::dialogue_indices;
use crate::error::{DatasetError, Result};
use crate::model::normalized_turn::NormalizedTurn;

/// Decides the final train/valid/test membership of normalized turns.
///
/// Implementations mutate the three lists in place. They run once, during
/// dataset construction.
pub trait SplitPolicy {
    fn apply(
        &self,
        train: &mut Vec<NormalizedTurn>,
        valid: &mut Vec<NormalizedTurn>,
        test: &mut Vec<NormalizedTurn>,
    ) -> Result<()>;
}

/// Keeps the splits exactly as they were supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepSplits;

impl SplitPolicy for KeepSplits {
    fn apply(
        &self,
        _train: &mut Vec<NormalizedTurn>,
        _valid: &mut Vec<NormalizedTurn>,
        _test: &mut Vec<NormalizedTurn>,
    ) -> Result<()> {
        Ok(())
    }
}

/// Pools every split, shuffles whole dialogues and deals them out again by ratio.
///
/// Ratios count dialogues, not turns. Test takes the first
/// `round(n * test_ratio)` dialogues of the shuffled pool, valid the next
/// `round(n * valid_ratio)`, and train the rest.
#[derive(Debug, Clone, Copy)]
pub struct DialogueRatioSplit {
    pub valid_ratio: f64,
    pub test_ratio: f64,
    pub seed: u64,
}

impl DialogueRatioSplit {
    pub fn new(valid_ratio: f64, test_ratio: f64, seed: u64) -> Result<Self> {
        let in_unit = |r: f64| (0.0..=1.0).contains(&r);
        if !in_unit(valid_ratio) || !in_unit(test_ratio) || valid_ratio + test_ratio > 1.0 {
            return Err(DatasetError::InvalidRatio {
                valid: valid_ratio,
                test: test_ratio,
            });
        }
        Ok(DialogueRatioSplit {
            valid_ratio,
            test_ratio,
            seed,
        })
    }
}

impl SplitPolicy for DialogueRatioSplit {
    fn apply(
        &self,
        train: &mut Vec<NormalizedTurn>,
        valid: &mut Vec<NormalizedTurn>,
        test: &mut Vec<NormalizedTurn>,
    ) -> Result<()> {
        // Regroup each split separately so dialogues never straddle two source lists.
        let mut dialogues: Vec<Vec<NormalizedTurn>> = Vec::new();
        for split in [&mut *train, &mut *test, &mut *valid] {
            let pooled = std::mem::take(split);
            let indices = dialogue_indices(&pooled);
            let mut rest = pooled.into_iter();
            for idx in indices {
                dialogues.push(rest.by_ref().take(idx.len()).collect());
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        dialogues.shuffle(&mut rng);

        let total = dialogues.len();
        let n_test = ((total as f64) * self.test_ratio).round() as usize;
        let n_valid = ((total as f64) * self.valid_ratio).round() as usize;
        let n_test = n_test.min(total);
        let n_valid = n_valid.min(total - n_test);

        for (i, dialogue) in dialogues.into_iter().enumerate() {
            let target = if i < n_test {
                &mut *test
            } else if i < n_test + n_valid {
                &mut *valid
            } else {
                &mut *train
            };
            target.extend(dialogue);
        }

        tracing::info!(
            "Dialogue split: {} train, {} valid, {} test turns ({} dialogues)",
            train.len(),
            valid.len(),
            test.len(),
            total
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::normalized_turn::TurnMetadata;

    fn dialogues(count: usize, len: usize, tag: &str) -> Vec<NormalizedTurn> {
        let mut out = Vec::new();
        for d in 0..count {
            for t in 0..len {
                let mut meta = TurnMetadata::with_act("x");
                meta.episode_done = t + 1 == len;
                out.push(NormalizedTurn::new(format!("{tag}{d}-{t}"), "", meta));
            }
        }
        out
    }

    #[test]
    fn keep_splits_is_identity() {
        let mut train = dialogues(2, 2, "tr");
        let mut valid = dialogues(1, 1, "va");
        let mut test = Vec::new();
        let before = (train.clone(), valid.clone());
        KeepSplits.apply(&mut train, &mut valid, &mut test).unwrap();
        assert_eq!((train, valid), before);
        assert!(test.is_empty());
    }

    #[test]
    fn ratio_split_moves_whole_dialogues() {
        let mut train = dialogues(10, 3, "tr");
        let mut valid = Vec::new();
        let mut test = Vec::new();
        DialogueRatioSplit::new(0.2, 0.1, 5)
            .unwrap()
            .apply(&mut train, &mut valid, &mut test)
            .unwrap();
        assert_eq!(train.len(), 7 * 3);
        assert_eq!(valid.len(), 2 * 3);
        assert_eq!(test.len(), 3);
        for split in [&train, &valid, &test] {
            for idx in dialogue_indices(split) {
                assert_eq!(idx.len(), 3);
            }
        }
    }

    #[test]
    fn ratio_split_is_seeded() {
        let run = |seed| {
            let mut train = dialogues(12, 1, "tr");
            let mut valid = Vec::new();
            let mut test = Vec::new();
            DialogueRatioSplit::new(0.25, 0.25, seed)
                .unwrap()
                .apply(&mut train, &mut valid, &mut test)
                .unwrap();
            (train, valid, test)
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn invalid_ratios_are_rejected() {
        assert!(DialogueRatioSplit::new(0.7, 0.5, 0).is_err());
        assert!(DialogueRatioSplit::new(-0.1, 0.0, 0).is_err());
        assert!(DialogueRatioSplit::new(0.0, 1.5, 0).is_err());
        assert!(DialogueRatioSplit::new(0.5, 0.5, 0).is_ok());
    }
}
