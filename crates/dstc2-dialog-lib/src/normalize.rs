//! Turn normalization: raw `(user, system)` pairs into training triples.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DatasetError, Result};
use crate::model::normalized_turn::{NormalizedTurn, TurnMetadata};
use crate::model::raw_turn::RawTurn;

/// The corpus document: three optional lists of raw turn records.
///
/// Records are kept as untyped JSON until [`normalize_split`] validates them,
/// so a malformed record is reported with its split and position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDataset {
    #[serde(default)]
    pub train: Vec<Value>,
    #[serde(default)]
    pub valid: Vec<Value>,
    #[serde(default)]
    pub test: Vec<Value>,
}

/// Reshape one validated raw turn.
pub fn normalize_turn(turn: RawTurn) -> NormalizedTurn {
    let RawTurn(user, system) = turn;
    let metadata = TurnMetadata {
        act: system.act,
        db_result: user.db_result,
        episode_done: user.episode_done.unwrap_or(false),
    };
    NormalizedTurn {
        input_text: user.text,
        output_text: system.text,
        metadata,
    }
}

/// Validate and normalize every record of one split, preserving order.
///
/// The first record that is not a well-formed `(user_turn, system_turn)` pair
/// aborts the whole split.
pub fn normalize_split(split: &str, records: Vec<Value>) -> Result<Vec<NormalizedTurn>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<RawTurn>(record)
                .map(normalize_turn)
                .map_err(|source| DatasetError::InvalidTurn {
                    split: split.to_string(),
                    index,
                    source,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn copies_texts_and_act() {
        let turns = normalize_split(
            "train",
            vec![json!([
                { "text": "i want cheap food" },
                { "text": "what part of town?", "act": "request_area" }
            ])],
        )
        .unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].input_text, "i want cheap food");
        assert_eq!(turns[0].output_text, "what part of town?");
        assert_eq!(turns[0].metadata.act, json!("request_area"));
        assert!(turns[0].metadata.db_result.is_none());
        assert!(!turns[0].episode_done());
    }

    #[test]
    fn null_db_result_is_dropped() {
        let turns = normalize_split(
            "train",
            vec![
                json!([{ "text": "a", "db_result": null }, { "text": "b", "act": "x" }]),
                json!([{ "text": "c", "db_result": { "food": "thai" } }, { "text": "d", "act": "y" }]),
            ],
        )
        .unwrap();
        assert!(turns[0].metadata.db_result.is_none());
        assert_eq!(turns[1].metadata.db_result, Some(json!({ "food": "thai" })));
    }

    #[test]
    fn episode_done_false_is_not_marked() {
        let turns = normalize_split(
            "valid",
            vec![
                json!([{ "text": "a", "episode_done": false }, { "text": "b", "act": "x" }]),
                json!([{ "text": "c", "episode_done": true }, { "text": "d", "act": "y" }]),
            ],
        )
        .unwrap();
        assert!(!turns[0].episode_done());
        assert!(turns[1].episode_done());
        let v = serde_json::to_value(&turns[0].metadata).unwrap();
        assert!(v.get("episode_done").is_none());
    }

    #[test]
    fn missing_act_reports_split_and_index() {
        let err = normalize_split(
            "test",
            vec![
                json!([{ "text": "a" }, { "text": "b", "act": "x" }]),
                json!([{ "text": "c" }, { "text": "d" }]),
            ],
        )
        .unwrap_err();
        match err {
            DatasetError::InvalidTurn { split, index, source } => {
                assert_eq!(split, "test");
                assert_eq!(index, 1);
                assert!(source.to_string().contains("act"), "{}", source);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_text_is_rejected() {
        let err = normalize_split("train", vec![json!([{}, { "text": "b", "act": "x" }])]);
        assert!(matches!(err, Err(DatasetError::InvalidTurn { index: 0, .. })));
    }

    #[test]
    fn raw_dataset_defaults_missing_splits() {
        let raw: RawDataset = serde_json::from_value(json!({ "train": [] })).unwrap();
        assert!(raw.train.is_empty());
        assert!(raw.valid.is_empty());
        assert!(raw.test.is_empty());
    }
}
