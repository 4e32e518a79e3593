use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Side information carried alongside an `(input, output)` pair.
///
/// `db_result` and `episode_done` are only serialized when set, so a turn that
/// does not end a dialogue never carries an `episode_done: false` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnMetadata {
    pub act: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_result: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub episode_done: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl TurnMetadata {
    /// Metadata with only the dialogue act set.
    pub fn with_act(act: impl Into<Value>) -> Self {
        TurnMetadata {
            act: act.into(),
            db_result: None,
            episode_done: false,
        }
    }
}

/// A turn reshaped into the `(input_text, output_text, metadata)` triple used for training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTurn {
    pub input_text: String,
    pub output_text: String,
    pub metadata: TurnMetadata,
}

impl NormalizedTurn {
    pub fn new(
        input_text: impl Into<String>,
        output_text: impl Into<String>,
        metadata: TurnMetadata,
    ) -> Self {
        NormalizedTurn {
            input_text: input_text.into(),
            output_text: output_text.into(),
            metadata,
        }
    }

    /// True when this turn closes its dialogue.
    pub fn episode_done(&self) -> bool {
        self.metadata.episode_done
    }
}
