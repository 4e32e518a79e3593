// Raw DSTC2 turn records as they appear in the corpus JSON.
// Required fields are plain members so a missing `text` or `act` fails at
// deserialization time with serde's "missing field" diagnostic.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The user half of an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTurn {
    pub text: String,
    /// Database lookup attached to the user turn; JSON `null` is treated as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_result: Option<Value>,
    /// Set on the last turn of a dialogue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_done: Option<bool>,
}

/// The system half of an exchange with its dialogue act label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTurn {
    pub text: String,
    pub act: Value,
}

/// One `(user_turn, system_turn)` pair, stored in the corpus as a two-element array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTurn(pub UserTurn, pub SystemTurn);

impl RawTurn {
    pub fn user(&self) -> &UserTurn {
        &self.0
    }

    pub fn system(&self) -> &SystemTurn {
        &self.1
    }
}
