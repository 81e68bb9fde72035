use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /bfhl`.
///
/// `data` is forwarded verbatim from the user's parsed input. When the input
/// has no `data` member the key is left out of the body entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BfhlRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl BfhlRequest {
    /// Build a request from an already-parsed input document.
    ///
    /// Only the `data` member is forwarded; anything else the user typed is
    /// dropped. Non-object documents carry no `data`.
    pub fn from_input(parsed: &Value) -> Self {
        Self {
            data: parsed.get("data").cloned(),
        }
    }

    /// Number of items in the `data` array, if it is one.
    pub fn item_count(&self) -> Option<usize> {
        self.data.as_ref()?.as_array().map(Vec::len)
    }
}

/// Response body from `POST /bfhl`.
///
/// Fields are kept as loose JSON values: the endpoint omits fields it has
/// nothing to report for and does not always type them the same way (a roll
/// number may arrive as a number, an array may hold integers). Formatting is
/// left to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BfhlResponse {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub is_success: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabets: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_alphabet: Option<Vec<Value>>,
}
