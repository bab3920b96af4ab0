use serde::{Deserialize, Serialize};

/// A single entry on the list. `created_at` is milliseconds since the Unix
/// epoch and is only used for ordering and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub text: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}
