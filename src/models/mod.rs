pub mod market;
pub mod simulation;

use serde::{Deserialize, Serialize};

/// Error body returned by every handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
