use serde::{Deserialize, Serialize};

/// Top-level wrapper of a successful quote response:
/// `{"quoteResponse": {"result": [...], "error": null}}`.
///
/// Elements stay as raw JSON so one malformed element cannot fail the batch.
#[derive(Serialize, Deserialize)]
pub struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    pub quote_response: QuoteResponse,
}

#[derive(Serialize, Deserialize)]
pub struct QuoteResponse {
    pub result: Vec<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}
