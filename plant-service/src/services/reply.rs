//! Post-processing of model replies.

use serde_json::Value;

/// Remove surrounding whitespace and every markdown fence marker.
pub fn strip_code_fences(reply: &str) -> String {
    reply.trim().replace("```json", "").replace("```", "")
}

/// Parse a fenced or bare JSON reply. The value is returned as the model wrote it.
pub fn parse_json_reply(reply: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&strip_code_fences(reply))
}
