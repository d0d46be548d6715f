use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Body of `POST /get-treatment-plan`.
///
/// Only a missing `disease_name` is rejected; any JSON value is accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct TreatmentPlanRequest {
    pub disease_name: Value,
}

impl TreatmentPlanRequest {
    /// The disease name as prompt text. Strings are used as is, other values as JSON.
    pub fn disease_label(&self) -> Cow<'_, str> {
        match &self.disease_name {
            Value::String(name) => Cow::Borrowed(name),
            other => Cow::Owned(other.to_string()),
        }
    }
}

/// Successful reply of `POST /get-treatment-plan`.
#[derive(Debug, Clone, Serialize)]
pub struct TreatmentPlanResponse {
    /// The model's reply, markdown included.
    pub plan: String,
}
