//! Interpretation of update service responses
//!
//! The service answers `{ "status": ..., "updated_data": { <vital>: {...} } }`,
//! optionally with `disease` and `health_report`. Only a `"success"` status
//! with an entry for the requested vital carrying a `change` counts as an update.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::Scalar;

/// Status value marking a successful update
pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("update service returned status {status:?}")]
    NotSuccess { status: String },
    #[error("no updated_data entry for vital {vital:?}")]
    MissingVital { vital: String },
    #[error("updated_data entry for vital {vital:?} has no displayable change")]
    MissingChange { vital: String },
}

/// Response body of the update service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub status: String,
    #[serde(default)]
    pub updated_data: Map<String, Value>,
    #[serde(default)]
    pub disease: Value,
    #[serde(default)]
    pub health_report: Value,
}

/// Optional page-level annotations carried by a successful response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub disease: Option<String>,
    pub health_report: Option<String>,
}

impl UpdateResponse {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// The `change` to display for `vital`, checked at every level
    pub fn change_for(&self, vital: &str) -> Result<Scalar, ResponseError> {
        if !self.is_success() {
            return Err(ResponseError::NotSuccess {
                status: self.status.clone(),
            });
        }
        let entry = self
            .updated_data
            .get(vital)
            .ok_or_else(|| ResponseError::MissingVital {
                vital: vital.to_string(),
            })?;
        entry
            .get("change")
            .and_then(Scalar::from_value)
            .ok_or_else(|| ResponseError::MissingChange {
                vital: vital.to_string(),
            })
    }

    pub fn summary(&self) -> Summary {
        let text = |v: &Value| Scalar::from_value(v).map(|s| s.to_string());
        Summary {
            disease: text(&self.disease),
            health_report: text(&self.health_report),
        }
    }
}
