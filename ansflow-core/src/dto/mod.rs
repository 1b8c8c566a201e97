//! Data Transfer Objects
//!
//! Request bodies sent to the AnsFlow backend. Create requests carry every
//! required field; update requests make every field optional and skip absent
//! ones on serialization, so they double as partial (PATCH) bodies.

pub mod ansible;
pub mod auth;
pub mod cicd;
pub mod docker;
pub mod pipeline;
pub mod project;

use serde::{Deserialize, Serialize};

/// Generic response of action endpoints (`.../{id}/start/`, `.../{id}/cancel/`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ActionResult {
    /// Whether the backend reported failure explicitly
    pub fn is_failure(&self) -> bool {
        self.success == Some(false)
    }
}

/// Body of the add/remove host membership endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostIds {
    pub host_ids: Vec<i64>,
}

impl crate::validation::Validate for HostIds {
    fn validate(&self) -> Result<(), crate::validation::ValidationError> {
        if self.host_ids.is_empty() {
            return Err(crate::validation::ValidationError::new(
                "host_ids",
                "select at least one host",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_result_keeps_extra_fields() {
        let result: ActionResult = serde_json::from_value(json!({
            "success": false,
            "message": "container not found",
            "container_id": "abc123"
        }))
        .unwrap();

        assert!(result.is_failure());
        assert_eq!(result.extra["container_id"], json!("abc123"));
    }

    #[test]
    fn test_empty_host_ids_rejected() {
        use crate::validation::Validate;
        assert!(HostIds { host_ids: vec![] }.validate().is_err());
        assert!(HostIds { host_ids: vec![1, 2] }.validate().is_ok());
    }
}
