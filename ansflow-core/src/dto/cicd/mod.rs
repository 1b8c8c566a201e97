//! CI/CD tool and execution DTOs

use serde::{Deserialize, Serialize};

use crate::domain::cicd::ToolType;
use crate::domain::execution::{ExecutionStatus, TriggerType};
use crate::validation::{
    Validate, ValidationError, optional_http_url, require_http_url, require_json_object,
    require_max_len, require_non_empty,
};

/// Request to register a CI/CD tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCicdTool {
    pub name: String,
    pub tool_type: ToolType,
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub project: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl Validate for CreateCicdTool {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_max_len("name", &self.name, 100)?;
        if self.tool_type == ToolType::Unknown {
            return Err(ValidationError::new("tool_type", "is required"));
        }
        require_http_url("base_url", &self.base_url)?;
        require_json_object("config", self.config.as_ref())
    }
}

/// Request to update a CI/CD tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCicdTool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl Validate for UpdateCicdTool {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        optional_http_url("base_url", self.base_url.as_deref())?;
        require_json_object("config", self.config.as_ref())
    }
}

/// Request to create an atomic step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAtomicStep {
    pub name: String,
    pub step_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub is_public: bool,
}

impl Validate for CreateAtomicStep {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("step_type", &self.step_type)?;
        require_json_object("parameters", Some(&self.parameters))
    }
}

/// Request to update an atomic step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAtomicStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl Validate for UpdateAtomicStep {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        require_json_object("parameters", self.parameters.as_ref())
    }
}

/// Request to start a pipeline execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerExecution {
    pub pipeline_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cicd_tool_id: Option<i64>,
    #[serde(default)]
    pub trigger_type: TriggerType,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

impl TriggerExecution {
    /// A manual trigger without parameters
    pub fn manual(pipeline_id: i64) -> Self {
        Self {
            pipeline_id,
            cicd_tool_id: None,
            trigger_type: TriggerType::Manual,
            parameters: serde_json::Value::Object(Default::default()),
        }
    }
}

impl Validate for TriggerExecution {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.pipeline_id <= 0 {
            return Err(ValidationError::new("pipeline_id", "is required"));
        }
        require_json_object("parameters", Some(&self.parameters))
    }
}

/// Query parameters of `GET /cicd/executions/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ExecutionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool() -> CreateCicdTool {
        CreateCicdTool {
            name: "jenkins-main".to_string(),
            tool_type: ToolType::Jenkins,
            base_url: "http://jenkins.local:8080".to_string(),
            description: None,
            username: Some("admin".to_string()),
            token: Some("secret".to_string()),
            project: 1,
            config: None,
        }
    }

    #[test]
    fn test_create_tool_validation() {
        assert!(tool().validate().is_ok());

        let mut bad = tool();
        bad.base_url = "jenkins.local".to_string();
        assert_eq!(bad.validate().unwrap_err().field, "base_url");

        let mut bad = tool();
        bad.config = Some(json!("not an object"));
        assert_eq!(bad.validate().unwrap_err().field, "config");
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = UpdateCicdTool {
            name: Some("renamed".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "name": "renamed" }));
    }

    #[test]
    fn test_manual_trigger() {
        let trigger = TriggerExecution::manual(12);
        assert!(trigger.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&trigger).unwrap(),
            json!({ "pipeline_id": 12, "trigger_type": "manual", "parameters": {} })
        );
        assert!(TriggerExecution::manual(0).validate().is_err());
    }
}
