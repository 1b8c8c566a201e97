//! Pipeline DTOs

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::{ExecutionMode, PipelineStep, SyncPolicy};
use crate::validation::{
    Validate, ValidationError, require_json_object, require_max_len, require_non_empty,
};

/// Request to create a new pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePipeline {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project: i64,
    #[serde(default)]
    pub execution_mode: ExecutionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_tool: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_job_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
    #[serde(default)]
    pub steps: Vec<PipelineStep>,
}

impl Validate for CreatePipeline {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_max_len("name", &self.name, 255)?;
        if self.project <= 0 {
            return Err(ValidationError::new("project", "is required"));
        }
        require_json_object("config", self.config.as_ref())?;
        validate_steps(&self.steps)
    }
}

/// Request to update a pipeline (PUT or PATCH)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePipeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_mode: Option<ExecutionMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_tool: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_job_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<PipelineStep>>,
}

impl Validate for UpdatePipeline {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
            require_max_len("name", name, 255)?;
        }
        require_json_object("config", self.config.as_ref())?;
        match &self.steps {
            Some(steps) => validate_steps(steps),
            None => Ok(()),
        }
    }
}

/// Request to create or replace a parallel group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelGroupRequest {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub pipeline: i64,
    #[serde(default)]
    pub sync_policy: SyncPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub steps: Vec<i64>,
}

impl Validate for ParallelGroupRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("id", &self.id)?;
        require_non_empty("name", &self.name)?;
        if self.pipeline <= 0 {
            return Err(ValidationError::new("pipeline", "is required"));
        }
        if self.timeout_seconds == Some(0) {
            return Err(ValidationError::new("timeout_seconds", "must be greater than 0"));
        }
        Ok(())
    }
}

fn validate_steps(steps: &[PipelineStep]) -> Result<(), ValidationError> {
    for step in steps {
        require_non_empty("steps.name", &step.name)?;
        require_non_empty("steps.step_type", &step.step_type)?;
        require_json_object("steps.parameters", Some(&step.parameters))?;
        if step.approval_required && step.approval_config.is_none() {
            return Err(ValidationError::new(
                "steps.approval_config",
                format!("step '{}' requires approval but has no approvers", step.name),
            ));
        }
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pipeline() -> CreatePipeline {
        CreatePipeline {
            name: "deploy-web".to_string(),
            description: None,
            project: 1,
            execution_mode: ExecutionMode::Local,
            execution_tool: None,
            tool_job_name: None,
            is_active: true,
            config: None,
            steps: vec![PipelineStep::new("fetch", "fetch_code", 1)],
        }
    }

    #[test]
    fn test_create_pipeline_validation() {
        assert!(pipeline().validate().is_ok());

        let mut bad = pipeline();
        bad.project = 0;
        assert_eq!(bad.validate().unwrap_err().field, "project");
    }

    #[test]
    fn test_approval_step_needs_config() {
        let mut req = pipeline();
        req.steps[0].approval_required = true;
        assert_eq!(req.validate().unwrap_err().field, "steps.approval_config");

        req.steps[0].approval_config = Some(json!({ "approvers": ["ops"] }));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_parallel_group_timeout() {
        let group = ParallelGroupRequest {
            id: "g1".to_string(),
            name: "tests".to_string(),
            description: None,
            pipeline: 3,
            sync_policy: SyncPolicy::WaitAll,
            timeout_seconds: Some(0),
            steps: vec![1, 2],
        };
        assert!(group.validate().is_err());
    }
}
