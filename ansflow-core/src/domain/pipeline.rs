//! Pipeline domain types
//!
//! A pipeline is an ordered list of steps bound to an execution tool. The
//! advanced workflow fields on a step (conditions, approval, retry policy,
//! notifications) and parallel group sync policies are assembled by the
//! client but interpreted only by the backend, so they stay opaque JSON here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Lifecycle state of a pipeline definition
    pub enum PipelineStatus {
        Draft => "draft",
        Active => "active",
        Inactive => "inactive",
        Archived => "archived",
    }
}

wire_enum! {
    /// Where the pipeline steps are executed
    pub enum ExecutionMode {
        Local => "local",
        Remote => "remote",
        Hybrid => "hybrid",
    }
}

wire_enum! {
    /// How a parallel group waits for its members
    pub enum SyncPolicy {
        WaitAll => "wait_all",
        WaitAny => "wait_any",
        FailFast => "fail_fast",
    }
}

/// Pipeline definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project: Option<i64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub status: PipelineStatus,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub execution_mode: ExecutionMode,
    #[serde(default)]
    pub execution_tool: Option<i64>,
    #[serde(default)]
    pub tool_job_name: Option<String>,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default)]
    pub steps: Vec<PipelineStep>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Pipeline {
    /// Steps sorted by their `order` field
    pub fn ordered_steps(&self) -> Vec<&PipelineStep> {
        let mut steps: Vec<_> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.order);
        steps
    }

    /// Names of the parallel groups referenced by this pipeline's steps
    pub fn parallel_group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .steps
            .iter()
            .filter_map(|s| s.parallel_group.as_deref())
            .filter(|g| !g.is_empty())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// A single step within a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub step_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<serde_json::Value>,
    #[serde(default)]
    pub approval_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_config: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_config: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_playbook: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_inventory: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_credential: Option<i64>,
}

impl PipelineStep {
    pub fn new(name: impl Into<String>, step_type: impl Into<String>, order: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            step_type: step_type.into(),
            description: None,
            parameters: serde_json::Value::Object(Default::default()),
            order,
            parallel_group: None,
            conditions: None,
            approval_required: false,
            approval_config: None,
            retry_policy: None,
            notification_config: None,
            ansible_playbook: None,
            ansible_inventory: None,
            ansible_credential: None,
        }
    }
}

/// A named group of steps the backend runs concurrently
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub pipeline: i64,
    #[serde(default)]
    pub sync_policy: SyncPolicy,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub steps: Vec<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pipeline_json() -> serde_json::Value {
        json!({
            "id": 12,
            "name": "deploy-web",
            "status": "active",
            "execution_mode": "hybrid",
            "created_at": "2025-07-01T08:00:00Z",
            "steps": [
                {
                    "id": 2, "name": "test", "step_type": "shell_script",
                    "order": 2, "parallel_group": "g1"
                },
                { "id": 1, "name": "fetch", "step_type": "fetch_code", "order": 1 },
                {
                    "id": 3, "name": "lint", "step_type": "shell_script",
                    "order": 2, "parallel_group": "g1"
                }
            ]
        })
    }

    #[test]
    fn test_ordered_steps() {
        let pipeline: Pipeline = serde_json::from_value(pipeline_json()).unwrap();
        let names: Vec<_> = pipeline.ordered_steps().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names[0], "fetch");
        assert!(pipeline.is_active);
        assert_eq!(pipeline.execution_mode, ExecutionMode::Hybrid);
    }

    #[test]
    fn test_parallel_group_names_deduplicated() {
        let pipeline: Pipeline = serde_json::from_value(pipeline_json()).unwrap();
        assert_eq!(pipeline.parallel_group_names(), vec!["g1"]);
    }

    #[test]
    fn test_step_skips_absent_workflow_fields() {
        let step = PipelineStep::new("build", "docker_build", 1);
        let value = serde_json::to_value(&step).unwrap();
        assert!(value.get("retry_policy").is_none());
        assert!(value.get("id").is_none());
        assert_eq!(value["approval_required"], json!(false));
    }
}
