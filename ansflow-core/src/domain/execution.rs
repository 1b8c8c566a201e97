//! Pipeline execution domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Execution status
    pub enum ExecutionStatus {
        Pending => "pending",
        Running => "running",
        Success => "success",
        Failed => "failed",
        Cancelled => "cancelled",
        Timeout => "timeout",
    }
}

impl ExecutionStatus {
    /// Whether the execution can no longer change state
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Success
                | ExecutionStatus::Failed
                | ExecutionStatus::Cancelled
                | ExecutionStatus::Timeout
        )
    }
}

wire_enum! {
    /// What started an execution
    pub enum TriggerType {
        Manual => "manual",
        Webhook => "webhook",
        Schedule => "schedule",
        Api => "api",
    }
}

/// A single run of a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineExecution {
    pub id: i64,
    pub pipeline: i64,
    #[serde(default)]
    pub pipeline_name: Option<String>,
    #[serde(default)]
    pub cicd_tool: Option<i64>,
    #[serde(default)]
    pub cicd_tool_name: Option<String>,
    #[serde(default)]
    pub status: ExecutionStatus,
    #[serde(default)]
    pub trigger_type: TriggerType,
    #[serde(default)]
    pub triggered_by: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub step_executions: Vec<StepExecution>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PipelineExecution {
    /// Wall clock duration, once both ends are known
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end.signed_duration_since(start)),
            _ => None,
        }
    }
}

/// Status of one step inside an execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepExecution {
    pub id: i64,
    #[serde(default)]
    pub atomic_step: Option<i64>,
    #[serde(default)]
    pub step_name: Option<String>,
    #[serde(default)]
    pub status: ExecutionStatus,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub logs: Option<String>,
    #[serde(default)]
    pub output: serde_json::Value,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Response of `GET /cicd/executions/{id}/logs/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionLogs {
    #[serde(default)]
    pub execution_id: Option<i64>,
    #[serde(default)]
    pub logs: String,
    #[serde(default)]
    pub steps: Vec<StepLog>,
}

/// Per-step log text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLog {
    #[serde(default)]
    pub step_name: String,
    #[serde(default)]
    pub status: ExecutionStatus,
    #[serde(default)]
    pub logs: String,
}

/// Aggregates from `GET /cicd/executions/statistics/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatistics {
    #[serde(default)]
    pub total_executions: u64,
    #[serde(default)]
    pub successful_executions: u64,
    #[serde(default)]
    pub failed_executions: u64,
    #[serde(default)]
    pub running_executions: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub average_duration: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duration_requires_both_ends() {
        let mut exec: PipelineExecution = serde_json::from_value(json!({
            "id": 7,
            "pipeline": 12,
            "status": "running",
            "trigger_type": "manual",
            "started_at": "2025-07-01T08:00:00Z",
            "created_at": "2025-07-01T07:59:58Z"
        }))
        .unwrap();
        assert!(exec.duration().is_none());
        assert!(!exec.status.is_finished());

        exec.completed_at = Some("2025-07-01T08:01:30Z".parse().unwrap());
        assert_eq!(exec.duration().unwrap().num_seconds(), 90);
    }

    #[test]
    fn test_statistics_tolerate_missing_fields() {
        let stats: ExecutionStatistics =
            serde_json::from_value(json!({ "total_executions": 5 })).unwrap();
        assert_eq!(stats.total_executions, 5);
        assert_eq!(stats.success_rate, 0.0);
    }
}
