//! Analytics domain types
//!
//! Every aggregate carries a `simulated` flag. The backend never sets it;
//! values produced by [`crate::analytics`] always do, so a renderer can label
//! generated numbers as such.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Executions on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionTrendPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub failed: u64,
}

/// Execution trend over a window of days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionTrend {
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub points: Vec<ExecutionTrendPoint>,
    #[serde(default)]
    pub simulated: bool,
}

impl ExecutionTrend {
    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.total).sum()
    }

    /// Overall success rate in percent, `0.0` when nothing ran
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let success: u64 = self.points.iter().map(|p| p.success).sum();
        success as f64 * 100.0 / total as f64
    }
}

/// Per-pipeline execution aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStats {
    pub pipeline_id: i64,
    pub pipeline_name: String,
    #[serde(default)]
    pub total_executions: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub average_duration: Option<f64>,
    #[serde(default)]
    pub simulated: bool,
}

/// How often each tool type is used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUsage {
    pub tool_type: String,
    #[serde(default)]
    pub count: u64,
}

/// Headline numbers from `GET /analytics/overview/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    #[serde(default)]
    pub total_pipelines: u64,
    #[serde(default)]
    pub active_pipelines: u64,
    #[serde(default)]
    pub total_executions: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub average_duration: Option<f64>,
    #[serde(default)]
    pub simulated: bool,
}
