//! Analytics endpoints and the simulated fallback

use ansflow_core::analytics::{simulate_execution_trend, simulate_overview, simulate_pipeline_stats};
use ansflow_core::domain::analytics::{
    AnalyticsOverview, ExecutionTrend, ExecutionTrendPoint, PipelineStats, ToolUsage,
};
use chrono::Local;
use tracing::warn;

use crate::AnsflowClient;
use crate::error::{ClientError, Result};

impl AnsflowClient {
    /// Daily execution counts for the last `days` days
    pub async fn get_execution_trends(&self, days: u32) -> Result<ExecutionTrend> {
        let points: Vec<ExecutionTrendPoint> = self
            .list_with_query("/analytics/execution-trends/", &[("days", days)])
            .await?;
        Ok(ExecutionTrend {
            days,
            points,
            simulated: false,
        })
    }

    /// Per-pipeline execution aggregates
    pub async fn get_pipeline_stats(&self) -> Result<Vec<PipelineStats>> {
        self.list("/analytics/pipeline-stats/").await
    }

    /// Usage count per tool type
    pub async fn get_tool_usage(&self) -> Result<Vec<ToolUsage>> {
        self.list("/analytics/tool-usage/").await
    }

    /// Headline analytics numbers
    pub async fn get_analytics_overview(&self) -> Result<AnalyticsOverview> {
        self.get("/analytics/overview/").await
    }

    // =============================================================================
    // Fallbacks
    // =============================================================================

    /// Execution trend, generated locally if the backend has none
    ///
    /// Only a 401 is propagated; it has already expired the session.
    pub async fn execution_trends_or_simulated(&self, days: u32) -> Result<ExecutionTrend> {
        match self.get_execution_trends(days).await {
            Ok(trend) if !trend.points.is_empty() => Ok(trend),
            Ok(_) => {
                warn!("execution trend is empty, simulating {} days", days);
                Ok(simulated_trend(days))
            }
            Err(e) => {
                fallback_or_raise(e, "execution trend")?;
                Ok(simulated_trend(days))
            }
        }
    }

    /// Pipeline stats, generated from the pipeline list if the backend has none
    pub async fn pipeline_stats_or_simulated(&self) -> Result<Vec<PipelineStats>> {
        match self.get_pipeline_stats().await {
            Ok(stats) if !stats.is_empty() => return Ok(stats),
            Ok(_) => warn!("pipeline stats are empty, simulating"),
            Err(e) => fallback_or_raise(e, "pipeline stats")?,
        }

        let pipelines = self.get_pipelines().await?;
        let pairs: Vec<(i64, &str)> = pipelines.iter().map(|p| (p.id, p.name.as_str())).collect();
        Ok(simulate_pipeline_stats(&pairs, &mut rand::thread_rng()))
    }

    /// Overview numbers, derived from `trend` if the backend has none
    pub async fn analytics_overview_or_simulated(
        &self,
        trend: &ExecutionTrend,
    ) -> Result<AnalyticsOverview> {
        match self.get_analytics_overview().await {
            Ok(overview) if overview != AnalyticsOverview::default() => Ok(overview),
            Ok(_) => {
                warn!("analytics overview is empty, simulating");
                Ok(simulate_overview(trend, &mut rand::thread_rng()))
            }
            Err(e) => {
                fallback_or_raise(e, "analytics overview")?;
                Ok(simulate_overview(trend, &mut rand::thread_rng()))
            }
        }
    }
}

fn simulated_trend(days: u32) -> ExecutionTrend {
    simulate_execution_trend(days, Local::now().date_naive(), &mut rand::thread_rng())
}

fn fallback_or_raise(error: ClientError, what: &str) -> Result<()> {
    if error.is_unauthorized() {
        return Err(error);
    }
    warn!("failed to fetch {}, simulating: {}", what, error);
    Ok(())
}
