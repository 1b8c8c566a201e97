//! CI/CD tool, atomic step and execution endpoints

use ansflow_core::{Page, Validate};
use ansflow_core::domain::cicd::{AtomicStep, CicdTool, ToolHealth, ToolJob};
use ansflow_core::domain::execution::{ExecutionLogs, ExecutionStatistics, PipelineExecution};
use ansflow_core::dto::ActionResult;
use ansflow_core::dto::cicd::{
    CreateAtomicStep, CreateCicdTool, ExecutionFilter, TriggerExecution, UpdateAtomicStep,
    UpdateCicdTool,
};

use crate::AnsflowClient;
use crate::error::Result;

pub(crate) const TOOLS: &str = "/cicd/tools/";
pub(crate) const ATOMIC_STEPS: &str = "/cicd/atomic-steps/";
pub(crate) const EXECUTIONS: &str = "/cicd/executions/";

impl AnsflowClient {
    // =============================================================================
    // CI/CD Tools
    // =============================================================================

    /// List all registered CI/CD tools
    pub async fn get_tools(&self) -> Result<Vec<CicdTool>> {
        self.list(TOOLS).await
    }

    /// Get a CI/CD tool by ID
    pub async fn get_tool(&self, id: i64) -> Result<CicdTool> {
        self.get(&format!("{}{}/", TOOLS, id)).await
    }

    /// Register a CI/CD tool
    ///
    /// # Example
    /// ```no_run
    /// # use ansflow_client::AnsflowClient;
    /// # use ansflow_core::domain::cicd::ToolType;
    /// # use ansflow_core::dto::cicd::CreateCicdTool;
    /// # async fn example(client: AnsflowClient) -> Result<(), ansflow_client::ClientError> {
    /// let tool = client.create_tool(&CreateCicdTool {
    ///     name: "jenkins-main".to_string(),
    ///     tool_type: ToolType::Jenkins,
    ///     base_url: "http://jenkins.local:8080".to_string(),
    ///     description: None,
    ///     username: Some("admin".to_string()),
    ///     token: Some("api-token".to_string()),
    ///     project: 1,
    ///     config: None,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_tool(&self, req: &CreateCicdTool) -> Result<CicdTool> {
        req.validate()?;
        self.post(TOOLS, req).await
    }

    /// Update a CI/CD tool
    pub async fn update_tool(&self, id: i64, req: &UpdateCicdTool) -> Result<CicdTool> {
        req.validate()?;
        self.patch(&format!("{}{}/", TOOLS, id), req).await
    }

    /// Delete a CI/CD tool
    pub async fn delete_tool(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", TOOLS, id)).await
    }

    /// Ask the backend to probe a tool's connectivity and credentials
    pub async fn check_tool_health(&self, id: i64) -> Result<ToolHealth> {
        self.post(&format!("{}{}/health_check/", TOOLS, id), &serde_json::json!({}))
            .await
    }

    /// List the jobs known to an external tool
    pub async fn get_tool_jobs(&self, id: i64) -> Result<Vec<ToolJob>> {
        self.list(&format!("{}{}/jobs/", TOOLS, id)).await
    }

    // =============================================================================
    // Atomic Steps
    // =============================================================================

    /// List all atomic steps
    pub async fn get_atomic_steps(&self) -> Result<Vec<AtomicStep>> {
        self.list(ATOMIC_STEPS).await
    }

    /// Create an atomic step
    pub async fn create_atomic_step(&self, req: &CreateAtomicStep) -> Result<AtomicStep> {
        req.validate()?;
        self.post(ATOMIC_STEPS, req).await
    }

    /// Update an atomic step
    pub async fn update_atomic_step(&self, id: i64, req: &UpdateAtomicStep) -> Result<AtomicStep> {
        req.validate()?;
        self.patch(&format!("{}{}/", ATOMIC_STEPS, id), req).await
    }

    /// Delete an atomic step
    pub async fn delete_atomic_step(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", ATOMIC_STEPS, id)).await
    }

    // =============================================================================
    // Executions
    // =============================================================================

    /// List executions matching `filter`
    pub async fn get_executions(&self, filter: &ExecutionFilter) -> Result<Vec<PipelineExecution>> {
        self.list_with_query(EXECUTIONS, filter).await
    }

    /// List one page of executions, keeping the pagination counters
    pub async fn get_executions_page(
        &self,
        filter: &ExecutionFilter,
    ) -> Result<Page<PipelineExecution>> {
        self.list_page(EXECUTIONS, filter).await
    }

    /// Get an execution by ID
    pub async fn get_execution(&self, id: i64) -> Result<PipelineExecution> {
        self.get(&format!("{}{}/", EXECUTIONS, id)).await
    }

    /// Start a pipeline execution
    pub async fn trigger_execution(&self, req: &TriggerExecution) -> Result<PipelineExecution> {
        req.validate()?;
        self.post(EXECUTIONS, req).await
    }

    /// Cancel a running execution
    pub async fn cancel_execution(&self, id: i64) -> Result<ActionResult> {
        self.post_action(&format!("{}{}/cancel/", EXECUTIONS, id))
            .await
    }

    /// Get the logs of an execution
    pub async fn get_execution_logs(&self, id: i64) -> Result<ExecutionLogs> {
        self.get(&format!("{}{}/logs/", EXECUTIONS, id)).await
    }

    /// Get aggregate execution statistics
    pub async fn get_execution_statistics(&self) -> Result<ExecutionStatistics> {
        self.get(&format!("{}statistics/", EXECUTIONS)).await
    }
}
