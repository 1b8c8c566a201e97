//! Pipeline and parallel group endpoints

use ansflow_core::Validate;
use ansflow_core::domain::pipeline::{ParallelGroup, Pipeline};
use ansflow_core::dto::pipeline::{CreatePipeline, ParallelGroupRequest, UpdatePipeline};

use crate::AnsflowClient;
use crate::error::Result;

pub(crate) const PIPELINES: &str = "/pipelines/pipelines/";
pub(crate) const PARALLEL_GROUPS: &str = "/pipelines/parallel-groups/";

impl AnsflowClient {
    // =============================================================================
    // Pipeline Management
    // =============================================================================

    /// List all pipelines
    pub async fn get_pipelines(&self) -> Result<Vec<Pipeline>> {
        self.list(PIPELINES).await
    }

    /// Get a pipeline by ID, including its steps
    pub async fn get_pipeline(&self, id: i64) -> Result<Pipeline> {
        self.get(&format!("{}{}/", PIPELINES, id)).await
    }

    /// Create a new pipeline
    pub async fn create_pipeline(&self, req: &CreatePipeline) -> Result<Pipeline> {
        req.validate()?;
        self.post(PIPELINES, req).await
    }

    /// Replace a pipeline (PUT)
    pub async fn update_pipeline(&self, id: i64, req: &UpdatePipeline) -> Result<Pipeline> {
        req.validate()?;
        self.put(&format!("{}{}/", PIPELINES, id), req).await
    }

    /// Partially update a pipeline (PATCH)
    pub async fn patch_pipeline(&self, id: i64, req: &UpdatePipeline) -> Result<Pipeline> {
        req.validate()?;
        self.patch(&format!("{}{}/", PIPELINES, id), req).await
    }

    /// Delete a pipeline
    pub async fn delete_pipeline(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", PIPELINES, id)).await
    }

    // =============================================================================
    // Parallel Groups
    // =============================================================================

    /// List the parallel groups of a pipeline
    pub async fn get_parallel_groups(&self, pipeline_id: i64) -> Result<Vec<ParallelGroup>> {
        self.list_with_query(PARALLEL_GROUPS, &[("pipeline", pipeline_id)])
            .await
    }

    /// Create a parallel group
    pub async fn create_parallel_group(&self, req: &ParallelGroupRequest) -> Result<ParallelGroup> {
        req.validate()?;
        self.post(PARALLEL_GROUPS, req).await
    }

    /// Replace a parallel group
    pub async fn update_parallel_group(
        &self,
        id: &str,
        req: &ParallelGroupRequest,
    ) -> Result<ParallelGroup> {
        req.validate()?;
        self.put(&format!("{}{}/", PARALLEL_GROUPS, id), req).await
    }

    /// Delete a parallel group
    pub async fn delete_parallel_group(&self, id: &str) -> Result<()> {
        self.delete(&format!("{}{}/", PARALLEL_GROUPS, id)).await
    }
}
