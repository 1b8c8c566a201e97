//! Project endpoints

use ansflow_core::Validate;
use ansflow_core::domain::project::{Environment, Project, ProjectMember};
use ansflow_core::dto::ActionResult;
use ansflow_core::dto::project::{AddMember, CreateProject, UpdateProject};

use crate::AnsflowClient;
use crate::error::Result;

pub(crate) const PROJECTS: &str = "/projects/projects/";

impl AnsflowClient {
    // =============================================================================
    // Projects
    // =============================================================================

    /// List all projects
    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        self.list(PROJECTS).await
    }

    /// Get a project by ID
    pub async fn get_project(&self, id: i64) -> Result<Project> {
        self.get(&format!("{}{}/", PROJECTS, id)).await
    }

    /// Create a project
    ///
    /// Names containing anything but letters, digits, `_` and `-` are rejected
    /// without contacting the backend.
    pub async fn create_project(&self, req: &CreateProject) -> Result<Project> {
        req.validate()?;
        self.post(PROJECTS, req).await
    }

    /// Update a project
    pub async fn update_project(&self, id: i64, req: &UpdateProject) -> Result<Project> {
        req.validate()?;
        self.patch(&format!("{}{}/", PROJECTS, id), req).await
    }

    /// Delete a project
    pub async fn delete_project(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", PROJECTS, id)).await
    }

    // =============================================================================
    // Members & Environments
    // =============================================================================

    /// List the members of a project
    pub async fn get_project_members(&self, id: i64) -> Result<Vec<ProjectMember>> {
        self.list(&format!("{}{}/members/", PROJECTS, id)).await
    }

    /// Add a member to a project
    pub async fn add_project_member(&self, id: i64, req: &AddMember) -> Result<ActionResult> {
        req.validate()?;
        self.post_action_with(&format!("{}{}/add_member/", PROJECTS, id), req)
            .await
    }

    /// Remove a member from a project
    pub async fn remove_project_member(&self, id: i64, user_id: i64) -> Result<ActionResult> {
        self.post_action_with(
            &format!("{}{}/remove_member/", PROJECTS, id),
            &serde_json::json!({ "user_id": user_id }),
        )
        .await
    }

    /// List the deployment environments of a project
    pub async fn get_project_environments(&self, id: i64) -> Result<Vec<Environment>> {
        self.list(&format!("{}{}/environments/", PROJECTS, id))
            .await
    }
}
