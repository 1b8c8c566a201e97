//! Docker endpoints

use ansflow_core::Validate;
use ansflow_core::domain::docker::{
    ComposeValidation, ContainerLogs, ContainerStats, DockerCompose, DockerContainer, DockerImage,
    DockerImageVersion, DockerRegistry, DockerSystemStats, RegistryConnectionTest,
};
use ansflow_core::dto::ActionResult;
use ansflow_core::dto::docker::{
    CreateCompose, CreateContainer, CreateImage, CreateRegistry, PushImage, UpdateCompose,
    UpdateContainer, UpdateImage, UpdateRegistry, ValidateCompose,
};
use ansflow_core::validation::require_non_empty;

use crate::AnsflowClient;
use crate::error::Result;

pub(crate) const REGISTRIES: &str = "/docker/registries/";
pub(crate) const IMAGES: &str = "/docker/images/";
pub(crate) const CONTAINERS: &str = "/docker/containers/";
pub(crate) const COMPOSE: &str = "/docker/compose/";

impl AnsflowClient {
    // =============================================================================
    // Registries
    // =============================================================================

    /// List all registries
    pub async fn get_docker_registries(&self) -> Result<Vec<DockerRegistry>> {
        self.list(REGISTRIES).await
    }

    /// Get a registry by ID
    pub async fn get_docker_registry(&self, id: i64) -> Result<DockerRegistry> {
        self.get(&format!("{}{}/", REGISTRIES, id)).await
    }

    /// Create a registry
    ///
    /// # Example
    /// ```no_run
    /// # use ansflow_client::AnsflowClient;
    /// # use ansflow_core::domain::docker::RegistryType;
    /// # use ansflow_core::dto::docker::CreateRegistry;
    /// # async fn example(client: AnsflowClient) -> Result<(), ansflow_client::ClientError> {
    /// let registry = client
    ///     .create_docker_registry(&CreateRegistry::new(
    ///         "myrepo",
    ///         "https://registry.example.com",
    ///         RegistryType::Private,
    ///     ))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_docker_registry(&self, req: &CreateRegistry) -> Result<DockerRegistry> {
        req.validate()?;
        self.post(REGISTRIES, req).await
    }

    /// Update a registry
    pub async fn update_docker_registry(
        &self,
        id: i64,
        req: &UpdateRegistry,
    ) -> Result<DockerRegistry> {
        req.validate()?;
        self.patch(&format!("{}{}/", REGISTRIES, id), req).await
    }

    /// Delete a registry
    pub async fn delete_docker_registry(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", REGISTRIES, id)).await
    }

    /// Ask the backend to log in to a registry
    pub async fn test_docker_registry(&self, id: i64) -> Result<RegistryConnectionTest> {
        self.post(
            &format!("{}{}/test_connection/", REGISTRIES, id),
            &serde_json::json!({}),
        )
        .await
    }

    /// Make a registry the default push target
    pub async fn set_default_docker_registry(&self, id: i64) -> Result<ActionResult> {
        self.post_action(&format!("{}{}/set_default/", REGISTRIES, id))
            .await
    }

    // =============================================================================
    // Images
    // =============================================================================

    /// List all images
    pub async fn get_docker_images(&self) -> Result<Vec<DockerImage>> {
        self.list(IMAGES).await
    }

    /// Get an image by ID
    pub async fn get_docker_image(&self, id: i64) -> Result<DockerImage> {
        self.get(&format!("{}{}/", IMAGES, id)).await
    }

    /// Create an image definition
    pub async fn create_docker_image(&self, req: &CreateImage) -> Result<DockerImage> {
        req.validate()?;
        self.post(IMAGES, req).await
    }

    /// Update an image definition
    pub async fn update_docker_image(&self, id: i64, req: &UpdateImage) -> Result<DockerImage> {
        req.validate()?;
        self.patch(&format!("{}{}/", IMAGES, id), req).await
    }

    /// Delete an image definition
    pub async fn delete_docker_image(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", IMAGES, id)).await
    }

    /// Start a build of an image
    pub async fn build_docker_image(&self, id: i64) -> Result<ActionResult> {
        self.post_action(&format!("{}{}/build/", IMAGES, id)).await
    }

    /// Push an image, to `registry_id` or the default registry
    pub async fn push_docker_image(
        &self,
        id: i64,
        registry_id: Option<i64>,
    ) -> Result<ActionResult> {
        self.post_action_with(&format!("{}{}/push/", IMAGES, id), &PushImage { registry_id })
            .await
    }

    /// Pull an image from its registry
    pub async fn pull_docker_image(&self, id: i64) -> Result<ActionResult> {
        self.post_action(&format!("{}{}/pull/", IMAGES, id)).await
    }

    /// List the recorded versions of an image
    pub async fn get_docker_image_versions(&self, id: i64) -> Result<Vec<DockerImageVersion>> {
        self.list(&format!("{}{}/versions/", IMAGES, id)).await
    }

    // =============================================================================
    // Containers
    // =============================================================================

    /// List all containers
    pub async fn get_docker_containers(&self) -> Result<Vec<DockerContainer>> {
        self.list(CONTAINERS).await
    }

    /// Get a container by ID
    pub async fn get_docker_container(&self, id: i64) -> Result<DockerContainer> {
        self.get(&format!("{}{}/", CONTAINERS, id)).await
    }

    /// Create a container
    pub async fn create_docker_container(&self, req: &CreateContainer) -> Result<DockerContainer> {
        req.validate()?;
        self.post(CONTAINERS, req).await
    }

    /// Update a container
    pub async fn update_docker_container(
        &self,
        id: i64,
        req: &UpdateContainer,
    ) -> Result<DockerContainer> {
        req.validate()?;
        self.patch(&format!("{}{}/", CONTAINERS, id), req).await
    }

    /// Delete a container
    pub async fn delete_docker_container(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", CONTAINERS, id)).await
    }

    /// Start a container
    pub async fn start_docker_container(&self, id: i64) -> Result<ActionResult> {
        self.post_action(&format!("{}{}/start/", CONTAINERS, id))
            .await
    }

    /// Stop a container
    pub async fn stop_docker_container(&self, id: i64) -> Result<ActionResult> {
        self.post_action(&format!("{}{}/stop/", CONTAINERS, id))
            .await
    }

    /// Restart a container
    pub async fn restart_docker_container(&self, id: i64) -> Result<ActionResult> {
        self.post_action(&format!("{}{}/restart/", CONTAINERS, id))
            .await
    }

    /// Get the last `tail` log lines of a container
    pub async fn get_docker_container_logs(&self, id: i64, tail: u32) -> Result<ContainerLogs> {
        self.get_with_query(&format!("{}{}/logs/", CONTAINERS, id), &[("tail", tail)])
            .await
    }

    /// Get a resource usage sample of a container
    pub async fn get_docker_container_stats(&self, id: i64) -> Result<ContainerStats> {
        self.get(&format!("{}{}/stats/", CONTAINERS, id)).await
    }

    // =============================================================================
    // Compose
    // =============================================================================

    /// List all compose projects
    pub async fn get_docker_compose_projects(&self) -> Result<Vec<DockerCompose>> {
        self.list(COMPOSE).await
    }

    /// Get a compose project by ID
    pub async fn get_docker_compose(&self, id: i64) -> Result<DockerCompose> {
        self.get(&format!("{}{}/", COMPOSE, id)).await
    }

    /// Create a compose project
    pub async fn create_docker_compose(&self, req: &CreateCompose) -> Result<DockerCompose> {
        req.validate()?;
        self.post(COMPOSE, req).await
    }

    /// Update a compose project
    pub async fn update_docker_compose(
        &self,
        id: i64,
        req: &UpdateCompose,
    ) -> Result<DockerCompose> {
        req.validate()?;
        self.patch(&format!("{}{}/", COMPOSE, id), req).await
    }

    /// Delete a compose project
    pub async fn delete_docker_compose(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", COMPOSE, id)).await
    }

    /// Deploy (`up`) a compose project
    pub async fn deploy_docker_compose(&self, id: i64) -> Result<ActionResult> {
        self.post_action(&format!("{}{}/deploy/", COMPOSE, id))
            .await
    }

    /// Stop (`down`) a compose project
    pub async fn stop_docker_compose(&self, id: i64) -> Result<ActionResult> {
        self.post_action(&format!("{}{}/stop/", COMPOSE, id)).await
    }

    /// Ask the backend to validate compose file content
    pub async fn validate_docker_compose(
        &self,
        compose_content: &str,
    ) -> Result<ComposeValidation> {
        require_non_empty("compose_content", compose_content)?;
        self.post(
            &format!("{}validate_compose/", COMPOSE),
            &ValidateCompose {
                compose_content: compose_content.to_string(),
            },
        )
        .await
    }

    // =============================================================================
    // System
    // =============================================================================

    /// Get Docker system statistics
    pub async fn get_docker_system_stats(&self) -> Result<DockerSystemStats> {
        self.get("/docker/system/stats/").await
    }
}
