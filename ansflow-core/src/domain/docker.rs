//! Docker management domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Registry flavour
    pub enum RegistryType {
        Dockerhub => "dockerhub",
        Private => "private",
        Harbor => "harbor",
        Ecr => "ecr",
        Gcr => "gcr",
        Acr => "acr",
    }
}

wire_enum! {
    /// Registry reachability
    pub enum RegistryStatus {
        Active => "active",
        Inactive => "inactive",
        Error => "error",
    }
}

wire_enum! {
    /// Image build state
    pub enum BuildStatus {
        Pending => "pending",
        Building => "building",
        Success => "success",
        Failed => "failed",
    }
}

wire_enum! {
    /// Container runtime state
    pub enum ContainerStatus {
        Created => "created",
        Running => "running",
        Paused => "paused",
        Restarting => "restarting",
        Stopped => "stopped",
        Exited => "exited",
        Dead => "dead",
    }
}

wire_enum! {
    /// Compose project state
    pub enum ComposeStatus {
        Draft => "draft",
        Deployed => "deployed",
        Running => "running",
        Stopped => "stopped",
        Error => "error",
    }
}

/// A container registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerRegistry {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub registry_type: RegistryType,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: RegistryStatus,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub last_check: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_message: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of `POST /docker/registries/{id}/test_connection/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConnectionTest {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: RegistryStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// A managed image definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerImage {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub registry: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dockerfile_content: Option<String>,
    #[serde(default)]
    pub build_context: Option<String>,
    #[serde(default)]
    pub build_args: serde_json::Value,
    #[serde(default)]
    pub image_size: Option<u64>,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub build_status: BuildStatus,
    #[serde(default)]
    pub is_pushed: bool,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DockerImage {
    /// `name:tag`
    pub fn reference(&self) -> String {
        format!("{}:{}", self.name, self.tag)
    }
}

/// A recorded version of an image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerImageVersion {
    pub id: i64,
    pub image: i64,
    pub version: String,
    #[serde(default)]
    pub dockerfile_content: Option<String>,
    #[serde(default)]
    pub changelog: Option<String>,
    #[serde(default)]
    pub is_release: bool,
    pub created_at: DateTime<Utc>,
}

/// A managed container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerContainer {
    pub id: i64,
    pub name: String,
    pub image: i64,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub status: ContainerStatus,
    #[serde(default)]
    pub port_mappings: serde_json::Value,
    #[serde(default)]
    pub environment_vars: serde_json::Value,
    #[serde(default)]
    pub volumes: serde_json::Value,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub restart_policy: Option<String>,
    #[serde(default)]
    pub memory_limit: Option<String>,
    #[serde(default)]
    pub cpu_limit: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

/// Response of `GET /docker/containers/{id}/logs/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerLogs {
    #[serde(default)]
    pub logs: String,
}

/// Resource usage sample of a container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerStats {
    #[serde(default)]
    pub cpu_percent: f64,
    #[serde(default)]
    pub memory_usage: u64,
    #[serde(default)]
    pub memory_limit: u64,
    #[serde(default)]
    pub memory_percent: f64,
    #[serde(default)]
    pub network_rx: u64,
    #[serde(default)]
    pub network_tx: u64,
    #[serde(default)]
    pub block_read: u64,
    #[serde(default)]
    pub block_write: u64,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A docker-compose project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerCompose {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub compose_content: String,
    #[serde(default)]
    pub environment_file: Option<String>,
    #[serde(default)]
    pub working_directory: Option<String>,
    #[serde(default)]
    pub status: ComposeStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of `POST /docker/compose/validate_compose/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeValidation {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Aggregates from `GET /docker/system/stats/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DockerSystemStats {
    #[serde(default)]
    pub total_registries: u64,
    #[serde(default)]
    pub total_images: u64,
    #[serde(default)]
    pub total_containers: u64,
    #[serde(default)]
    pub running_containers: u64,
    #[serde(default)]
    pub total_compose_projects: u64,
    #[serde(default)]
    pub disk_usage: Option<u64>,
}

fn default_tag() -> String {
    "latest".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_reference_defaults_to_latest() {
        let image: DockerImage = serde_json::from_value(json!({
            "id": 1,
            "name": "ansflow/api",
            "created_at": "2025-07-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(image.reference(), "ansflow/api:latest");
        assert_eq!(image.build_status, BuildStatus::Unknown);
    }

    #[test]
    fn test_registry_from_backend_json() {
        let registry: DockerRegistry = serde_json::from_value(json!({
            "id": 2,
            "name": "myrepo",
            "url": "https://registry.example.com",
            "registry_type": "private",
            "status": "active",
            "is_default": true,
            "created_at": "2025-07-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(registry.registry_type, RegistryType::Private);
        assert!(registry.is_default);
    }
}
