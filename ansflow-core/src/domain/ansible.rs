//! Ansible automation domain types
//!
//! Inventories, playbooks and credentials are combined by the backend into
//! executions. Hosts and host groups are managed as standalone records and
//! attached to inventories and groups by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::execution::ExecutionStatus;

wire_enum! {
    /// Inventory content format
    pub enum InventoryFormat {
        Ini => "ini",
        Yaml => "yaml",
    }
}

wire_enum! {
    /// Credential kind
    pub enum CredentialType {
        SshKey => "ssh_key",
        Password => "password",
        Vault => "vault",
    }
}

wire_enum! {
    /// Transport used to reach a host
    pub enum ConnectionType {
        Ssh => "ssh",
        Winrm => "winrm",
        Local => "local",
    }
}

wire_enum! {
    /// Last known reachability of a host
    pub enum HostStatus {
        Active => "active",
        Inactive => "inactive",
        Failed => "failed",
    }
}

wire_enum! {
    /// Playbook category used for grouping in listings
    pub enum PlaybookCategory {
        Deployment => "deployment",
        Configuration => "configuration",
        Monitoring => "monitoring",
        Security => "security",
        Maintenance => "maintenance",
        Other => "other",
    }
}

/// Ansible inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsibleInventory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub format_type: InventoryFormat,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub is_validated: bool,
    #[serde(default)]
    pub hosts_count: Option<u32>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Ansible playbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsiblePlaybook {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub category: PlaybookCategory,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Ansible credential; secrets are write-only and never returned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsibleCredential {
    pub id: i64,
    pub name: String,
    pub credential_type: CredentialType,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub has_password: bool,
    #[serde(default)]
    pub has_ssh_key: bool,
    pub created_at: DateTime<Utc>,
}

/// A playbook run against an inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsibleExecution {
    pub id: i64,
    pub playbook: i64,
    #[serde(default)]
    pub playbook_name: Option<String>,
    pub inventory: i64,
    #[serde(default)]
    pub inventory_name: Option<String>,
    #[serde(default)]
    pub credential: Option<i64>,
    #[serde(default)]
    pub status: ExecutionStatus,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub return_code: Option<i32>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /ansible/executions/{id}/logs/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnsibleExecutionLogs {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub return_code: Option<i32>,
    #[serde(default)]
    pub status: ExecutionStatus,
}

/// A managed host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsibleHost {
    pub id: i64,
    pub hostname: String,
    pub ip_address: String,
    #[serde(default = "default_ssh_port")]
    pub port: u32,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub connection_type: ConnectionType,
    #[serde(default)]
    pub become_method: Option<String>,
    #[serde(default)]
    pub status: HostStatus,
    #[serde(default)]
    pub last_check: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_message: Option<String>,
    #[serde(default)]
    pub os_family: Option<String>,
    #[serde(default)]
    pub os_distribution: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub ansible_facts: serde_json::Value,
    #[serde(default)]
    pub tags: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// A host group; groups may nest through `parent`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsibleHostGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<i64>,
    #[serde(default)]
    pub variables: serde_json::Value,
    #[serde(default)]
    pub hosts_count: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Result of a connectivity check or fact gathering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostCheckResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: HostStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub facts: serde_json::Value,
}

/// Result of inventory or playbook validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Aggregates from `GET /ansible/stats/overview/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnsibleStats {
    #[serde(default)]
    pub total_inventories: u64,
    #[serde(default)]
    pub total_playbooks: u64,
    #[serde(default)]
    pub total_credentials: u64,
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
}

fn default_ssh_port() -> u32 {
    22
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_host_defaults() {
        let host: AnsibleHost = serde_json::from_value(json!({
            "id": 1,
            "hostname": "web-01",
            "ip_address": "10.0.0.5",
            "created_at": "2025-07-01T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(host.port, 22);
        assert_eq!(host.connection_type, ConnectionType::Unknown);
        assert_eq!(host.status, HostStatus::Unknown);
    }

    #[test]
    fn test_execution_status_shared_with_pipelines() {
        let exec: AnsibleExecution = serde_json::from_value(json!({
            "id": 4,
            "playbook": 2,
            "inventory": 1,
            "status": "success",
            "return_code": 0,
            "created_at": "2025-07-01T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(exec.status, ExecutionStatus::Success);
        assert!(exec.status.is_finished());
    }
}
