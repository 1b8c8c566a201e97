//! CI/CD tool domain types
//!
//! External CI/CD systems (Jenkins, GitLab CI, ...) registered with AnsFlow,
//! and the reusable atomic steps pipelines are assembled from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Kind of external CI/CD system
    pub enum ToolType {
        Jenkins => "jenkins",
        GitlabCi => "gitlab_ci",
        GithubActions => "github_actions",
        CircleCi => "circleci",
        AzureDevops => "azure_devops",
        Custom => "custom",
    }
}

wire_enum! {
    /// Connection state reported by the backend health check
    pub enum ToolStatus {
        Active => "active",
        Inactive => "inactive",
        Authenticated => "authenticated",
        NeedsAuth => "needs_auth",
        Offline => "offline",
        Error => "error",
    }
}

/// A registered CI/CD tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CicdTool {
    pub id: i64,
    pub name: String,
    pub tool_type: ToolType,
    pub base_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub status: ToolStatus,
    #[serde(default)]
    pub project: Option<i64>,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default)]
    pub last_health_check: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of `POST /cicd/tools/{id}/health_check/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolHealth {
    #[serde(default)]
    pub is_healthy: bool,
    #[serde(default)]
    pub status: ToolStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response_time_ms: Option<f64>,
    #[serde(default)]
    pub checked_at: Option<DateTime<Utc>>,
}

/// A job known to an external CI/CD tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolJob {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub buildable: Option<bool>,
}

/// A reusable pipeline building block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomicStep {
    pub id: i64,
    pub name: String,
    pub step_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_from_backend_json() {
        let tool: CicdTool = serde_json::from_value(json!({
            "id": 3,
            "name": "jenkins-main",
            "tool_type": "jenkins",
            "base_url": "http://jenkins.local:8080",
            "status": "authenticated",
            "project": 1,
            "created_at": "2025-07-01T08:00:00Z",
            "extra_field": true
        }))
        .unwrap();

        assert_eq!(tool.tool_type, ToolType::Jenkins);
        assert_eq!(tool.status, ToolStatus::Authenticated);
        assert!(tool.description.is_none());
    }

    #[test]
    fn test_unknown_status_falls_back() {
        let status: ToolStatus = serde_json::from_value(json!("degraded")).unwrap();
        assert_eq!(status, ToolStatus::Unknown);
        assert_eq!(status.to_string(), "unknown");
    }

    #[test]
    fn test_tool_type_round_trips_wire_name() {
        assert_eq!(
            serde_json::to_value(ToolType::GitlabCi).unwrap(),
            json!("gitlab_ci")
        );
        assert_eq!("github_actions".parse::<ToolType>().unwrap(), ToolType::GithubActions);
        assert!("travis".parse::<ToolType>().is_err());
    }
}
