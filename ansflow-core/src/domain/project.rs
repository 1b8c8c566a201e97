//! Project domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Who can see a project
    pub enum Visibility {
        Private => "private",
        Internal => "internal",
        Public => "public",
    }
}

wire_enum! {
    /// Member role within a project
    pub enum MemberRole {
        Owner => "owner",
        Maintainer => "maintainer",
        Developer => "developer",
        Reporter => "reporter",
        Guest => "guest",
    }
}

wire_enum! {
    /// Deployment environment kind
    pub enum EnvironmentType {
        Development => "development",
        Testing => "testing",
        Staging => "staging",
        Production => "production",
    }
}

/// A project grouping pipelines, tools and environments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub owner: Option<i64>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub members_count: Option<u32>,
    #[serde(default)]
    pub pipelines_count: Option<u32>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A project member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: i64,
    pub user: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

/// A deployment environment of a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub id: i64,
    pub project: i64,
    pub name: String,
    #[serde(default)]
    pub environment_type: EnvironmentType,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}
