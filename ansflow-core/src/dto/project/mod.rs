//! Project DTOs

use serde::{Deserialize, Serialize};

use crate::domain::project::{MemberRole, Visibility};
use crate::validation::{
    Validate, ValidationError, optional_http_url, require_max_len, require_name,
};

/// Request to create a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

impl CreateProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            visibility: Visibility::Private,
            repository_url: None,
            default_branch: None,
        }
    }
}

impl Validate for CreateProject {
    fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)?;
        require_max_len("name", &self.name, 100)?;
        if self.visibility == Visibility::Unknown {
            return Err(ValidationError::new(
                "visibility",
                "must be private, internal or public",
            ));
        }
        optional_http_url("repository_url", self.repository_url.as_deref())
    }
}

/// Request to update a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

impl Validate for UpdateProject {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_name("name", name)?;
            require_max_len("name", name, 100)?;
        }
        if self.visibility == Some(Visibility::Unknown) {
            return Err(ValidationError::new(
                "visibility",
                "must be private, internal or public",
            ));
        }
        optional_http_url("repository_url", self.repository_url.as_deref())
    }
}

/// Body of `POST /projects/projects/{id}/add_member/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMember {
    pub user_id: i64,
    pub role: MemberRole,
}

impl Validate for AddMember {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id <= 0 {
            return Err(ValidationError::new("user_id", "is required"));
        }
        match self.role {
            MemberRole::Owner => Err(ValidationError::new(
                "role",
                "ownership is transferred, not granted",
            )),
            MemberRole::Unknown => Err(ValidationError::new("role", "is required")),
            _ => Ok(()),
        }
    }
}

fn default_visibility() -> Visibility {
    Visibility::Private
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_with_spaces_rejected() {
        let err = CreateProject::new("my project").validate().unwrap_err();
        assert_eq!(err.field, "name");
        assert!(CreateProject::new("my-project").validate().is_ok());
    }

    #[test]
    fn test_missing_visibility_is_private() {
        let req: CreateProject =
            serde_json::from_value(serde_json::json!({"name": "web"})).unwrap();
        assert_eq!(req.visibility, Visibility::Private);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_unknown_visibility_rejected() {
        let req = CreateProject {
            visibility: Visibility::Unknown,
            ..CreateProject::new("web")
        };
        assert_eq!(req.validate().unwrap_err().field, "visibility");
    }

    #[test]
    fn test_repository_url() {
        let mut req = CreateProject::new("web");
        req.repository_url = Some("git@github.com:org/web.git".to_string());
        assert_eq!(req.validate().unwrap_err().field, "repository_url");
    }

    #[test]
    fn test_add_member_role() {
        let req = AddMember {
            user_id: 4,
            role: MemberRole::Owner,
        };
        assert!(req.validate().is_err());
        let req = AddMember {
            user_id: 4,
            role: MemberRole::Developer,
        };
        assert!(req.validate().is_ok());
    }
}
