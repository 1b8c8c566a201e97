//! Docker DTOs

use serde::{Deserialize, Serialize};

use crate::domain::docker::RegistryType;
use crate::validation::{
    Validate, ValidationError, optional_http_url, require_http_url, require_image_name,
    require_json_object, require_name, require_non_empty,
};

/// Request to create a registry
#[derive(Clone, Serialize, Deserialize)]
pub struct CreateRegistry {
    pub name: String,
    pub url: String,
    pub registry_type: RegistryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl CreateRegistry {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        registry_type: RegistryType,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            registry_type,
            username: None,
            password: None,
            description: None,
            is_default: false,
        }
    }
}

impl std::fmt::Debug for CreateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateRegistry")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("registry_type", &self.registry_type)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Validate for CreateRegistry {
    fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)?;
        require_http_url("url", &self.url)?;
        if self.registry_type == RegistryType::Unknown {
            return Err(ValidationError::new("registry_type", "is required"));
        }
        if self.password.is_some() && self.username.as_deref().is_none_or(str::is_empty) {
            return Err(ValidationError::new(
                "username",
                "is required when a password is given",
            ));
        }
        Ok(())
    }
}

/// Request to update a registry
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct UpdateRegistry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_type: Option<RegistryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl std::fmt::Debug for UpdateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateRegistry")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("registry_type", &self.registry_type)
            .finish_non_exhaustive()
    }
}

impl Validate for UpdateRegistry {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_name("name", name)?;
        }
        optional_http_url("url", self.url.as_deref())
    }
}

/// Request to create an image definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateImage {
    pub name: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_args: Option<serde_json::Value>,
}

impl Validate for CreateImage {
    fn validate(&self) -> Result<(), ValidationError> {
        require_image_name("name", &self.name)?;
        require_non_empty("tag", &self.tag)?;
        if self.tag.contains(char::is_whitespace) || self.tag.contains(':') {
            return Err(ValidationError::new("tag", "must not contain spaces or ':'"));
        }
        require_json_object("build_args", self.build_args.as_ref())
    }
}

/// Request to update an image definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_args: Option<serde_json::Value>,
}

impl Validate for UpdateImage {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(tag) = &self.tag {
            require_non_empty("tag", tag)?;
        }
        require_json_object("build_args", self.build_args.as_ref())
    }
}

/// Body of `POST /docker/images/{id}/push/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<i64>,
}

/// Request to create a container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContainer {
    pub name: String,
    pub image: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_mappings: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_vars: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_limit: Option<String>,
}

impl Validate for CreateContainer {
    fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)?;
        if self.image <= 0 {
            return Err(ValidationError::new("image", "is required"));
        }
        require_json_object("environment_vars", self.environment_vars.as_ref())?;
        validate_restart_policy(self.restart_policy.as_deref())
    }
}

/// Request to update a container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContainer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_mappings: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_vars: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_limit: Option<String>,
}

impl Validate for UpdateContainer {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_name("name", name)?;
        }
        require_json_object("environment_vars", self.environment_vars.as_ref())?;
        validate_restart_policy(self.restart_policy.as_deref())
    }
}

/// Request to create a compose project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCompose {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub compose_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
}

impl Validate for CreateCompose {
    fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)?;
        require_non_empty("compose_content", &self.compose_content)?;
        if !self.compose_content.contains("services") {
            return Err(ValidationError::new(
                "compose_content",
                "must declare a 'services' section",
            ));
        }
        Ok(())
    }
}

/// Request to update a compose project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCompose {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compose_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
}

impl Validate for UpdateCompose {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_name("name", name)?;
        }
        if let Some(content) = &self.compose_content {
            require_non_empty("compose_content", content)?;
        }
        Ok(())
    }
}

/// Body of `POST /docker/compose/validate_compose/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateCompose {
    pub compose_content: String,
}

const RESTART_POLICIES: &[&str] = &["no", "always", "on-failure", "unless-stopped"];

fn validate_restart_policy(policy: Option<&str>) -> Result<(), ValidationError> {
    match policy {
        Some(p) if !RESTART_POLICIES.contains(&p) => Err(ValidationError::new(
            "restart_policy",
            format!("must be one of {}", RESTART_POLICIES.join(", ")),
        )),
        _ => Ok(()),
    }
}

fn default_tag() -> String {
    "latest".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_example_is_valid() {
        let req = CreateRegistry::new(
            "myrepo",
            "https://registry.example.com",
            RegistryType::Private,
        );
        assert!(req.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "name": "myrepo",
                "url": "https://registry.example.com",
                "registry_type": "private",
                "is_default": false
            })
        );
    }

    #[test]
    fn test_registry_rejects_bad_input() {
        let req = CreateRegistry::new(
            "my repo",
            "https://registry.example.com",
            RegistryType::Private,
        );
        assert_eq!(req.validate().unwrap_err().field, "name");

        let req = CreateRegistry::new("myrepo", "registry.example.com", RegistryType::Private);
        assert_eq!(req.validate().unwrap_err().field, "url");

        let mut req = CreateRegistry::new("myrepo", "https://r.example.com", RegistryType::Harbor);
        req.password = Some("pw".to_string());
        assert_eq!(req.validate().unwrap_err().field, "username");
    }

    #[test]
    fn test_container_restart_policy() {
        let mut req = CreateContainer {
            name: "api".to_string(),
            image: 1,
            command: None,
            port_mappings: None,
            environment_vars: None,
            volumes: None,
            restart_policy: Some("sometimes".to_string()),
            memory_limit: None,
            cpu_limit: None,
        };
        assert_eq!(req.validate().unwrap_err().field, "restart_policy");
        req.restart_policy = Some("unless-stopped".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_image_tag() {
        let req = CreateImage {
            name: "ansflow/api".to_string(),
            tag: "v1:2".to_string(),
            registry: None,
            description: None,
            dockerfile_content: None,
            build_context: None,
            build_args: None,
        };
        assert_eq!(req.validate().unwrap_err().field, "tag");
    }
}
