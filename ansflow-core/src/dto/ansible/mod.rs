//! Ansible DTOs

use serde::{Deserialize, Serialize};

use crate::domain::ansible::{ConnectionType, CredentialType, InventoryFormat, PlaybookCategory};
use crate::validation::{
    Validate, ValidationError, require_hostname, require_json_object, require_non_empty,
    require_port,
};

/// Request to create an inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInventory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub format_type: InventoryFormat,
    pub content: String,
}

impl Validate for CreateInventory {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("content", &self.content)?;
        if self.format_type == InventoryFormat::Unknown {
            return Err(ValidationError::new("format_type", "must be ini or yaml"));
        }
        Ok(())
    }
}

/// Request to update an inventory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInventory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_type: Option<InventoryFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Validate for UpdateInventory {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(content) = &self.content {
            require_non_empty("content", content)?;
        }
        Ok(())
    }
}

/// Request to create a playbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaybook {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub category: PlaybookCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl Validate for CreatePlaybook {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("content", &self.content)?;
        require_json_object("parameters", self.parameters.as_ref())
    }
}

/// Request to update a playbook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlaybook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PlaybookCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl Validate for UpdatePlaybook {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(content) = &self.content {
            require_non_empty("content", content)?;
        }
        require_json_object("parameters", self.parameters.as_ref())
    }
}

/// Request to create a credential; secrets are write-only
#[derive(Clone, Serialize, Deserialize)]
pub struct CreateCredential {
    pub name: String,
    pub credential_type: CredentialType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_password: Option<String>,
}

impl std::fmt::Debug for CreateCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateCredential")
            .field("name", &self.name)
            .field("credential_type", &self.credential_type)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Validate for CreateCredential {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        match self.credential_type {
            CredentialType::Password if !has(&self.password) => {
                Err(ValidationError::new("password", "is required for password credentials"))
            }
            CredentialType::SshKey if !has(&self.ssh_private_key) => Err(ValidationError::new(
                "ssh_private_key",
                "is required for ssh_key credentials",
            )),
            CredentialType::Vault if !has(&self.vault_password) => Err(ValidationError::new(
                "vault_password",
                "is required for vault credentials",
            )),
            CredentialType::Unknown => Err(ValidationError::new("credential_type", "is required")),
            _ => Ok(()),
        }
    }
}

/// Request to update a credential
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct UpdateCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_password: Option<String>,
}

impl std::fmt::Debug for UpdateCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateCredential")
            .field("name", &self.name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Validate for UpdateCredential {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        Ok(())
    }
}

/// Body of `POST /ansible/playbooks/{id}/execute/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutePlaybook {
    pub inventory_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<i64>,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

impl Validate for ExecutePlaybook {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.inventory_id <= 0 {
            return Err(ValidationError::new("inventory_id", "is required"));
        }
        require_json_object("parameters", Some(&self.parameters))
    }
}

/// Request to create a host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHost {
    pub hostname: String,
    pub ip_address: String,
    #[serde(default = "default_ssh_port")]
    pub port: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub connection_type: ConnectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub become_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<serde_json::Value>,
}

impl Validate for CreateHost {
    fn validate(&self) -> Result<(), ValidationError> {
        require_hostname("hostname", &self.hostname)?;
        require_hostname("ip_address", &self.ip_address)?;
        require_port("port", self.port)?;
        require_json_object("tags", self.tags.as_ref())
    }
}

/// Request to update a host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateHost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<ConnectionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub become_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<serde_json::Value>,
}

impl Validate for UpdateHost {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(hostname) = &self.hostname {
            require_hostname("hostname", hostname)?;
        }
        if let Some(ip) = &self.ip_address {
            require_hostname("ip_address", ip)?;
        }
        if let Some(port) = self.port {
            require_port("port", port)?;
        }
        require_json_object("tags", self.tags.as_ref())
    }
}

/// Request to create a host group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHostGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

impl Validate for CreateHostGroup {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_json_object("variables", self.variables.as_ref())
    }
}

/// Request to update a host group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateHostGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

impl Validate for UpdateHostGroup {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        require_json_object("variables", self.variables.as_ref())
    }
}

fn default_ssh_port() -> u32 {
    22
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_credential_needs_password() {
        let mut cred = CreateCredential {
            name: "deploy".to_string(),
            credential_type: CredentialType::Password,
            username: Some("root".to_string()),
            password: None,
            ssh_private_key: Some("-----BEGIN".to_string()),
            vault_password: None,
        };
        assert_eq!(cred.validate().unwrap_err().field, "password");

        cred.password = Some("s3cret".to_string());
        assert!(cred.validate().is_ok());
        assert!(!format!("{:?}", cred).contains("s3cret"));
    }

    #[test]
    fn test_host_validation() {
        let host = CreateHost {
            hostname: "web 01".to_string(),
            ip_address: "10.0.0.5".to_string(),
            port: 22,
            username: None,
            connection_type: ConnectionType::Ssh,
            become_method: None,
            tags: None,
        };
        assert_eq!(host.validate().unwrap_err().field, "hostname");
    }

    #[test]
    fn test_update_host_port_range() {
        let update = UpdateHost {
            port: Some(0),
            ..Default::default()
        };
        assert_eq!(update.validate().unwrap_err().field, "port");
    }

    #[test]
    fn test_inventory_requires_content() {
        let inv = CreateInventory {
            name: "prod".to_string(),
            description: None,
            format_type: InventoryFormat::Ini,
            content: "".to_string(),
        };
        assert_eq!(inv.validate().unwrap_err().field, "content");
    }
}
