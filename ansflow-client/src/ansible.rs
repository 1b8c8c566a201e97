//! Ansible endpoints

use ansflow_core::Validate;
use ansflow_core::domain::ansible::{
    AnsibleCredential, AnsibleExecution, AnsibleExecutionLogs, AnsibleHost, AnsibleHostGroup,
    AnsibleInventory, AnsiblePlaybook, AnsibleStats, HostCheckResult, ValidationReport,
};
use ansflow_core::dto::ansible::{
    CreateCredential, CreateHost, CreateHostGroup, CreateInventory, CreatePlaybook,
    ExecutePlaybook, UpdateCredential, UpdateHost, UpdateHostGroup, UpdateInventory,
    UpdatePlaybook,
};
use ansflow_core::dto::{ActionResult, HostIds};

use crate::AnsflowClient;
use crate::error::Result;

pub(crate) const INVENTORIES: &str = "/ansible/inventories/";
pub(crate) const PLAYBOOKS: &str = "/ansible/playbooks/";
pub(crate) const CREDENTIALS: &str = "/ansible/credentials/";
pub(crate) const EXECUTIONS: &str = "/ansible/executions/";
pub(crate) const HOSTS: &str = "/ansible/hosts/";
pub(crate) const HOST_GROUPS: &str = "/ansible/host-groups/";

impl AnsflowClient {
    // =============================================================================
    // Inventories
    // =============================================================================

    /// List all inventories
    pub async fn get_ansible_inventories(&self) -> Result<Vec<AnsibleInventory>> {
        self.list(INVENTORIES).await
    }

    /// Get an inventory by ID
    pub async fn get_ansible_inventory(&self, id: i64) -> Result<AnsibleInventory> {
        self.get(&format!("{}{}/", INVENTORIES, id)).await
    }

    /// Create an inventory
    pub async fn create_ansible_inventory(
        &self,
        req: &CreateInventory,
    ) -> Result<AnsibleInventory> {
        req.validate()?;
        self.post(INVENTORIES, req).await
    }

    /// Update an inventory
    pub async fn update_ansible_inventory(
        &self,
        id: i64,
        req: &UpdateInventory,
    ) -> Result<AnsibleInventory> {
        req.validate()?;
        self.patch(&format!("{}{}/", INVENTORIES, id), req).await
    }

    /// Delete an inventory
    pub async fn delete_ansible_inventory(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", INVENTORIES, id)).await
    }

    /// Ask the backend to parse and check an inventory
    pub async fn validate_ansible_inventory(&self, id: i64) -> Result<ValidationReport> {
        self.post(
            &format!("{}{}/validate_inventory/", INVENTORIES, id),
            &serde_json::json!({}),
        )
        .await
    }

    /// List the hosts attached to an inventory
    pub async fn get_inventory_hosts(&self, id: i64) -> Result<Vec<AnsibleHost>> {
        self.list(&format!("{}{}/hosts/", INVENTORIES, id)).await
    }

    /// Attach hosts to an inventory
    pub async fn add_hosts_to_inventory(
        &self,
        id: i64,
        host_ids: Vec<i64>,
    ) -> Result<ActionResult> {
        let body = HostIds { host_ids };
        body.validate()?;
        self.post_action_with(&format!("{}{}/add_hosts/", INVENTORIES, id), &body)
            .await
    }

    /// Detach hosts from an inventory
    pub async fn remove_hosts_from_inventory(
        &self,
        id: i64,
        host_ids: Vec<i64>,
    ) -> Result<ActionResult> {
        let body = HostIds { host_ids };
        body.validate()?;
        self.post_action_with(&format!("{}{}/remove_hosts/", INVENTORIES, id), &body)
            .await
    }

    // =============================================================================
    // Playbooks
    // =============================================================================

    /// List all playbooks
    pub async fn get_ansible_playbooks(&self) -> Result<Vec<AnsiblePlaybook>> {
        self.list(PLAYBOOKS).await
    }

    /// Get a playbook by ID
    pub async fn get_ansible_playbook(&self, id: i64) -> Result<AnsiblePlaybook> {
        self.get(&format!("{}{}/", PLAYBOOKS, id)).await
    }

    /// Create a playbook
    pub async fn create_ansible_playbook(&self, req: &CreatePlaybook) -> Result<AnsiblePlaybook> {
        req.validate()?;
        self.post(PLAYBOOKS, req).await
    }

    /// Update a playbook
    pub async fn update_ansible_playbook(
        &self,
        id: i64,
        req: &UpdatePlaybook,
    ) -> Result<AnsiblePlaybook> {
        req.validate()?;
        self.patch(&format!("{}{}/", PLAYBOOKS, id), req).await
    }

    /// Delete a playbook
    pub async fn delete_ansible_playbook(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", PLAYBOOKS, id)).await
    }

    /// Ask the backend to syntax-check a playbook
    pub async fn validate_ansible_playbook(&self, id: i64) -> Result<ValidationReport> {
        self.post(
            &format!("{}{}/validate_playbook/", PLAYBOOKS, id),
            &serde_json::json!({}),
        )
        .await
    }

    /// Run a playbook against an inventory
    pub async fn execute_ansible_playbook(
        &self,
        id: i64,
        req: &ExecutePlaybook,
    ) -> Result<AnsibleExecution> {
        req.validate()?;
        self.post(&format!("{}{}/execute/", PLAYBOOKS, id), req).await
    }

    // =============================================================================
    // Credentials
    // =============================================================================

    /// List all credentials
    pub async fn get_ansible_credentials(&self) -> Result<Vec<AnsibleCredential>> {
        self.list(CREDENTIALS).await
    }

    /// Get a credential by ID
    pub async fn get_ansible_credential(&self, id: i64) -> Result<AnsibleCredential> {
        self.get(&format!("{}{}/", CREDENTIALS, id)).await
    }

    /// Create a credential
    pub async fn create_ansible_credential(
        &self,
        req: &CreateCredential,
    ) -> Result<AnsibleCredential> {
        req.validate()?;
        self.post(CREDENTIALS, req).await
    }

    /// Update a credential
    pub async fn update_ansible_credential(
        &self,
        id: i64,
        req: &UpdateCredential,
    ) -> Result<AnsibleCredential> {
        req.validate()?;
        self.patch(&format!("{}{}/", CREDENTIALS, id), req).await
    }

    /// Delete a credential
    pub async fn delete_ansible_credential(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", CREDENTIALS, id)).await
    }

    // =============================================================================
    // Executions
    // =============================================================================

    /// List playbook executions
    pub async fn get_ansible_executions(&self) -> Result<Vec<AnsibleExecution>> {
        self.list(EXECUTIONS).await
    }

    /// Get a playbook execution by ID
    pub async fn get_ansible_execution(&self, id: i64) -> Result<AnsibleExecution> {
        self.get(&format!("{}{}/", EXECUTIONS, id)).await
    }

    /// Cancel a running playbook execution
    pub async fn cancel_ansible_execution(&self, id: i64) -> Result<ActionResult> {
        self.post_action(&format!("{}{}/cancel/", EXECUTIONS, id))
            .await
    }

    /// Get stdout/stderr of a playbook execution
    pub async fn get_ansible_execution_logs(&self, id: i64) -> Result<AnsibleExecutionLogs> {
        self.get(&format!("{}{}/logs/", EXECUTIONS, id)).await
    }

    // =============================================================================
    // Hosts
    // =============================================================================

    /// List all hosts
    pub async fn get_ansible_hosts(&self) -> Result<Vec<AnsibleHost>> {
        self.list(HOSTS).await
    }

    /// Get a host by ID
    pub async fn get_ansible_host(&self, id: i64) -> Result<AnsibleHost> {
        self.get(&format!("{}{}/", HOSTS, id)).await
    }

    /// Create a host
    pub async fn create_ansible_host(&self, req: &CreateHost) -> Result<AnsibleHost> {
        req.validate()?;
        self.post(HOSTS, req).await
    }

    /// Update a host
    pub async fn update_ansible_host(&self, id: i64, req: &UpdateHost) -> Result<AnsibleHost> {
        req.validate()?;
        self.patch(&format!("{}{}/", HOSTS, id), req).await
    }

    /// Delete a host
    pub async fn delete_ansible_host(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", HOSTS, id)).await
    }

    /// Ask the backend to test connectivity to a host
    pub async fn check_host_connectivity(&self, id: i64) -> Result<HostCheckResult> {
        self.post(
            &format!("{}{}/check_connectivity/", HOSTS, id),
            &serde_json::json!({}),
        )
        .await
    }

    /// Ask the backend to gather Ansible facts from a host
    pub async fn gather_host_facts(&self, id: i64) -> Result<HostCheckResult> {
        self.post(
            &format!("{}{}/gather_facts/", HOSTS, id),
            &serde_json::json!({}),
        )
        .await
    }

    // =============================================================================
    // Host Groups
    // =============================================================================

    /// List all host groups
    pub async fn get_ansible_host_groups(&self) -> Result<Vec<AnsibleHostGroup>> {
        self.list(HOST_GROUPS).await
    }

    /// Get a host group by ID
    pub async fn get_ansible_host_group(&self, id: i64) -> Result<AnsibleHostGroup> {
        self.get(&format!("{}{}/", HOST_GROUPS, id)).await
    }

    /// Create a host group
    pub async fn create_ansible_host_group(
        &self,
        req: &CreateHostGroup,
    ) -> Result<AnsibleHostGroup> {
        req.validate()?;
        self.post(HOST_GROUPS, req).await
    }

    /// Update a host group
    pub async fn update_ansible_host_group(
        &self,
        id: i64,
        req: &UpdateHostGroup,
    ) -> Result<AnsibleHostGroup> {
        req.validate()?;
        self.patch(&format!("{}{}/", HOST_GROUPS, id), req).await
    }

    /// Delete a host group
    pub async fn delete_ansible_host_group(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}{}/", HOST_GROUPS, id)).await
    }

    /// Add hosts to a group
    pub async fn add_hosts_to_group(&self, id: i64, host_ids: Vec<i64>) -> Result<ActionResult> {
        let body = HostIds { host_ids };
        body.validate()?;
        self.post_action_with(&format!("{}{}/add_hosts/", HOST_GROUPS, id), &body)
            .await
    }

    /// Remove hosts from a group
    pub async fn remove_hosts_from_group(
        &self,
        id: i64,
        host_ids: Vec<i64>,
    ) -> Result<ActionResult> {
        let body = HostIds { host_ids };
        body.validate()?;
        self.post_action_with(&format!("{}{}/remove_hosts/", HOST_GROUPS, id), &body)
            .await
    }

    // =============================================================================
    // Statistics
    // =============================================================================

    /// Get the Ansible overview statistics
    pub async fn get_ansible_stats(&self) -> Result<AnsibleStats> {
        self.get("/ansible/stats/overview/").await
    }
}
