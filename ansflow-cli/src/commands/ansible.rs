//! Ansible command handlers
//!
//! Inventories, playbooks, credentials, hosts, host groups, playbook
//! executions and the Ansible overview.

use ansflow_client::{AnsflowClient, ResourceTable};
use ansflow_core::domain::ansible::{
    AnsibleCredential, AnsibleExecution, AnsibleHost, AnsibleHostGroup, AnsibleInventory,
    AnsiblePlaybook, ConnectionType, CredentialType, HostCheckResult, InventoryFormat,
    PlaybookCategory, ValidationReport,
};
use ansflow_core::dto::ansible::{
    CreateCredential, CreateHost, CreateHostGroup, CreateInventory, CreatePlaybook,
    ExecutePlaybook, UpdateCredential, UpdateHost, UpdateHostGroup, UpdateInventory,
    UpdatePlaybook,
};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde_json::Value as JsonValue;

use super::{delete_resource, print_rows};
use crate::id_resolver::{resolve_id, resolve_ids};
use crate::output::{
    colorize_status, confirm, fmt_opt_time, fmt_time, params_to_json, parse_json, parse_key_val,
    print_action, print_empty, print_success, read_text_arg,
};

/// Ansible subcommands
#[derive(Subcommand)]
pub enum AnsibleCommands {
    /// Inventory management
    Inventory {
        #[command(subcommand)]
        command: InventoryCommands,
    },
    /// Playbook management
    Playbook {
        #[command(subcommand)]
        command: PlaybookCommands,
    },
    /// Credential management
    Credential {
        #[command(subcommand)]
        command: CredentialCommands,
    },
    /// Host management
    Host {
        #[command(subcommand)]
        command: HostCommands,
    },
    /// Host group management
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },
    /// Playbook execution monitoring
    Execution {
        #[command(subcommand)]
        command: ExecutionCommands,
    },
    /// Show the Ansible overview
    Stats,
}

#[derive(Subcommand)]
pub enum InventoryCommands {
    /// List inventories
    List,
    /// Show an inventory and its content
    Get { id: String },
    /// Create an inventory
    Create {
        #[arg(short, long)]
        name: String,

        /// Inventory content, or @file
        #[arg(short, long)]
        content: String,

        /// ini or yaml
        #[arg(short, long, default_value = "ini")]
        format: InventoryFormat,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update an inventory
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        /// Inventory content, or @file
        #[arg(short, long)]
        content: Option<String>,

        #[arg(short, long)]
        format: Option<InventoryFormat>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete an inventory
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Check that an inventory parses
    Validate { id: String },
    /// List the hosts of an inventory
    Hosts { id: String },
    /// Attach hosts (IDs or hostnames) to an inventory
    AddHosts {
        id: String,

        #[arg(required = true)]
        hosts: Vec<String>,
    },
    /// Detach hosts (IDs or hostnames) from an inventory
    RemoveHosts {
        id: String,

        #[arg(required = true)]
        hosts: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum PlaybookCommands {
    /// List playbooks
    List,
    /// Show a playbook and its content
    Get { id: String },
    /// Create a playbook
    Create {
        #[arg(short, long)]
        name: String,

        /// Playbook YAML, or @file
        #[arg(short, long)]
        content: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        version: Option<String>,

        /// deployment, configuration, monitoring, security, maintenance or other
        #[arg(long, default_value = "other")]
        category: PlaybookCategory,

        /// Mark the playbook as a reusable template
        #[arg(long)]
        template: bool,

        /// Default parameters as a JSON object
        #[arg(long, value_parser = parse_json)]
        parameters: Option<JsonValue>,
    },
    /// Update a playbook
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        /// Playbook YAML, or @file
        #[arg(short, long)]
        content: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        version: Option<String>,

        #[arg(long)]
        category: Option<PlaybookCategory>,

        #[arg(long)]
        template: Option<bool>,

        #[arg(long, value_parser = parse_json)]
        parameters: Option<JsonValue>,
    },
    /// Delete a playbook
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Syntax-check a playbook
    Validate { id: String },
    /// Run a playbook against an inventory
    Run {
        id: String,

        /// Inventory ID or name
        #[arg(short, long)]
        inventory: String,

        /// Credential ID or name
        #[arg(short, long)]
        credential: Option<String>,

        /// Extra variables as key=value pairs
        #[arg(short, long, value_parser = parse_key_val)]
        param: Vec<(String, String)>,
    },
}

#[derive(Subcommand)]
pub enum CredentialCommands {
    /// List credentials
    List,
    /// Create a credential
    Create {
        #[arg(short, long)]
        name: String,

        /// ssh_key, password or vault
        #[arg(short = 't', long)]
        credential_type: CredentialType,

        #[arg(short, long)]
        username: Option<String>,

        #[arg(long, env = "ANSFLOW_CREDENTIAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Private key, or @file
        #[arg(long)]
        ssh_key: Option<String>,

        #[arg(long, env = "ANSFLOW_VAULT_PASSWORD", hide_env_values = true)]
        vault_password: Option<String>,
    },
    /// Update a credential
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        username: Option<String>,

        #[arg(long)]
        password: Option<String>,

        /// Private key, or @file
        #[arg(long)]
        ssh_key: Option<String>,

        #[arg(long)]
        vault_password: Option<String>,
    },
    /// Delete a credential
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum HostCommands {
    /// List hosts
    List,
    /// Show host details and gathered facts
    Get { id: String },
    /// Create a host
    Create {
        #[arg(short = 'H', long)]
        hostname: String,

        #[arg(short, long)]
        ip: String,

        #[arg(short, long, default_value = "22")]
        port: u32,

        #[arg(short, long)]
        username: Option<String>,

        /// ssh, winrm or local
        #[arg(short, long, default_value = "ssh")]
        connection: ConnectionType,

        #[arg(long)]
        become_method: Option<String>,

        /// Tags as a JSON object
        #[arg(long, value_parser = parse_json)]
        tags: Option<JsonValue>,
    },
    /// Update a host
    Update {
        id: String,

        #[arg(short = 'H', long)]
        hostname: Option<String>,

        #[arg(short, long)]
        ip: Option<String>,

        #[arg(short, long)]
        port: Option<u32>,

        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        connection: Option<ConnectionType>,

        #[arg(long)]
        become_method: Option<String>,

        #[arg(long, value_parser = parse_json)]
        tags: Option<JsonValue>,
    },
    /// Delete a host
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Test connectivity to a host
    Check { id: String },
    /// Gather Ansible facts from a host
    Facts { id: String },
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// List host groups
    List,
    /// Create a host group
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Parent group ID or name
        #[arg(long)]
        parent: Option<String>,

        /// Group variables as a JSON object
        #[arg(long, value_parser = parse_json)]
        variables: Option<JsonValue>,
    },
    /// Update a host group
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        parent: Option<String>,

        #[arg(long, value_parser = parse_json)]
        variables: Option<JsonValue>,
    },
    /// Delete a host group
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Add hosts (IDs or hostnames) to a group
    AddHosts {
        id: String,

        #[arg(required = true)]
        hosts: Vec<String>,
    },
    /// Remove hosts (IDs or hostnames) from a group
    RemoveHosts {
        id: String,

        #[arg(required = true)]
        hosts: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ExecutionCommands {
    /// List playbook executions
    List,
    /// Show a playbook execution
    Get { id: i64 },
    /// Cancel a running playbook execution
    Cancel {
        id: i64,

        #[arg(short, long)]
        yes: bool,
    },
    /// Show stdout and stderr of a playbook execution
    Logs { id: i64 },
}

/// Handle ansible commands
pub async fn handle_ansible_command(
    command: AnsibleCommands,
    client: &AnsflowClient,
) -> Result<()> {
    match command {
        AnsibleCommands::Inventory { command } => handle_inventory(command, client).await,
        AnsibleCommands::Playbook { command } => handle_playbook(command, client).await,
        AnsibleCommands::Credential { command } => handle_credential(command, client).await,
        AnsibleCommands::Host { command } => handle_host(command, client).await,
        AnsibleCommands::Group { command } => handle_group(command, client).await,
        AnsibleCommands::Execution { command } => handle_execution(command, client).await,
        AnsibleCommands::Stats => {
            let stats = client
                .get_ansible_stats()
                .await
                .context("Failed to fetch Ansible statistics")?;

            println!("{}", "Ansible Overview:".bold());
            println!("  Inventories:  {}", stats.total_inventories);
            println!("  Playbooks:    {}", stats.total_playbooks);
            println!("  Credentials:  {}", stats.total_credentials);
            println!("  Executions:   {}", stats.total_executions);
            println!(
                "    successful: {}  failed: {}  running: {}",
                stats.successful_executions.to_string().green(),
                stats.failed_executions.to_string().red(),
                stats.running_executions.to_string().cyan()
            );
            println!("  Success rate: {:.1}%", stats.success_rate);
            Ok(())
        }
    }
}

async fn handle_inventory(command: InventoryCommands, client: &AnsflowClient) -> Result<()> {
    let mut inventories: ResourceTable<AnsibleInventory> = ResourceTable::new(client.clone());

    match command {
        InventoryCommands::List => {
            inventories
                .load()
                .await
                .context("Failed to fetch inventories")?;
            print_inventories(inventories.rows());
        }
        InventoryCommands::Get { id } => {
            let id = resolve_id::<AnsibleInventory>(client, &id).await?;
            let inventory = client
                .get_ansible_inventory(id)
                .await
                .context("Failed to fetch inventory")?;

            println!("{}", "Inventory Details:".bold());
            println!("  ID:        {}", inventory.id.to_string().cyan());
            println!("  Name:      {}", inventory.name.bold());
            println!("  Format:    {}", inventory.format_type);
            if let Some(desc) = &inventory.description {
                println!("  Description: {}", desc);
            }
            println!("  Validated: {}", yes_no(inventory.is_validated));
            println!("  Created:   {}", fmt_time(&inventory.created_at));
            print_block("Content", &inventory.content);
        }
        InventoryCommands::Create {
            name,
            content,
            format,
            description,
        } => {
            let req = CreateInventory {
                name,
                description,
                format_type: format,
                content: read_text_arg(&content)?,
            };
            let inventory = inventories
                .create(&req)
                .await
                .context("Failed to create inventory")?;
            print_success(&format!("Inventory {} created (id {})", inventory.name, inventory.id));
            println!();
            print_inventories(inventories.rows());
        }
        InventoryCommands::Update {
            id,
            name,
            content,
            format,
            description,
        } => {
            let id = resolve_id::<AnsibleInventory>(client, &id).await?;
            let req = UpdateInventory {
                name,
                description,
                format_type: format,
                content: content.as_deref().map(read_text_arg).transpose()?,
            };
            inventories
                .update(id, &req)
                .await
                .context("Failed to update inventory")?;
            print_success(&format!("Inventory {} updated", id));
            println!();
            print_inventories(inventories.rows());
        }
        InventoryCommands::Delete { id, yes } => {
            delete_resource::<AnsibleInventory>(client, &id, yes).await?;
        }
        InventoryCommands::Validate { id } => {
            let id = resolve_id::<AnsibleInventory>(client, &id).await?;
            let report = client
                .validate_ansible_inventory(id)
                .await
                .context("Failed to validate inventory")?;
            print_validation(&report);
        }
        InventoryCommands::Hosts { id } => {
            let id = resolve_id::<AnsibleInventory>(client, &id).await?;
            let hosts = client
                .get_inventory_hosts(id)
                .await
                .context("Failed to fetch inventory hosts")?;
            print_hosts(&hosts);
        }
        InventoryCommands::AddHosts { id, hosts } => {
            let id = resolve_id::<AnsibleInventory>(client, &id).await?;
            let host_ids = resolve_ids::<AnsibleHost>(client, &hosts).await?;
            let result = client
                .add_hosts_to_inventory(id, host_ids)
                .await
                .context("Failed to add hosts to inventory")?;
            print_action("Adding hosts", &result);
        }
        InventoryCommands::RemoveHosts { id, hosts } => {
            let id = resolve_id::<AnsibleInventory>(client, &id).await?;
            let host_ids = resolve_ids::<AnsibleHost>(client, &hosts).await?;
            let result = client
                .remove_hosts_from_inventory(id, host_ids)
                .await
                .context("Failed to remove hosts from inventory")?;
            print_action("Removing hosts", &result);
        }
    }

    Ok(())
}

async fn handle_playbook(command: PlaybookCommands, client: &AnsflowClient) -> Result<()> {
    let mut playbooks: ResourceTable<AnsiblePlaybook> = ResourceTable::new(client.clone());

    match command {
        PlaybookCommands::List => {
            playbooks.load().await.context("Failed to fetch playbooks")?;
            print_playbooks(playbooks.rows());
        }
        PlaybookCommands::Get { id } => {
            let id = resolve_id::<AnsiblePlaybook>(client, &id).await?;
            let playbook = client
                .get_ansible_playbook(id)
                .await
                .context("Failed to fetch playbook")?;

            println!("{}", "Playbook Details:".bold());
            println!("  ID:       {}", playbook.id.to_string().cyan());
            println!("  Name:     {}", playbook.name.bold());
            println!("  Category: {}", playbook.category);
            if let Some(version) = &playbook.version {
                println!("  Version:  {}", version);
            }
            println!("  Template: {}", yes_no(playbook.is_template));
            println!("  Created:  {}", fmt_time(&playbook.created_at));
            print_block("Content", &playbook.content);
        }
        PlaybookCommands::Create {
            name,
            content,
            description,
            version,
            category,
            template,
            parameters,
        } => {
            let req = CreatePlaybook {
                name,
                description,
                content: read_text_arg(&content)?,
                version,
                is_template: template,
                category,
                parameters,
            };
            let playbook = playbooks
                .create(&req)
                .await
                .context("Failed to create playbook")?;
            print_success(&format!("Playbook {} created (id {})", playbook.name, playbook.id));
            println!();
            print_playbooks(playbooks.rows());
        }
        PlaybookCommands::Update {
            id,
            name,
            content,
            description,
            version,
            category,
            template,
            parameters,
        } => {
            let id = resolve_id::<AnsiblePlaybook>(client, &id).await?;
            let req = UpdatePlaybook {
                name,
                description,
                content: content.as_deref().map(read_text_arg).transpose()?,
                version,
                is_template: template,
                category,
                parameters,
            };
            playbooks
                .update(id, &req)
                .await
                .context("Failed to update playbook")?;
            print_success(&format!("Playbook {} updated", id));
            println!();
            print_playbooks(playbooks.rows());
        }
        PlaybookCommands::Delete { id, yes } => {
            delete_resource::<AnsiblePlaybook>(client, &id, yes).await?;
        }
        PlaybookCommands::Validate { id } => {
            let id = resolve_id::<AnsiblePlaybook>(client, &id).await?;
            let report = client
                .validate_ansible_playbook(id)
                .await
                .context("Failed to validate playbook")?;
            print_validation(&report);
        }
        PlaybookCommands::Run {
            id,
            inventory,
            credential,
            param,
        } => {
            let id = resolve_id::<AnsiblePlaybook>(client, &id).await?;
            let inventory_id = resolve_id::<AnsibleInventory>(client, &inventory).await?;
            let credential_id = match credential {
                Some(c) => Some(resolve_id::<AnsibleCredential>(client, &c).await?),
                None => None,
            };
            let req = ExecutePlaybook {
                inventory_id,
                credential_id,
                parameters: params_to_json(param),
            };
            let execution = client
                .execute_ansible_playbook(id, &req)
                .await
                .context("Failed to run playbook")?;
            print_success("Playbook execution started");
            print_ansible_execution(&execution);
        }
    }

    Ok(())
}

async fn handle_credential(command: CredentialCommands, client: &AnsflowClient) -> Result<()> {
    let mut credentials: ResourceTable<AnsibleCredential> = ResourceTable::new(client.clone());

    match command {
        CredentialCommands::List => {
            credentials
                .load()
                .await
                .context("Failed to fetch credentials")?;
            print_credentials(credentials.rows());
        }
        CredentialCommands::Create {
            name,
            credential_type,
            username,
            password,
            ssh_key,
            vault_password,
        } => {
            let req = CreateCredential {
                name,
                credential_type,
                username,
                password,
                ssh_private_key: ssh_key.as_deref().map(read_text_arg).transpose()?,
                vault_password,
            };
            let credential = credentials
                .create(&req)
                .await
                .context("Failed to create credential")?;
            print_success(&format!(
                "Credential {} created (id {})",
                credential.name, credential.id
            ));
            println!();
            print_credentials(credentials.rows());
        }
        CredentialCommands::Update {
            id,
            name,
            username,
            password,
            ssh_key,
            vault_password,
        } => {
            let id = resolve_id::<AnsibleCredential>(client, &id).await?;
            let req = UpdateCredential {
                name,
                username,
                password,
                ssh_private_key: ssh_key.as_deref().map(read_text_arg).transpose()?,
                vault_password,
            };
            credentials
                .update(id, &req)
                .await
                .context("Failed to update credential")?;
            print_success(&format!("Credential {} updated", id));
            println!();
            print_credentials(credentials.rows());
        }
        CredentialCommands::Delete { id, yes } => {
            delete_resource::<AnsibleCredential>(client, &id, yes).await?;
        }
    }

    Ok(())
}

async fn handle_host(command: HostCommands, client: &AnsflowClient) -> Result<()> {
    let mut hosts: ResourceTable<AnsibleHost> = ResourceTable::new(client.clone());

    match command {
        HostCommands::List => {
            hosts.load().await.context("Failed to fetch hosts")?;
            print_hosts(hosts.rows());
        }
        HostCommands::Get { id } => {
            let id = resolve_id::<AnsibleHost>(client, &id).await?;
            let host = client
                .get_ansible_host(id)
                .await
                .context("Failed to fetch host")?;

            println!("{}", "Host Details:".bold());
            println!("  ID:         {}", host.id.to_string().cyan());
            println!("  Hostname:   {}", host.hostname.bold());
            println!("  Address:    {}:{}", host.ip_address, host.port);
            println!("  Connection: {}", host.connection_type);
            if let Some(user) = &host.username {
                println!("  User:       {}", user);
            }
            println!("  Status:     {}", colorize_status(host.status.as_str()));
            println!("  Last check: {}", fmt_opt_time(host.last_check.as_ref()));
            if let Some(message) = &host.check_message {
                println!("  Message:    {}", message.dimmed());
            }
            let os: Vec<&str> = [
                host.os_family.as_deref(),
                host.os_distribution.as_deref(),
                host.os_version.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect();
            if !os.is_empty() {
                println!("  OS:         {}", os.join(" "));
            }
        }
        HostCommands::Create {
            hostname,
            ip,
            port,
            username,
            connection,
            become_method,
            tags,
        } => {
            let req = CreateHost {
                hostname,
                ip_address: ip,
                port,
                username,
                connection_type: connection,
                become_method,
                tags,
            };
            let host = hosts.create(&req).await.context("Failed to create host")?;
            print_success(&format!("Host {} created (id {})", host.hostname, host.id));
            println!();
            print_hosts(hosts.rows());
        }
        HostCommands::Update {
            id,
            hostname,
            ip,
            port,
            username,
            connection,
            become_method,
            tags,
        } => {
            let id = resolve_id::<AnsibleHost>(client, &id).await?;
            let req = UpdateHost {
                hostname,
                ip_address: ip,
                port,
                username,
                connection_type: connection,
                become_method,
                tags,
            };
            hosts
                .update(id, &req)
                .await
                .context("Failed to update host")?;
            print_success(&format!("Host {} updated", id));
            println!();
            print_hosts(hosts.rows());
        }
        HostCommands::Delete { id, yes } => {
            delete_resource::<AnsibleHost>(client, &id, yes).await?;
        }
        HostCommands::Check { id } => {
            let id = resolve_id::<AnsibleHost>(client, &id).await?;
            let result = client
                .check_host_connectivity(id)
                .await
                .context("Connectivity check failed")?;
            print_host_check("Connectivity", &result);
        }
        HostCommands::Facts { id } => {
            let id = resolve_id::<AnsibleHost>(client, &id).await?;
            let result = client
                .gather_host_facts(id)
                .await
                .context("Failed to gather facts")?;
            print_host_check("Fact gathering", &result);
            if !result.facts.is_null() {
                let facts = serde_json::to_string_pretty(&result.facts)
                    .context("Failed to render facts")?;
                print_block("Facts", &facts);
            }
        }
    }

    Ok(())
}

async fn handle_group(command: GroupCommands, client: &AnsflowClient) -> Result<()> {
    let mut groups: ResourceTable<AnsibleHostGroup> = ResourceTable::new(client.clone());

    match command {
        GroupCommands::List => {
            groups.load().await.context("Failed to fetch host groups")?;
            print_groups(groups.rows());
        }
        GroupCommands::Create {
            name,
            description,
            parent,
            variables,
        } => {
            let parent = match parent {
                Some(p) => Some(resolve_id::<AnsibleHostGroup>(client, &p).await?),
                None => None,
            };
            let req = CreateHostGroup {
                name,
                description,
                parent,
                variables,
            };
            let group = groups
                .create(&req)
                .await
                .context("Failed to create host group")?;
            print_success(&format!("Host group {} created (id {})", group.name, group.id));
            println!();
            print_groups(groups.rows());
        }
        GroupCommands::Update {
            id,
            name,
            description,
            parent,
            variables,
        } => {
            let id = resolve_id::<AnsibleHostGroup>(client, &id).await?;
            let parent = match parent {
                Some(p) => Some(resolve_id::<AnsibleHostGroup>(client, &p).await?),
                None => None,
            };
            let req = UpdateHostGroup {
                name,
                description,
                parent,
                variables,
            };
            groups
                .update(id, &req)
                .await
                .context("Failed to update host group")?;
            print_success(&format!("Host group {} updated", id));
            println!();
            print_groups(groups.rows());
        }
        GroupCommands::Delete { id, yes } => {
            delete_resource::<AnsibleHostGroup>(client, &id, yes).await?;
        }
        GroupCommands::AddHosts { id, hosts } => {
            let id = resolve_id::<AnsibleHostGroup>(client, &id).await?;
            let host_ids = resolve_ids::<AnsibleHost>(client, &hosts).await?;
            let result = client
                .add_hosts_to_group(id, host_ids)
                .await
                .context("Failed to add hosts to group")?;
            print_action("Adding hosts", &result);
        }
        GroupCommands::RemoveHosts { id, hosts } => {
            let id = resolve_id::<AnsibleHostGroup>(client, &id).await?;
            let host_ids = resolve_ids::<AnsibleHost>(client, &hosts).await?;
            let result = client
                .remove_hosts_from_group(id, host_ids)
                .await
                .context("Failed to remove hosts from group")?;
            print_action("Removing hosts", &result);
        }
    }

    Ok(())
}

async fn handle_execution(command: ExecutionCommands, client: &AnsflowClient) -> Result<()> {
    match command {
        ExecutionCommands::List => {
            let executions = client
                .get_ansible_executions()
                .await
                .context("Failed to fetch playbook executions")?;
            if executions.is_empty() {
                print_empty("playbook execution");
            }
            for execution in &executions {
                print_ansible_execution(execution);
            }
        }
        ExecutionCommands::Get { id } => {
            let execution = client
                .get_ansible_execution(id)
                .await
                .context("Failed to fetch playbook execution")?;
            print_ansible_execution(&execution);
            println!("  Started:   {}", fmt_opt_time(execution.started_at.as_ref()));
            println!("  Completed: {}", fmt_opt_time(execution.completed_at.as_ref()));
            if let Some(code) = execution.return_code {
                println!("  Exit code: {}", code);
            }
        }
        ExecutionCommands::Cancel { id, yes } => {
            if !confirm(&format!("Cancel playbook execution {}?", id), yes)? {
                return Ok(());
            }
            let result = client
                .cancel_ansible_execution(id)
                .await
                .context("Failed to cancel playbook execution")?;
            print_action("Cancellation", &result);
        }
        ExecutionCommands::Logs { id } => {
            let logs = client
                .get_ansible_execution_logs(id)
                .await
                .context("Failed to fetch playbook execution logs")?;
            println!("Status: {}", colorize_status(logs.status.as_str()));
            if !logs.stdout.is_empty() {
                print_block("stdout", &logs.stdout);
            }
            if !logs.stderr.is_empty() {
                print_block("stderr", &logs.stderr);
            }
        }
    }

    Ok(())
}

fn print_inventories(inventories: &[AnsibleInventory]) {
    print_rows(inventories, |i| {
        let validated = if i.is_validated { "validated" } else { "unvalidated" };
        format!("[{}] {}", i.format_type, validated).dimmed().to_string()
    });
}

fn print_playbooks(playbooks: &[AnsiblePlaybook]) {
    print_rows(playbooks, |p| {
        let version = p.version.as_deref().unwrap_or("-");
        format!("[{}] v{}", p.category, version).dimmed().to_string()
    });
}

fn print_credentials(credentials: &[AnsibleCredential]) {
    print_rows(credentials, |c| {
        format!("[{}] {}", c.credential_type, c.username.as_deref().unwrap_or(""))
            .dimmed()
            .to_string()
    });
}

fn print_hosts(hosts: &[AnsibleHost]) {
    print_rows(hosts, |h| {
        format!(
            "{}:{} {}",
            h.ip_address,
            h.port,
            colorize_status(h.status.as_str())
        )
    });
}

fn print_groups(groups: &[AnsibleHostGroup]) {
    print_rows(groups, |g| {
        format!("{} host(s)", g.hosts_count.unwrap_or(0))
            .dimmed()
            .to_string()
    });
}

fn print_ansible_execution(execution: &AnsibleExecution) {
    let playbook = execution
        .playbook_name
        .clone()
        .unwrap_or_else(|| format!("playbook {}", execution.playbook));
    let inventory = execution
        .inventory_name
        .clone()
        .unwrap_or_else(|| format!("inventory {}", execution.inventory));
    println!(
        "  {} #{} {} on {} [{}] {}",
        "▸".cyan(),
        execution.id,
        playbook.bold(),
        inventory,
        colorize_status(execution.status.as_str()),
        fmt_time(&execution.created_at).dimmed()
    );
}

fn print_validation(report: &ValidationReport) {
    if report.valid {
        print_success("Valid");
    } else {
        println!("{}", "✗ Invalid".red().bold());
    }
    for error in &report.errors {
        println!("  {} {}", "error:".red(), error);
    }
    for warning in &report.warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
}

fn print_host_check(what: &str, result: &HostCheckResult) {
    if result.success {
        print_success(&format!("{} succeeded", what));
    } else {
        println!("{}", format!("✗ {} failed", what).red().bold());
    }
    println!("  Status: {}", colorize_status(result.status.as_str()));
    if let Some(message) = &result.message {
        println!("  {}", message.dimmed());
    }
}

fn print_block(title: &str, content: &str) {
    println!("\n{}", format!("{}:", title).bold());
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", content);
    println!("{}", "─".repeat(80).dimmed());
}

fn yes_no(value: bool) -> ColoredString {
    if value { "yes".green() } else { "no".dimmed() }
}
