//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod analytics;
mod ansible;
mod auth;
mod dashboard;
mod docker;
mod execution;
mod pipeline;
mod project;
mod tool;

pub use analytics::AnalyticsCommands;
pub use ansible::AnsibleCommands;
pub use docker::DockerCommands;
pub use execution::ExecutionCommands;
pub use pipeline::PipelineCommands;
pub use project::ProjectCommands;
pub use tool::ToolCommands;

use ansflow_client::{AnsflowClient, ClientError, Resource, ResourceTable};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use crate::config::Config;
use crate::id_resolver::resolve_id;
use crate::output::{confirm, print_empty, print_header, print_success};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the access token
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "ANSFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// CI/CD tool management
    Tool {
        #[command(subcommand)]
        command: ToolCommands,
    },
    /// Pipeline management
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Pipeline execution monitoring
    Execution {
        #[command(subcommand)]
        command: ExecutionCommands,
    },
    /// Ansible inventories, playbooks, credentials, hosts and executions
    Ansible {
        #[command(subcommand)]
        command: AnsibleCommands,
    },
    /// Docker registries, images, containers and compose projects
    Docker {
        #[command(subcommand)]
        command: DockerCommands,
    },
    /// Project management
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Execution trends and pipeline statistics
    Analytics {
        #[command(subcommand)]
        command: AnalyticsCommands,
    },
    /// Overview of tools, executions and pipelines
    Dashboard {
        /// Keep refreshing every 30 seconds
        #[arg(short, long)]
        watch: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = config.client()?;

    let result = dispatch(command, &client).await;
    if let Err(err) = &result {
        let expired = err
            .chain()
            .filter_map(|cause| cause.downcast_ref::<ClientError>())
            .any(ClientError::is_unauthorized);
        if expired {
            eprintln!(
                "{}",
                "Session expired or missing, run `ansflow login` first.".yellow()
            );
        }
    }
    result
}

async fn dispatch(command: Commands, client: &AnsflowClient) -> Result<()> {
    match command {
        Commands::Login { username, password } => {
            auth::login(client, &username, password).await
        }
        Commands::Logout => auth::logout(client),
        Commands::Tool { command } => tool::handle_tool_command(command, client).await,
        Commands::Pipeline { command } => {
            pipeline::handle_pipeline_command(command, client).await
        }
        Commands::Execution { command } => {
            execution::handle_execution_command(command, client).await
        }
        Commands::Ansible { command } => ansible::handle_ansible_command(command, client).await,
        Commands::Docker { command } => docker::handle_docker_command(command, client).await,
        Commands::Project { command } => project::handle_project_command(command, client).await,
        Commands::Analytics { command } => {
            analytics::handle_analytics_command(command, client).await
        }
        Commands::Dashboard { watch } => dashboard::show_dashboard(client, watch).await,
    }
}

/// Confirm, delete through a [`ResourceTable`] and report
pub(crate) async fn delete_resource<R: Resource>(
    client: &AnsflowClient,
    target: &str,
    yes: bool,
) -> Result<()> {
    let id = resolve_id::<R>(client, target).await?;
    if !confirm(&format!("Delete {} {}?", R::KIND, id), yes)? {
        return Ok(());
    }

    let mut table: ResourceTable<R> = ResourceTable::new(client.clone());
    table
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete {}", R::KIND))?;
    print_success(&format!("Deleted {} {} ({} remaining)", R::KIND, id, table.len()));
    Ok(())
}

/// One line per row: name, id and a per-kind detail
pub(crate) fn print_rows<R: Resource>(rows: &[R], detail: impl Fn(&R) -> String) {
    if rows.is_empty() {
        print_empty(R::KIND);
        return;
    }
    print_header(R::KIND, rows.len());
    for row in rows {
        println!(
            "  {} {} {} {}",
            "▸".cyan(),
            row.display_name().bold(),
            format!("#{}", row.id()).dimmed(),
            detail(row)
        );
    }
}
