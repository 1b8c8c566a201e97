//! CI/CD tool command handlers
//!
//! Registration of external CI/CD tools (Jenkins, GitLab CI, ...), their
//! health checks and job listings, plus the atomic step library.

use ansflow_client::{AnsflowClient, ResourceTable};
use ansflow_core::domain::cicd::{AtomicStep, CicdTool, ToolType};
use ansflow_core::dto::cicd::{CreateAtomicStep, CreateCicdTool, UpdateAtomicStep, UpdateCicdTool};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde_json::Value as JsonValue;

use crate::id_resolver::resolve_id;
use crate::output::{
    colorize_status, confirm, fmt_opt_time, fmt_time, parse_json, print_empty, print_header,
    print_success,
};

/// Tool subcommands
#[derive(Subcommand)]
pub enum ToolCommands {
    /// List all tools
    List,
    /// Get tool details
    Get {
        /// Tool ID or name
        id: String,
    },
    /// Register a tool
    Create {
        #[arg(short, long)]
        name: String,

        /// jenkins, gitlab_ci, github_actions, circleci, azure_devops or custom
        #[arg(short = 't', long)]
        tool_type: ToolType,

        /// Base URL of the tool (http or https)
        #[arg(short, long)]
        url: String,

        /// Owning project ID
        #[arg(short, long)]
        project: i64,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        username: Option<String>,

        /// API token
        #[arg(long, env = "ANSFLOW_TOOL_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Extra configuration as a JSON object
        #[arg(long, value_parser = parse_json)]
        config: Option<JsonValue>,
    },
    /// Update a tool
    Update {
        /// Tool ID or name
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        url: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        username: Option<String>,

        /// API token
        #[arg(long)]
        token: Option<String>,

        #[arg(long, value_parser = parse_json)]
        config: Option<JsonValue>,
    },
    /// Delete a tool
    Delete {
        /// Tool ID or name
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Check connectivity and credentials of a tool
    Health {
        /// Tool ID or name
        id: String,
    },
    /// List the jobs defined in a tool
    Jobs {
        /// Tool ID or name
        id: String,
    },
    /// Atomic step library
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
}

/// Atomic step subcommands
#[derive(Subcommand)]
pub enum StepCommands {
    /// List atomic steps
    List,
    /// Create an atomic step
    Create {
        #[arg(short, long)]
        name: String,

        /// Step type (fetch_code, build, test, ansible, ...)
        #[arg(short = 't', long)]
        step_type: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Default parameters as a JSON object
        #[arg(long, value_parser = parse_json)]
        parameters: Option<JsonValue>,

        /// Share the step with every project
        #[arg(long)]
        public: bool,
    },
    /// Update an atomic step
    Update {
        /// Step ID or name
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long, value_parser = parse_json)]
        parameters: Option<JsonValue>,

        #[arg(long)]
        public: Option<bool>,
    },
    /// Delete an atomic step
    Delete {
        /// Step ID or name
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle tool commands
pub async fn handle_tool_command(command: ToolCommands, client: &AnsflowClient) -> Result<()> {
    let mut tools: ResourceTable<CicdTool> = ResourceTable::new(client.clone());

    match command {
        ToolCommands::List => {
            tools.load().await.context("Failed to fetch tools")?;
            print_tools(tools.rows());
        }
        ToolCommands::Get { id } => {
            let id = resolve_id::<CicdTool>(client, &id).await?;
            let tool = client.get_tool(id).await.context("Failed to fetch tool")?;
            print_tool_details(&tool);
        }
        ToolCommands::Create {
            name,
            tool_type,
            url,
            project,
            description,
            username,
            token,
            config,
        } => {
            let req = CreateCicdTool {
                name,
                tool_type,
                base_url: url,
                description,
                username,
                token,
                project,
                config,
            };
            let tool = tools.create(&req).await.context("Failed to create tool")?;
            print_success(&format!("Tool {} registered (id {})", tool.name, tool.id));
            println!();
            print_tools(tools.rows());
        }
        ToolCommands::Update {
            id,
            name,
            url,
            description,
            username,
            token,
            config,
        } => {
            let id = resolve_id::<CicdTool>(client, &id).await?;
            let req = UpdateCicdTool {
                name,
                base_url: url,
                description,
                username,
                token,
                config,
            };
            let tool = tools.update(id, &req).await.context("Failed to update tool")?;
            print_success(&format!("Tool {} updated", tool.name));
            println!();
            print_tools(tools.rows());
        }
        ToolCommands::Delete { id, yes } => {
            let id = resolve_id::<CicdTool>(client, &id).await?;
            if !confirm(&format!("Delete tool {}?", id), yes)? {
                return Ok(());
            }
            tools.delete(id).await.context("Failed to delete tool")?;
            print_success(&format!("Tool {} deleted", id));
        }
        ToolCommands::Health { id } => {
            let id = resolve_id::<CicdTool>(client, &id).await?;
            let health = client
                .check_tool_health(id)
                .await
                .context("Health check failed")?;

            let verdict = if health.is_healthy {
                "healthy".green().bold()
            } else {
                "unhealthy".red().bold()
            };
            println!("Tool {}: {}", id, verdict);
            println!("  Status:   {}", colorize_status(health.status.as_str()));
            if let Some(ms) = health.response_time_ms {
                println!("  Response: {:.0} ms", ms);
            }
            if let Some(message) = &health.message {
                println!("  Message:  {}", message.dimmed());
            }
        }
        ToolCommands::Jobs { id } => {
            let id = resolve_id::<CicdTool>(client, &id).await?;
            let jobs = client
                .get_tool_jobs(id)
                .await
                .context("Failed to fetch tool jobs")?;
            if jobs.is_empty() {
                print_empty("job");
            }
            for job in jobs {
                println!(
                    "  {} {} {}",
                    "▸".cyan(),
                    job.name.bold(),
                    job.url.unwrap_or_default().dimmed()
                );
            }
        }
        ToolCommands::Step { command } => handle_step_command(command, client).await?,
    }

    Ok(())
}

async fn handle_step_command(command: StepCommands, client: &AnsflowClient) -> Result<()> {
    let mut steps: ResourceTable<AtomicStep> = ResourceTable::new(client.clone());

    match command {
        StepCommands::List => {
            steps.load().await.context("Failed to fetch atomic steps")?;
            print_steps(steps.rows());
        }
        StepCommands::Create {
            name,
            step_type,
            description,
            parameters,
            public,
        } => {
            let req = CreateAtomicStep {
                name,
                step_type,
                description,
                parameters: parameters.unwrap_or_else(|| JsonValue::Object(Default::default())),
                is_public: public,
            };
            let step = steps
                .create(&req)
                .await
                .context("Failed to create atomic step")?;
            print_success(&format!("Atomic step {} created (id {})", step.name, step.id));
            println!();
            print_steps(steps.rows());
        }
        StepCommands::Update {
            id,
            name,
            description,
            parameters,
            public,
        } => {
            let id = resolve_id::<AtomicStep>(client, &id).await?;
            let req = UpdateAtomicStep {
                name,
                description,
                parameters,
                is_public: public,
            };
            steps
                .update(id, &req)
                .await
                .context("Failed to update atomic step")?;
            print_success(&format!("Atomic step {} updated", id));
            println!();
            print_steps(steps.rows());
        }
        StepCommands::Delete { id, yes } => {
            let id = resolve_id::<AtomicStep>(client, &id).await?;
            if !confirm(&format!("Delete atomic step {}?", id), yes)? {
                return Ok(());
            }
            steps
                .delete(id)
                .await
                .context("Failed to delete atomic step")?;
            print_success(&format!("Atomic step {} deleted", id));
        }
    }

    Ok(())
}

fn print_tools(tools: &[CicdTool]) {
    if tools.is_empty() {
        print_empty("tool");
        return;
    }
    print_header("tool", tools.len());
    for tool in tools {
        println!(
            "  {} {} [{}] {}",
            "▸".cyan(),
            tool.name.bold(),
            tool.tool_type,
            colorize_status(tool.status.as_str())
        );
        println!("    ID:  {}", tool.id.to_string().dimmed());
        println!("    URL: {}", tool.base_url.dimmed());
        println!();
    }
}

fn print_tool_details(tool: &CicdTool) {
    println!("{}", "Tool Details:".bold());
    println!("  ID:           {}", tool.id.to_string().cyan());
    println!("  Name:         {}", tool.name.bold());
    println!("  Type:         {}", tool.tool_type);
    println!("  URL:          {}", tool.base_url);
    println!("  Status:       {}", colorize_status(tool.status.as_str()));
    if let Some(desc) = &tool.description {
        println!("  Description:  {}", desc);
    }
    if let Some(username) = &tool.username {
        println!("  Username:     {}", username);
    }
    if let Some(project) = tool.project {
        println!("  Project:      {}", project);
    }
    println!(
        "  Last check:   {}",
        fmt_opt_time(tool.last_health_check.as_ref())
    );
    println!("  Created:      {}", fmt_time(&tool.created_at));
}

fn print_steps(steps: &[AtomicStep]) {
    if steps.is_empty() {
        print_empty("atomic step");
        return;
    }
    print_header("atomic step", steps.len());
    for step in steps {
        let visibility = if step.is_public { "public" } else { "private" };
        println!(
            "  {} {} ({}) {}",
            "▸".cyan(),
            step.name.bold(),
            step.step_type,
            visibility.dimmed()
        );
        println!("    ID: {}", step.id.to_string().dimmed());
        if let Some(desc) = &step.description {
            println!("    {}", desc.dimmed());
        }
    }
}
