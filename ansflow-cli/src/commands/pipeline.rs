//! Pipeline command handlers
//!
//! Handles pipeline creation, listing, viewing, editing, deletion,
//! triggering runs, and parallel group management.

use ansflow_client::{AnsflowClient, ResourceTable};
use ansflow_core::domain::cicd::CicdTool;
use ansflow_core::domain::execution::TriggerType;
use ansflow_core::domain::pipeline::{
    ExecutionMode, ParallelGroup, Pipeline, PipelineStep, SyncPolicy,
};
use ansflow_core::domain::project::Project;
use ansflow_core::dto::cicd::TriggerExecution;
use ansflow_core::dto::pipeline::{CreatePipeline, ParallelGroupRequest, UpdatePipeline};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde_json::Value as JsonValue;

use crate::id_resolver::resolve_id;
use crate::output::{
    colorize_status, confirm, fmt_opt_time, fmt_time, params_to_json, parse_json, parse_key_val,
    print_empty, print_header, print_success, read_text_arg,
};

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// List all pipelines
    List,
    /// Get pipeline details including steps
    Get {
        /// Pipeline ID or name
        id: String,
    },
    /// Create a pipeline
    Create {
        #[arg(short, long)]
        name: String,

        /// Owning project ID or name
        #[arg(short, long)]
        project: String,

        #[arg(short, long)]
        description: Option<String>,

        /// local, remote or hybrid
        #[arg(short, long, default_value = "local")]
        mode: ExecutionMode,

        /// CI/CD tool ID or name for remote execution
        #[arg(short, long)]
        tool: Option<String>,

        /// Job name in the external tool
        #[arg(long)]
        job_name: Option<String>,

        /// Create the pipeline disabled
        #[arg(long)]
        inactive: bool,

        /// Extra configuration as a JSON object
        #[arg(long, value_parser = parse_json)]
        config: Option<JsonValue>,

        /// Steps as a JSON array, or @file
        #[arg(short, long)]
        steps: Option<String>,
    },
    /// Update a pipeline
    Update {
        /// Pipeline ID or name
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        mode: Option<ExecutionMode>,

        #[arg(short, long)]
        tool: Option<String>,

        #[arg(long)]
        job_name: Option<String>,

        #[arg(long)]
        active: Option<bool>,

        #[arg(long, value_parser = parse_json)]
        config: Option<JsonValue>,

        /// Steps as a JSON array, or @file
        #[arg(short, long)]
        steps: Option<String>,

        /// Send a full replacement (PUT) instead of a partial update
        #[arg(long)]
        replace: bool,
    },
    /// Delete a pipeline
    Delete {
        /// Pipeline ID or name
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Trigger a pipeline execution
    Run {
        /// Pipeline ID or name
        id: String,

        /// CI/CD tool ID or name to run on
        #[arg(short, long)]
        tool: Option<String>,

        /// Parameters as key=value pairs (e.g., branch=main)
        #[arg(short, long, value_parser = parse_key_val)]
        param: Vec<(String, String)>,
    },
    /// Parallel group management
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },
}

/// Parallel group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// List the parallel groups of a pipeline
    List {
        /// Pipeline ID or name
        pipeline: String,
    },
    /// Create a parallel group
    Create {
        /// Pipeline ID or name
        pipeline: String,

        /// Group identifier (e.g., parallel_group_1)
        #[arg(long)]
        id: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// wait_all, wait_any or fail_fast
        #[arg(long, default_value = "wait_all")]
        sync_policy: SyncPolicy,

        #[arg(long)]
        timeout: Option<u64>,

        /// Step IDs in the group
        #[arg(long, value_delimiter = ',')]
        steps: Vec<i64>,
    },
    /// Delete a parallel group
    Delete {
        /// Group identifier
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(
    command: PipelineCommands,
    client: &AnsflowClient,
) -> Result<()> {
    let mut pipelines: ResourceTable<Pipeline> = ResourceTable::new(client.clone());

    match command {
        PipelineCommands::List => {
            pipelines.load().await.context("Failed to fetch pipelines")?;
            print_pipelines(pipelines.rows());
        }
        PipelineCommands::Get { id } => {
            let id = resolve_id::<Pipeline>(client, &id).await?;
            let pipeline = client
                .get_pipeline(id)
                .await
                .context("Failed to fetch pipeline")?;
            print_pipeline_details(&pipeline);
        }
        PipelineCommands::Create {
            name,
            project,
            description,
            mode,
            tool,
            job_name,
            inactive,
            config,
            steps,
        } => {
            let project = resolve_id::<Project>(client, &project).await?;
            let execution_tool = resolve_optional_tool(client, tool).await?;
            let req = CreatePipeline {
                name,
                description,
                project,
                execution_mode: mode,
                execution_tool,
                tool_job_name: job_name,
                is_active: !inactive,
                config,
                steps: parse_steps(steps)?.unwrap_or_default(),
            };
            let pipeline = pipelines
                .create(&req)
                .await
                .context("Failed to create pipeline")?;
            print_success(&format!("Pipeline {} created (id {})", pipeline.name, pipeline.id));
            println!();
            print_pipelines(pipelines.rows());
        }
        PipelineCommands::Update {
            id,
            name,
            description,
            mode,
            tool,
            job_name,
            active,
            config,
            steps,
            replace,
        } => {
            let id = resolve_id::<Pipeline>(client, &id).await?;
            let req = UpdatePipeline {
                name,
                description,
                execution_mode: mode,
                execution_tool: resolve_optional_tool(client, tool).await?,
                tool_job_name: job_name,
                is_active: active,
                config,
                steps: parse_steps(steps)?,
            };

            if replace {
                client
                    .update_pipeline(id, &req)
                    .await
                    .context("Failed to update pipeline")?;
                pipelines.load().await.context("Failed to fetch pipelines")?;
            } else {
                pipelines
                    .update(id, &req)
                    .await
                    .context("Failed to update pipeline")?;
            }
            print_success(&format!("Pipeline {} updated", id));
            println!();
            print_pipelines(pipelines.rows());
        }
        PipelineCommands::Delete { id, yes } => {
            let id = resolve_id::<Pipeline>(client, &id).await?;
            if !confirm(&format!("Delete pipeline {}?", id), yes)? {
                return Ok(());
            }
            pipelines
                .delete(id)
                .await
                .context("Failed to delete pipeline")?;
            print_success(&format!("Pipeline {} deleted", id));
        }
        PipelineCommands::Run { id, tool, param } => {
            let id = resolve_id::<Pipeline>(client, &id).await?;
            let req = TriggerExecution {
                pipeline_id: id,
                cicd_tool_id: resolve_optional_tool(client, tool).await?,
                trigger_type: TriggerType::Manual,
                parameters: params_to_json(param),
            };
            let execution = client
                .trigger_execution(&req)
                .await
                .context("Failed to trigger pipeline")?;

            print_success("Execution started");
            println!("  Execution ID: {}", execution.id.to_string().cyan());
            println!("  Pipeline ID:  {}", execution.pipeline.to_string().dimmed());
            println!("  Status:       {}", colorize_status(execution.status.as_str()));
            if let Some(url) = &execution.external_url {
                println!("  External:     {}", url);
            }
        }
        PipelineCommands::Group { command } => handle_group_command(command, client).await?,
    }

    Ok(())
}

async fn handle_group_command(command: GroupCommands, client: &AnsflowClient) -> Result<()> {
    match command {
        GroupCommands::List { pipeline } => {
            let pipeline = resolve_id::<Pipeline>(client, &pipeline).await?;
            let groups = client
                .get_parallel_groups(pipeline)
                .await
                .context("Failed to fetch parallel groups")?;
            print_groups(&groups);
        }
        GroupCommands::Create {
            pipeline,
            id,
            name,
            description,
            sync_policy,
            timeout,
            steps,
        } => {
            let pipeline = resolve_id::<Pipeline>(client, &pipeline).await?;
            let req = ParallelGroupRequest {
                id,
                name,
                description,
                pipeline,
                sync_policy,
                timeout_seconds: timeout,
                steps,
            };
            let group = client
                .create_parallel_group(&req)
                .await
                .context("Failed to create parallel group")?;
            print_success(&format!("Parallel group {} created", group.id));
            println!();

            let groups = client
                .get_parallel_groups(pipeline)
                .await
                .context("Failed to fetch parallel groups")?;
            print_groups(&groups);
        }
        GroupCommands::Delete { id, yes } => {
            if !confirm(&format!("Delete parallel group {}?", id), yes)? {
                return Ok(());
            }
            client
                .delete_parallel_group(&id)
                .await
                .context("Failed to delete parallel group")?;
            print_success(&format!("Parallel group {} deleted", id));
        }
    }

    Ok(())
}

async fn resolve_optional_tool(
    client: &AnsflowClient,
    tool: Option<String>,
) -> Result<Option<i64>> {
    match tool {
        Some(tool) => Ok(Some(resolve_id::<CicdTool>(client, &tool).await?)),
        None => Ok(None),
    }
}

fn parse_steps(steps: Option<String>) -> Result<Option<Vec<PipelineStep>>> {
    let Some(steps) = steps else {
        return Ok(None);
    };
    let text = read_text_arg(&steps)?;
    let steps = serde_json::from_str(&text).context("Steps must be a JSON array of steps")?;
    Ok(Some(steps))
}

/// Print a pipeline summary
fn print_pipelines(pipelines: &[Pipeline]) {
    if pipelines.is_empty() {
        print_empty("pipeline");
        return;
    }
    print_header("pipeline", pipelines.len());
    for pipeline in pipelines {
        let active = if pipeline.is_active {
            "active".green()
        } else {
            "inactive".dimmed()
        };
        println!("  {} {} {}", "▸".cyan(), pipeline.name.bold(), active);
        println!("    ID:      {}", pipeline.id.to_string().dimmed());
        println!("    Mode:    {}", pipeline.execution_mode.to_string().dimmed());
        if let Some(project) = &pipeline.project_name {
            println!("    Project: {}", project.dimmed());
        }
        if let Some(desc) = &pipeline.description {
            println!("    Description: {}", desc.dimmed());
        }
        println!();
    }
}

/// Print detailed pipeline information
fn print_pipeline_details(pipeline: &Pipeline) {
    println!("{}", "Pipeline Details:".bold());
    println!("  ID:          {}", pipeline.id.to_string().cyan());
    println!("  Name:        {}", pipeline.name.bold());
    if let Some(desc) = &pipeline.description {
        println!("  Description: {}", desc);
    }
    println!("  Status:      {}", colorize_status(pipeline.status.as_str()));
    println!("  Mode:        {}", pipeline.execution_mode);
    if let Some(tool) = pipeline.execution_tool {
        println!(
            "  Tool:        {} {}",
            tool,
            pipeline.tool_job_name.as_deref().unwrap_or_default().dimmed()
        );
    }
    println!("  Created:     {}", fmt_time(&pipeline.created_at));
    println!("  Updated:     {}", fmt_opt_time(pipeline.updated_at.as_ref()));

    let groups = pipeline.parallel_group_names();
    if !groups.is_empty() {
        println!("  Groups:      {}", groups.join(", "));
    }

    println!("\n{}", "Steps:".bold());
    if pipeline.steps.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for step in pipeline.ordered_steps() {
        let mut flags = Vec::new();
        if let Some(group) = &step.parallel_group {
            flags.push(format!("group {}", group));
        }
        if step.approval_required {
            flags.push("approval".to_string());
        }
        println!(
            "  {:>3}. {} ({}) {}",
            step.order,
            step.name.bold(),
            step.step_type,
            flags.join(", ").dimmed()
        );
    }
}

fn print_groups(groups: &[ParallelGroup]) {
    if groups.is_empty() {
        print_empty("parallel group");
        return;
    }
    print_header("parallel group", groups.len());
    for group in groups {
        println!(
            "  {} {} ({}) {}",
            "▸".cyan(),
            group.name.bold(),
            group.id,
            group.sync_policy.to_string().dimmed()
        );
        if !group.steps.is_empty() {
            let steps: Vec<String> = group.steps.iter().map(|s| s.to_string()).collect();
            println!("    Steps: {}", steps.join(", ").dimmed());
        }
    }
}
