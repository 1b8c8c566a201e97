//! Execution command handlers

use ansflow_client::AnsflowClient;
use ansflow_core::Page;
use ansflow_core::domain::execution::{ExecutionStatistics, ExecutionStatus, PipelineExecution};
use ansflow_core::domain::pipeline::Pipeline;
use ansflow_core::dto::cicd::ExecutionFilter;
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use crate::id_resolver::resolve_id;
use crate::output::{colorize_status, confirm, fmt_opt_time, fmt_time, print_action, print_empty};

/// Execution subcommands
#[derive(Subcommand)]
pub enum ExecutionCommands {
    /// List executions
    List {
        /// Only executions of this pipeline (ID or name)
        #[arg(short, long)]
        pipeline: Option<String>,

        /// pending, running, success, failed, cancelled or timeout
        #[arg(short, long)]
        status: Option<ExecutionStatus>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Get execution details
    Get {
        /// Execution ID
        id: i64,
    },
    /// Cancel a running execution
    Cancel {
        /// Execution ID
        id: i64,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show execution logs
    Logs {
        /// Execution ID
        id: i64,
    },
    /// Show aggregate execution statistics
    Stats,
}

/// Handle execution commands
pub async fn handle_execution_command(
    command: ExecutionCommands,
    client: &AnsflowClient,
) -> Result<()> {
    match command {
        ExecutionCommands::List {
            pipeline,
            status,
            page,
            page_size,
        } => {
            let pipeline = match pipeline {
                Some(p) => Some(resolve_id::<Pipeline>(client, &p).await?),
                None => None,
            };
            let filter = ExecutionFilter {
                pipeline,
                status,
                page,
                page_size,
            };
            let page = client
                .get_executions_page(&filter)
                .await
                .context("Failed to fetch executions")?;

            if page.results.is_empty() {
                print_empty("execution");
                return Ok(());
            }
            println!("{}", page_summary(&page).bold());
            println!();
            for execution in &page.results {
                print_execution_summary(execution);
            }
            if page.has_next() {
                println!("{}", "More results available, use --page".dimmed());
            }
        }
        ExecutionCommands::Get { id } => {
            let execution = client
                .get_execution(id)
                .await
                .context("Failed to fetch execution")?;
            print_execution_details(&execution);
        }
        ExecutionCommands::Cancel { id, yes } => {
            if !confirm(&format!("Cancel execution {}?", id), yes)? {
                return Ok(());
            }
            let result = client
                .cancel_execution(id)
                .await
                .context("Failed to cancel execution")?;
            print_action("Cancellation", &result);
        }
        ExecutionCommands::Logs { id } => {
            let logs = client
                .get_execution_logs(id)
                .await
                .context("Failed to fetch execution logs")?;

            if !logs.logs.is_empty() {
                println!("{}", logs.logs);
            }
            for step in &logs.steps {
                println!(
                    "{} {} [{}]",
                    "──".dimmed(),
                    step.step_name.bold(),
                    colorize_status(step.status.as_str())
                );
                println!("{}", step.logs);
            }
            if logs.logs.is_empty() && logs.steps.is_empty() {
                println!("{}", "No logs available.".yellow());
            }
        }
        ExecutionCommands::Stats => {
            let stats = client
                .get_execution_statistics()
                .await
                .context("Failed to fetch execution statistics")?;
            print_statistics(&stats);
        }
    }

    Ok(())
}

/// "Showing n of total", the total falling back to the page length
fn page_summary<T>(page: &Page<T>) -> String {
    let total = page.count.unwrap_or(page.results.len() as u64);
    format!("Showing {} of {} execution(s):", page.results.len(), total)
}

pub fn print_execution_summary(execution: &PipelineExecution) {
    let pipeline = execution
        .pipeline_name
        .clone()
        .unwrap_or_else(|| format!("pipeline {}", execution.pipeline));
    println!(
        "  {} #{} {} [{}]",
        "▸".cyan(),
        execution.id,
        pipeline.bold(),
        colorize_status(execution.status.as_str())
    );
    println!(
        "    Trigger: {}  Created: {}",
        execution.trigger_type.to_string().dimmed(),
        fmt_time(&execution.created_at).dimmed()
    );
}

fn print_execution_details(execution: &PipelineExecution) {
    println!("{}", "Execution Details:".bold());
    println!("  ID:        {}", execution.id.to_string().cyan());
    println!("  Pipeline:  {}", execution.pipeline);
    if let Some(name) = &execution.pipeline_name {
        println!("  Name:      {}", name.bold());
    }
    println!("  Status:    {}", colorize_status(execution.status.as_str()));
    println!("  Trigger:   {}", execution.trigger_type);
    if let Some(by) = &execution.triggered_by {
        println!("  By:        {}", by);
    }
    if let Some(tool) = &execution.cicd_tool_name {
        println!("  Tool:      {}", tool);
    }
    if let Some(url) = &execution.external_url {
        println!("  External:  {}", url);
    }
    println!("  Started:   {}", fmt_opt_time(execution.started_at.as_ref()));
    println!("  Completed: {}", fmt_opt_time(execution.completed_at.as_ref()));
    if let Some(duration) = execution.duration() {
        println!("  Duration:  {}s", duration.num_seconds());
    }

    if !execution.step_executions.is_empty() {
        println!("\n{}", "Steps:".bold());
        let mut steps: Vec<_> = execution.step_executions.iter().collect();
        steps.sort_by_key(|s| s.order);
        for step in steps {
            println!(
                "  {:>3}. {} [{}]",
                step.order,
                step.step_name.as_deref().unwrap_or("(unnamed)"),
                colorize_status(step.status.as_str())
            );
        }
    }
}

pub fn print_statistics(stats: &ExecutionStatistics) {
    println!("{}", "Execution Statistics:".bold());
    println!("  Total:        {}", stats.total_executions);
    println!(
        "  Successful:   {}",
        stats.successful_executions.to_string().green()
    );
    println!("  Failed:       {}", stats.failed_executions.to_string().red());
    println!("  Running:      {}", stats.running_executions.to_string().cyan());
    println!("  Success rate: {:.1}%", stats.success_rate);
    if let Some(avg) = stats.average_duration {
        println!("  Avg duration: {:.0}s", avg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(count: Option<u64>, rows: usize) -> Page<u32> {
        Page {
            count,
            next: None,
            previous: None,
            results: vec![0; rows],
        }
    }

    #[test]
    fn test_page_summary_uses_backend_count() {
        assert_eq!(page_summary(&page(Some(42), 10)), "Showing 10 of 42 execution(s):");
    }

    #[test]
    fn test_page_summary_without_count() {
        assert_eq!(page_summary(&page(None, 3)), "Showing 3 of 3 execution(s):");
    }
}
