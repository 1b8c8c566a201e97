//! Analytics command handlers
//!
//! Every view falls back to generated numbers when the analytics backend
//! has nothing to offer; those are labelled before they are printed.

use ansflow_client::AnsflowClient;
use ansflow_core::domain::analytics::{AnalyticsOverview, ExecutionTrend, PipelineStats};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use crate::output::{print_empty, print_header, print_simulated_label};

/// Analytics subcommands
#[derive(Subcommand)]
pub enum AnalyticsCommands {
    /// Daily execution counts
    Trends {
        /// Window in days
        #[arg(
            short,
            long,
            default_value = "7",
            value_parser = clap::value_parser!(u32).range(1..=365)
        )]
        days: u32,
    },
    /// Per-pipeline success rates and durations
    Pipelines,
    /// Usage count per tool type
    Tools,
    /// Headline numbers for the last `--days` days
    Overview {
        #[arg(
            short,
            long,
            default_value = "7",
            value_parser = clap::value_parser!(u32).range(1..=365)
        )]
        days: u32,
    },
}

/// Handle analytics commands
pub async fn handle_analytics_command(
    command: AnalyticsCommands,
    client: &AnsflowClient,
) -> Result<()> {
    match command {
        AnalyticsCommands::Trends { days } => {
            let trend = client
                .execution_trends_or_simulated(days)
                .await
                .context("Failed to fetch execution trends")?;
            print_trend(&trend);
        }
        AnalyticsCommands::Pipelines => {
            let stats = client
                .pipeline_stats_or_simulated()
                .await
                .context("Failed to fetch pipeline statistics")?;
            print_pipeline_stats(&stats);
        }
        AnalyticsCommands::Tools => {
            let usage = client
                .get_tool_usage()
                .await
                .context("Failed to fetch tool usage")?;
            if usage.is_empty() {
                print_empty("tool usage");
                return Ok(());
            }
            print_header("tool type", usage.len());
            for entry in &usage {
                println!("  {} {:<16} {}", "▸".cyan(), entry.tool_type.bold(), entry.count);
            }
        }
        AnalyticsCommands::Overview { days } => {
            let trend = client
                .execution_trends_or_simulated(days)
                .await
                .context("Failed to fetch execution trends")?;
            let overview = client
                .analytics_overview_or_simulated(&trend)
                .await
                .context("Failed to fetch analytics overview")?;
            print_overview(&overview);
        }
    }

    Ok(())
}

fn print_trend(trend: &ExecutionTrend) {
    if trend.simulated {
        print_simulated_label();
    }
    println!(
        "{}",
        format!("Executions over the last {} day(s):", trend.days).bold()
    );
    println!();

    let widest = trend.points.iter().map(|p| p.total).max().unwrap_or(0).max(1);
    for point in &trend.points {
        let width = (point.total * 40 / widest) as usize;
        println!(
            "  {}  {:>4}  {} {}",
            point.date.format("%Y-%m-%d"),
            point.total,
            "█".repeat(width).cyan(),
            format!("{} ok / {} failed", point.success, point.failed).dimmed()
        );
    }
    println!();
    println!(
        "  Total: {}  Success rate: {:.1}%",
        trend.total(),
        trend.success_rate()
    );
}

fn print_pipeline_stats(stats: &[PipelineStats]) {
    if stats.is_empty() {
        print_empty("pipeline");
        return;
    }
    if stats.iter().any(|s| s.simulated) {
        print_simulated_label();
    }
    print_header("pipeline", stats.len());
    for s in stats {
        let rate = format!("{:.1}%", s.success_rate);
        let rate = if s.success_rate >= 80.0 {
            rate.green()
        } else if s.success_rate >= 50.0 {
            rate.yellow()
        } else {
            rate.red()
        };
        let duration = s
            .average_duration
            .map(|d| format!("{:.0}s avg", d))
            .unwrap_or_default();
        println!(
            "  {} {} {} runs {} {}",
            "▸".cyan(),
            s.pipeline_name.bold(),
            s.total_executions,
            rate,
            duration.dimmed()
        );
    }
}

fn print_overview(overview: &AnalyticsOverview) {
    if overview.simulated {
        print_simulated_label();
    }
    println!("{}", "Analytics Overview:".bold());
    println!("  Pipelines:    {}", overview.total_pipelines);
    println!("  Active:       {}", overview.active_pipelines);
    println!("  Executions:   {}", overview.total_executions);
    println!("  Success rate: {:.1}%", overview.success_rate);
    if let Some(avg) = overview.average_duration {
        println!("  Avg duration: {:.0}s", avg);
    }
}
