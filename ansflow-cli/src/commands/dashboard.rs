//! Dashboard command

use ansflow_client::{AnsflowClient, ClientError, DashboardPoller, DashboardSnapshot};
use anyhow::{Context, Result};
use colored::*;
use tokio::signal::ctrl_c;

use super::execution::{print_execution_summary, print_statistics};
use crate::output::{colorize_status, fmt_time};

/// Show the dashboard once, or keep refreshing it with `watch`
pub async fn show_dashboard(client: &AnsflowClient, watch: bool) -> Result<()> {
    let poller = DashboardPoller::new(client.clone());

    if !watch {
        let snapshot = poller
            .poll_once()
            .await
            .context("Failed to load dashboard")?;
        render(&snapshot);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Refreshing every {}s, press Ctrl+C to stop.",
            poller.interval().as_secs()
        )
        .dimmed()
    );

    let polling = poller.run(|result| match result {
        Ok(snapshot) => {
            // Clear the screen and home the cursor before redrawing
            print!("\x1B[2J\x1B[H");
            render(snapshot);
        }
        Err(e) => eprintln!("{} {}", "Refresh failed:".red(), e),
    });

    tokio::select! {
        cycles = polling => {
            tracing::debug!("Dashboard stopped after {} cycles", cycles);
            let redirect_to = client
                .session()
                .redirect_target()
                .unwrap_or_else(|| client.session().login_path().to_string());
            Err(ClientError::Unauthorized { redirect_to }).context("Dashboard stopped")
        }
        signal = ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            println!();
            Ok(())
        }
    }
}

fn render(snapshot: &DashboardSnapshot) {
    println!(
        "{} {}",
        "AnsFlow Dashboard".bold(),
        format!("(updated {})", fmt_time(&snapshot.loaded_at)).dimmed()
    );
    println!();

    print_statistics(&snapshot.statistics);
    println!(
        "  Pipelines:    {} ({} active)",
        snapshot.pipelines.len(),
        snapshot.active_pipelines()
    );
    println!();

    println!("{}", format!("Tools ({}):", snapshot.tools.len()).bold());
    for tool in &snapshot.tools {
        println!(
            "  {} {} [{}] {}",
            "▸".cyan(),
            tool.name.bold(),
            tool.tool_type,
            colorize_status(tool.status.as_str())
        );
    }
    println!();

    println!(
        "{}",
        format!("Recent executions ({}):", snapshot.recent_executions.len()).bold()
    );
    for execution in &snapshot.recent_executions {
        print_execution_summary(execution);
    }
}
