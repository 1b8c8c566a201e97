//! Dashboard aggregate and polling loop

use std::time::Duration;

use ansflow_core::domain::cicd::CicdTool;
use ansflow_core::domain::execution::{ExecutionStatistics, PipelineExecution};
use ansflow_core::domain::pipeline::Pipeline;
use ansflow_core::dto::cicd::ExecutionFilter;
use chrono::{DateTime, Utc};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::AnsflowClient;
use crate::error::Result;
use crate::session::SessionState;

/// How often the dashboard reloads
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Number of executions shown on the dashboard
pub const RECENT_EXECUTIONS: u32 = 10;

/// Everything the dashboard shows, fetched in one go
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub tools: Vec<CicdTool>,
    pub recent_executions: Vec<PipelineExecution>,
    pub statistics: ExecutionStatistics,
    pub pipelines: Vec<Pipeline>,
    pub loaded_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Fetch tools, recent executions, statistics and pipelines concurrently
    ///
    /// Fails as a whole if any of the four requests fails.
    pub async fn load(client: &AnsflowClient) -> Result<Self> {
        let filter = ExecutionFilter {
            page_size: Some(RECENT_EXECUTIONS),
            ..Default::default()
        };

        let (tools, mut recent_executions, statistics, pipelines) = tokio::try_join!(
            client.get_tools(),
            client.get_executions(&filter),
            client.get_execution_statistics(),
            client.get_pipelines(),
        )?;
        recent_executions.truncate(RECENT_EXECUTIONS as usize);

        Ok(Self {
            tools,
            recent_executions,
            statistics,
            pipelines,
            loaded_at: Utc::now(),
        })
    }

    pub fn active_pipelines(&self) -> usize {
        self.pipelines.iter().filter(|p| p.is_active).count()
    }
}

/// Reloads the dashboard on a fixed interval until the session expires
#[derive(Debug, Clone)]
pub struct DashboardPoller {
    client: AnsflowClient,
    period: Duration,
}

impl DashboardPoller {
    pub fn new(client: AnsflowClient) -> Self {
        Self {
            client,
            period: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn interval(&self) -> Duration {
        self.period
    }

    /// Run a single cycle
    pub async fn poll_once(&self) -> Result<DashboardSnapshot> {
        DashboardSnapshot::load(&self.client).await
    }

    /// Poll until the session requires a new login
    ///
    /// The first cycle runs immediately. Every cycle's outcome, failures
    /// included, is handed to `on_cycle`; a failed cycle does not stop the
    /// loop. Returns the number of cycles run.
    pub async fn run<F>(&self, mut on_cycle: F) -> u64
    where
        F: FnMut(&Result<DashboardSnapshot>),
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cycles = 0;

        loop {
            ticker.tick().await;

            if self.login_required() {
                break;
            }

            let result = self.poll_once().await;
            cycles += 1;
            match &result {
                Ok(snapshot) => debug!(
                    "Dashboard cycle {}: {} tools, {} pipelines",
                    cycles,
                    snapshot.tools.len(),
                    snapshot.pipelines.len()
                ),
                Err(e) => warn!("Dashboard cycle {} failed: {}", cycles, e),
            }
            on_cycle(&result);

            if self.login_required() {
                break;
            }
        }

        info!("Dashboard polling stopped after {} cycles", cycles);
        cycles
    }

    fn login_required(&self) -> bool {
        matches!(
            self.client.session().state(),
            SessionState::LoginRequired { .. }
        )
    }
}
