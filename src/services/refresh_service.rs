//! Refresh Service
//!
//! One full refresh cycle: accounts (list + copy view), trade summary, and the
//! chartink log when its tab is visible. Fetches run concurrently; failures are
//! collected and reported as a single toast per cycle.

use super::{AccountsService, Applied, ChartinkService, SummaryService};
use crate::error::{AppError, ErrorResponse, Result};
use crate::render;
use crate::state::AppState;
use crate::view::Tab;
use tracing::{debug, warn};

/// Outcome of one refresh cycle
#[derive(Debug, Default)]
pub struct CycleReport {
    /// View name and the error its fetch failed with
    pub failures: Vec<(&'static str, AppError)>,
    pub stale: usize,
}

impl CycleReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, view: &'static str, result: Result<Applied>) {
        match result {
            Ok(Applied::Rendered) => {}
            Ok(Applied::Stale) => self.stale += 1,
            Err(e) => self.failures.push((view, e)),
        }
    }

    /// Single toast line describing every failure
    pub fn failure_message(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .failures
            .iter()
            .map(|(view, e)| format!("{}: {}", view, e.user_message()))
            .collect();
        Some(format!("Refresh failed ({})", parts.join("; ")))
    }
}

pub struct RefreshService;

impl RefreshService {
    /// Run one full fetch-and-render cycle; never fails, never panics
    pub async fn refresh_all(state: &AppState) -> CycleReport {
        let chartink_visible = state.session.read().active_tab == Tab::Chartink;

        let (accounts, summary, chartink) = tokio::join!(
            AccountsService::load(state),
            SummaryService::load(state),
            async {
                if chartink_visible {
                    Some(ChartinkService::load(state).await)
                } else {
                    None
                }
            }
        );

        let mut report = CycleReport::default();
        report.record("Accounts", accounts);
        report.record("Trade summary", summary);
        if let Some(chartink) = chartink {
            report.record("Chartink log", chartink);
        }

        for (view, e) in &report.failures {
            let response = ErrorResponse::from(e);
            warn!("{} refresh failed [{}]: {}", view, response.code, response.message);
        }
        if let Some(message) = report.failure_message() {
            state.notifier.error(message);
        }
        debug!(
            "Refresh cycle done: {} failed, {} stale",
            report.failures.len(),
            report.stale
        );

        state.publish();
        report
    }

    /// Fill the new-master dropdown from `/config.yaml`
    pub async fn load_master_choices(state: &AppState) -> Result<Applied> {
        let ticket = state.generations.master_choices.ticket();
        let config = state.api.get_copy_config().await?;
        let names = config.child_names();

        let mut doc = state.document.lock();
        if !state.generations.master_choices.try_apply(ticket) {
            return Ok(Applied::Stale);
        }
        render::render_master_choices(&mut doc, &names);
        debug!("Loaded {} master candidates", names.len());
        Ok(Applied::Rendered)
    }
}
