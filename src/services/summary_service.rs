//! Summary Service
//!
//! Trade summary table: fetch, sort, render and CSV export.
//! The summary is fetched independently of the account snapshot.

use super::Applied;
use crate::api::types::TradeSummaryRow;
use crate::error::Result;
use crate::render;
use crate::state::AppState;
use crate::view::trade_summary::to_csv;
use crate::view::{build_summary_rows, SummaryKey};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default export file name
pub const DEFAULT_EXPORT_PATH: &str = "trade_summary.csv";

/// Summary service for the trade summary table
pub struct SummaryService;

impl SummaryService {
    /// Fetch `/get-accounts-summary` and render it in the current sort
    pub async fn load(state: &AppState) -> Result<Applied> {
        let ticket = state.generations.summary.ticket();
        let rows = state.api.get_accounts_summary().await?;
        Ok(Self::apply(state, ticket, rows))
    }

    pub fn apply(state: &AppState, ticket: u64, rows: Vec<TradeSummaryRow>) -> Applied {
        let mut doc = state.document.lock();
        if !state.generations.summary.try_apply(ticket) {
            debug!("Dropping stale summary response (ticket {})", ticket);
            return Applied::Stale;
        }

        let mut session = state.session.write();
        let views = build_summary_rows(&rows, &session.summary_sort);
        render::render_trade_summary(&mut doc, &views, &session.summary_sort);
        session.summary_rows = rows;

        debug!("Rendered {} summary rows", views.len());
        Applied::Rendered
    }

    /// Header click: update the sort and re-render the cached rows
    pub fn sort_by(state: &AppState, key: SummaryKey) {
        let mut doc = state.document.lock();
        let mut session = state.session.write();
        session.summary_sort.click(key);

        let views = build_summary_rows(&session.summary_rows, &session.summary_sort);
        render::render_trade_summary(&mut doc, &views, &session.summary_sort);

        info!(
            "Trade summary sorted by {} ({})",
            key.as_str(),
            if session.summary_sort.ascending {
                "ascending"
            } else {
                "descending"
            }
        );
    }

    /// Fetch a fresh summary and write it as CSV in the current sort order
    pub async fn export(state: &AppState, path: Option<&Path>) -> Result<(PathBuf, usize)> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));

        let rows = state.api.get_accounts_summary().await?;
        let sort = state.session.read().summary_sort;
        let csv = to_csv(&sort.sort_rows(&rows))?;

        tokio::fs::write(&path, csv).await?;
        info!("Exported {} summary rows to {}", rows.len(), path.display());
        Ok((path, rows.len()))
    }
}
