//! Trade summary commands

use crate::error::Result;
use crate::services::SummaryService;
use crate::state::AppState;
use crate::view::SummaryKey;
use std::path::Path;

/// Header click; re-sorts the cached rows without a fetch
pub fn sort_summary(state: &AppState, key: SummaryKey) {
    SummaryService::sort_by(state, key);
}

pub async fn export_summary(state: &AppState, path: Option<&Path>) -> Result<()> {
    let (path, rows) = SummaryService::export(state, path).await?;
    state
        .notifier
        .success(format!("Exported {} rows to {}", rows, path.display()));
    Ok(())
}
