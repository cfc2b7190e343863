//! Chartink Service
//!
//! Alert log fetched on demand when the chartink tab is shown, and on scheduled
//! cycles while it stays visible.

use super::Applied;
use crate::api::types::ChartinkLogEntry;
use crate::error::Result;
use crate::render;
use crate::state::AppState;
use crate::view::build_chartink_rows;
use tracing::debug;

pub struct ChartinkService;

impl ChartinkService {
    pub async fn load(state: &AppState) -> Result<Applied> {
        let ticket = state.generations.chartink.ticket();
        let log = state.api.get_chartink_log().await?;
        Ok(Self::apply(state, ticket, &log))
    }

    fn apply(state: &AppState, ticket: u64, log: &[ChartinkLogEntry]) -> Applied {
        let mut doc = state.document.lock();
        if !state.generations.chartink.try_apply(ticket) {
            debug!("Dropping stale chartink response (ticket {})", ticket);
            return Applied::Stale;
        }

        let dark = state.dark_mode();
        render::render_chartink(&mut doc, &build_chartink_rows(log), dark);
        debug!("Rendered {} chartink entries", log.len());
        Applied::Rendered
    }
}
