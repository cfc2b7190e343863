//! Refresh, tabs, chart overlay and logout

use super::{Outcome, Prompt};
use crate::error::{AppError, Result};
use crate::render;
use crate::services::{ChartinkService, RefreshService};
use crate::state::AppState;
use crate::view::{chart_overlay, Tab};
use tracing::info;

pub const LOGOUT_PROMPT: &str = "Are you sure you want to logout?";

/// Manual refresh; failures are already reported by the cycle's own toast
pub async fn refresh(state: &AppState) -> Result<()> {
    RefreshService::refresh_all(state).await;
    Ok(())
}

/// Switch tabs; the chartink log is fetched every time its tab is shown
pub async fn show_tab(state: &AppState, tab: Tab) -> Result<()> {
    {
        let mut doc = state.document.lock();
        state.session.write().active_tab = tab;
        render::render_tabs(&mut doc, tab);
    }

    if tab == Tab::Chartink {
        ChartinkService::load(state).await?;
    }
    Ok(())
}

pub fn view_chart(state: &AppState, symbol: &str) -> Result<()> {
    if symbol.trim().is_empty() {
        return Err(AppError::Validation("No symbol to chart".to_string()));
    }

    let overlay = chart_overlay(symbol);
    info!("Opening chart for {}", overlay.symbol);

    let mut doc = state.document.lock();
    render::render_chart(&mut doc, Some(&overlay));
    Ok(())
}

pub fn close_chart(state: &AppState) {
    let mut doc = state.document.lock();
    render::render_chart(&mut doc, None);
}

/// End the backend session after confirmation
pub async fn logout(state: &AppState, prompt: &dyn Prompt) -> Result<Outcome> {
    if !prompt.confirm(LOGOUT_PROMPT).await {
        return Ok(Outcome::Continue);
    }

    state.api.logout().await?;
    info!("Logged out");
    Ok(Outcome::Quit)
}
