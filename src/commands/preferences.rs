//! Sort and theme commands

use crate::error::Result;
use crate::render::theme;
use crate::services::{AccountsService, SortMode};
use crate::state::AppState;

/// Persist the sort mode and re-sort the cached snapshot
///
/// Re-renders even when the mode did not change so labels always match.
pub fn set_sort_mode(state: &AppState, mode: SortMode) -> Result<()> {
    state.preferences.set_sort_mode(mode)?;
    AccountsService::rerender(state)
}

pub fn toggle_sort_mode(state: &AppState) -> Result<()> {
    let current = state.preferences.get_preferences()?.sort_mode;
    set_sort_mode(state, current.toggled())
}

/// Flip and persist dark mode, then flip the document's classes in place
///
/// Persisted under the document lock; renders read the theme under the same lock.
pub fn toggle_dark_mode(state: &AppState) -> Result<()> {
    let mut doc = state.document.lock();
    state.preferences.toggle_dark_mode()?;
    theme::toggle(&mut doc);
    Ok(())
}
