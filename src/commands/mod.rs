//! User commands
//!
//! Every user interaction arrives as an [`Action`], either resolved from a DOM
//! event through a bound [`Handler`] or typed at the console. [`dispatch`] runs the
//! backend call, waits for it, re-renders what changed and turns any failure into
//! a toast. Nothing here panics or propagates an error to the caller.

mod action;
pub mod accounts;
pub mod copy_trading;
pub mod navigation;
pub mod preferences;
pub mod summary;

pub use action::{Action, Handler};

use crate::error::{ErrorResponse, Result};
use crate::state::AppState;
use async_trait::async_trait;
use tracing::{debug, warn};

/// User input requested mid-action, the counterpart of the browser's `confirm()`
#[async_trait]
pub trait Prompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;

    /// Free-text answer; `None` when no input is available
    async fn ask(&self, _question: &str) -> Option<String> {
        None
    }
}

/// What the caller should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Run one action to completion
pub async fn dispatch(state: &AppState, action: Action, prompt: &dyn Prompt) -> Outcome {
    debug!("Dispatching {:?}", action);

    let result = run(state, action, prompt).await;
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            let response = ErrorResponse::from(&e);
            warn!("Action failed [{}]: {}", response.code, response.message);
            state.notifier.error(e.user_message());
            Outcome::Continue
        }
    };

    state.publish();
    outcome
}

async fn run(state: &AppState, action: Action, prompt: &dyn Prompt) -> Result<Outcome> {
    match action {
        Action::Refresh => navigation::refresh(state).await?,
        Action::SetSortMode(mode) => preferences::set_sort_mode(state, mode)?,
        Action::ToggleSortMode => preferences::toggle_sort_mode(state)?,
        Action::ToggleDarkMode => preferences::toggle_dark_mode(state)?,
        Action::ShowTab(tab) => navigation::show_tab(state, tab).await?,
        Action::ToggleAddForm => accounts::toggle_add_form(state),
        Action::SubmitAddAccount(request) => accounts::add_account(state, request).await?,
        Action::OpenEdit { client_id } => accounts::open_edit(state, &client_id)?,
        Action::SubmitEdit(request) => accounts::submit_edit(state, request).await?,
        Action::CancelEdit => accounts::cancel_edit(state),
        Action::DeleteAccount { client_id } => {
            accounts::delete_account(state, &client_id, prompt).await?
        }
        Action::ToggleAutologin { client_id, enabled } => {
            accounts::toggle_autologin(state, &client_id, enabled).await?
        }
        Action::RefreshSession { client_id } => {
            accounts::refresh_session(state, &client_id).await?
        }
        Action::ToggleCopyTrading { enabled } => {
            copy_trading::toggle_copy_trading(state, enabled).await?
        }
        Action::ToggleChildCopy { client_id, enabled } => {
            copy_trading::toggle_child_copy(state, &client_id, enabled).await?
        }
        Action::SetMultiplier {
            client_id,
            multiplier,
        } => copy_trading::set_multiplier(state, &client_id, multiplier).await?,
        Action::MakeMaster { name } => copy_trading::make_master(state, &name).await?,
        Action::ToggleConsole { client_id } => copy_trading::toggle_console(state, &client_id)?,
        Action::SortSummary(key) => summary::sort_summary(state, key),
        Action::ExportSummary { path } => summary::export_summary(state, path.as_deref()).await?,
        Action::ViewChart { symbol } => navigation::view_chart(state, &symbol)?,
        Action::CloseChart => navigation::close_chart(state),
        Action::Logout => return navigation::logout(state, prompt).await,
    }
    Ok(Outcome::Continue)
}
