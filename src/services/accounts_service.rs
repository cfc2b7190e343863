//! Accounts Service
//!
//! Fetches the account snapshot and renders both views built from it: the
//! account list and the copy-trading view. One fetch feeds both, so the two views
//! always show the same point in time.

use super::Applied;
use crate::api::types::Snapshot;
use crate::error::Result;
use crate::notify::session_expired_message;
use crate::render;
use crate::state::AppState;
use crate::view::{build_account_list, build_copy_trading};
use tracing::{debug, info};

/// Accounts service for fetch-and-render
pub struct AccountsService;

impl AccountsService {
    /// Fetch `/get-accounts-details` and render it
    ///
    /// On failure nothing is touched: the previous render stays on screen.
    pub async fn load(state: &AppState) -> Result<Applied> {
        let ticket = state.generations.accounts.ticket();
        let snapshot = state.api.get_accounts_details().await?;
        Self::apply(state, ticket, snapshot)
    }

    /// Render a fetched snapshot unless a newer one was rendered first
    ///
    /// Preferences are read under the document lock, like the theme toggle writes them.
    pub fn apply(state: &AppState, ticket: u64, snapshot: Snapshot) -> Result<Applied> {
        let count = snapshot.accounts.len();

        let expired = {
            let mut doc = state.document.lock();
            if !state.generations.accounts.try_apply(ticket) {
                debug!("Dropping stale accounts response (ticket {})", ticket);
                return Ok(Applied::Stale);
            }
            let prefs = state.preferences.get_preferences()?;

            let mut session = state.session.write();
            let expired = session.session_watch.observe(&snapshot.accounts);

            session
                .open_consoles
                .retain(|name| snapshot.find(name).is_some());

            render::render_accounts(
                &mut doc,
                &build_account_list(&snapshot, &prefs),
                prefs.dark_mode,
            );
            render::render_copy_trading(
                &mut doc,
                build_copy_trading(&snapshot, &session.open_consoles).as_ref(),
                prefs.dark_mode,
            );

            session.snapshot = Some(snapshot);
            expired
        };

        for name in expired {
            state.notifier.error(session_expired_message(&name));
        }

        info!("Rendered {} accounts", count);
        Ok(Applied::Rendered)
    }

    /// Re-render the cached snapshot (after a sort change); no fetch
    pub fn rerender(state: &AppState) -> Result<()> {
        let mut doc = state.document.lock();
        let prefs = state.preferences.get_preferences()?;
        let session = state.session.read();
        let snapshot = match &session.snapshot {
            Some(snapshot) => snapshot,
            None => {
                debug!("No snapshot yet; nothing to re-render");
                return Ok(());
            }
        };

        render::render_accounts(
            &mut doc,
            &build_account_list(snapshot, &prefs),
            prefs.dark_mode,
        );
        render::render_copy_trading(
            &mut doc,
            build_copy_trading(snapshot, &session.open_consoles).as_ref(),
            prefs.dark_mode,
        );
        Ok(())
    }

    /// True when the current snapshot already holds an account named `name`
    pub fn exists(state: &AppState, name: &str) -> bool {
        state
            .session
            .read()
            .snapshot
            .as_ref()
            .map_or(false, |s| s.find(name).is_some())
    }
}
