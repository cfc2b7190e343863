//! Copy-trading commands

use crate::api::types::Multiplier;
use crate::error::{AppError, Result};
use crate::render;
use crate::services::{AccountsService, RefreshService};
use crate::state::AppState;
use tracing::{info, warn};

/// Master-wide copy switch
pub async fn toggle_copy_trading(state: &AppState, enabled: bool) -> Result<()> {
    state.api.toggle_copy_trading(enabled).await?;
    state.notifier.success_chime(format!(
        "Copy Trading {}",
        if enabled { "Enabled" } else { "Disabled" }
    ));
    AccountsService::load(state).await?;
    Ok(())
}

pub async fn toggle_child_copy(state: &AppState, client_id: &str, enabled: bool) -> Result<()> {
    state.api.toggle_child_copy(client_id, enabled).await?;
    info!(
        "Copy {} for {}",
        if enabled { "enabled" } else { "disabled" },
        client_id
    );
    AccountsService::load(state).await?;
    Ok(())
}

pub async fn set_multiplier(
    state: &AppState,
    client_id: &str,
    multiplier: Multiplier,
) -> Result<()> {
    state.api.set_multiplier(client_id, multiplier).await?;
    state
        .notifier
        .success(format!("Multiplier for {} set to {}", client_id, multiplier));
    AccountsService::load(state).await?;
    Ok(())
}

/// Promote `name` to master; roles flip globally, so every view reloads
pub async fn make_master(state: &AppState, name: &str) -> Result<()> {
    state.api.make_master(name).await?;
    state
        .notifier
        .success_chime(format!("✅ {} is now Master", name));

    if let Err(e) = RefreshService::load_master_choices(state).await {
        warn!("Failed to reload master choices: {}", e);
    }
    RefreshService::refresh_all(state).await;
    Ok(())
}

/// Show or hide a child's order/position console; no fetch
pub fn toggle_console(state: &AppState, client_id: &str) -> Result<()> {
    let mut doc = state.document.lock();
    let mut session = state.session.write();

    let open = !session.open_consoles.contains(client_id);
    if !render::set_console_open(&mut doc, client_id, open) {
        return Err(AppError::Validation(format!(
            "No console for '{}'",
            client_id
        )));
    }

    if open {
        session.open_consoles.insert(client_id.to_string());
    } else {
        session.open_consoles.remove(client_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ids;
    use crate::test_support::{account, test_state, MockApi};
    use std::sync::Arc;

    fn topology() -> Arc<MockApi> {
        let mut master = account("M1", 100.0, 100.0);
        master.is_master = true;
        Arc::new(MockApi::with_accounts(vec![master, account("C1", 100.0, 100.0)]))
    }

    fn console_hidden(state: &AppState) -> bool {
        state
            .document
            .lock()
            .get_element_by_id(&ids::console("C1"))
            .unwrap()
            .is_hidden()
    }

    #[tokio::test]
    async fn test_console_toggle_survives_refresh() {
        let api = topology();
        let state = test_state(api.clone());
        AccountsService::load(&state).await.unwrap();
        assert!(console_hidden(&state));

        toggle_console(&state, "C1").unwrap();
        assert!(!console_hidden(&state));
        assert_eq!(api.call_count("get_accounts_details"), 1);

        AccountsService::load(&state).await.unwrap();
        assert!(!console_hidden(&state));

        toggle_console(&state, "C1").unwrap();
        assert!(console_hidden(&state));
        assert!(toggle_console(&state, "M1").is_err());
    }

    #[tokio::test]
    async fn test_make_master_reloads_everything() {
        let api = topology();
        api.set_child_names(&["C1"]);
        let state = test_state(api.clone());

        make_master(&state, "C1").await.unwrap();

        assert_eq!(api.calls_to("make_master"), vec!["C1"]);
        assert_eq!(api.call_count("get_copy_config"), 1);
        assert_eq!(api.call_count("get_accounts_details"), 1);
        assert_eq!(api.call_count("get_accounts_summary"), 1);
        assert!(state
            .notifier
            .active()
            .iter()
            .any(|t| t.message == "✅ C1 is now Master" && t.chime));
    }

    #[tokio::test]
    async fn test_set_multiplier_awaits_then_reloads() {
        let api = topology();
        let state = test_state(api.clone());

        set_multiplier(&state, "C1", Multiplier::parse("3").unwrap())
            .await
            .unwrap();
        assert_eq!(api.calls_to("set_multiplier"), vec!["C1 3"]);
        assert_eq!(api.call_count("get_accounts_details"), 1);
    }
}
