//! Account management commands

use super::Prompt;
use crate::api::types::{AddAccountRequest, EditAccountRequest};
use crate::dom::ids;
use crate::error::{AppError, Result};
use crate::render;
use crate::services::AccountsService;
use crate::state::{AddFormState, AppState};
use tracing::info;

pub const MISSING_FIELDS: &str = "Please fill all required fields.";

/// Open or close the add-account form; ignored while a submission is in flight
pub fn toggle_add_form(state: &AppState) {
    let mut doc = state.document.lock();
    let mut session = state.session.write();
    session.add_form = match session.add_form {
        AddFormState::Closed => AddFormState::Open,
        AddFormState::Open => AddFormState::Closed,
        AddFormState::Submitting => AddFormState::Submitting,
    };
    render::render_add_form(&mut doc, session.add_form);
}

fn set_add_form(state: &AppState, form: AddFormState, error: Option<&str>) {
    let mut doc = state.document.lock();
    state.session.write().add_form = form;
    render::render_add_form(&mut doc, form);
    render::set_form_error(&mut doc, ids::ADD_FORM_ERROR, error);
}

/// Validate locally, submit, and close the form only if the backend accepts it
pub async fn add_account(state: &AppState, request: AddAccountRequest) -> Result<()> {
    if request.name.is_empty()
        || request.api_key.is_empty()
        || request.api_secret.is_empty()
        || request.totp_key.is_empty()
    {
        set_add_form(state, AddFormState::Open, Some(MISSING_FIELDS));
        return Err(AppError::Validation(MISSING_FIELDS.to_string()));
    }

    if AccountsService::exists(state, &request.name) {
        let message = format!("🚫 Account '{}' already exists.", request.name);
        set_add_form(state, AddFormState::Open, Some(&message));
        return Err(AppError::Validation(message));
    }

    info!("Adding account {}", request.name);
    set_add_form(state, AddFormState::Submitting, None);

    let response = match state.api.add_account(&request).await {
        Ok(response) => response,
        Err(e) => {
            set_add_form(state, AddFormState::Open, Some(&e.user_message()));
            return Err(e);
        }
    };

    if !response.is_success() {
        let message = response.message_or("Add account failed");
        set_add_form(state, AddFormState::Open, Some(&message));
        state.notifier.outcome(message, false, false);
        return Ok(());
    }

    state
        .notifier
        .success_chime(response.message_or(&format!("Account {} added", request.name)));
    set_add_form(state, AddFormState::Closed, None);
    render::clear_add_form(&mut state.document.lock());

    AccountsService::load(state).await?;
    Ok(())
}

/// Open the edit modal for one account
pub fn open_edit(state: &AppState, client_id: &str) -> Result<()> {
    let known = state
        .session
        .read()
        .snapshot
        .as_ref()
        .map_or(true, |s| s.find(client_id).is_some());
    if !known {
        return Err(AppError::Validation(format!(
            "Unknown account '{}'",
            client_id
        )));
    }

    let mut doc = state.document.lock();
    let dark = state.dark_mode();
    state.session.write().edit_modal = Some(client_id.to_string());
    render::open_edit_modal(&mut doc, client_id, dark);
    Ok(())
}

/// Save the edit modal; it stays open with the error if the save fails
pub async fn submit_edit(state: &AppState, request: EditAccountRequest) -> Result<()> {
    let editing = state.session.read().edit_modal.clone();
    if editing.as_deref() != Some(request.client_id.as_str()) {
        return Err(AppError::Validation(format!(
            "No edit open for '{}'",
            request.client_id
        )));
    }

    info!("Editing account {}", request.client_id);
    if let Err(e) = state.api.edit_account(&request).await {
        render::set_form_error(
            &mut state.document.lock(),
            ids::EDIT_ERROR,
            Some(&e.user_message()),
        );
        return Err(e);
    }

    cancel_edit(state);
    state
        .notifier
        .success(format!("Account {} updated", request.client_id));
    AccountsService::load(state).await?;
    Ok(())
}

pub fn cancel_edit(state: &AppState) {
    let mut doc = state.document.lock();
    state.session.write().edit_modal = None;
    render::close_edit_modal(&mut doc);
}

/// Delete after explicit confirmation
pub async fn delete_account(state: &AppState, client_id: &str, prompt: &dyn Prompt) -> Result<()> {
    if !prompt
        .confirm(&format!("Delete account {}?", client_id))
        .await
    {
        info!("Delete of {} cancelled", client_id);
        return Ok(());
    }

    state.api.delete_account(client_id).await?;
    state.session.write().open_consoles.remove(client_id);
    state
        .notifier
        .success(format!("Account {} deleted", client_id));

    AccountsService::load(state).await?;
    Ok(())
}

pub async fn toggle_autologin(state: &AppState, client_id: &str, enabled: bool) -> Result<()> {
    state.api.toggle_autologin(client_id, enabled).await?;
    state.notifier.success(format!(
        "AutoLogin {} for {}",
        if enabled { "enabled" } else { "disabled" },
        client_id
    ));
    AccountsService::load(state).await?;
    Ok(())
}

/// Ask the backend to log the broker session in again
pub async fn refresh_session(state: &AppState, client_id: &str) -> Result<()> {
    state.api.refresh_session(client_id).await?;
    state
        .notifier
        .success(format!("Reconnect requested for {}", client_id));
    AccountsService::load(state).await?;
    Ok(())
}
