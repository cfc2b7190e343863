//! User actions and the listener handlers that produce them

use crate::api::types::{AddAccountRequest, EditAccountRequest, Multiplier};
use crate::dom::{ids, Document, DomEvent};
use crate::error::{AppError, Result};
use crate::services::preferences_service::SortMode;
use crate::view::{SummaryKey, Tab};
use std::path::PathBuf;

/// Everything a user can ask the dashboard to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Refresh,
    SetSortMode(SortMode),
    ToggleSortMode,
    ToggleDarkMode,
    ShowTab(Tab),
    ToggleAddForm,
    SubmitAddAccount(AddAccountRequest),
    OpenEdit { client_id: String },
    SubmitEdit(EditAccountRequest),
    CancelEdit,
    DeleteAccount { client_id: String },
    ToggleAutologin { client_id: String, enabled: bool },
    RefreshSession { client_id: String },
    ToggleCopyTrading { enabled: bool },
    ToggleChildCopy { client_id: String, enabled: bool },
    SetMultiplier { client_id: String, multiplier: Multiplier },
    MakeMaster { name: String },
    ToggleConsole { client_id: String },
    SortSummary(SummaryKey),
    ExportSummary { path: Option<PathBuf> },
    ViewChart { symbol: String },
    CloseChart,
    Logout,
}

/// Listener payload bound to an element
///
/// Handlers carry only what is fixed at bind time; anything the user typed or
/// picked is read from the event or the document when the event fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Handler {
    Refresh,
    ToggleSortMode,
    ToggleDarkMode,
    ShowTab(Tab),
    ToggleAddForm,
    SubmitAddForm,
    ToggleAutologin { client_id: String },
    RefreshSession { client_id: String },
    EditAccount { client_id: String },
    DeleteAccount { client_id: String },
    SubmitEditForm { client_id: String },
    CancelEdit,
    ToggleCopyTrading,
    ToggleChildCopy { client_id: String },
    SetMultiplier { client_id: String },
    ToggleConsole { client_id: String },
    MakeMasterFromSelect,
    SortSummary(SummaryKey),
    ExportSummary,
    ViewChart { symbol: String },
    CloseChart,
    Logout,
}

impl Handler {
    /// Turn a fired event into an action
    pub fn resolve(&self, event: &DomEvent, doc: &Document) -> Result<Action> {
        let action = match self {
            Handler::Refresh => Action::Refresh,
            Handler::ToggleSortMode => Action::ToggleSortMode,
            Handler::ToggleDarkMode => Action::ToggleDarkMode,
            Handler::ShowTab(tab) => Action::ShowTab(*tab),
            Handler::ToggleAddForm => Action::ToggleAddForm,
            Handler::SubmitAddForm => Action::SubmitAddAccount(AddAccountRequest {
                name: doc.value_of(ids::CLIENT_ID),
                api_key: doc.value_of(ids::API_KEY),
                api_secret: doc.value_of(ids::API_SECRET),
                totp_key: doc.value_of(ids::TOTP_KEY),
                email: doc.value_of(ids::EMAIL_ID),
                mobile: doc.value_of(ids::MOBILE_NO),
            }),
            Handler::ToggleAutologin { client_id } => Action::ToggleAutologin {
                client_id: client_id.clone(),
                enabled: checked(event)?,
            },
            Handler::RefreshSession { client_id } => Action::RefreshSession {
                client_id: client_id.clone(),
            },
            Handler::EditAccount { client_id } => Action::OpenEdit {
                client_id: client_id.clone(),
            },
            Handler::DeleteAccount { client_id } => Action::DeleteAccount {
                client_id: client_id.clone(),
            },
            Handler::SubmitEditForm { client_id } => Action::SubmitEdit(EditAccountRequest {
                client_id: client_id.clone(),
                api_key: doc.value_of(ids::EDIT_API_KEY),
                api_secret: doc.value_of(ids::EDIT_API_SECRET),
                totp_key: doc.value_of(ids::EDIT_TOTP_KEY),
                email: doc.value_of(ids::EDIT_EMAIL),
                mobile: doc.value_of(ids::EDIT_MOBILE),
            }),
            Handler::CancelEdit => Action::CancelEdit,
            Handler::ToggleCopyTrading => Action::ToggleCopyTrading {
                enabled: checked(event)?,
            },
            Handler::ToggleChildCopy { client_id } => Action::ToggleChildCopy {
                client_id: client_id.clone(),
                enabled: checked(event)?,
            },
            Handler::SetMultiplier { client_id } => {
                let raw = event.value.as_deref().unwrap_or_default();
                let multiplier = Multiplier::parse(raw).ok_or_else(|| {
                    AppError::Validation(format!("'{}' is not an offered multiplier", raw))
                })?;
                Action::SetMultiplier {
                    client_id: client_id.clone(),
                    multiplier,
                }
            }
            Handler::ToggleConsole { client_id } => Action::ToggleConsole {
                client_id: client_id.clone(),
            },
            Handler::MakeMasterFromSelect => {
                let name = doc.value_of(ids::NEW_MASTER);
                if name.is_empty() {
                    return Err(AppError::Validation(
                        "Select an account to make master".to_string(),
                    ));
                }
                Action::MakeMaster { name }
            }
            Handler::SortSummary(key) => Action::SortSummary(*key),
            Handler::ExportSummary => Action::ExportSummary { path: None },
            Handler::ViewChart { symbol } => Action::ViewChart {
                symbol: symbol.clone(),
            },
            Handler::CloseChart => Action::CloseChart,
            Handler::Logout => Action::Logout,
        };
        Ok(action)
    }
}

fn checked(event: &DomEvent) -> Result<bool> {
    event
        .checked()
        .ok_or_else(|| AppError::Validation("Expected a checkbox state (on/off)".to_string()))
}
