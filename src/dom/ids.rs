//! Element ids of the dashboard document

// Header
pub const SORT_TOGGLE: &str = "sortToggle";
pub const DARK_MODE_TOGGLE: &str = "dark-mode-toggle";
pub const REFRESH_BUTTON: &str = "refreshBtn";
pub const LOGOUT_BUTTON: &str = "logoutBtn";
pub const NET_PNL: &str = "netPnl";
pub const TOASTS: &str = "toasts";

// Accounts
pub const ACCOUNTS: &str = "accounts";
pub const ADD_FORM_TOGGLE: &str = "addFormToggle";
pub const ADD_ACCOUNT_FORM: &str = "addAccountForm";
pub const ADD_FORM_ERROR: &str = "addFormError";
pub const ADD_ACCOUNT_SUBMIT: &str = "addAccountSubmit";
pub const CLIENT_ID: &str = "clientId";
pub const API_KEY: &str = "apiKey";
pub const API_SECRET: &str = "apiSecret";
pub const TOTP_KEY: &str = "totpKey";
pub const EMAIL_ID: &str = "emailId";
pub const MOBILE_NO: &str = "mobileNo";
pub const MASTER_SELECT: &str = "masterSelect";
pub const CHILD_SELECT: &str = "childSelect";

// Edit modal
pub const EDIT_MODAL: &str = "editModal";
pub const EDIT_API_KEY: &str = "editApiKey";
pub const EDIT_API_SECRET: &str = "editApiSecret";
pub const EDIT_TOTP_KEY: &str = "editTotpKey";
pub const EDIT_EMAIL: &str = "editEmail";
pub const EDIT_MOBILE: &str = "editMobile";
pub const EDIT_SAVE: &str = "editSave";
pub const EDIT_CANCEL: &str = "editCancel";
pub const EDIT_ERROR: &str = "editError";

// Copy trading
pub const MASTER_PANEL: &str = "masterPanel";
pub const MASTER_CLIENT_ID: &str = "masterClientId";
pub const MASTER_BALANCE: &str = "masterBalance";
pub const MASTER_PNL: &str = "masterPnl";
pub const MASTER_NET_PNL: &str = "masterNetPnl";
pub const COPY_ALL_TOGGLE: &str = "copyAllToggle";
pub const MASTER_CONSOLE: &str = "masterConsole";
pub const CHILD_ACCOUNTS: &str = "childAccountsContainer";
pub const NEW_MASTER: &str = "new-master";
pub const MAKE_MASTER: &str = "makeMasterBtn";

// Trade summary
pub const TRADE_SUMMARY_TABLE: &str = "tradeSummaryTable";
pub const TRADE_SUMMARY_BODY: &str = "tradeSummaryBody";
pub const EXPORT_CSV: &str = "exportCsvBtn";

// Chartink
pub const CHARTINK_TABLE: &str = "chartinkTable";
pub const CHARTINK_BODY: &str = "chartinkBody";

// Chart overlay
pub const CHART_MODAL: &str = "chartModal";
pub const CHART_TITLE: &str = "chartTitle";
pub const CHART_FRAME: &str = "tvChart";
pub const CHART_CLOSE: &str = "chartClose";

pub fn tab_button(section_id: &str) -> String {
    format!("tab-{}", section_id)
}

pub fn summary_header(key: &str) -> String {
    format!("th-{}", key)
}

// Per-account controls
pub fn autologin(name: &str) -> String {
    format!("autologin-{}", name)
}

pub fn reconnect(name: &str) -> String {
    format!("reconnect-{}", name)
}

pub fn edit(name: &str) -> String {
    format!("edit-{}", name)
}

pub fn delete(name: &str) -> String {
    format!("delete-{}", name)
}

pub fn multiplier(name: &str) -> String {
    format!("multiplier-{}", name)
}

pub fn child_copy(name: &str) -> String {
    format!("copy-{}", name)
}

pub fn console_toggle(name: &str) -> String {
    format!("console-toggle-{}", name)
}

pub fn console(name: &str) -> String {
    format!("console-{}", name)
}

/// Chart-link scopes outside the client-id namespace
pub const MASTER_CHART_SCOPE: &str = "__master";
pub const CHARTINK_CHART_SCOPE: &str = "__chartink";

/// Child consoles scope their links by client id
pub fn chart_link(scope: &str, index: usize) -> String {
    format!("chart-{}-{}", scope, index)
}

pub fn child_edit(name: &str) -> String {
    format!("child-edit-{}", name)
}

pub fn child_delete(name: &str) -> String {
    format!("child-delete-{}", name)
}

pub fn toast(id: u64) -> String {
    format!("toast-{}", id)
}
