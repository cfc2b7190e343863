//! Test fixtures and a scripted backend

use crate::api::types::*;
use crate::api::DashboardApi;
use crate::commands::Prompt;
use crate::config::AppConfig;
use crate::db::LocalStorage;
use crate::error::{AppError, Result};
use crate::notify::SessionAlertMode;
use crate::state::AppState;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub fn account(name: &str, opening_balance: f64, balance: f64) -> Account {
    Account {
        name: name.to_string(),
        is_master: false,
        status: true,
        opening_balance,
        balance,
        pnl: 0.0,
        autologin: false,
        copy_enabled: false,
        multiplier: 1.0,
        orders: Vec::new(),
        positions: Vec::new(),
    }
}

pub fn summary_row(name: &str, net_pnl: f64) -> TradeSummaryRow {
    TradeSummaryRow {
        name: name.to_string(),
        live_balance: Some(10000.0 + net_pnl),
        net_pnl,
        total_trades: 4,
        wins: 2,
        losses: 2,
        win_rate: 50.0,
        top_symbol: "SBIN".to_string(),
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        base_url: Url::parse("http://127.0.0.1:5000").unwrap(),
        refresh_interval: Duration::from_secs(60),
        request_timeout: Duration::from_secs(5),
        toast_ttl: Duration::from_secs(60),
        data_dir: PathBuf::from("."),
        html_path: None,
        session_cookie: None,
        session_alerts: SessionAlertMode::Edge,
        headless: true,
    }
}

pub fn test_state(api: Arc<MockApi>) -> AppState {
    let storage = Arc::new(LocalStorage::in_memory().unwrap());
    AppState::new(test_config(), api, storage).unwrap()
}

/// Answers every confirmation the same way
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Prompt for AutoConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Scripted backend that records every call
pub struct MockApi {
    accounts: Mutex<Vec<Account>>,
    summary: Mutex<Vec<TradeSummaryRow>>,
    chartink_log: Mutex<Vec<ChartinkLogEntry>>,
    child_names: Mutex<Vec<String>>,
    add_response: Mutex<ActionResponse>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            summary: Mutex::new(Vec::new()),
            chartink_log: Mutex::new(Vec::new()),
            child_names: Mutex::new(Vec::new()),
            add_response: Mutex::new(ActionResponse {
                status: "success".to_string(),
                message: None,
            }),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockApi {
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let api = Self::default();
        *api.accounts.lock() = accounts;
        api
    }

    /// Make `method` fail with a network error until [`MockApi::succeed`]
    pub fn fail(&self, method: &str) {
        self.failing.lock().insert(method.to_string());
    }

    pub fn succeed(&self, method: &str) {
        self.failing.lock().remove(method);
    }

    pub fn set_summary(&self, rows: Vec<TradeSummaryRow>) {
        *self.summary.lock() = rows;
    }

    pub fn set_chartink_log(&self, log: Vec<ChartinkLogEntry>) {
        *self.chartink_log.lock() = log;
    }

    pub fn set_child_names(&self, names: &[&str]) {
        *self.child_names.lock() = names.iter().map(|n| n.to_string()).collect();
    }

    pub fn set_add_response(&self, response: ActionResponse) {
        *self.add_response.lock() = response;
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|(m, _)| m == method).count()
    }

    /// Recorded arguments of every call to `method`, oldest first
    pub fn calls_to(&self, method: &str) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, args)| args.clone())
            .collect()
    }

    fn record(&self, method: &str, args: String) -> Result<()> {
        self.calls.lock().push((method.to_string(), args));
        if self.failing.lock().contains(method) {
            return Err(AppError::Network(format!("{} unreachable", method)));
        }
        Ok(())
    }
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn get_accounts_details(&self) -> Result<Snapshot> {
        self.record("get_accounts_details", String::new())?;
        Ok(Snapshot::new(self.accounts.lock().clone()))
    }

    async fn get_accounts_summary(&self) -> Result<Vec<TradeSummaryRow>> {
        self.record("get_accounts_summary", String::new())?;
        Ok(self.summary.lock().clone())
    }

    async fn add_account(&self, request: &AddAccountRequest) -> Result<ActionResponse> {
        self.record("add_account", request.name.clone())?;
        Ok(self.add_response.lock().clone())
    }

    async fn edit_account(&self, request: &EditAccountRequest) -> Result<()> {
        self.record("edit_account", request.client_id.clone())
    }

    async fn delete_account(&self, client_id: &str) -> Result<()> {
        self.record("delete_account", client_id.to_string())
    }

    async fn toggle_autologin(&self, client_id: &str, autologin: bool) -> Result<()> {
        self.record("toggle_autologin", format!("{} {}", client_id, autologin))
    }

    async fn refresh_session(&self, client_id: &str) -> Result<()> {
        self.record("refresh_session", client_id.to_string())
    }

    async fn toggle_copy_trading(&self, enabled: bool) -> Result<()> {
        self.record("toggle_copy_trading", enabled.to_string())
    }

    async fn toggle_child_copy(&self, client_id: &str, enabled: bool) -> Result<()> {
        self.record("toggle_child_copy", format!("{} {}", client_id, enabled))
    }

    async fn set_multiplier(&self, client_id: &str, multiplier: Multiplier) -> Result<()> {
        self.record(
            "set_multiplier",
            format!("{} {}", client_id, multiplier.value()),
        )
    }

    async fn make_master(&self, name: &str) -> Result<()> {
        self.record("make_master", name.to_string())
    }

    async fn get_chartink_log(&self) -> Result<Vec<ChartinkLogEntry>> {
        self.record("get_chartink_log", String::new())?;
        Ok(self.chartink_log.lock().clone())
    }

    async fn get_copy_config(&self) -> Result<CopyConfig> {
        self.record("get_copy_config", String::new())?;
        Ok(CopyConfig {
            master: None,
            child_accounts: self
                .child_names
                .lock()
                .iter()
                .map(|name| ConfiguredAccount { name: name.clone() })
                .collect(),
        })
    }

    async fn logout(&self) -> Result<()> {
        self.record("logout", String::new())
    }
}
