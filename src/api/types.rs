//! Wire types for the copy-trading backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier values offered by the child-card selector
pub const MULTIPLIER_CHOICES: [f64; 11] = [0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];

/// Order line as reported for an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub time: String,
    #[serde(alias = "stock")]
    pub symbol: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub variety: String,
}

/// Open position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    #[serde(default)]
    pub qty: i64,
}

/// Account as returned by `/get-accounts-details`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique client id
    pub name: String,
    #[serde(default)]
    pub is_master: bool,
    /// Broker session alive
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub opening_balance: f64,
    #[serde(default)]
    pub balance: f64,
    /// Today's P&L
    #[serde(default)]
    pub pnl: f64,
    #[serde(default)]
    pub autologin: bool,
    #[serde(default)]
    pub copy_enabled: bool,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub positions: Vec<Position>,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Account {
    /// Balance minus opening balance
    pub fn net_pnl(&self) -> f64 {
        self.balance - self.opening_balance
    }

    /// Net change in percent of the opening balance, zero when there is no opening balance
    pub fn percent_change(&self) -> f64 {
        if self.opening_balance == 0.0 {
            0.0
        } else {
            self.net_pnl() / self.opening_balance * 100.0
        }
    }
}

/// `{accounts: Account[]}`
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

/// One fetch of `/get-accounts-details`; replaces any previous snapshot wholesale
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
}

impl Snapshot {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// The master account, if the backend reported one
    pub fn master(&self) -> Option<&Account> {
        self.accounts.iter().find(|a| a.is_master)
    }

    pub fn children(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(|a| !a.is_master)
    }

    pub fn find(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }
}

/// Row of `/get-accounts-summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSummaryRow {
    pub name: String,
    #[serde(default)]
    pub live_balance: Option<f64>,
    #[serde(default)]
    pub net_pnl: f64,
    #[serde(default)]
    pub total_trades: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub top_symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub accounts: Vec<TradeSummaryRow>,
}

/// Chartink alert fill, appended by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartinkLogEntry {
    pub timestamp: String,
    pub symbol: String,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartinkLogResponse {
    #[serde(default)]
    pub log: Vec<ChartinkLogEntry>,
}

/// Subset of the backend's `config.yaml` the dashboard reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CopyConfig {
    #[serde(default)]
    pub master: Option<ConfiguredAccount>,
    #[serde(default)]
    pub child_accounts: Vec<ConfiguredAccount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfiguredAccount {
    pub name: String,
}

impl CopyConfig {
    pub fn child_names(&self) -> Vec<String> {
        self.child_accounts.iter().map(|c| c.name.clone()).collect()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// `/add-account` body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddAccountRequest {
    pub name: String,
    pub api_key: String,
    pub api_secret: String,
    pub totp_key: String,
    pub email: String,
    pub mobile: String,
}

/// `/edit-account` body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditAccountRequest {
    pub client_id: String,
    pub api_key: String,
    pub api_secret: String,
    pub totp_key: String,
    pub email: String,
    pub mobile: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientIdRequest<'a> {
    pub client_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutologinRequest<'a> {
    pub client_id: &'a str,
    pub autologin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopyTradingRequest {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChildCopyRequest<'a> {
    pub client_id: &'a str,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MultiplierRequest<'a> {
    pub client_id: &'a str,
    pub multiplier: f64,
}

/// `{status, message}` envelope returned by mutating endpoints that report an outcome
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

// ============================================================================
// Multiplier
// ============================================================================

/// Copy multiplier; one of [`MULTIPLIER_CHOICES`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multiplier(f64);

impl Multiplier {
    /// Accept only values the selector offers
    pub fn from_choice(value: f64) -> Option<Self> {
        MULTIPLIER_CHOICES
            .iter()
            .copied()
            .find(|c| (c - value).abs() < 1e-9)
            .map(Multiplier)
    }

    /// Parse selector input such as `2`, `0.5` or `2x`
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim().trim_end_matches(['x', 'X']);
        trimmed.parse::<f64>().ok().and_then(Self::from_choice)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// True when an account's stored multiplier equals this choice
    pub fn matches(self, stored: f64) -> bool {
        (self.0 - stored).abs() < 1e-9
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_defaults_for_missing_fields() {
        let account: Account = serde_json::from_str(r#"{"name": "AB1234"}"#).unwrap();
        assert_eq!(account.name, "AB1234");
        assert!(!account.is_master);
        assert!(!account.status);
        assert_eq!(account.multiplier, 1.0);
        assert!(account.orders.is_empty());
    }

    #[test]
    fn test_order_accepts_stock_alias() {
        let order: Order =
            serde_json::from_str(r#"{"time": "09:20", "stock": "SBIN", "action": "BUY", "qty": 5}"#)
                .unwrap();
        assert_eq!(order.symbol, "SBIN");
        assert_eq!(order.qty, 5);
    }

    #[test]
    fn test_percent_change_zero_opening_balance() {
        let account = Account {
            name: "ZERO".to_string(),
            is_master: false,
            status: true,
            opening_balance: 0.0,
            balance: 5000.0,
            pnl: 0.0,
            autologin: false,
            copy_enabled: false,
            multiplier: 1.0,
            orders: vec![],
            positions: vec![],
        };
        assert_eq!(account.percent_change(), 0.0);
        assert_eq!(account.net_pnl(), 5000.0);
    }

    #[test]
    fn test_percent_change() {
        let account: Account = serde_json::from_str(
            r#"{"name": "A", "opening_balance": 10000, "balance": 10100}"#,
        )
        .unwrap();
        assert!((account.percent_change() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_copy_config_from_yaml() {
        let yaml = r#"
master:
  name: MASTER1
  api_key: abc
child_accounts:
  - name: CHILD1
    multiplier: 2
  - name: CHILD2
"#;
        let config: CopyConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.child_names(), vec!["CHILD1", "CHILD2"]);
        assert_eq!(config.master.unwrap().name, "MASTER1");
    }

    #[test]
    fn test_multiplier_parse() {
        assert_eq!(Multiplier::parse("2").map(Multiplier::value), Some(2.0));
        assert_eq!(Multiplier::parse("0.5x").map(Multiplier::value), Some(0.5));
        assert!(Multiplier::parse("1.5").is_none());
        assert!(Multiplier::parse("-1").is_none());
        assert!(Multiplier::parse("abc").is_none());
        assert_eq!(Multiplier::parse("10").unwrap().to_string(), "10x");
        assert_eq!(Multiplier::parse("0.5").unwrap().to_string(), "0.5x");
    }

    #[test]
    fn test_action_response() {
        let ok: ActionResponse =
            serde_json::from_str(r#"{"status": "success", "message": "Added"}"#).unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.message_or("x"), "Added");

        let err: ActionResponse = serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        assert!(!err.is_success());
        assert_eq!(err.message_or("Add account failed"), "Add account failed");
    }
}
