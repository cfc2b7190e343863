//! Backend API module
//!
//! The dashboard treats the copy-trading backend as an external collaborator.
//! Every endpoint is one method on [`DashboardApi`]; [`HttpDashboardApi`] is the
//! reqwest implementation used at runtime.

pub mod http;
pub mod types;

use crate::error::Result;
use async_trait::async_trait;
use types::*;

pub use http::HttpDashboardApi;

/// Outbound calls the dashboard makes
///
/// Every call returns a typed result or one of `AppError::Network`,
/// `AppError::Decode`, `AppError::Server`. Nothing is retried here.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /get-accounts-details`
    async fn get_accounts_details(&self) -> Result<Snapshot>;

    /// `GET /get-accounts-summary`
    async fn get_accounts_summary(&self) -> Result<Vec<TradeSummaryRow>>;

    /// `POST /add-account`
    async fn add_account(&self, request: &AddAccountRequest) -> Result<ActionResponse>;

    /// `POST /edit-account`
    async fn edit_account(&self, request: &EditAccountRequest) -> Result<()>;

    /// `POST /delete-account`
    async fn delete_account(&self, client_id: &str) -> Result<()>;

    /// `POST /toggle-autologin`
    async fn toggle_autologin(&self, client_id: &str, autologin: bool) -> Result<()>;

    /// `POST /refresh-session`
    async fn refresh_session(&self, client_id: &str) -> Result<()>;

    /// `POST /toggle-copy-trading`
    async fn toggle_copy_trading(&self, enabled: bool) -> Result<()>;

    /// `POST /toggle-child-copy`
    async fn toggle_child_copy(&self, client_id: &str, enabled: bool) -> Result<()>;

    /// `POST /set-multiplier`
    async fn set_multiplier(&self, client_id: &str, multiplier: Multiplier) -> Result<()>;

    /// `POST /make-master/{name}`
    async fn make_master(&self, name: &str) -> Result<()>;

    /// `GET /chartink-log`
    async fn get_chartink_log(&self) -> Result<Vec<ChartinkLogEntry>>;

    /// `GET /config.yaml`
    async fn get_copy_config(&self) -> Result<CopyConfig>;

    /// `GET /logout`
    async fn logout(&self) -> Result<()>;
}
