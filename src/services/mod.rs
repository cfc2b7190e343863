//! Services Layer
//!
//! Fetch-and-render logic shared by the console commands and the refresh
//! scheduler.
//!
//! # Architecture
//!
//! ```text
//! Console  --> Commands ──┐
//!                         ├──> Services --> DashboardApi
//! Scheduler ──────────────┘        └──────> View models --> Document
//! ```
//!
//! # Services
//!
//! - `AccountsService` - Account snapshot, account list and copy-trading view
//! - `SummaryService` - Trade summary table and CSV export
//! - `ChartinkService` - Chartink alert log
//! - `RefreshService` - Full refresh cycle, new-master dropdown
//! - `PreferenceStore` - Persisted sort and dark-mode preferences

pub mod accounts_service;
pub mod chartink_service;
pub mod preferences_service;
pub mod refresh_service;
pub mod summary_service;

pub use accounts_service::AccountsService;
pub use chartink_service::ChartinkService;
pub use preferences_service::{PreferenceStore, Preferences, SortMode};
pub use refresh_service::{CycleReport, RefreshService};
pub use summary_service::SummaryService;

/// Whether a fetched response made it to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Rendered,
    /// A newer response for the same view was rendered first
    Stale,
}
