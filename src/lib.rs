//! Copy Trading Dashboard
//!
//! Client for a multi-account copy-trading backend: polls account balances,
//! P&L, orders and positions, renders them into a retained dashboard document,
//! and sends control requests (autologin, copy multipliers, master changes,
//! account edits) back to the backend.

pub mod api;
pub mod commands;
pub mod config;
pub mod console;
pub mod db;
pub mod dom;
pub mod error;
pub mod notify;
pub mod render;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_support;

use api::HttpDashboardApi;
use config::{AppConfig, Cli};
use db::LocalStorage;
use error::Result;
use scheduler::RefreshScheduler;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging, build the application state and run until the user quits
pub async fn run(cli: Cli) -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "copytrade_dashboard=info,copytrade_dashboard_lib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Copy Trading Dashboard...");

    let config = AppConfig::from_cli(cli)?;
    std::fs::create_dir_all(&config.data_dir)?;
    let storage = Arc::new(LocalStorage::open(&config.database_path())?);
    let api = Arc::new(HttpDashboardApi::new(
        config.base_url.as_str(),
        config.request_timeout,
        config.session_cookie.as_deref(),
    )?);

    let headless = config.headless;
    let period = config.refresh_interval;
    let state = Arc::new(AppState::new(config, api, storage)?);
    tracing::info!("Application state initialized");

    let scheduler = RefreshScheduler::new(state.clone(), period).start();

    if headless {
        tracing::info!("Running headless; Ctrl-C to stop");
        tokio::signal::ctrl_c().await?;
    } else {
        console::run(state.clone()).await;
    }

    scheduler.stop().await;
    tracing::info!("Copy Trading Dashboard stopped");
    Ok(())
}
