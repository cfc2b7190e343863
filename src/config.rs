//! Command-line and environment configuration

use crate::error::{AppError, Result};
use crate::notify::SessionAlertMode;
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REFRESH_SECS: u64 = 60;
const DB_FILE: &str = "dashboard.db";

/// Terminal dashboard for a multi-account copy-trading backend
#[derive(Debug, Clone, Parser)]
#[command(name = "copytrade-dashboard", version, about)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "DASHBOARD_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds between scheduled refresh cycles
    #[arg(long, env = "DASHBOARD_REFRESH_SECS", default_value_t = DEFAULT_REFRESH_SECS)]
    pub refresh_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "DASHBOARD_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// How long a toast stays visible, in seconds
    #[arg(long, env = "DASHBOARD_TOAST_SECS", default_value_t = 3)]
    pub toast_secs: u64,

    /// Directory for the preferences database
    #[arg(long, env = "DASHBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Write an HTML snapshot of the dashboard here after every render
    #[arg(long, env = "DASHBOARD_HTML")]
    pub html: Option<PathBuf>,

    /// Cookie header for an authenticated backend session
    #[arg(long, env = "DASHBOARD_SESSION")]
    pub session_cookie: Option<String>,

    /// When to report expired broker sessions
    #[arg(long, value_enum, env = "DASHBOARD_SESSION_ALERTS", default_value_t = SessionAlertMode::Edge)]
    pub session_alerts: SessionAlertMode,

    /// Poll and render without the interactive console
    #[arg(long, env = "DASHBOARD_HEADLESS")]
    pub headless: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    pub toast_ttl: Duration,
    pub data_dir: PathBuf,
    pub html_path: Option<PathBuf>,
    pub session_cookie: Option<String>,
    pub session_alerts: SessionAlertMode,
    pub headless: bool,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let base_url = Url::parse(cli.base_url.trim())
            .map_err(|e| AppError::Config(format!("Invalid base URL '{}': {}", cli.base_url, e)))?;

        let data_dir = match cli.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        let config = Self {
            base_url,
            refresh_interval: Duration::from_secs(cli.refresh_secs),
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
            toast_ttl: Duration::from_secs(cli.toast_secs),
            data_dir,
            html_path: cli.html,
            session_cookie: cli.session_cookie.filter(|c| !c.trim().is_empty()),
            session_alerts: cli.session_alerts,
            headless: cli.headless,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval.is_zero() {
            return Err(AppError::Config(
                "Refresh interval must be at least one second".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }
        match self.base_url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(AppError::Config(format!(
                "Unsupported URL scheme '{}'",
                other
            ))),
        }
    }

    /// Path of the preferences database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "openalgo", "copytrade-dashboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| AppError::Config("Failed to get app data directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["copytrade-dashboard"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_cli(parse(&["--data-dir", "/tmp/x"])).unwrap();
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.session_alerts, SessionAlertMode::Edge);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/x/dashboard.db"));
        assert!(config.html_path.is_none());
    }

    #[test]
    fn test_rejects_zero_refresh() {
        let result = AppConfig::from_cli(parse(&["--refresh-secs", "0", "--data-dir", "."]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_urls() {
        let result = AppConfig::from_cli(parse(&["--base-url", "not a url", "--data-dir", "."]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let result = AppConfig::from_cli(parse(&["--base-url", "ftp://host", "--data-dir", "."]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_session_alert_flag() {
        let cli = parse(&["--session-alerts", "every-poll", "--data-dir", "."]);
        assert_eq!(cli.session_alerts, SessionAlertMode::EveryPoll);
    }
}
