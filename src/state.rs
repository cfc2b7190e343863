//! Application state management

use crate::api::types::{Snapshot, TradeSummaryRow};
use crate::api::DashboardApi;
use crate::config::AppConfig;
use crate::db::LocalStorage;
use crate::dom::{skeleton, Document};
use crate::error::Result;
use crate::notify::{Notifier, SessionWatch};
use crate::render;
use crate::services::preferences_service::PreferenceStore;
use crate::view::{SummarySort, Tab};
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Add-account form lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddFormState {
    #[default]
    Closed,
    Open,
    Submitting,
}

/// Response-generation counter for one view
///
/// Every fetch takes a ticket before it goes out. A response may only be applied
/// if no newer ticket was applied first; older responses are dropped.
#[derive(Debug, Default)]
pub struct Generation {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl Generation {
    pub fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Claim `ticket` for rendering; false when a newer response already won
    pub fn try_apply(&self, ticket: u64) -> bool {
        self.applied.fetch_max(ticket, Ordering::SeqCst) < ticket
    }
}

/// One counter per independently fetched view
#[derive(Debug, Default)]
pub struct Generations {
    pub accounts: Generation,
    pub summary: Generation,
    pub chartink: Generation,
    pub master_choices: Generation,
}

/// Per-session view state; never persisted
#[derive(Debug, Default)]
pub struct SessionState {
    /// Last successfully applied snapshot
    pub snapshot: Option<Snapshot>,
    pub summary_rows: Vec<TradeSummaryRow>,
    pub summary_sort: SummarySort,
    pub add_form: AddFormState,
    /// Client id of the account being edited
    pub edit_modal: Option<String>,
    pub open_consoles: HashSet<String>,
    pub active_tab: Tab,
    pub session_watch: SessionWatch,
}

/// Application state shared by the console, the scheduler and every command
///
/// Lock order is `document` before `session`; neither is held across an await.
pub struct AppState {
    /// Backend client
    pub api: Arc<dyn DashboardApi>,

    /// Persisted sort/dark-mode preferences
    pub preferences: PreferenceStore,

    /// Toast queue
    pub notifier: Notifier,

    /// The dashboard document
    pub document: Mutex<Document>,

    /// Session view state
    pub session: RwLock<SessionState>,

    pub generations: Generations,

    pub config: AppConfig,
}

impl AppState {
    /// Create new application state
    ///
    /// Preferences are read before the document is built so the stored theme is
    /// in place before the first render.
    pub fn new(
        config: AppConfig,
        api: Arc<dyn DashboardApi>,
        storage: Arc<LocalStorage>,
    ) -> Result<Self> {
        let preferences = PreferenceStore::new(storage);
        let prefs = preferences.get_preferences()?;

        Ok(Self {
            api,
            preferences,
            notifier: Notifier::new(config.toast_ttl),
            document: Mutex::new(skeleton::build_document(prefs.dark_mode)),
            session: RwLock::new(SessionState {
                session_watch: SessionWatch::new(config.session_alerts),
                ..Default::default()
            }),
            generations: Generations::default(),
            config,
        })
    }

    /// Refresh the toast area and write the HTML snapshot, if one is configured
    pub fn publish(&self) {
        let toasts = self.notifier.active();
        let html = {
            let mut doc = self.document.lock();
            render::render_toasts(&mut doc, &toasts);
            match &self.config.html_path {
                Some(_) => doc.to_html(skeleton::title()),
                None => return,
            }
        };

        if let Some(path) = &self.config.html_path {
            match std::fs::write(path, html) {
                Ok(()) => debug!("Wrote {}", path.display()),
                Err(e) => warn!("Failed to write {}: {}", path.display(), e),
            }
        }
    }

    /// Current dark-mode flag; falls back to light if storage cannot be read
    pub fn dark_mode(&self) -> bool {
        match self.preferences.get_preferences() {
            Ok(prefs) => prefs.dark_mode,
            Err(e) => {
                warn!("Failed to read preferences: {}", e);
                false
            }
        }
    }
}
