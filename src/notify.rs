//! Toast notifications
//!
//! Every user-visible outcome (action result, fetch failure, expired broker
//! session) becomes a short-lived [`Toast`]. Toasts are kept for their TTL so the
//! document can show them, and broadcast so the console can print them as they
//! happen.

use crate::api::types::Account;
use clap::ValueEnum;
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Upper bound on toasts kept for display
const MAX_VISIBLE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// Bootstrap background class
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "bg-success",
            ToastKind::Error => "bg-danger",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    /// Ring the notification sound
    pub chime: bool,
    pub created_at: Instant,
}

/// Transient notification queue
pub struct Notifier {
    toasts: Mutex<VecDeque<Toast>>,
    next_id: AtomicU64,
    ttl: Duration,
    sender: broadcast::Sender<Toast>,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        let (sender, _) = broadcast::channel(64);
        Self {
            toasts: Mutex::new(VecDeque::new()),
            next_id: AtomicU64::new(1),
            ttl,
            sender,
        }
    }

    pub fn success(&self, message: impl Into<String>) -> Toast {
        self.push(message.into(), ToastKind::Success, false)
    }

    /// Success toast that also rings the chime
    pub fn success_chime(&self, message: impl Into<String>) -> Toast {
        self.push(message.into(), ToastKind::Success, true)
    }

    pub fn error(&self, message: impl Into<String>) -> Toast {
        self.push(message.into(), ToastKind::Error, false)
    }

    /// Toast in the colour of an outcome reported by the backend
    pub fn outcome(&self, message: impl Into<String>, success: bool, chime: bool) -> Toast {
        let kind = if success {
            ToastKind::Success
        } else {
            ToastKind::Error
        };
        self.push(message.into(), kind, chime)
    }

    fn push(&self, message: String, kind: ToastKind, chime: bool) -> Toast {
        match kind {
            ToastKind::Success => info!("Toast: {}", message),
            ToastKind::Error => warn!("Toast: {}", message),
        }

        let toast = Toast {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            message,
            kind,
            chime,
            created_at: Instant::now(),
        };

        {
            let mut toasts = self.toasts.lock();
            toasts.push_back(toast.clone());
            while toasts.len() > MAX_VISIBLE {
                toasts.pop_front();
            }
        }

        // No subscriber is fine; the toast stays visible in the document
        let _ = self.sender.send(toast.clone());
        toast
    }

    /// Toasts still within their TTL; expired ones are dropped
    pub fn active(&self) -> Vec<Toast> {
        let mut toasts = self.toasts.lock();
        let ttl = self.ttl;
        toasts.retain(|t| t.created_at.elapsed() < ttl);
        toasts.iter().cloned().collect()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }
}

// ============================================================================
// Session expiry
// ============================================================================

/// When to raise the "session expired" toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SessionAlertMode {
    /// Once per expiry; re-armed when the session is seen alive again
    #[default]
    Edge,
    /// On every poll while the session stays expired
    EveryPoll,
}

/// Tracks which accounts were already reported as expired
#[derive(Debug, Default)]
pub struct SessionWatch {
    mode: SessionAlertMode,
    flagged: HashSet<String>,
}

impl SessionWatch {
    pub fn new(mode: SessionAlertMode) -> Self {
        Self {
            mode,
            flagged: HashSet::new(),
        }
    }

    /// Accounts to notify about for this snapshot, in snapshot order
    pub fn observe(&mut self, accounts: &[Account]) -> Vec<String> {
        let mut notify = Vec::new();

        for account in accounts {
            if account.status {
                self.flagged.remove(&account.name);
                continue;
            }

            let fresh = self.flagged.insert(account.name.clone());
            if fresh || self.mode == SessionAlertMode::EveryPoll {
                notify.push(account.name.clone());
            }
        }

        // Accounts that disappeared from the snapshot are forgotten
        self.flagged
            .retain(|name| accounts.iter().any(|a| &a.name == name));

        notify
    }
}

/// Toast text for an expired broker session
pub fn session_expired_message(name: &str) -> String {
    format!("⚠️ Session expired: {}", name)
}
