//! Preferences Service
//!
//! Sort mode and dark mode, persisted in local storage so they survive restarts.
//! No network side effects.

use crate::db::LocalStorage;
use crate::error::Result;
use std::sync::Arc;
use tracing::{info, warn};

const SORT_MODE_KEY: &str = "sortMode";
const DARK_MODE_KEY: &str = "darkMode";

/// Account list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Balance minus opening balance, descending
    Net,
    /// Today's P&L, descending
    #[default]
    Today,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Net => "net",
            SortMode::Today => "today",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "net" => Some(SortMode::Net),
            "today" => Some(SortMode::Today),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortMode::Net => SortMode::Today,
            SortMode::Today => SortMode::Net,
        }
    }
}

/// Persisted UI preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub sort_mode: SortMode,
    pub dark_mode: bool,
}

/// Preferences store over [`LocalStorage`]
#[derive(Clone)]
pub struct PreferenceStore {
    storage: Arc<LocalStorage>,
}

impl PreferenceStore {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    /// Current preferences; missing keys are written with their defaults on first run
    pub fn get_preferences(&self) -> Result<Preferences> {
        let defaults = Preferences::default();

        let sort_mode = match self.storage.get_item(SORT_MODE_KEY)? {
            Some(raw) => SortMode::parse(&raw).unwrap_or_else(|| {
                warn!("Ignoring unknown sortMode '{}'", raw);
                defaults.sort_mode
            }),
            None => {
                self.storage
                    .set_item(SORT_MODE_KEY, defaults.sort_mode.as_str())?;
                defaults.sort_mode
            }
        };

        let dark_mode = match self.storage.get_item(DARK_MODE_KEY)? {
            Some(raw) => raw == "true",
            None => {
                self.storage
                    .set_item(DARK_MODE_KEY, bool_str(defaults.dark_mode))?;
                defaults.dark_mode
            }
        };

        Ok(Preferences {
            sort_mode,
            dark_mode,
        })
    }

    /// Persist the sort mode; returns false when it was already current
    pub fn set_sort_mode(&self, mode: SortMode) -> Result<bool> {
        let current = self.get_preferences()?.sort_mode;
        if current == mode {
            return Ok(false);
        }

        self.storage.set_item(SORT_MODE_KEY, mode.as_str())?;
        info!("Sort mode set to {}", mode.as_str());
        Ok(true)
    }

    /// Flip and persist dark mode, returning the new value
    pub fn toggle_dark_mode(&self) -> Result<bool> {
        let dark_mode = !self.get_preferences()?.dark_mode;
        self.storage.set_item(DARK_MODE_KEY, bool_str(dark_mode))?;
        info!("Dark mode {}", if dark_mode { "on" } else { "off" });
        Ok(dark_mode)
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store() -> (PreferenceStore, Arc<LocalStorage>) {
        let storage = Arc::new(LocalStorage::in_memory().unwrap());
        (PreferenceStore::new(storage.clone()), storage)
    }

    #[test]
    fn test_defaults_written_on_first_run() {
        let (prefs, storage) = store();

        let loaded = prefs.get_preferences().unwrap();
        assert_eq!(loaded.sort_mode, SortMode::Today);
        assert!(!loaded.dark_mode);

        assert_eq!(storage.get_item("sortMode").unwrap().as_deref(), Some("today"));
        assert_eq!(storage.get_item("darkMode").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_set_sort_mode_same_value_is_noop() {
        let (prefs, _) = store();

        assert!(prefs.set_sort_mode(SortMode::Net).unwrap());
        assert!(!prefs.set_sort_mode(SortMode::Net).unwrap());
        assert_eq!(prefs.get_preferences().unwrap().sort_mode, SortMode::Net);
    }

    #[test]
    fn test_unknown_sort_mode_reads_as_default() {
        let (prefs, storage) = store();
        storage.set_item("sortMode", "sideways").unwrap();
        assert_eq!(prefs.get_preferences().unwrap().sort_mode, SortMode::Today);
    }

    #[test]
    fn test_toggle_dark_mode_twice() {
        let (prefs, _) = store();

        assert!(prefs.toggle_dark_mode().unwrap());
        assert!(prefs.get_preferences().unwrap().dark_mode);
        assert!(!prefs.toggle_dark_mode().unwrap());
        assert!(!prefs.get_preferences().unwrap().dark_mode);
    }

    #[test]
    fn test_preferences_survive_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.db");

        {
            let prefs = PreferenceStore::new(Arc::new(LocalStorage::open(&path).unwrap()));
            prefs.set_sort_mode(SortMode::Net).unwrap();
            prefs.toggle_dark_mode().unwrap();
        }

        let prefs = PreferenceStore::new(Arc::new(LocalStorage::open(&path).unwrap()));
        let loaded = prefs.get_preferences().unwrap();
        assert_eq!(loaded.sort_mode, SortMode::Net);
        assert!(loaded.dark_mode);
    }

    #[test]
    fn test_sort_mode_parse_and_toggle() {
        assert_eq!(SortMode::parse("NET"), Some(SortMode::Net));
        assert_eq!(SortMode::parse("today"), Some(SortMode::Today));
        assert_eq!(SortMode::parse("x"), None);
        assert_eq!(SortMode::Net.toggled(), SortMode::Today);
    }
}
