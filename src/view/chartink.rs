//! Chartink alert log view model

use crate::api::types::ChartinkLogEntry;
use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Asia::Kolkata;

const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartinkRowView {
    /// IST, `19/10/2026, 09:20:00`
    pub time: String,
    pub symbol: String,
    pub qty: String,
    pub action: String,
}

/// Backend timestamp shown in IST; unparsable input is returned unchanged
pub fn format_ist(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Kolkata).format(DISPLAY_FORMAT).to_string();
    }

    // Naive timestamps come from the backend's local clock, which runs in IST
    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            if let Some(ts) = Kolkata.from_local_datetime(&naive).earliest() {
                return ts.format(DISPLAY_FORMAT).to_string();
            }
        }
    }

    raw.to_string()
}

/// Rows newest first
pub fn build_chartink_rows(log: &[ChartinkLogEntry]) -> Vec<ChartinkRowView> {
    log.iter()
        .rev()
        .map(|entry| ChartinkRowView {
            time: format_ist(&entry.timestamp),
            symbol: entry.symbol.clone(),
            qty: entry.qty.to_string(),
            action: entry.action.clone(),
        })
        .collect()
}
