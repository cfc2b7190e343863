//! Trade summary table: sorting, row formatting and CSV export

use super::{amount, rupees, Tone};
use crate::api::types::TradeSummaryRow;
use crate::error::{AppError, Result};
use std::cmp::Ordering;

/// Sortable columns, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryKey {
    Name,
    LiveBalance,
    NetPnl,
    TotalTrades,
    Wins,
    Losses,
    WinRate,
    TopSymbol,
}

impl SummaryKey {
    pub const ALL: [SummaryKey; 8] = [
        SummaryKey::Name,
        SummaryKey::LiveBalance,
        SummaryKey::NetPnl,
        SummaryKey::TotalTrades,
        SummaryKey::Wins,
        SummaryKey::Losses,
        SummaryKey::WinRate,
        SummaryKey::TopSymbol,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SummaryKey::Name => "name",
            SummaryKey::LiveBalance => "live_balance",
            SummaryKey::NetPnl => "net_pnl",
            SummaryKey::TotalTrades => "total_trades",
            SummaryKey::Wins => "wins",
            SummaryKey::Losses => "losses",
            SummaryKey::WinRate => "win_rate",
            SummaryKey::TopSymbol => "top_symbol",
        }
    }

    /// Column header text
    pub fn label(self) -> &'static str {
        match self {
            SummaryKey::Name => "Client ID",
            SummaryKey::LiveBalance => "Live Balance",
            SummaryKey::NetPnl => "Net P&L",
            SummaryKey::TotalTrades => "Total Trades",
            SummaryKey::Wins => "Wins",
            SummaryKey::Losses => "Losses",
            SummaryKey::WinRate => "Win Rate %",
            SummaryKey::TopSymbol => "Top Symbol",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }

    fn numeric(self, row: &TradeSummaryRow) -> Option<f64> {
        match self {
            SummaryKey::LiveBalance => Some(row.live_balance.unwrap_or(0.0)),
            SummaryKey::NetPnl => Some(row.net_pnl),
            SummaryKey::TotalTrades => Some(row.total_trades as f64),
            SummaryKey::Wins => Some(row.wins as f64),
            SummaryKey::Losses => Some(row.losses as f64),
            SummaryKey::WinRate => Some(row.win_rate),
            SummaryKey::Name | SummaryKey::TopSymbol => None,
        }
    }

    fn text(self, row: &TradeSummaryRow) -> &str {
        match self {
            SummaryKey::TopSymbol => &row.top_symbol,
            _ => &row.name,
        }
    }

    fn compare(self, a: &TradeSummaryRow, b: &TradeSummaryRow) -> Ordering {
        match (self.numeric(a), self.numeric(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => self
                .text(a)
                .to_lowercase()
                .cmp(&self.text(b).to_lowercase()),
        }
    }
}

/// Active sort of the summary table; lives for the session only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarySort {
    pub key: SummaryKey,
    pub ascending: bool,
}

impl Default for SummarySort {
    fn default() -> Self {
        Self {
            key: SummaryKey::NetPnl,
            ascending: false,
        }
    }
}

impl SummarySort {
    /// Header click: same key flips direction, a new key sorts descending
    pub fn click(&mut self, key: SummaryKey) {
        if self.key == key {
            self.ascending = !self.ascending;
        } else {
            self.key = key;
            self.ascending = false;
        }
    }

    /// Header arrow for `key`, empty for inactive columns
    pub fn indicator(&self, key: SummaryKey) -> &'static str {
        match (self.key == key, self.ascending) {
            (false, _) => "",
            (true, true) => " ▲",
            (true, false) => " ▼",
        }
    }

    /// Stable sort of the rows
    pub fn sort_rows<'a>(&self, rows: &'a [TradeSummaryRow]) -> Vec<&'a TradeSummaryRow> {
        let mut sorted: Vec<&TradeSummaryRow> = rows.iter().collect();
        sorted.sort_by(|a, b| {
            let ord = self.key.compare(a, b);
            if self.ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        sorted
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRowView {
    pub name: String,
    pub live_balance: String,
    pub net_pnl: String,
    pub net_tone: Tone,
    pub total_trades: String,
    pub wins: String,
    pub losses: String,
    pub win_rate: String,
    pub win_rate_tone: Tone,
    pub top_symbol: String,
}

impl SummaryRowView {
    /// Cell texts in column order
    pub fn cells(&self) -> [&str; 8] {
        [
            self.name.as_str(),
            self.live_balance.as_str(),
            self.net_pnl.as_str(),
            self.total_trades.as_str(),
            self.wins.as_str(),
            self.losses.as_str(),
            self.win_rate.as_str(),
            self.top_symbol.as_str(),
        ]
    }
}

fn row_view(row: &TradeSummaryRow) -> SummaryRowView {
    SummaryRowView {
        name: row.name.clone(),
        live_balance: match row.live_balance {
            Some(v) => rupees(v),
            None => "₹0".to_string(),
        },
        net_pnl: rupees(row.net_pnl),
        net_tone: Tone::of(row.net_pnl),
        total_trades: row.total_trades.to_string(),
        wins: row.wins.to_string(),
        losses: row.losses.to_string(),
        win_rate: format!("{:.2}%", row.win_rate),
        win_rate_tone: if row.win_rate >= 50.0 {
            Tone::Green
        } else {
            Tone::Red
        },
        top_symbol: row.top_symbol.clone(),
    }
}

pub fn build_summary_rows(rows: &[TradeSummaryRow], sort: &SummarySort) -> Vec<SummaryRowView> {
    sort.sort_rows(rows).into_iter().map(row_view).collect()
}

/// CSV export of the rows in the given order
pub fn to_csv(rows: &[&TradeSummaryRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(SummaryKey::ALL.iter().map(|k| k.label()))?;

    for row in rows {
        writer.write_record([
            row.name.clone(),
            amount(row.live_balance.unwrap_or(0.0)),
            amount(row.net_pnl),
            row.total_trades.to_string(),
            row.wins.to_string(),
            row.losses.to_string(),
            amount(row.win_rate),
            row.top_symbol.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, net_pnl: f64, win_rate: f64, top_symbol: &str) -> TradeSummaryRow {
        TradeSummaryRow {
            name: name.to_string(),
            live_balance: Some(1000.0),
            net_pnl,
            total_trades: 4,
            wins: 2,
            losses: 2,
            win_rate,
            top_symbol: top_symbol.to_string(),
        }
    }

    #[test]
    fn test_header_click_same_key_flips_direction() {
        let mut sort = SummarySort::default();
        assert_eq!(sort.key, SummaryKey::NetPnl);
        assert!(!sort.ascending);

        sort.click(SummaryKey::NetPnl);
        assert_eq!(sort.key, SummaryKey::NetPnl);
        assert!(sort.ascending);

        sort.click(SummaryKey::NetPnl);
        assert!(!sort.ascending);
    }

    #[test]
    fn test_header_click_new_key_resets_descending() {
        let mut sort = SummarySort::default();
        sort.click(SummaryKey::NetPnl);
        assert!(sort.ascending);

        sort.click(SummaryKey::Wins);
        assert_eq!(sort.key, SummaryKey::Wins);
        assert!(!sort.ascending);
    }

    #[test]
    fn test_default_sort_is_net_pnl_descending() {
        let rows = vec![row("A", 10.0, 50.0, "X"), row("B", 99.0, 10.0, "Y")];
        let views = build_summary_rows(&rows, &SummarySort::default());
        assert_eq!(views[0].name, "B");
        assert_eq!(views[1].name, "A");
    }

    #[test]
    fn test_text_keys_compare_case_insensitively() {
        let rows = vec![
            row("b", 0.0, 0.0, "tcs"),
            row("A", 0.0, 0.0, "INFY"),
            row("c", 0.0, 0.0, "Reliance"),
        ];
        let sort = SummarySort {
            key: SummaryKey::Name,
            ascending: true,
        };
        let names: Vec<&str> = sort.sort_rows(&rows).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "b", "c"]);

        let sort = SummarySort {
            key: SummaryKey::TopSymbol,
            ascending: false,
        };
        let names: Vec<&str> = sort.sort_rows(&rows).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "A"]);
    }

    #[test]
    fn test_row_tones_and_missing_balance() {
        let mut r = row("A", -1.0, 50.0, "SBIN");
        r.live_balance = None;
        let view = row_view(&r);
        assert_eq!(view.live_balance, "₹0");
        assert_eq!(view.net_tone, Tone::Red);
        assert_eq!(view.win_rate_tone, Tone::Green);
        assert_eq!(view.win_rate, "50.00%");
    }

    #[test]
    fn test_csv_export() {
        let rows = vec![row("AB12", 250.5, 66.666, "SBIN, NSE")];
        let refs: Vec<&TradeSummaryRow> = rows.iter().collect();
        let csv = to_csv(&refs).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Client ID,Live Balance,Net P&L,Total Trades,Wins,Losses,Win Rate %,Top Symbol")
        );
        assert_eq!(
            lines.next(),
            Some("AB12,1000.00,250.50,4,2,2,66.67,\"SBIN, NSE\"")
        );
    }

    #[test]
    fn test_key_parse() {
        assert_eq!(SummaryKey::parse("win-rate"), Some(SummaryKey::WinRate));
        assert_eq!(SummaryKey::parse("NET_PNL"), Some(SummaryKey::NetPnl));
        assert_eq!(SummaryKey::parse("balance"), None);
    }
}
