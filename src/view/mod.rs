//! View models
//!
//! Pure functions from (snapshot, preferences, session state) to plain data
//! describing what each view shows. Nothing here touches the document, so every
//! sorting and formatting rule is testable on its own.

pub mod accounts;
pub mod chart;
pub mod chartink;
pub mod copy_trading;
pub mod trade_summary;

pub use accounts::{build_account_list, AccountCardView, AccountListView};
pub use chart::{chart_overlay, ChartOverlay};
pub use chartink::{build_chartink_rows, ChartinkRowView};
pub use copy_trading::{build_copy_trading, ChildCardView, CopyTradingView, MasterPanelView};
pub use trade_summary::{build_summary_rows, SummaryKey, SummaryRowView, SummarySort};

/// Green/red colouring for P&L figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Red,
}

impl Tone {
    /// Green for zero and above
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Tone::Green
        } else {
            Tone::Red
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Tone::Green => "green",
            Tone::Red => "red",
        }
    }
}

/// Dashboard sections; exactly one is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Accounts,
    Copy,
    Summary,
    Chartink,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Accounts, Tab::Copy, Tab::Summary, Tab::Chartink];

    /// Id of the section element
    pub fn section_id(self) -> &'static str {
        match self {
            Tab::Accounts => "accountSection",
            Tab::Copy => "copySection",
            Tab::Summary => "summarySection",
            Tab::Chartink => "chartinkSection",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Accounts => "Accounts",
            Tab::Copy => "Copy Trading",
            Tab::Summary => "Trade Summary",
            Tab::Chartink => "Chartink Log",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "accounts" | "account" | "accountsection" => Some(Tab::Accounts),
            "copy" | "copy-trading" | "copysection" => Some(Tab::Copy),
            "summary" | "trade-summary" | "summarysection" => Some(Tab::Summary),
            "chartink" | "chartinksection" => Some(Tab::Chartink),
            _ => None,
        }
    }
}

/// `₹1234.50`
pub fn rupees(value: f64) -> String {
    format!("₹{:.2}", value)
}

/// `1234.50`
pub fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_boundary() {
        assert_eq!(Tone::of(0.0), Tone::Green);
        assert_eq!(Tone::of(-0.01), Tone::Red);
        assert_eq!(Tone::of(150.0).class(), "green");
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!(Tab::parse("chartink"), Some(Tab::Chartink));
        assert_eq!(Tab::parse("Copy"), Some(Tab::Copy));
        assert_eq!(Tab::parse("nope"), None);
        assert_eq!(Tab::Summary.section_id(), "summarySection");
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(rupees(1234.5), "₹1234.50");
        assert_eq!(rupees(-20.0), "₹-20.00");
        assert_eq!(amount(0.0), "0.00");
    }
}
