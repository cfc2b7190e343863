//! Copy-trading view model: master panel plus one card per child

use super::{amount, rupees, Tone};
use crate::api::types::{Account, Multiplier, Snapshot, MULTIPLIER_CHOICES};
use std::collections::HashSet;

pub const NO_ORDERS: &str = "No orders";
pub const NO_POSITIONS: &str = "No positions";

/// One order line; the symbol doubles as a chart link
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub symbol: String,
    /// `SBIN - BUY - Qty: 5`
    pub text: String,
}

/// Order book and positions of one account
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsoleView {
    pub orders: Vec<OrderLine>,
    /// `SBIN: Qty 5`
    pub positions: Vec<String>,
}

impl ConsoleView {
    pub fn of(account: &Account) -> Self {
        Self {
            orders: account
                .orders
                .iter()
                .map(|o| OrderLine {
                    symbol: o.symbol.clone(),
                    text: format!("{} - {} - Qty: {}", o.symbol, o.action, o.qty),
                })
                .collect(),
            positions: account
                .positions
                .iter()
                .map(|p| format!("{}: Qty {}", p.symbol, p.qty))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MasterPanelView {
    pub name: String,
    /// `Client ID: AB1234`
    pub client_id_label: String,
    pub balance: String,
    pub pnl: String,
    pub net_pnl: String,
    pub copy_enabled: bool,
    pub console: ConsoleView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiplierOption {
    pub value: f64,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChildCardView {
    pub name: String,
    /// `P&L: ₹12.00 | Net: ₹100.00 (1.00%)`
    pub summary: String,
    pub tone: Tone,
    pub copy_enabled: bool,
    pub multipliers: Vec<MultiplierOption>,
    pub console: ConsoleView,
    pub console_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CopyTradingView {
    pub master: MasterPanelView,
    pub children: Vec<ChildCardView>,
}

fn multiplier_options(stored: f64) -> Vec<MultiplierOption> {
    MULTIPLIER_CHOICES
        .iter()
        .filter_map(|v| Multiplier::from_choice(*v))
        .map(|m| MultiplierOption {
            value: m.value(),
            label: m.to_string(),
            selected: m.matches(stored),
        })
        .collect()
}

fn child_card(account: &Account, open_consoles: &HashSet<String>) -> ChildCardView {
    let net = account.net_pnl();
    ChildCardView {
        name: account.name.clone(),
        summary: format!(
            "P&L: {} | Net: {} ({:.2}%)",
            rupees(account.pnl),
            rupees(net),
            account.percent_change()
        ),
        tone: Tone::of(account.pnl),
        copy_enabled: account.copy_enabled,
        multipliers: multiplier_options(account.multiplier),
        console: ConsoleView::of(account),
        console_open: open_consoles.contains(&account.name),
    }
}

/// Build the copy view; `None` when the snapshot has no master
pub fn build_copy_trading(
    snapshot: &Snapshot,
    open_consoles: &HashSet<String>,
) -> Option<CopyTradingView> {
    let master = snapshot.master()?;

    Some(CopyTradingView {
        master: MasterPanelView {
            name: master.name.clone(),
            client_id_label: format!("Client ID: {}", master.name),
            balance: amount(master.balance),
            pnl: amount(master.pnl),
            net_pnl: amount(master.net_pnl()),
            copy_enabled: master.copy_enabled,
            console: ConsoleView::of(master),
        },
        children: snapshot
            .children()
            .map(|c| child_card(c, open_consoles))
            .collect(),
    })
}
