//! Account list view model

use super::{rupees, Tone};
use crate::api::types::{Account, Snapshot};
use crate::services::preferences_service::{Preferences, SortMode};

/// One account card
#[derive(Debug, Clone, PartialEq)]
pub struct AccountCardView {
    pub name: String,
    pub is_master: bool,
    pub session_ok: bool,
    pub opening_balance: String,
    pub balance: String,
    /// `₹100.00 (1.00%)`
    pub net_pnl: String,
    pub net_tone: Tone,
    pub pnl: String,
    pub pnl_tone: Tone,
    /// Card colour; follows today's P&L in either sort mode
    pub card_tone: Tone,
    pub autologin: bool,
}

/// Everything the accounts section shows
#[derive(Debug, Clone, PartialEq)]
pub struct AccountListView {
    pub cards: Vec<AccountCardView>,
    /// Sum of today's P&L over all accounts
    pub net_pnl_today: f64,
    pub net_pnl_today_label: String,
    pub net_tone: Tone,
    pub sort_mode: SortMode,
    /// Label of the sort button; names the mode a click switches to
    pub sort_toggle_label: &'static str,
    pub master_options: Vec<String>,
    pub child_options: Vec<String>,
    /// Accounts whose broker session is not alive
    pub expired: Vec<String>,
}

/// Order accounts for display, descending by the P&L the mode selects
///
/// The sort is stable: ties keep backend order.
pub fn sort_accounts(accounts: &[Account], mode: SortMode) -> Vec<&Account> {
    let mut sorted: Vec<&Account> = accounts.iter().collect();
    sorted.sort_by(|a, b| relevant_pnl(b, mode).total_cmp(&relevant_pnl(a, mode)));
    sorted
}

fn relevant_pnl(account: &Account, mode: SortMode) -> f64 {
    match mode {
        SortMode::Net => account.net_pnl(),
        SortMode::Today => account.pnl,
    }
}

/// Sum of `pnl` across all accounts
pub fn net_pnl_today(accounts: &[Account]) -> f64 {
    accounts.iter().map(|a| a.pnl).sum()
}

fn card(account: &Account) -> AccountCardView {
    let net = account.net_pnl();
    AccountCardView {
        name: account.name.clone(),
        is_master: account.is_master,
        session_ok: account.status,
        opening_balance: rupees(account.opening_balance),
        balance: rupees(account.balance),
        net_pnl: format!("{} ({:.2}%)", rupees(net), account.percent_change()),
        net_tone: Tone::of(net),
        pnl: rupees(account.pnl),
        pnl_tone: Tone::of(account.pnl),
        card_tone: Tone::of(account.pnl),
        autologin: account.autologin,
    }
}

/// Build the account list for a snapshot under the given preferences
pub fn build_account_list(snapshot: &Snapshot, prefs: &Preferences) -> AccountListView {
    let mode = prefs.sort_mode;
    let cards = sort_accounts(&snapshot.accounts, mode)
        .into_iter()
        .map(card)
        .collect();

    let total = net_pnl_today(&snapshot.accounts);

    AccountListView {
        cards,
        net_pnl_today: total,
        net_pnl_today_label: rupees(total),
        net_tone: Tone::of(total),
        sort_mode: mode,
        sort_toggle_label: match mode {
            SortMode::Today => "Sort by Net P&L",
            SortMode::Net => "Sort by Today's P&L",
        },
        master_options: snapshot
            .accounts
            .iter()
            .filter(|a| a.is_master)
            .map(|a| a.name.clone())
            .collect(),
        child_options: snapshot.children().map(|a| a.name.clone()).collect(),
        expired: snapshot
            .accounts
            .iter()
            .filter(|a| !a.status)
            .map(|a| a.name.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::account;

    fn prefs(sort_mode: SortMode) -> Preferences {
        Preferences {
            sort_mode,
            dark_mode: false,
        }
    }

    #[test]
    fn test_sort_by_today() {
        let mut a = account("A", 10000.0, 10000.0);
        a.pnl = 150.0;
        let mut b = account("B", 10000.0, 10000.0);
        b.pnl = -20.0;

        let accounts = vec![b, a];
        let sorted = sort_accounts(&accounts, SortMode::Today);
        assert_eq!(sorted[0].name, "A");
        assert_eq!(sorted[1].name, "B");
    }

    #[test]
    fn test_sort_by_net() {
        let a = account("A", 10000.0, 10100.0);
        let b = account("B", 10000.0, 10300.0);

        let accounts = vec![a, b];
        let sorted = sort_accounts(&accounts, SortMode::Net);
        assert_eq!(sorted[0].name, "B");
        assert_eq!(sorted[1].name, "A");
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let accounts = vec![
            account("first", 100.0, 100.0),
            account("second", 100.0, 100.0),
        ];
        let sorted = sort_accounts(&accounts, SortMode::Net);
        assert_eq!(sorted[0].name, "first");
    }

    #[test]
    fn test_net_pnl_today_is_exact_sum() {
        let accounts: Vec<Account> = [100.0, -30.0, 5.0]
            .iter()
            .enumerate()
            .map(|(i, pnl)| {
                let mut a = account(&format!("A{}", i), 0.0, 0.0);
                a.pnl = *pnl;
                a
            })
            .collect();
        assert_eq!(net_pnl_today(&accounts), 75.0);

        let view = build_account_list(&Snapshot::new(accounts), &prefs(SortMode::Today));
        assert_eq!(view.net_pnl_today_label, "₹75.00");
        assert_eq!(view.net_tone, Tone::Green);
    }

    #[test]
    fn test_card_formatting_and_tones() {
        let mut a = account("A", 0.0, 250.0);
        a.pnl = -5.0;
        let view = build_account_list(&Snapshot::new(vec![a]), &prefs(SortMode::Today));
        let card = &view.cards[0];

        // Zero opening balance never divides
        assert_eq!(card.net_pnl, "₹250.00 (0.00%)");
        assert_eq!(card.net_tone, Tone::Green);
        assert_eq!(card.pnl_tone, Tone::Red);
        assert_eq!(card.card_tone, Tone::Red);

        let view = build_account_list(&Snapshot::new(view_accounts()), &prefs(SortMode::Net));
        assert_eq!(view.sort_toggle_label, "Sort by Today's P&L");
    }

    #[test]
    fn test_card_tone_follows_today_in_net_mode() {
        let mut a = account("A", 100.0, 200.0);
        a.pnl = -5.0;
        let view = build_account_list(&Snapshot::new(vec![a]), &prefs(SortMode::Net));
        let card = &view.cards[0];

        assert_eq!(card.net_tone, Tone::Green);
        assert_eq!(card.card_tone, Tone::Red);
    }

    fn view_accounts() -> Vec<Account> {
        vec![account("X", 100.0, 90.0)]
    }

    #[test]
    fn test_expired_and_selector_options() {
        let mut master = account("M", 100.0, 100.0);
        master.is_master = true;
        let mut child = account("C", 100.0, 100.0);
        child.status = false;

        let view = build_account_list(
            &Snapshot::new(vec![master, child]),
            &prefs(SortMode::Today),
        );
        assert_eq!(view.master_options, vec!["M"]);
        assert_eq!(view.child_options, vec!["C"]);
        assert_eq!(view.expired, vec!["C"]);
    }
}
