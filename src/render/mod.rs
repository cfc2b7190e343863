//! Apply view models to the document
//!
//! Each function owns one container and replaces its children wholesale, so
//! rendering the same view model twice leaves an identical tree. Listeners bound
//! here live on the replaced children and disappear with them.

pub mod theme;

use crate::commands::Handler;
use crate::dom::{ids, Document, Element, EventKind};
use crate::notify::Toast;
use crate::state::AddFormState;
use crate::view::copy_trading::{ConsoleView, NO_ORDERS, NO_POSITIONS};
use crate::view::{
    AccountCardView, AccountListView, ChartOverlay, ChartinkRowView, ChildCardView,
    CopyTradingView, SummaryKey, SummaryRowView, SummarySort, Tab,
};

fn button(id: &str, text: &str, handler: Handler) -> Element {
    Element::new("button")
        .with_id(id)
        .with_class("btn")
        .with_text(text)
        .on(EventKind::Click, handler)
}

fn checkbox(id: &str, checked: bool, handler: Handler) -> Element {
    let mut el = Element::new("input")
        .with_id(id)
        .with_attr("type", "checkbox")
        .on(EventKind::Change, handler);
    el.set_flag("checked", checked);
    el
}

fn option(value: &str, label: &str, selected: bool) -> Element {
    let mut el = Element::new("option")
        .with_attr("value", value)
        .with_text(label);
    el.set_flag("selected", selected);
    el
}

fn line(label: &str) -> Element {
    Element::new("div").with_text(label)
}

fn labelled(label: &str, value: &str, class: &str) -> Element {
    Element::new("div")
        .with_text(label)
        .with_child(Element::new("span").with_class(class).with_text(value))
}

/// Fill a select with plain options; the first one is the current value
fn fill_select(doc: &mut Document, id: &str, names: &[String]) {
    let options = names.iter().map(|n| option(n, n, false)).collect();
    doc.replace_children(id, options);
    if let Some(select) = doc.get_element_by_id_mut(id) {
        match names.first() {
            Some(first) => select.set_attr("value", first),
            None => select.remove_attr("value"),
        }
    }
}

// ============================================================================
// Accounts
// ============================================================================

fn account_card(card: &AccountCardView) -> Element {
    let mut title = Element::new("div").with_child(Element::new("b").with_text(&card.name));
    if card.is_master {
        title.append_child(Element::new("span").with_text("(Master)"));
    }

    Element::new("div")
        .with_id(&format!("card-{}", card.name))
        .with_class("card")
        .with_class(card.card_tone.class())
        .with_child(title)
        .with_child(line(&format!(
            "Status: {}",
            if card.session_ok { "✅" } else { "❌" }
        )))
        .with_child(line(&format!("Opening Balance: {}", card.opening_balance)))
        .with_child(line(&format!("Current Balance: {}", card.balance)))
        .with_child(labelled("Net P&L:", &card.net_pnl, card.net_tone.class()))
        .with_child(labelled("Today's P&L:", &card.pnl, card.pnl_tone.class()))
        .with_child(
            Element::new("label").with_text("AutoLogin:").with_child(checkbox(
                &ids::autologin(&card.name),
                card.autologin,
                Handler::ToggleAutologin {
                    client_id: card.name.clone(),
                },
            )),
        )
        .with_child(button(
            &ids::reconnect(&card.name),
            "Reconnect",
            Handler::RefreshSession {
                client_id: card.name.clone(),
            },
        ))
        .with_child(button(
            &ids::edit(&card.name),
            "Edit",
            Handler::EditAccount {
                client_id: card.name.clone(),
            },
        ))
        .with_child(button(
            &ids::delete(&card.name),
            "Delete",
            Handler::DeleteAccount {
                client_id: card.name.clone(),
            },
        ))
}

/// Account cards, the Net P&L Today banner, the sort button and the selectors
pub fn render_accounts(doc: &mut Document, view: &AccountListView, dark: bool) {
    let mut cards: Vec<Element> = view.cards.iter().map(account_card).collect();
    theme::decorate_all(&mut cards, dark);
    doc.replace_children(ids::ACCOUNTS, cards);

    doc.set_text(ids::NET_PNL, "Net P&L Today:");
    doc.replace_children(
        ids::NET_PNL,
        vec![Element::new("span")
            .with_class(view.net_tone.class())
            .with_text(&view.net_pnl_today_label)],
    );

    if let Some(toggle) = doc.get_element_by_id_mut(ids::SORT_TOGGLE) {
        toggle.set_text(view.sort_toggle_label);
        toggle.set_attr("data-sort", view.sort_mode.toggled().as_str());
    }

    fill_select(doc, ids::MASTER_SELECT, &view.master_options);
    fill_select(doc, ids::CHILD_SELECT, &view.child_options);
}

// ============================================================================
// Copy trading
// ============================================================================

fn console_elements(console: &ConsoleView, scope: &str) -> Vec<Element> {
    let orders: Vec<Element> = if console.orders.is_empty() {
        vec![line(NO_ORDERS)]
    } else {
        console
            .orders
            .iter()
            .enumerate()
            .map(|(i, order)| {
                Element::new("a")
                    .with_id(&ids::chart_link(scope, i))
                    .with_class("chart-link")
                    .with_text(&order.text)
                    .on(
                        EventKind::Click,
                        Handler::ViewChart {
                            symbol: order.symbol.clone(),
                        },
                    )
            })
            .collect()
    };

    let positions: Vec<Element> = if console.positions.is_empty() {
        vec![line(NO_POSITIONS)]
    } else {
        console.positions.iter().map(|p| line(p)).collect()
    };

    vec![
        Element::new("h5").with_text("Order Book"),
        Element::new("div").with_children(orders),
        Element::new("h5").with_text("Positions"),
        Element::new("div").with_children(positions),
    ]
}

fn child_card(child: &ChildCardView) -> Element {
    let selected = child
        .multipliers
        .iter()
        .find(|o| o.selected)
        .map(|o| o.value.to_string())
        .unwrap_or_default();

    let mut select = Element::new("select")
        .with_id(&ids::multiplier(&child.name))
        .with_children(
            child
                .multipliers
                .iter()
                .map(|o| option(&o.value.to_string(), &o.label, o.selected)),
        )
        .on(
            EventKind::Change,
            Handler::SetMultiplier {
                client_id: child.name.clone(),
            },
        );
    if !selected.is_empty() {
        select.set_attr("value", &selected);
    }

    Element::new("div")
        .with_id(&format!("child-{}", child.name))
        .with_class("card")
        .with_class(child.tone.class())
        .with_child(Element::new("h4").with_text(format!("Child: {}", child.name)))
        .with_child(Element::new("label").with_text("Multiplier:").with_child(select))
        .with_child(
            Element::new("label").with_text("Trade:").with_child(checkbox(
                &ids::child_copy(&child.name),
                child.copy_enabled,
                Handler::ToggleChildCopy {
                    client_id: child.name.clone(),
                },
            )),
        )
        .with_child(line(&child.summary))
        .with_child(button(
            &ids::console_toggle(&child.name),
            "📘 Orders / 📊 Positions",
            Handler::ToggleConsole {
                client_id: child.name.clone(),
            },
        ))
        .with_child(
            Element::new("div")
                .with_id(&ids::console(&child.name))
                .hidden(!child.console_open)
                .with_children(console_elements(&child.console, &child.name)),
        )
        .with_child(button(
            &ids::child_edit(&child.name),
            "✏️ Edit",
            Handler::EditAccount {
                client_id: child.name.clone(),
            },
        ))
        .with_child(button(
            &ids::child_delete(&child.name),
            "🗑️ Delete",
            Handler::DeleteAccount {
                client_id: child.name.clone(),
            },
        ))
}

/// Master panel and child cards; without a master the view shows nothing
pub fn render_copy_trading(doc: &mut Document, view: Option<&CopyTradingView>, dark: bool) {
    let view = match view {
        Some(view) => view,
        None => {
            if let Some(panel) = doc.get_element_by_id_mut(ids::MASTER_PANEL) {
                panel.set_hidden(true);
            }
            doc.replace_children(ids::MASTER_CONSOLE, Vec::new());
            doc.replace_children(ids::CHILD_ACCOUNTS, Vec::new());
            return;
        }
    };

    let master = &view.master;
    if let Some(panel) = doc.get_element_by_id_mut(ids::MASTER_PANEL) {
        panel.set_hidden(false);
    }
    doc.set_text(ids::MASTER_CLIENT_ID, &master.client_id_label);
    doc.set_text(ids::MASTER_BALANCE, &master.balance);
    doc.set_text(ids::MASTER_PNL, &master.pnl);
    doc.set_text(ids::MASTER_NET_PNL, &master.net_pnl);
    if let Some(toggle) = doc.get_element_by_id_mut(ids::COPY_ALL_TOGGLE) {
        toggle.set_flag("checked", master.copy_enabled);
    }
    doc.replace_children(
        ids::MASTER_CONSOLE,
        console_elements(&master.console, ids::MASTER_CHART_SCOPE),
    );

    let mut cards: Vec<Element> = view.children.iter().map(child_card).collect();
    theme::decorate_all(&mut cards, dark);
    doc.replace_children(ids::CHILD_ACCOUNTS, cards);
}

/// Show or hide one child's console without touching anything else
pub fn set_console_open(doc: &mut Document, client_id: &str, open: bool) -> bool {
    match doc.get_element_by_id_mut(&ids::console(client_id)) {
        Some(console) => {
            console.set_hidden(!open);
            true
        }
        None => false,
    }
}

/// Options of the new-master dropdown
pub fn render_master_choices(doc: &mut Document, names: &[String]) {
    fill_select(doc, ids::NEW_MASTER, names);
}

// ============================================================================
// Trade summary
// ============================================================================

/// Table rows plus header arrows; header listeners are left alone
pub fn render_trade_summary(doc: &mut Document, rows: &[SummaryRowView], sort: &SummarySort) {
    let body = rows
        .iter()
        .map(|row| {
            let cells = row.cells();
            Element::new("tr").with_children(cells.iter().enumerate().map(|(i, text)| {
                let cell = Element::new("td").with_text(*text);
                match SummaryKey::ALL[i] {
                    SummaryKey::NetPnl => cell.with_class(row.net_tone.class()),
                    SummaryKey::WinRate => cell.with_class(row.win_rate_tone.class()),
                    _ => cell,
                }
            }))
        })
        .collect();
    doc.replace_children(ids::TRADE_SUMMARY_BODY, body);

    for key in SummaryKey::ALL {
        doc.set_text(
            &ids::summary_header(key.as_str()),
            format!("{}{}", key.label(), sort.indicator(key)),
        );
    }
}

// ============================================================================
// Chartink and chart overlay
// ============================================================================

pub fn render_chartink(doc: &mut Document, rows: &[ChartinkRowView], dark: bool) {
    let mut body: Vec<Element> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Element::new("tr")
                .with_child(Element::new("td").with_text(&row.time))
                .with_child(Element::new("td").with_text(&row.symbol))
                .with_child(Element::new("td").with_text(&row.qty))
                .with_child(Element::new("td").with_text(&row.action))
                .with_child(Element::new("td").with_child(button(
                    &ids::chart_link(ids::CHARTINK_CHART_SCOPE, i),
                    "📈 View",
                    Handler::ViewChart {
                        symbol: row.symbol.clone(),
                    },
                )))
        })
        .collect();
    theme::decorate_all(&mut body, dark);
    doc.replace_children(ids::CHARTINK_BODY, body);
}

pub fn render_chart(doc: &mut Document, overlay: Option<&ChartOverlay>) {
    if let Some(modal) = doc.get_element_by_id_mut(ids::CHART_MODAL) {
        modal.set_hidden(overlay.is_none());
    }
    match overlay {
        Some(overlay) => {
            doc.set_text(ids::CHART_TITLE, &overlay.title);
            if let Some(frame) = doc.get_element_by_id_mut(ids::CHART_FRAME) {
                frame.set_attr("src", &overlay.src);
            }
        }
        None => {
            doc.set_text(ids::CHART_TITLE, "");
            if let Some(frame) = doc.get_element_by_id_mut(ids::CHART_FRAME) {
                frame.remove_attr("src");
            }
        }
    }
}

// ============================================================================
// Page chrome
// ============================================================================

/// Exactly one section visible
pub fn render_tabs(doc: &mut Document, active: Tab) {
    for tab in Tab::ALL {
        if let Some(section) = doc.get_element_by_id_mut(tab.section_id()) {
            section.set_hidden(tab != active);
        }
        if let Some(button) = doc.get_element_by_id_mut(&ids::tab_button(tab.section_id())) {
            if tab == active {
                button.add_class("active");
            } else {
                button.remove_class("active");
            }
        }
    }
}

pub fn render_add_form(doc: &mut Document, form: AddFormState) {
    if let Some(el) = doc.get_element_by_id_mut(ids::ADD_ACCOUNT_FORM) {
        el.set_hidden(form == AddFormState::Closed);
    }
    if let Some(submit) = doc.get_element_by_id_mut(ids::ADD_ACCOUNT_SUBMIT) {
        submit.set_flag("disabled", form == AddFormState::Submitting);
    }
}

/// Empty every input of the add form
pub fn clear_add_form(doc: &mut Document) {
    for id in [
        ids::CLIENT_ID,
        ids::API_KEY,
        ids::API_SECRET,
        ids::TOTP_KEY,
        ids::EMAIL_ID,
        ids::MOBILE_NO,
    ] {
        if let Some(input) = doc.get_element_by_id_mut(id) {
            input.set_attr("value", "");
        }
    }
}

/// Show `message` in a form's error line, or hide the line
pub fn set_form_error(doc: &mut Document, id: &str, message: Option<&str>) {
    if let Some(el) = doc.get_element_by_id_mut(id) {
        el.set_text(message.unwrap_or_default());
        el.set_hidden(message.is_none());
    }
}

pub fn open_edit_modal(doc: &mut Document, client_id: &str, dark: bool) {
    let input = |id: &str, placeholder: &str| {
        Element::new("input")
            .with_id(id)
            .with_attr("placeholder", placeholder)
            .with_attr("value", "")
    };

    let mut form = Element::new("div")
        .with_class("card")
        .with_child(Element::new("h3").with_text(format!("Edit Account: {}", client_id)))
        .with_child(input(ids::EDIT_API_KEY, "New API Key"))
        .with_child(input(ids::EDIT_API_SECRET, "New API Secret"))
        .with_child(input(ids::EDIT_TOTP_KEY, "New TOTP Key"))
        .with_child(input(ids::EDIT_EMAIL, "Email (optional)"))
        .with_child(input(ids::EDIT_MOBILE, "Mobile (optional)"))
        .with_child(
            Element::new("p")
                .with_id(ids::EDIT_ERROR)
                .with_class("red")
                .hidden(true),
        )
        .with_child(button(
            ids::EDIT_SAVE,
            "Save",
            Handler::SubmitEditForm {
                client_id: client_id.to_string(),
            },
        ))
        .with_child(button(ids::EDIT_CANCEL, "Cancel", Handler::CancelEdit));
    theme::decorate(&mut form, dark);

    doc.replace_children(ids::EDIT_MODAL, vec![form]);
    if let Some(modal) = doc.get_element_by_id_mut(ids::EDIT_MODAL) {
        modal.set_hidden(false);
    }
}

pub fn close_edit_modal(doc: &mut Document) {
    doc.replace_children(ids::EDIT_MODAL, Vec::new());
    if let Some(modal) = doc.get_element_by_id_mut(ids::EDIT_MODAL) {
        modal.set_hidden(true);
    }
}

pub fn render_toasts(doc: &mut Document, toasts: &[Toast]) {
    let children = toasts
        .iter()
        .map(|t| {
            Element::new("div")
                .with_id(&ids::toast(t.id))
                .with_class("toast text-white")
                .with_class(t.kind.class())
                .with_text(&t.message)
        })
        .collect();
    doc.replace_children(ids::TOASTS, children);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Order, Snapshot};
    use crate::dom::skeleton::build_document;
    use crate::dom::DomEvent;
    use crate::services::preferences_service::{Preferences, SortMode};
    use crate::test_support::account;
    use crate::view::{build_account_list, build_copy_trading};
    use std::collections::HashSet;

    fn snapshot() -> Snapshot {
        let mut master = account("M1", 10000.0, 10100.0);
        master.is_master = true;
        master.orders.push(Order {
            time: "09:20".to_string(),
            symbol: "SBIN".to_string(),
            action: "BUY".to_string(),
            qty: 5,
            price: 800.0,
            variety: "NORMAL".to_string(),
        });
        let mut child = account("C1", 5000.0, 5100.0);
        child.pnl = 20.0;
        Snapshot::new(vec![master, child])
    }

    fn render_all(doc: &mut Document, snapshot: &Snapshot) {
        let prefs = Preferences {
            sort_mode: SortMode::Today,
            dark_mode: false,
        };
        render_accounts(doc, &build_account_list(snapshot, &prefs), false);
        render_copy_trading(doc, build_copy_trading(snapshot, &HashSet::new()).as_ref(), false);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut doc = build_document(false);
        let snapshot = snapshot();

        render_all(&mut doc, &snapshot);
        let once = doc.clone();
        let nodes = doc.node_count();
        let listeners = doc.listener_count();

        render_all(&mut doc, &snapshot);
        assert_eq!(doc.node_count(), nodes);
        assert_eq!(doc.listener_count(), listeners);
        assert_eq!(doc, once);
    }

    #[test]
    fn test_summary_render_keeps_header_listeners() {
        let mut doc = build_document(false);
        let header = ids::summary_header("wins");
        let before = doc.get_element_by_id(&header).unwrap().listeners().len();

        let mut sort = SummarySort::default();
        render_trade_summary(&mut doc, &[], &sort);
        sort.click(SummaryKey::Wins);
        render_trade_summary(&mut doc, &[], &sort);

        let th = doc.get_element_by_id(&header).unwrap();
        assert_eq!(th.listeners().len(), before);
        assert_eq!(th.text(), Some("Wins ▼"));
    }

    #[test]
    fn test_no_master_hides_panel() {
        let mut doc = build_document(false);
        render_all(&mut doc, &snapshot());
        assert!(!doc.get_element_by_id(ids::MASTER_PANEL).unwrap().is_hidden());

        render_copy_trading(&mut doc, None, false);
        assert!(doc.get_element_by_id(ids::MASTER_PANEL).unwrap().is_hidden());
        assert!(doc
            .get_element_by_id(ids::CHILD_ACCOUNTS)
            .unwrap()
            .children()
            .is_empty());
    }

    #[test]
    fn test_child_named_master_keeps_its_own_chart_links() {
        let mut snapshot = snapshot();
        let mut child = account("master", 1000.0, 1000.0);
        child.orders.push(Order {
            time: "09:25".to_string(),
            symbol: "TCS".to_string(),
            action: "SELL".to_string(),
            qty: 1,
            price: 3500.0,
            variety: "NORMAL".to_string(),
        });
        snapshot.accounts.push(child);

        let mut doc = build_document(false);
        render_all(&mut doc, &snapshot);

        let mut seen = HashSet::new();
        doc.root().visit(&mut |el| {
            if let Some(id) = el.id() {
                assert!(seen.insert(id.to_string()), "duplicate id {}", id);
            }
        });

        let child_link = doc
            .dispatch(&ids::chart_link("master", 0), &DomEvent::click())
            .unwrap();
        assert_eq!(
            child_link,
            vec![crate::commands::Action::ViewChart {
                symbol: "TCS".to_string()
            }]
        );
    }

    #[test]
    fn test_rendered_cards_dispatch_actions() {
        let mut doc = build_document(false);
        render_all(&mut doc, &snapshot());

        let actions = doc
            .dispatch(
                &ids::chart_link(ids::MASTER_CHART_SCOPE, 0),
                &DomEvent::click(),
            )
            .unwrap();
        assert_eq!(
            actions,
            vec![crate::commands::Action::ViewChart {
                symbol: "SBIN".to_string()
            }]
        );

        let net = doc.get_element_by_id(ids::NET_PNL).unwrap();
        assert_eq!(net.text_content(), "Net P&L Today: ₹20.00");
        assert_eq!(
            doc.get_element_by_id(ids::MASTER_SELECT).unwrap().attr("value"),
            Some("M1")
        );
    }

    #[test]
    fn test_tabs_show_exactly_one_section() {
        let mut doc = build_document(false);
        render_tabs(&mut doc, Tab::Chartink);
        let visible: Vec<Tab> = Tab::ALL
            .into_iter()
            .filter(|t| !doc.get_element_by_id(t.section_id()).unwrap().is_hidden())
            .collect();
        assert_eq!(visible, vec![Tab::Chartink]);
    }

    #[test]
    fn test_edit_modal_open_close() {
        let mut doc = build_document(true);
        open_edit_modal(&mut doc, "C1", true);
        assert!(!doc.get_element_by_id(ids::EDIT_MODAL).unwrap().is_hidden());
        assert!(doc
            .get_element_by_id(ids::EDIT_SAVE)
            .unwrap()
            .has_class("btn-dark"));

        close_edit_modal(&mut doc);
        assert!(doc.get_element_by_id(ids::EDIT_SAVE).is_none());
    }
}
