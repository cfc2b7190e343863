//! One-time document setup
//!
//! Builds the static layout and binds every listener that lives outside the
//! re-rendered containers (header buttons, tabs, forms, table headers). This runs
//! exactly once per session; renders never bind header listeners again.

use super::{ids, Document, Element, EventKind};
use crate::commands::Handler;
use crate::render::theme;
use crate::view::{SummaryKey, Tab};

const TITLE: &str = "Copy Trading Dashboard";

/// Build the dashboard document with the theme already applied
pub fn build_document(dark: bool) -> Document {
    let mut body = Element::new("body")
        .with_child(header())
        .with_child(tabs())
        .with_child(account_section())
        .with_child(copy_section())
        .with_child(summary_section())
        .with_child(chartink_section())
        .with_child(chart_modal())
        .with_child(Element::new("div").with_id(ids::EDIT_MODAL).hidden(true))
        .with_child(Element::new("div").with_id(ids::TOASTS));

    // Theme goes on before anything is shown
    theme::decorate(&mut body, dark);
    Document::new(body)
}

pub fn title() -> &'static str {
    TITLE
}

fn button(id: &str, text: &str, handler: Handler) -> Element {
    Element::new("button")
        .with_id(id)
        .with_class("btn")
        .with_text(text)
        .on(EventKind::Click, handler)
}

fn input(id: &str, placeholder: &str) -> Element {
    Element::new("input")
        .with_id(id)
        .with_attr("placeholder", placeholder)
        .with_attr("value", "")
}

fn header() -> Element {
    Element::new("header")
        .with_child(Element::new("h2").with_text(TITLE))
        .with_child(Element::new("div").with_id(ids::NET_PNL).with_text("Net P&L Today:"))
        .with_child(
            button(ids::SORT_TOGGLE, "Sort by Net P&L", Handler::ToggleSortMode)
                .with_attr("data-sort", "net"),
        )
        .with_child(button(
            ids::DARK_MODE_TOGGLE,
            "🌓 Dark Mode",
            Handler::ToggleDarkMode,
        ))
        .with_child(button(ids::REFRESH_BUTTON, "🔄 Refresh", Handler::Refresh))
        .with_child(button(ids::LOGOUT_BUTTON, "Logout", Handler::Logout))
}

fn tabs() -> Element {
    Element::new("nav").with_children(Tab::ALL.iter().map(|tab| {
        button(
            &ids::tab_button(tab.section_id()),
            tab.label(),
            Handler::ShowTab(*tab),
        )
    }))
}

fn account_section() -> Element {
    let form = Element::new("div")
        .with_id(ids::ADD_ACCOUNT_FORM)
        .with_class("card")
        .hidden(true)
        .with_child(input(ids::CLIENT_ID, "Client ID"))
        .with_child(input(ids::API_KEY, "API Key"))
        .with_child(input(ids::API_SECRET, "API Secret"))
        .with_child(input(ids::TOTP_KEY, "TOTP Key"))
        .with_child(input(ids::EMAIL_ID, "Email (optional)"))
        .with_child(input(ids::MOBILE_NO, "Mobile (optional)"))
        .with_child(
            Element::new("p")
                .with_id(ids::ADD_FORM_ERROR)
                .with_class("red")
                .hidden(true),
        )
        .with_child(button(ids::ADD_ACCOUNT_SUBMIT, "Add", Handler::SubmitAddForm));

    Element::new("section")
        .with_id(Tab::Accounts.section_id())
        .with_child(button(
            ids::ADD_FORM_TOGGLE,
            "➕ Add Account",
            Handler::ToggleAddForm,
        ))
        .with_child(form)
        .with_child(Element::new("div").with_id(ids::ACCOUNTS))
        .with_child(
            Element::new("div")
                .with_child(Element::new("label").with_text("Master"))
                .with_child(Element::new("select").with_id(ids::MASTER_SELECT))
                .with_child(Element::new("label").with_text("Children"))
                .with_child(Element::new("select").with_id(ids::CHILD_SELECT)),
        )
}

fn copy_section() -> Element {
    let figure = |label: &str, id: &str| {
        Element::new("div")
            .with_text(label)
            .with_child(Element::new("span").with_id(id))
    };

    let master = Element::new("div")
        .with_id(ids::MASTER_PANEL)
        .with_class("card")
        .hidden(true)
        .with_child(Element::new("h4").with_text("Master Account"))
        .with_child(Element::new("p").with_id(ids::MASTER_CLIENT_ID))
        .with_child(figure("Balance: ₹", ids::MASTER_BALANCE))
        .with_child(figure("Today's P&L: ₹", ids::MASTER_PNL))
        .with_child(figure("Net P&L: ₹", ids::MASTER_NET_PNL))
        .with_child(
            Element::new("label").with_text("Copy Trading").with_child(
                Element::new("input")
                    .with_id(ids::COPY_ALL_TOGGLE)
                    .with_attr("type", "checkbox")
                    .on(EventKind::Change, Handler::ToggleCopyTrading),
            ),
        )
        .with_child(Element::new("div").with_id(ids::MASTER_CONSOLE));

    Element::new("section")
        .with_id(Tab::Copy.section_id())
        .hidden(true)
        .with_child(master)
        .with_child(
            Element::new("div")
                .with_child(Element::new("label").with_text("New Master"))
                .with_child(Element::new("select").with_id(ids::NEW_MASTER))
                .with_child(button(
                    ids::MAKE_MASTER,
                    "👑 Make Master",
                    Handler::MakeMasterFromSelect,
                )),
        )
        .with_child(Element::new("div").with_id(ids::CHILD_ACCOUNTS))
}

fn summary_section() -> Element {
    let headers = Element::new("tr").with_children(SummaryKey::ALL.iter().map(|key| {
        Element::new("th")
            .with_id(&ids::summary_header(key.as_str()))
            .with_attr("data-key", key.as_str())
            .with_text(key.label())
            .on(EventKind::Click, Handler::SortSummary(*key))
    }));

    Element::new("section")
        .with_id(Tab::Summary.section_id())
        .hidden(true)
        .with_child(
            Element::new("table")
                .with_id(ids::TRADE_SUMMARY_TABLE)
                .with_class("table")
                .with_child(Element::new("thead").with_child(headers))
                .with_child(Element::new("tbody").with_id(ids::TRADE_SUMMARY_BODY)),
        )
        .with_child(button(
            ids::EXPORT_CSV,
            "📥 Export CSV",
            Handler::ExportSummary,
        ))
}

fn chartink_section() -> Element {
    let headers = Element::new("tr").with_children(
        ["Time", "Symbol", "Qty", "Action", "Chart"]
            .iter()
            .map(|h| Element::new("th").with_text(*h)),
    );

    Element::new("section")
        .with_id(Tab::Chartink.section_id())
        .hidden(true)
        .with_child(
            Element::new("table")
                .with_id(ids::CHARTINK_TABLE)
                .with_class("table")
                .with_child(Element::new("thead").with_child(headers))
                .with_child(Element::new("tbody").with_id(ids::CHARTINK_BODY)),
        )
}

fn chart_modal() -> Element {
    Element::new("div")
        .with_id(ids::CHART_MODAL)
        .with_class("modal")
        .hidden(true)
        .with_child(Element::new("h5").with_id(ids::CHART_TITLE))
        .with_child(Element::new("iframe").with_id(ids::CHART_FRAME))
        .with_child(button(ids::CHART_CLOSE, "Close", Handler::CloseChart))
}
