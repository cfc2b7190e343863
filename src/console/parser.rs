//! Console command parsing

use crate::api::types::Multiplier;
use crate::commands::Action;
use crate::error::{AppError, Result};
use crate::services::SortMode;
use crate::view::{SummaryKey, Tab};
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  refresh                      fetch and render everything now
  sort net|today               account list order
  sort-toggle                  flip the account list order
  dark                         toggle dark mode
  tab accounts|copy|summary|chartink
  add                          add an account (prompts for fields)
  add-form                     show or hide the add-account form
  edit <name>                  edit an account's credentials
  delete <name>                delete an account
  autologin <name> on|off
  reconnect <name>             refresh an account's broker session
  copy on|off                  master copy trading switch
  child <name> on|off          per-child copy switch
  mult <name> <x>              set a child's multiplier
  master <name>                make an account the master
  console <name>               show or hide a child's orders and positions
  summary-sort <key>           sort the trade summary by a column
  export [path]                write the trade summary as CSV
  chart <SYM>                  open the NSE chart overlay
  close-chart
  click <element-id>           click an element of the document
  change <element-id> <value>  change an input of the document
  show [element-id]            print the document outline
  logout
  quit";

/// One console line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Run(Action),
    /// Prompt for the add-account fields
    Add,
    /// Open the edit modal and prompt for the new credentials
    Edit(String),
    Click(String),
    Change { id: String, value: String },
    Show(Option<String>),
    Quit,
}

/// Parse one line; blank lines parse to `None`
pub fn parse(line: &str) -> Result<Option<Command>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (head, args) {
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        ("refresh", []) => Command::Run(Action::Refresh),
        ("sort", [mode]) => {
            let mode = SortMode::parse(mode).ok_or_else(|| usage("sort net|today"))?;
            Command::Run(Action::SetSortMode(mode))
        }
        ("sort-toggle", []) => Command::Run(Action::ToggleSortMode),
        ("dark", []) => Command::Run(Action::ToggleDarkMode),
        ("tab", [tab]) => {
            let tab =
                Tab::parse(tab).ok_or_else(|| usage("tab accounts|copy|summary|chartink"))?;
            Command::Run(Action::ShowTab(tab))
        }
        ("add", []) => Command::Add,
        ("add-form", []) => Command::Run(Action::ToggleAddForm),
        ("edit", [name]) => Command::Edit(name.to_string()),
        ("delete", [name]) => Command::Run(Action::DeleteAccount {
            client_id: name.to_string(),
        }),
        ("autologin", [name, state]) => Command::Run(Action::ToggleAutologin {
            client_id: name.to_string(),
            enabled: switch(state).ok_or_else(|| usage("autologin <name> on|off"))?,
        }),
        ("reconnect", [name]) => Command::Run(Action::RefreshSession {
            client_id: name.to_string(),
        }),
        ("copy", [state]) => Command::Run(Action::ToggleCopyTrading {
            enabled: switch(state).ok_or_else(|| usage("copy on|off"))?,
        }),
        ("child", [name, state]) => Command::Run(Action::ToggleChildCopy {
            client_id: name.to_string(),
            enabled: switch(state).ok_or_else(|| usage("child <name> on|off"))?,
        }),
        ("mult", [name, value]) => {
            let multiplier = Multiplier::parse(value).ok_or_else(|| {
                AppError::Validation(format!("'{}' is not an offered multiplier", value))
            })?;
            Command::Run(Action::SetMultiplier {
                client_id: name.to_string(),
                multiplier,
            })
        }
        ("master", [name]) => Command::Run(Action::MakeMaster {
            name: name.to_string(),
        }),
        ("console", [name]) => Command::Run(Action::ToggleConsole {
            client_id: name.to_string(),
        }),
        ("summary-sort", [key]) => {
            let key = SummaryKey::parse(key).ok_or_else(|| {
                let keys: Vec<&str> = SummaryKey::ALL.iter().map(|k| k.as_str()).collect();
                usage(&format!("summary-sort {}", keys.join("|")))
            })?;
            Command::Run(Action::SortSummary(key))
        }
        ("export", []) => Command::Run(Action::ExportSummary { path: None }),
        ("export", [path]) => Command::Run(Action::ExportSummary {
            path: Some(PathBuf::from(*path)),
        }),
        ("chart", [symbol]) => Command::Run(Action::ViewChart {
            symbol: symbol.to_string(),
        }),
        ("close-chart", []) => Command::Run(Action::CloseChart),
        ("click", [id]) => Command::Click(id.to_string()),
        ("change", [id, value @ ..]) if !value.is_empty() => Command::Change {
            id: id.to_string(),
            value: value.join(" "),
        },
        ("show", []) => Command::Show(None),
        ("show", [id]) => Command::Show(Some(id.to_string())),
        ("logout", []) => Command::Run(Action::Logout),
        _ => {
            return Err(AppError::Validation(format!(
                "Unknown command '{}'; type 'help'",
                line.trim()
            )))
        }
    };

    Ok(Some(command))
}

fn switch(word: &str) -> Option<bool> {
    match word.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn usage(form: &str) -> AppError {
    AppError::Validation(format!("Usage: {}", form))
}
