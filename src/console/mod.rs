//! Interactive console
//!
//! A line-oriented shell over the dashboard document. Typed commands become the
//! same [`Action`]s that DOM listeners produce; `click`/`change` route raw events
//! through the bound listeners. Toasts are printed as they are raised.

mod parser;
mod prompt;

pub use parser::{parse, Command, HELP};
pub use prompt::StdinPrompt;

use crate::api::types::{AddAccountRequest, EditAccountRequest};
use crate::commands::{self, Action, Outcome, Prompt};
use crate::dom::DomEvent;
use crate::notify::{Toast, ToastKind};
use crate::state::AppState;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Run the console until `quit`, a confirmed logout, or end of input
pub async fn run(state: Arc<AppState>) {
    let prompt = StdinPrompt::new();
    let printer = spawn_toast_printer(state.notifier.subscribe());

    println!("Copy Trading Dashboard. Type 'help' for commands.");
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let Some(line) = prompt.next_line().await else {
            debug!("Console input closed");
            break;
        };

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e.user_message());
                continue;
            }
        };

        if execute(&state, command, &prompt).await == Outcome::Quit {
            break;
        }
    }

    printer.abort();
}

/// Run one parsed command
pub async fn execute(state: &AppState, command: Command, prompt: &dyn Prompt) -> Outcome {
    match command {
        Command::Help => println!("{}", HELP),
        Command::Quit => return Outcome::Quit,
        Command::Run(action) => return commands::dispatch(state, action, prompt).await,
        Command::Show(id) => {
            let outline = state.document.lock().outline(id.as_deref());
            match outline {
                Some(outline) => print!("{}", outline),
                None => println!("No element with id '{}'", id.unwrap_or_default()),
            }
        }
        Command::Click(id) => return fire(state, &id, DomEvent::click(), prompt).await,
        Command::Change { id, value } => {
            return fire(state, &id, DomEvent::change(value), prompt).await
        }
        Command::Add => {
            if let Some(request) = ask_add_request(prompt).await {
                return commands::dispatch(state, Action::SubmitAddAccount(request), prompt)
                    .await;
            }
        }
        Command::Edit(client_id) => return edit(state, client_id, prompt).await,
    }
    Outcome::Continue
}

/// Deliver a DOM event and dispatch whatever its listeners resolve to
async fn fire(state: &AppState, id: &str, event: DomEvent, prompt: &dyn Prompt) -> Outcome {
    let resolved = state.document.lock().dispatch(id, &event);
    let actions = match resolved {
        Ok(actions) => actions,
        Err(e) => {
            state.notifier.error(e.user_message());
            state.publish();
            return Outcome::Continue;
        }
    };

    if actions.is_empty() {
        // A plain input change still shows up in the snapshot
        state.publish();
    }
    for action in actions {
        if commands::dispatch(state, action, prompt).await == Outcome::Quit {
            return Outcome::Quit;
        }
    }
    Outcome::Continue
}

async fn ask_field(prompt: &dyn Prompt, label: &str) -> Option<String> {
    prompt.ask(&format!("{}: ", label)).await
}

async fn ask_add_request(prompt: &dyn Prompt) -> Option<AddAccountRequest> {
    Some(AddAccountRequest {
        name: ask_field(prompt, "Client ID").await?,
        api_key: ask_field(prompt, "API key").await?,
        api_secret: ask_field(prompt, "API secret").await?,
        totp_key: ask_field(prompt, "TOTP key").await?,
        email: ask_field(prompt, "Email (optional)").await?,
        mobile: ask_field(prompt, "Mobile (optional)").await?,
    })
}

/// Open the edit modal, collect the new credentials and save; an empty API key cancels
async fn edit(state: &AppState, client_id: String, prompt: &dyn Prompt) -> Outcome {
    let open = Action::OpenEdit {
        client_id: client_id.clone(),
    };
    commands::dispatch(state, open, prompt).await;
    if state.session.read().edit_modal.as_deref() != Some(client_id.as_str()) {
        return Outcome::Continue;
    }

    let api_key = ask_field(prompt, "New API key (empty to cancel)")
        .await
        .unwrap_or_default();
    if api_key.is_empty() {
        return commands::dispatch(state, Action::CancelEdit, prompt).await;
    }

    let request = async {
        Some(EditAccountRequest {
            client_id: client_id.clone(),
            api_key,
            api_secret: ask_field(prompt, "New API secret").await?,
            totp_key: ask_field(prompt, "New TOTP key").await?,
            email: ask_field(prompt, "Email").await?,
            mobile: ask_field(prompt, "Mobile").await?,
        })
    }
    .await;

    match request {
        Some(request) => commands::dispatch(state, Action::SubmitEdit(request), prompt).await,
        None => commands::dispatch(state, Action::CancelEdit, prompt).await,
    }
}

fn spawn_toast_printer(mut toasts: broadcast::Receiver<Toast>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match toasts.recv().await {
                Ok(toast) => println!("{}", toast_line(&toast)),
                Err(RecvError::Lagged(skipped)) => warn!("Console skipped {} toasts", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn toast_line(toast: &Toast) -> String {
    let bell = if toast.chime { "\x07" } else { "" };
    let marker = match toast.kind {
        ToastKind::Success => "ok",
        ToastKind::Error => "!!",
    };
    format!("{}[{}] {}", bell, marker, toast.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ids;
    use crate::test_support::{account, test_state, MockApi};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Answers questions from a fixed script
    struct Scripted(Mutex<VecDeque<&'static str>>);

    impl Scripted {
        fn new(answers: &[&'static str]) -> Self {
            Self(Mutex::new(answers.iter().copied().collect()))
        }
    }

    #[async_trait]
    impl Prompt for Scripted {
        async fn confirm(&self, _message: &str) -> bool {
            true
        }

        async fn ask(&self, _question: &str) -> Option<String> {
            self.0.lock().pop_front().map(str::to_string)
        }
    }

    #[tokio::test]
    async fn test_add_prompts_then_submits() {
        let api = Arc::new(MockApi::default());
        let state = test_state(api.clone());
        let prompt = Scripted::new(&["NEW", "key", "secret", "totp", "", ""]);

        execute(&state, Command::Add, &prompt).await;
        assert_eq!(api.calls_to("add_account"), vec!["NEW"]);
    }

    #[tokio::test]
    async fn test_edit_with_empty_key_cancels() {
        let api = Arc::new(MockApi::with_accounts(vec![account("A", 0.0, 0.0)]));
        let state = test_state(api.clone());
        execute(&state, Command::Run(Action::Refresh), &Scripted::new(&[])).await;

        execute(&state, Command::Edit("A".to_string()), &Scripted::new(&[""])).await;

        assert_eq!(api.call_count("edit_account"), 0);
        assert!(state.session.read().edit_modal.is_none());
    }

    #[tokio::test]
    async fn test_click_routes_through_listeners() {
        let api = Arc::new(MockApi::default());
        let state = test_state(api.clone());

        let outcome = execute(
            &state,
            Command::Click(ids::REFRESH_BUTTON.to_string()),
            &Scripted::new(&[]),
        )
        .await;

        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(api.call_count("get_accounts_details"), 1);

        execute(&state, Command::Click("nope".to_string()), &Scripted::new(&[])).await;
        assert_eq!(state.notifier.active().len(), 1);
    }

    #[test]
    fn test_chime_rings_bell() {
        let state = test_state(Arc::new(MockApi::default()));
        let toast = state.notifier.success_chime("✅ C1 is now Master");
        assert_eq!(toast_line(&toast), "\x07[ok] ✅ C1 is now Master");
    }
}
