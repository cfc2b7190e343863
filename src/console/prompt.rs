//! Line input shared by the command loop and confirmations

use crate::commands::Prompt;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::warn;

/// Reads lines from stdin; every reader shares one buffered handle
#[derive(Clone)]
pub struct StdinPrompt {
    lines: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl StdinPrompt {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(stdin()).lines())),
        }
    }

    /// Next line, or `None` at end of input
    pub async fn next_line(&self) -> Option<String> {
        match self.lines.lock().await.next_line().await {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                None
            }
        }
    }

    /// Print `question` and read the answer, trimmed
    async fn read_answer(&self, question: &str) -> Option<String> {
        print!("{}", question);
        // Prompt text only; a failed flush just delays it
        let _ = std::io::stdout().flush();
        self.next_line().await.map(|line| line.trim().to_string())
    }
}

impl Default for StdinPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompt for StdinPrompt {
    async fn confirm(&self, message: &str) -> bool {
        let answer = self.read_answer(&format!("{} [y/N] ", message)).await;
        is_yes(answer.as_deref())
    }

    async fn ask(&self, question: &str) -> Option<String> {
        self.read_answer(question).await
    }
}

fn is_yes(answer: Option<&str>) -> bool {
    matches!(
        answer.map(str::to_ascii_lowercase).as_deref(),
        Some("y" | "yes")
    )
}
