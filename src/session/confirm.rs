use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::future::Future;
use std::io::Write;
use tokio::sync::oneshot;

/// Source of the yes/no answer required before deleting anything
#[allow(async_fn_in_trait)]
pub trait Confirmation {
    /// `Ok(true)` only for an explicit affirmative answer
    async fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Only a literal `yes` (any case, surrounding blanks ignored) counts
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Run a blocking line read on its own thread and wait for it, unless
/// `interrupted` completes first.
///
/// Returns `None` on interrupt. The reader thread is left behind blocked and
/// never keeps the runtime or the process alive.
pub async fn read_line_or_interrupt<R, I>(read: R, interrupted: I) -> Result<Option<String>>
where
    R: FnOnce() -> std::io::Result<String> + Send + 'static,
    I: Future<Output = ()>,
{
    let (tx, rx) = oneshot::channel();
    std::thread::Builder::new()
        .name("confirmation-reader".to_string())
        .spawn(move || {
            // Receiver gone means the prompt was interrupted
            let _ = tx.send(read());
        })
        .context("Unable to start the confirmation reader")?;

    tokio::select! {
        answer = rx => {
            let line = answer
                .context("Confirmation reader stopped")?
                .context("Unable to read the confirmation")?;
            Ok(Some(line))
        }
        _ = interrupted => Ok(None),
    }
}

/// Asks on stdout and reads one line from stdin.
///
/// End of input or Ctrl+C while waiting count as a refusal.
#[derive(Debug, Default)]
pub struct TerminalConfirmation;

impl Confirmation for TerminalConfirmation {
    async fn confirm(&mut self, prompt: &str) -> Result<bool> {
        print!("{}", prompt);
        std::io::stdout().flush().context("Unable to write the prompt")?;

        let read_stdin = || -> std::io::Result<String> {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            Ok(line)
        };
        let ctrl_c = async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        match read_line_or_interrupt(read_stdin, ctrl_c).await? {
            Some(line) => Ok(is_affirmative(&line)),
            None => {
                println!();
                Ok(false)
            }
        }
    }
}

/// Replays pre-recorded answers; refuses once they run out
#[derive(Debug, Default)]
pub struct ScriptedConfirmation {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedConfirmation {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Confirmation for ScriptedConfirmation {
    async fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.prompts.push(prompt.to_string());
        Ok(self
            .answers
            .pop_front()
            .map(|answer| is_affirmative(&answer))
            .unwrap_or(false))
    }
}
