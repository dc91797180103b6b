use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::cli::{SlashCommand, HELP_TEXT};
use crate::{AppState, ChatMessage, Role, Transcript};

use super::super::Container;

const TITLE_CHARS: usize = 40;

/// Interactive chat loop: reads lines from `input`, writes the conversation
/// to `output`. Each question is awaited before the next line is read.
pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn run<R, W>(&self, state: &mut AppState, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let use_case = self.container.send_message_use_case();
        writeln!(output, "{}", self.format_banner(state))?;

        let mut lines = input.lines();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(output)?;
                break;
            };

            match SlashCommand::parse(&line) {
                SlashCommand::Empty => {}
                SlashCommand::Quit => break,
                SlashCommand::Help => writeln!(output, "{}", HELP_TEXT)?,
                SlashCommand::Invalid(hint) => writeln!(output, "{}", hint)?,
                SlashCommand::NewChat => {
                    state.new_chat();
                    writeln!(output, "Started a new chat.")?;
                }
                SlashCommand::ListChats => {
                    writeln!(output, "{}", self.format_history(state.history()))?
                }
                SlashCommand::OpenChat(number) => match state.open_chat(number) {
                    Ok(transcript) => {
                        writeln!(output, "Chat {}:", number)?;
                        writeln!(output, "{}", self.format_transcript(transcript))?;
                    }
                    Err(e) => writeln!(output, "{}", e)?,
                },
                SlashCommand::Message(text) => {
                    let spinner = self.thinking_spinner();
                    let result = use_case.execute(state, &text).await;
                    spinner.finish_and_clear();

                    match result {
                        Ok(reply) => writeln!(output, "{}", self.format_message(&reply))?,
                        Err(e) => writeln!(output, "{}", e)?,
                    }
                }
            }
        }

        debug!(
            "Chat loop ended with {} archived chats",
            state.history().len()
        );
        Ok(())
    }

    fn thinking_spinner(&self) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Thinking...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    fn format_banner(&self, state: &AppState) -> String {
        let (rows, columns) = state.dataset().shape();
        format!(
            "Chatting about {} ({} rows, {} columns) with {}.\nType /help for commands.",
            state.dataset().source(),
            rows,
            columns,
            self.container.model()
        )
    }

    fn format_message(&self, message: &ChatMessage) -> String {
        let label = match message.role() {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        format!("[{}] {}", label, message.content())
    }

    fn format_transcript(&self, transcript: &Transcript) -> String {
        transcript
            .messages()
            .iter()
            .map(|m| self.format_message(m))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_history(&self, history: &[Transcript]) -> String {
        if history.is_empty() {
            return "No chats yet...".to_string();
        }

        history
            .iter()
            .enumerate()
            .map(|(i, transcript)| {
                format!(
                    "Chat {}: {} ({} messages)",
                    i + 1,
                    transcript.title(TITLE_CHARS).unwrap_or_default(),
                    transcript.len()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
