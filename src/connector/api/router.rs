use anyhow::Result;

use crate::{AppState, Commands};

use super::container::Container;
use super::controller::{AskController, ChatController, SampleController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    chat_controller: ChatController<'a>,
    sample_controller: SampleController,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            chat_controller: ChatController::new(container),
            sample_controller: SampleController::new(),
        }
    }

    /// Run one command. The returned text is printed by the caller; the
    /// interactive chat writes to stdout itself and returns nothing.
    pub async fn route(&self, command: Commands, state: &mut AppState) -> Result<String> {
        match command {
            Commands::Ask { question } => self.ask_controller.ask(question, state).await,
            Commands::Sample => self.sample_controller.sample(state),
            Commands::Chat => {
                let input = tokio::io::BufReader::new(tokio::io::stdin());
                let mut output = std::io::stdout();
                self.chat_controller.run(state, input, &mut output).await?;
                Ok(String::new())
            }
        }
    }
}
