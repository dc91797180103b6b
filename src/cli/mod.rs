use clap::Subcommand;

mod slash_command;

pub use slash_command::{SlashCommand, HELP_TEXT};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Chat about the dataset interactively (the default)
    Chat,

    /// Ask a single question and print the reply
    Ask {
        question: String,
    },

    /// Print the dataset rows that are sent to the model as context
    Sample,
}
