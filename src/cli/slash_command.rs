/// A line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// A question for the model, exactly as typed.
    Message(String),
    NewChat,
    ListChats,
    OpenChat(usize),
    Help,
    Quit,
    Empty,
    /// A slash command that could not be understood, with a hint.
    Invalid(String),
}

pub const HELP_TEXT: &str = "\
Type a question about the dataset, or one of:
  /new        archive this chat and start a new one
  /chats      list archived chats
  /open <n>   continue archived chat number n
  /help       show this help
  /quit       leave";

impl SlashCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return SlashCommand::Empty;
        }
        if !trimmed.starts_with('/') {
            return SlashCommand::Message(line.to_string());
        }

        let mut parts = trimmed.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let argument = parts.next();

        match (command, argument) {
            ("/new", None) => SlashCommand::NewChat,
            ("/chats" | "/history", None) => SlashCommand::ListChats,
            ("/open", Some(n)) => match n.parse() {
                Ok(n) => SlashCommand::OpenChat(n),
                Err(_) => SlashCommand::Invalid(format!("'{}' is not a chat number", n)),
            },
            ("/open", None) => SlashCommand::Invalid("usage: /open <n>".to_string()),
            ("/help" | "/?", None) => SlashCommand::Help,
            ("/quit" | "/exit", None) => SlashCommand::Quit,
            _ => SlashCommand::Invalid(format!(
                "unknown command '{}', type /help for the list",
                trimmed
            )),
        }
    }
}
