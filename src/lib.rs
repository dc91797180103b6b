pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AskQuestionUseCase, ChatClient, DatasetSource, LoadDatasetUseCase, SendMessageUseCase,
    NO_RESPONSE_TEXT, WARNING_MARKER,
};

pub use cli::{Commands, SlashCommand};

pub use connector::{
    CsvDatasetSource, GenerateStreamDecoder, MockChatClient, OllamaClient, OllamaConfig,
};

pub use domain::{
    AppState, ChatMessage, Dataset, DomainError, Role, Transcript, SAMPLE_ROWS,
};
