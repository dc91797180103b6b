mod csv_dataset_source;
mod generate_stream;
mod mock_chat_client;
mod ollama_client;

pub use csv_dataset_source::*;
pub use generate_stream::GenerateStreamDecoder;
pub use mock_chat_client::*;
pub use ollama_client::*;
