mod chat_client;
mod dataset_source;

pub use chat_client::*;
pub use dataset_source::*;
