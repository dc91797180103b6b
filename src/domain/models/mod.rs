mod app_state;
mod chat_message;
mod dataset;
mod transcript;

pub use app_state::*;
pub use chat_message::*;
pub use dataset::*;
pub use transcript::*;
