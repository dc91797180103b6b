mod ask_question;
mod load_dataset;
mod send_message;

pub use ask_question::*;
pub use load_dataset::*;
pub use send_message::*;
