//! Interactive chat client.
//!
//! Forwards each line the user types to a hosted chat-completions API and
//! prints the reply. One request per turn, no conversation history.

mod client;
mod session;
mod types;

pub use client::ChatClient;
pub use session::{prompt_api_key, run_session};
pub use types::{ChatMessage, Role};
