//! Chat client for parley
//!
//! This crate owns the transcript and the message send/receive cycle: it
//! captures user input, renders both sides of the exchange through an
//! injected view, and performs one JSON round trip per submission against
//! a reply service.

pub mod chat;
pub mod transcript;
pub mod transport;
pub mod view;

// Re-export commonly used types
pub use chat::ChatClient;
pub use transcript::Transcript;
pub use transport::{HttpReplyTransport, ReplyTransport};
pub use view::TranscriptView;
