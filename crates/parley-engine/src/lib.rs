//! Intent engine for parley
//!
//! This crate provides reply generation for the reply service: the intent
//! definition model, a naive-Bayes intent classifier trained at startup,
//! and the responder that turns one user message into one reply.

pub mod classifier;
pub mod intents;
pub mod responder;

// Re-export commonly used types
pub use classifier::{tokenize, IntentClassifier, Prediction};
pub use intents::{Intent, IntentError, IntentSet};
pub use responder::Responder;
