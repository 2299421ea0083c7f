//! Interactive chat module
//!
//! Provides a reedline-based REPL for editing inputs, running analyses and
//! asking follow-up questions about the current result.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
