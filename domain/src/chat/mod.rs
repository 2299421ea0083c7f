//! Follow-up chat domain.
//!
//! - [`entities::ChatMessage`]: a single timestamped turn
//! - [`history::ChatHistory`]: the append-only transcript scoped to one analysis

pub mod entities;
pub mod history;
