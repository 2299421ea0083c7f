//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod ask_follow_up;
pub mod run_analysis;
pub mod session_controller;
