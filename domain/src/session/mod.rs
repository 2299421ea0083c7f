//! Interactive session domain.
//!
//! - [`state::Session`]: everything one interactive user works on, with
//!   pure transition methods for the analyze/ask state machine
//! - [`demo`]: bundled demo inputs

pub mod demo;
pub mod state;
