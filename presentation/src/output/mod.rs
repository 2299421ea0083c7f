//! Report and session formatting

pub mod chart;
pub mod console;
pub mod formatter;
