//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod dataset_reader;
pub mod generation_gateway;
pub mod progress;
