//! Progress display while waiting for the generation service

pub mod reporter;
