//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: generation model identifier
//! - [`error::DomainError`]: domain-level validation errors

pub mod error;
pub mod model;
