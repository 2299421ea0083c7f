//! Gemini adapter for the
//! [`GenerationGateway`](scopelens_application::GenerationGateway) port.
//!
//! Speaks the `generateContent` REST endpoint over `reqwest`. The API key is
//! read once at startup into a [`Credential`] owned by the gateway.

pub mod credential;
pub mod gateway;
mod wire;

pub use credential::{Credential, DEFAULT_KEY_VARS};
pub use gateway::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, GeminiConfig, GeminiGateway};
