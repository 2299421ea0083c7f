//! Service credential, read once at startup.

use std::fmt;

/// Environment variables searched for the API key, in order
pub const DEFAULT_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// API key for the generation service.
///
/// Immutable once constructed; `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    key: String,
    source: String,
}

impl Credential {
    pub fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
        }
    }

    /// First non-blank value among `vars`
    pub fn from_env(vars: &[&str]) -> Option<Self> {
        Self::resolve(vars, |name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup
    pub fn resolve(vars: &[&str], lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        vars.iter().find_map(|name| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(|value| Self::new(value, *name))
        })
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Name of the variable the key came from
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("source", &self.source)
            .field("key", &"<redacted>")
            .finish()
    }
}
