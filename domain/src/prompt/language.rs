//! Output language value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Natural language the generation service is asked to answer in.
///
/// Defaults to Thai. Any other language is carried by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLanguage {
    name: String,
    native_name: Option<String>,
}

impl OutputLanguage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_name: None,
        }
    }

    pub fn thai() -> Self {
        Self {
            name: "Thai".to_string(),
            native_name: Some("ภาษาไทย".to_string()),
        }
    }

    pub fn english() -> Self {
        Self::new("English")
    }

    /// Plain name, e.g. `Thai`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name with the native spelling when known, e.g. `Thai (ภาษาไทย)`
    pub fn label(&self) -> String {
        match &self.native_name {
            Some(native) => format!("{} ({})", self.name, native),
            None => self.name.clone(),
        }
    }
}

impl Default for OutputLanguage {
    fn default() -> Self {
        Self::thai()
    }
}

impl std::fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for OutputLanguage {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "thai" | "th" | "ภาษาไทย" => Self::thai(),
            "english" | "en" => Self::english(),
            _ => Self::new(s.trim()),
        }
    }
}

impl Serialize for OutputLanguage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for OutputLanguage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(OutputLanguage::from(s.as_str()))
    }
}
