//! Ambition level value object and its prompt bands

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Named band an [`AmbitionLevel`] falls into.
///
/// Each band carries exactly one prompt instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbitionBand {
    /// Level 20: plain facts
    Basic,
    /// Levels 30-50: trends and standard recommendations
    Standard,
    /// Levels 60-70: correlations and forecasts
    Advanced,
    /// Levels 80-100: consultant-grade strategy
    Visionary,
}

impl AmbitionBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmbitionBand::Basic => "basic",
            AmbitionBand::Standard => "standard",
            AmbitionBand::Advanced => "advanced",
            AmbitionBand::Visionary => "visionary",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AmbitionBand::Basic => "Basic",
            AmbitionBand::Standard => "Standard",
            AmbitionBand::Advanced => "Advanced",
            AmbitionBand::Visionary => "Visionary",
        }
    }

    /// Instruction embedded in the analysis prompt for this band
    pub fn instruction(&self) -> &'static str {
        match self {
            AmbitionBand::Basic => {
                "Provide a basic summary and simple facts. Keep it straightforward."
            }
            AmbitionBand::Standard => {
                "Analyze trends and provide standard professional recommendations."
            }
            AmbitionBand::Advanced => {
                "Deep dive into correlations, predict future outcomes, and suggest process improvements."
            }
            AmbitionBand::Visionary => {
                "Think like a C-Level consultant. Provide disruptive strategies, high-impact foresight, and innovative tool suggestions that transform the business."
            }
        }
    }
}

impl std::fmt::Display for AmbitionBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Ambition level (Value Object)
///
/// An integer in `20..=100` in steps of 10. Construction rejects anything
/// else, so [`AmbitionLevel::band`] is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AmbitionLevel(u8);

impl AmbitionLevel {
    pub const MIN: u8 = 20;
    pub const MAX: u8 = 100;
    pub const STEP: u8 = 10;

    /// Upper bound (inclusive) of each band below Visionary
    const BASIC_MAX: u8 = 20;
    const STANDARD_MAX: u8 = 50;
    const ADVANCED_MAX: u8 = 70;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) || value % Self::STEP != 0 {
            return Err(DomainError::AmbitionOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn band(&self) -> AmbitionBand {
        match self.0 {
            v if v <= Self::BASIC_MAX => AmbitionBand::Basic,
            v if v <= Self::STANDARD_MAX => AmbitionBand::Standard,
            v if v <= Self::ADVANCED_MAX => AmbitionBand::Advanced,
            _ => AmbitionBand::Visionary,
        }
    }

    pub fn instruction(&self) -> &'static str {
        self.band().instruction()
    }

    /// All valid levels, lowest first
    pub fn all() -> impl Iterator<Item = AmbitionLevel> {
        (Self::MIN..=Self::MAX)
            .step_by(Self::STEP as usize)
            .map(AmbitionLevel)
    }
}

impl Default for AmbitionLevel {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u8> for AmbitionLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AmbitionLevel> for u8 {
    fn from(level: AmbitionLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for AmbitionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl std::str::FromStr for AmbitionLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%');
        let value: u8 = trimmed
            .parse()
            .map_err(|_| DomainError::AmbitionOutOfRange(0))?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_valid_level_has_exactly_one_band() {
        let levels: Vec<_> = AmbitionLevel::all().collect();
        assert_eq!(levels.len(), 9);
        for level in levels {
            // deterministic: same level, same band
            assert_eq!(level.band(), level.band());
            assert_eq!(level.instruction(), level.band().instruction());
        }
    }

    #[test]
    fn test_band_boundaries() {
        let band = |v| AmbitionLevel::new(v).unwrap().band();
        assert_eq!(band(20), AmbitionBand::Basic);
        assert_eq!(band(30), AmbitionBand::Standard);
        assert_eq!(band(50), AmbitionBand::Standard);
        assert_eq!(band(60), AmbitionBand::Advanced);
        assert_eq!(band(70), AmbitionBand::Advanced);
        assert_eq!(band(80), AmbitionBand::Visionary);
        assert_eq!(band(100), AmbitionBand::Visionary);
    }

    #[test]
    fn test_band_instructions_are_distinct() {
        let bands = [
            AmbitionBand::Basic,
            AmbitionBand::Standard,
            AmbitionBand::Advanced,
            AmbitionBand::Visionary,
        ];
        for (i, a) in bands.iter().enumerate() {
            for b in &bands[i + 1..] {
                assert_ne!(a.instruction(), b.instruction());
            }
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            AmbitionLevel::new(10),
            Err(DomainError::AmbitionOutOfRange(10))
        );
        assert_eq!(
            AmbitionLevel::new(110),
            Err(DomainError::AmbitionOutOfRange(110))
        );
        assert_eq!(
            AmbitionLevel::new(55),
            Err(DomainError::AmbitionOutOfRange(55))
        );
    }

    #[test]
    fn test_parse_with_percent_sign() {
        let level: AmbitionLevel = "70%".parse().unwrap();
        assert_eq!(level.value(), 70);
        assert!("abc".parse::<AmbitionLevel>().is_err());
    }

    #[test]
    fn test_serde_rejects_invalid_level() {
        let level: AmbitionLevel = serde_json::from_str("80").unwrap();
        assert_eq!(level.band(), AmbitionBand::Visionary);
        assert!(serde_json::from_str::<AmbitionLevel>("85").is_err());
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(AmbitionLevel::default().value(), 50);
        assert_eq!(AmbitionLevel::default().band(), AmbitionBand::Standard);
    }
}
