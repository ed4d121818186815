use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EnigmaError;

/// Preset strength for randomly generated machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    #[default]
    Low,
    Medium,
    High,
    Extreme,
}

impl SecurityLevel {
    pub const ALL: [SecurityLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Extreme];

    pub fn rotor_count(self) -> usize {
        match self {
            Self::Low => 3,
            Self::Medium => 5,
            Self::High => 8,
            Self::Extreme => 12,
        }
    }

    /// Requested plugboard pairs; capped at `size / 2` when applied.
    pub fn plugboard_pairs(self) -> usize {
        match self {
            Self::Low => 2,
            Self::Medium => 8,
            Self::High => 15,
            Self::Extreme => 20,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityLevel {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "extreme" => Ok(Self::Extreme),
            _ => Err(EnigmaError::UnknownSecurityLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parameters() {
        let table: Vec<(usize, usize)> = SecurityLevel::ALL
            .iter()
            .map(|l| (l.rotor_count(), l.plugboard_pairs()))
            .collect();
        assert_eq!(table, vec![(3, 2), (5, 8), (8, 15), (12, 20)]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<SecurityLevel>().unwrap(), SecurityLevel::High);
        assert_eq!(" Medium ".parse::<SecurityLevel>().unwrap(), SecurityLevel::Medium);
        assert!(matches!(
            "paranoid".parse::<SecurityLevel>(),
            Err(EnigmaError::UnknownSecurityLevel(_))
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        for level in SecurityLevel::ALL {
            assert_eq!(level.to_string().parse::<SecurityLevel>().unwrap(), level);
        }
    }
}
