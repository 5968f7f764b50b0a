use serde::{Deserialize, Serialize};

/// Closed set of item categories with distinct seasonal demand profiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeasonType {
    Summer,
    Winter,
    Spring,
    Fall,
    AllYear,
}

/// Month sets (1-12) describing when demand for a category peaks, holds
/// steady, or drops. The three sets of one profile never share a month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SeasonProfile {
    pub peak: &'static [u32],
    pub shoulder: &'static [u32],
    pub low: &'static [u32],
}

impl SeasonType {
    pub fn profile(&self) -> SeasonProfile {
        match self {
            Self::Summer => SeasonProfile {
                peak: &[6, 7, 8],
                shoulder: &[4, 5, 9],
                low: &[1, 2, 3, 10, 11, 12],
            },
            Self::Winter => SeasonProfile {
                peak: &[11, 12, 1],
                shoulder: &[2, 3, 10],
                low: &[4, 5, 6, 7, 8, 9],
            },
            Self::Spring => SeasonProfile {
                peak: &[3, 4, 5],
                shoulder: &[2, 6, 9],
                low: &[1, 7, 8, 10, 11, 12],
            },
            Self::Fall => SeasonProfile {
                peak: &[9, 10, 11],
                shoulder: &[8, 12, 1],
                low: &[2, 3, 4, 5, 6, 7],
            },
            Self::AllYear => SeasonProfile {
                peak: &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
                shoulder: &[],
                low: &[],
            },
        }
    }

    pub fn all() -> [SeasonType; 5] {
        [Self::Summer, Self::Winter, Self::Spring, Self::Fall, Self::AllYear]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summer => "summer",
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Fall => "fall",
            Self::AllYear => "allYear",
        }
    }
}

impl std::str::FromStr for SeasonType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "summer" => Ok(Self::Summer),
            "winter" => Ok(Self::Winter),
            "spring" => Ok(Self::Spring),
            "fall" => Ok(Self::Fall),
            "allyear" | "all-year" | "all_year" => Ok(Self::AllYear),
            other => {
                Err(format!("unknown item type `{other}` (expected summer|winter|spring|fall|allYear)"))
            }
        }
    }
}

/// Demand tier a seasonal multiplier falls into, with the pricing advisory
/// shown to sellers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandTier {
    Peak,
    Shoulder,
    Low,
}

impl DemandTier {
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::Peak => "Peak season - can be firm on price",
            Self::Shoulder => "Average demand - standard pricing",
            Self::Low => "Off-season - consider storage vs. discount tradeoff",
        }
    }
}
