use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inventory occupancy: items currently held against available slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageState {
    pub current: u32,
    pub max: u32,
}

impl StorageState {
    /// Occupancy as a percentage, or `None` when `max` is zero (a
    /// configuration error callers are expected to reject upstream).
    pub fn pressure_percent(&self) -> Option<Decimal> {
        if self.max == 0 {
            return None;
        }
        Some(Decimal::from(100 * u64::from(self.current)) / Decimal::from(self.max))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageUrgency {
    Low,
    Medium,
    High,
}

impl StorageUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for StorageUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::StorageState;

    #[test]
    fn pressure_percent_is_exact_for_partial_occupancy() {
        let state = StorageState { current: 30, max: 50 };
        assert_eq!(state.pressure_percent(), Some(Decimal::from(60)));
    }

    #[test]
    fn zero_capacity_has_no_pressure_percent() {
        let state = StorageState { current: 5, max: 0 };
        assert_eq!(state.pressure_percent(), None);
    }
}
