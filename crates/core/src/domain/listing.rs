use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::season::SeasonType;
use crate::domain::storage::StorageState;

/// Number of samples on every price curve: the listed price plus twelve 5%
/// markdown steps down to 40% of the listed price.
pub const CURVE_STEPS: usize = 13;

/// One sample of the price/probability curve. All three fields are rounded
/// to integers at emission; downstream comparisons operate on these stored
/// values, never on raw intermediates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: i64,
    pub sale_probability: i64,
    pub expected_value: i64,
}

/// Ordered price/probability samples, highest price first. Always exactly
/// [`CURVE_STEPS`] points regardless of the listed price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCurve {
    points: [PricePoint; CURVE_STEPS],
}

impl PriceCurve {
    pub(crate) fn new(points: [PricePoint; CURVE_STEPS]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Highest-priced point (the listed price itself).
    pub fn top(&self) -> &PricePoint {
        &self.points[0]
    }

    /// Lowest-priced point (40% of the listed price).
    pub fn floor(&self) -> &PricePoint {
        &self.points[CURVE_STEPS - 1]
    }
}

/// Read-only bundle of caller inputs for one evaluation. The engine is a
/// pure function of this value plus the engine configuration; nothing here
/// is mutated across invocations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationContext {
    pub listed_price: Decimal,
    pub days_listed: u32,
    pub received_offer: Decimal,
    pub item_type: SeasonType,
    pub month: u32,
    pub storage: StorageState,
}
