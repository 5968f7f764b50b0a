use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;
use crate::domain::listing::PricePoint;
use crate::domain::storage::StorageUrgency;
use crate::pricing::offer::OfferAssessment;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterReason {
    StoragePressure,
    ListingAge,
    OffSeason,
    FavorableSeason,
}

impl CounterReason {
    pub fn annotation(&self) -> &'static str {
        match self {
            Self::StoragePressure => "due to high storage pressure",
            Self::ListingAge => "due to long listing time",
            Self::OffSeason => "off-season pricing",
            Self::FavorableSeason => "favorable season",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Recommendation {
    Accept,
    Counter { price: i64, reason: CounterReason },
}

/// Decides how to respond to a received offer. Branches are evaluated in
/// fixed priority order; the first match wins:
///
/// 1. acceptable offer -> accept, no counter price
/// 2. high storage pressure -> counter at the optimal/offer midpoint
/// 3. listing older than the staleness threshold -> the same midpoint
/// 4. off-season multiplier -> the same midpoint
/// 5. otherwise -> counter at the unmodified optimal price
///
/// The final branch deliberately skips the midpoint formula; the asymmetry
/// matches the reference behavior and must not be unified.
pub fn recommend(
    assessment: &OfferAssessment,
    optimal: &PricePoint,
    received_offer: Decimal,
    storage_urgency: StorageUrgency,
    days_listed: u32,
    seasonal_multiplier: Decimal,
    config: &PricingConfig,
) -> Recommendation {
    if assessment.acceptable {
        return Recommendation::Accept;
    }

    let midpoint = round_to_int((Decimal::from(optimal.price) + received_offer) / Decimal::TWO);

    if storage_urgency == StorageUrgency::High {
        return Recommendation::Counter { price: midpoint, reason: CounterReason::StoragePressure };
    }
    if days_listed > config.days_listed_threshold {
        return Recommendation::Counter { price: midpoint, reason: CounterReason::ListingAge };
    }
    if seasonal_multiplier < Decimal::ONE {
        return Recommendation::Counter { price: midpoint, reason: CounterReason::OffSeason };
    }

    Recommendation::Counter { price: optimal.price, reason: CounterReason::FavorableSeason }
}

fn round_to_int(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::config::PricingConfig;
    use crate::domain::listing::PricePoint;
    use crate::domain::storage::StorageUrgency;
    use crate::pricing::offer::OfferAssessment;

    use super::{recommend, CounterReason, Recommendation};

    fn optimal() -> PricePoint {
        PricePoint { price: 24, sale_probability: 45, expected_value: 11 }
    }

    fn rejected_offer() -> OfferAssessment {
        OfferAssessment {
            point: PricePoint { price: 16, sale_probability: 65, expected_value: 7 },
            accept_ratio: Some(Decimal::new(64, 2)),
            acceptable: false,
        }
    }

    fn accepted_offer() -> OfferAssessment {
        OfferAssessment {
            point: PricePoint { price: 24, sale_probability: 45, expected_value: 11 },
            accept_ratio: Some(Decimal::ONE),
            acceptable: true,
        }
    }

    #[test]
    fn acceptable_offer_short_circuits_every_other_branch() {
        let recommendation = recommend(
            &accepted_offer(),
            &optimal(),
            Decimal::from(25),
            StorageUrgency::High,
            400,
            Decimal::new(7, 1),
            &PricingConfig::default(),
        );
        assert_eq!(recommendation, Recommendation::Accept);
    }

    #[test]
    fn high_storage_pressure_counters_at_the_midpoint() {
        let recommendation = recommend(
            &rejected_offer(),
            &optimal(),
            Decimal::from(15),
            StorageUrgency::High,
            0,
            Decimal::ONE,
            &PricingConfig::default(),
        );
        // round((24 + 15) / 2) = round(19.5) = 20
        assert_eq!(
            recommendation,
            Recommendation::Counter { price: 20, reason: CounterReason::StoragePressure }
        );
    }

    #[test]
    fn stale_listing_counters_at_the_midpoint() {
        let recommendation = recommend(
            &rejected_offer(),
            &optimal(),
            Decimal::from(16),
            StorageUrgency::Low,
            31,
            Decimal::ONE,
            &PricingConfig::default(),
        );
        assert_eq!(
            recommendation,
            Recommendation::Counter { price: 20, reason: CounterReason::ListingAge }
        );
    }

    #[test]
    fn days_listed_exactly_at_threshold_is_not_stale() {
        let recommendation = recommend(
            &rejected_offer(),
            &optimal(),
            Decimal::from(16),
            StorageUrgency::Low,
            30,
            Decimal::ONE,
            &PricingConfig::default(),
        );
        // strict comparison: 30 is not > 30, and the season is neutral, so
        // the favorable-season default applies.
        assert_eq!(
            recommendation,
            Recommendation::Counter { price: 24, reason: CounterReason::FavorableSeason }
        );
    }

    #[test]
    fn off_season_counters_at_the_midpoint() {
        let recommendation = recommend(
            &rejected_offer(),
            &optimal(),
            Decimal::from(16),
            StorageUrgency::Low,
            0,
            Decimal::new(7, 1),
            &PricingConfig::default(),
        );
        assert_eq!(
            recommendation,
            Recommendation::Counter { price: 20, reason: CounterReason::OffSeason }
        );
    }

    #[test]
    fn favorable_conditions_counter_at_the_raw_optimal_price() {
        let recommendation = recommend(
            &rejected_offer(),
            &optimal(),
            Decimal::from(16),
            StorageUrgency::Low,
            0,
            Decimal::new(13, 1),
            &PricingConfig::default(),
        );
        assert_eq!(
            recommendation,
            Recommendation::Counter { price: 24, reason: CounterReason::FavorableSeason }
        );
    }

    #[test]
    fn branch_priority_prefers_storage_pressure_over_staleness_and_season() {
        let recommendation = recommend(
            &rejected_offer(),
            &optimal(),
            Decimal::from(15),
            StorageUrgency::High,
            400,
            Decimal::new(7, 1),
            &PricingConfig::default(),
        );
        assert_eq!(
            recommendation,
            Recommendation::Counter { price: 20, reason: CounterReason::StoragePressure }
        );
    }
}
