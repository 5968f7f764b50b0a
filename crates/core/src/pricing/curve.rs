use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::listing::{PriceCurve, PricePoint, CURVE_STEPS};
use crate::errors::DomainError;

const MARKDOWN_STEP_PCT: u32 = 5;
const MAX_PROBABILITY: i64 = 95;
const TIME_BOOST_CEILING: i64 = 20;

/// Generates the 13-point price/probability curve for a listing.
///
/// For each step k = 0..12 the price is `listed_price * (1 - 0.05k)`. The
/// base probability rises linearly from 0 at the listed price toward 60 at
/// the 40% floor; a time boost of up to 20 points saturates once the listing
/// age reaches `days_listed_cap`; the seasonal multiplier scales the sum,
/// clamped to at most 95. Expected value is `price * probability / 100`.
///
/// Rounding to integers happens only at emission. Downstream consumers
/// compare the stored rounded values, which can tie where the raw
/// intermediates would not; that is deliberate.
pub fn generate_curve(
    listed_price: Decimal,
    days_listed: u32,
    multiplier: Decimal,
    days_listed_cap: u32,
) -> Result<PriceCurve, DomainError> {
    if listed_price <= Decimal::ZERO {
        return Err(DomainError::NonPositiveListedPrice { price: listed_price });
    }
    if multiplier <= Decimal::ZERO {
        return Err(DomainError::InvalidMultiplier { value: multiplier });
    }

    let time_boost = if days_listed >= days_listed_cap {
        Decimal::from(TIME_BOOST_CEILING)
    } else {
        Decimal::from(days_listed) / Decimal::from(days_listed_cap)
            * Decimal::from(TIME_BOOST_CEILING)
    };

    let step = Decimal::new(MARKDOWN_STEP_PCT.into(), 2);
    let points: [PricePoint; CURVE_STEPS] = std::array::from_fn(|k| {
        let fraction = Decimal::ONE - step * Decimal::from(k as u32);
        let price = listed_price * fraction;
        let base_probability = (Decimal::ONE - fraction) * Decimal::ONE_HUNDRED;
        let probability =
            ((base_probability + time_boost) * multiplier).min(Decimal::from(MAX_PROBABILITY));
        let expected_value = price * probability / Decimal::ONE_HUNDRED;

        PricePoint {
            price: round_to_int(price),
            sale_probability: round_to_int(probability),
            expected_value: round_to_int(expected_value),
        }
    });

    Ok(PriceCurve::new(points))
}

// Round half away from zero; every curve quantity is non-negative, so this
// matches rounding half toward positive infinity.
fn round_to_int(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}
