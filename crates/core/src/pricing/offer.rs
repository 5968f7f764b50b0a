use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::listing::{PriceCurve, PricePoint};

/// Where a received offer lands on the curve and how it compares to the
/// optimal point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferAssessment {
    /// First curve point at or below the offer; the floor point when the
    /// offer undercuts the whole curve.
    pub point: PricePoint,
    /// Offer expected value over optimal expected value. `None` when the
    /// optimal expected value is zero and the ratio is undefined.
    pub accept_ratio: Option<Decimal>,
    pub acceptable: bool,
}

/// Locates the curve point for a received offer and judges acceptability.
///
/// Acceptability compares expected values directly (`offer_ev >= threshold *
/// optimal_ev`) rather than dividing, so a degenerate zero-value optimum
/// cannot produce a division by zero.
pub fn evaluate_offer(
    curve: &PriceCurve,
    received_offer: Decimal,
    optimal: &PricePoint,
    accept_threshold: Decimal,
) -> OfferAssessment {
    let point = curve
        .points()
        .iter()
        .find(|point| Decimal::from(point.price) <= received_offer)
        .unwrap_or_else(|| curve.floor());

    let accept_ratio = (optimal.expected_value != 0)
        .then(|| Decimal::from(point.expected_value) / Decimal::from(optimal.expected_value));
    let acceptable = Decimal::from(point.expected_value)
        >= accept_threshold * Decimal::from(optimal.expected_value);

    OfferAssessment { point: *point, accept_ratio, acceptable }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::pricing::curve::generate_curve;
    use crate::pricing::optimizer::optimal_point;

    use super::evaluate_offer;

    fn threshold() -> Decimal {
        Decimal::new(9, 1)
    }

    #[test]
    fn offer_maps_to_first_point_at_or_below_it() {
        let curve = generate_curve(Decimal::from(40), 7, Decimal::ONE, 30).expect("curve");
        let optimal = optimal_point(&curve);

        let assessment = evaluate_offer(&curve, Decimal::from(25), optimal, threshold());
        assert_eq!(assessment.point.price, 24);
    }

    #[test]
    fn offer_below_the_floor_falls_back_to_the_floor_point() {
        let curve = generate_curve(Decimal::from(40), 7, Decimal::ONE, 30).expect("curve");
        let optimal = optimal_point(&curve);

        let assessment = evaluate_offer(&curve, Decimal::from(3), optimal, threshold());
        assert_eq!(assessment.point.price, curve.floor().price);
    }

    #[test]
    fn offer_above_the_listed_price_lands_on_the_top_point() {
        let curve = generate_curve(Decimal::from(40), 7, Decimal::ONE, 30).expect("curve");
        let optimal = optimal_point(&curve);

        let assessment = evaluate_offer(&curve, Decimal::from(500), optimal, threshold());
        assert_eq!(assessment.point.price, curve.top().price);
    }

    #[test]
    fn matching_expected_values_are_acceptable() {
        // 40 listed, 7 days, shoulder season, offer 25: offer point and
        // optimum both carry expected value 11, ratio exactly 1.
        let curve = generate_curve(Decimal::from(40), 7, Decimal::ONE, 30).expect("curve");
        let optimal = optimal_point(&curve);

        let assessment = evaluate_offer(&curve, Decimal::from(25), optimal, threshold());
        assert_eq!(assessment.accept_ratio, Some(Decimal::ONE));
        assert!(assessment.acceptable);
    }

    #[test]
    fn lowball_offer_is_not_acceptable() {
        // 40 listed, fresh listing, shoulder season, offer 39: the offer
        // point (price 38) has expected value 2 against an optimum of 10.
        let curve = generate_curve(Decimal::from(40), 0, Decimal::ONE, 30).expect("curve");
        let optimal = optimal_point(&curve);

        let assessment = evaluate_offer(&curve, Decimal::from(39), optimal, threshold());
        assert_eq!(assessment.point.price, 38);
        assert_eq!(assessment.point.expected_value, 2);
        assert!(!assessment.acceptable);
    }
}
