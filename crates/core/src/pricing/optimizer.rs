use crate::domain::listing::{PriceCurve, PricePoint};

/// Returns the curve point with the greatest stored expected value. The scan
/// runs from highest price to lowest and only replaces the running maximum
/// on strict improvement, so ties keep the higher-priced point.
pub fn optimal_point(curve: &PriceCurve) -> &PricePoint {
    let mut best = curve.top();
    for point in curve.points() {
        if point.expected_value > best.expected_value {
            best = point;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::pricing::curve::generate_curve;

    use super::optimal_point;

    #[test]
    fn no_point_beats_the_selected_optimum() {
        let curve = generate_curve(Decimal::from(120), 10, Decimal::new(7, 1), 30).expect("curve");
        let optimal = optimal_point(&curve);
        for point in curve.points() {
            assert!(point.expected_value <= optimal.expected_value);
        }
    }

    #[test]
    fn rounded_ties_resolve_to_the_higher_price() {
        // listed 40 at 7 days in shoulder season: expected value plateaus at
        // 11 from price 24 down to price 18, so 24 wins.
        let curve = generate_curve(Decimal::from(40), 7, Decimal::ONE, 30).expect("curve");
        let optimal = optimal_point(&curve);
        assert_eq!(optimal.price, 24);
        assert_eq!(optimal.expected_value, 11);
    }

    #[test]
    fn day_zero_shoulder_curve_also_ties_at_price_24() {
        let curve = generate_curve(Decimal::from(40), 0, Decimal::ONE, 30).expect("curve");
        let optimal = optimal_point(&curve);
        assert_eq!(optimal.price, 24);
        assert_eq!(optimal.expected_value, 10);
    }
}
