pub mod advisor;
pub mod curve;
pub mod offer;
pub mod optimizer;
pub mod season;
pub mod storage;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, PricingConfig, StorageConfig};
use crate::domain::listing::{PriceCurve, PricePoint, RecommendationContext};
use crate::domain::season::DemandTier;
use crate::domain::storage::StorageUrgency;
use crate::errors::DomainError;

use self::advisor::{recommend, Recommendation};
use self::offer::OfferAssessment;
use self::season::{classify_multiplier, ProfileSeasonalModel, SeasonalModel};

/// Everything one evaluation produces for the caller: the chartable curve,
/// the seasonal reading, the optimum, the offer verdict, storage urgency and
/// the final recommendation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEvaluation {
    pub curve: PriceCurve,
    pub seasonal_multiplier: Decimal,
    pub demand_tier: DemandTier,
    pub optimal: PricePoint,
    pub offer: OfferAssessment,
    pub storage_urgency: StorageUrgency,
    pub recommendation: Recommendation,
}

pub trait DecisionRuntime: Send + Sync {
    fn evaluate(&self, context: &RecommendationContext) -> Result<ListingEvaluation, DomainError>;
}

/// Pure, synchronous runtime: every evaluation is a deterministic function
/// of the context snapshot and the configuration captured at construction.
pub struct DeterministicDecisionRuntime<S> {
    seasonal_model: S,
    pricing: PricingConfig,
    storage: StorageConfig,
}

impl<S> DeterministicDecisionRuntime<S> {
    pub fn new(seasonal_model: S, pricing: PricingConfig, storage: StorageConfig) -> Self {
        Self { seasonal_model, pricing, storage }
    }
}

impl DeterministicDecisionRuntime<ProfileSeasonalModel> {
    pub fn from_config(config: &EngineConfig) -> Self {
        let seasonal_model = ProfileSeasonalModel::new(
            config.pricing.peak_multiplier,
            config.pricing.off_season_multiplier,
        );
        Self::new(seasonal_model, config.pricing.clone(), config.storage.clone())
    }
}

impl<S> DecisionRuntime for DeterministicDecisionRuntime<S>
where
    S: SeasonalModel,
{
    fn evaluate(&self, context: &RecommendationContext) -> Result<ListingEvaluation, DomainError> {
        let storage_urgency = storage::classify_pressure(&context.storage, &self.storage)?;

        let seasonal_multiplier =
            self.seasonal_model.multiplier(context.item_type, context.month);
        let demand_tier = classify_multiplier(seasonal_multiplier);

        let curve = curve::generate_curve(
            context.listed_price,
            context.days_listed,
            seasonal_multiplier,
            self.pricing.days_listed_cap,
        )?;
        let optimal = *optimizer::optimal_point(&curve);
        let offer = offer::evaluate_offer(
            &curve,
            context.received_offer,
            &optimal,
            self.pricing.accept_ratio_threshold,
        );
        let recommendation = recommend(
            &offer,
            &optimal,
            context.received_offer,
            storage_urgency,
            context.days_listed,
            seasonal_multiplier,
            &self.pricing,
        );

        tracing::debug!(
            listed_price = %context.listed_price,
            received_offer = %context.received_offer,
            %seasonal_multiplier,
            optimal_price = optimal.price,
            urgency = %storage_urgency,
            ?recommendation,
            "evaluated listing"
        );

        Ok(ListingEvaluation {
            curve,
            seasonal_multiplier,
            demand_tier,
            optimal,
            offer,
            storage_urgency,
            recommendation,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::config::EngineConfig;
    use crate::domain::listing::RecommendationContext;
    use crate::domain::season::{DemandTier, SeasonType};
    use crate::domain::storage::{StorageState, StorageUrgency};
    use crate::errors::DomainError;
    use crate::pricing::advisor::{CounterReason, Recommendation};
    use crate::pricing::season::{ProfileSeasonalModel, SeasonalModel};

    use super::{DecisionRuntime, DeterministicDecisionRuntime};

    fn runtime() -> DeterministicDecisionRuntime<ProfileSeasonalModel> {
        DeterministicDecisionRuntime::from_config(&EngineConfig::default())
    }

    fn context() -> RecommendationContext {
        RecommendationContext {
            listed_price: Decimal::from(40),
            days_listed: 7,
            received_offer: Decimal::from(25),
            item_type: SeasonType::Summer,
            // April: a shoulder month for summer items, multiplier 1.0
            month: 4,
            storage: StorageState { current: 30, max: 50 },
        }
    }

    #[test]
    fn fair_offer_in_shoulder_season_is_accepted() {
        let evaluation = runtime().evaluate(&context()).expect("evaluation");

        assert_eq!(evaluation.seasonal_multiplier, Decimal::ONE);
        assert_eq!(evaluation.demand_tier, DemandTier::Shoulder);
        assert_eq!(evaluation.curve.floor().price, 16);
        assert_eq!(evaluation.optimal.expected_value, 11);
        assert_eq!(evaluation.offer.point.price, 24);
        assert_eq!(evaluation.offer.point.expected_value, 11);
        assert_eq!(evaluation.offer.accept_ratio, Some(Decimal::ONE));
        assert_eq!(evaluation.recommendation, Recommendation::Accept);
    }

    #[test]
    fn lowball_offer_under_favorable_conditions_gets_the_raw_optimal_counter() {
        let context = RecommendationContext {
            days_listed: 0,
            received_offer: Decimal::from(39),
            ..context()
        };
        let evaluation = runtime().evaluate(&context).expect("evaluation");

        // 30/50 storage is exactly 60%: Low under strict thresholds. Fresh
        // listing, neutral season, unacceptable offer -> default branch with
        // the unmodified optimal price.
        assert_eq!(evaluation.storage_urgency, StorageUrgency::Low);
        assert_eq!(evaluation.offer.point.price, 38);
        assert_eq!(evaluation.offer.point.expected_value, 2);
        assert!(!evaluation.offer.acceptable);
        assert_eq!(
            evaluation.recommendation,
            Recommendation::Counter {
                price: evaluation.optimal.price,
                reason: CounterReason::FavorableSeason
            }
        );
    }

    #[test]
    fn repeated_evaluations_are_bit_identical() {
        let runtime = runtime();
        let context = context();
        let first = runtime.evaluate(&context).expect("evaluation");
        let second = runtime.evaluate(&context).expect("evaluation");
        assert_eq!(first, second);
    }

    #[test]
    fn zero_storage_capacity_refuses_to_evaluate() {
        let context = RecommendationContext {
            storage: StorageState { current: 0, max: 0 },
            ..context()
        };
        let error = runtime().evaluate(&context).unwrap_err();
        assert_eq!(error, DomainError::ZeroStorageCapacity);
    }

    #[test]
    fn non_positive_listed_price_refuses_to_evaluate() {
        let context = RecommendationContext { listed_price: Decimal::ZERO, ..context() };
        let error = runtime().evaluate(&context).unwrap_err();
        assert!(matches!(error, DomainError::NonPositiveListedPrice { .. }));
    }

    #[test]
    fn runtime_supports_an_explicit_seasonal_model_seam() {
        struct FlatSeason;

        impl SeasonalModel for FlatSeason {
            fn multiplier(&self, _item_type: SeasonType, _month: u32) -> Decimal {
                Decimal::ONE
            }
        }

        let config = EngineConfig::default();
        let runtime = DeterministicDecisionRuntime::new(
            FlatSeason,
            config.pricing.clone(),
            config.storage.clone(),
        );
        let evaluation = runtime.evaluate(&context()).expect("evaluation");
        assert_eq!(evaluation.demand_tier, DemandTier::Shoulder);
    }
}
