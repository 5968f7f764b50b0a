pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;

pub use config::{
    ConfigError, ConfigOverrides, EngineConfig, LoadOptions, LogFormat, LoggingConfig,
    PricingConfig, StorageConfig,
};
pub use domain::listing::{PriceCurve, PricePoint, RecommendationContext, CURVE_STEPS};
pub use domain::season::{DemandTier, SeasonProfile, SeasonType};
pub use domain::storage::{StorageState, StorageUrgency};
pub use errors::{ApplicationError, DomainError};
pub use pricing::advisor::{CounterReason, Recommendation};
pub use pricing::offer::OfferAssessment;
pub use pricing::season::{classify_multiplier, ProfileSeasonalModel, SeasonalModel};
pub use pricing::{DecisionRuntime, DeterministicDecisionRuntime, ListingEvaluation};
