use rust_decimal::Decimal;

use crate::domain::season::{DemandTier, SeasonType};

/// Maps an item category and a calendar month to a demand multiplier.
pub trait SeasonalModel: Send + Sync {
    fn multiplier(&self, item_type: SeasonType, month: u32) -> Decimal;
}

/// Seasonal model backed by the built-in category profiles. Peak months get
/// the configured peak multiplier, shoulder months exactly 1.0, everything
/// else (including out-of-range months) the off-season multiplier.
#[derive(Clone, Debug)]
pub struct ProfileSeasonalModel {
    peak_multiplier: Decimal,
    off_season_multiplier: Decimal,
}

impl ProfileSeasonalModel {
    pub fn new(peak_multiplier: Decimal, off_season_multiplier: Decimal) -> Self {
        Self { peak_multiplier, off_season_multiplier }
    }
}

impl SeasonalModel for ProfileSeasonalModel {
    fn multiplier(&self, item_type: SeasonType, month: u32) -> Decimal {
        let profile = item_type.profile();
        if profile.peak.contains(&month) {
            return self.peak_multiplier;
        }
        if profile.shoulder.contains(&month) {
            return Decimal::ONE;
        }
        self.off_season_multiplier
    }
}

/// Advisory tier for a multiplier: above parity is peak, parity is shoulder,
/// below parity is off-season.
pub fn classify_multiplier(multiplier: Decimal) -> DemandTier {
    if multiplier > Decimal::ONE {
        DemandTier::Peak
    } else if multiplier == Decimal::ONE {
        DemandTier::Shoulder
    } else {
        DemandTier::Low
    }
}
