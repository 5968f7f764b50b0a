use std::path::PathBuf;

use listwise_core::pricing::curve::generate_curve;
use listwise_core::pricing::season::classify_multiplier;
use listwise_core::{
    ConfigOverrides, DemandTier, EngineConfig, LoadOptions, PriceCurve, ProfileSeasonalModel,
    SeasonType, SeasonalModel,
};
use rust_decimal::Decimal;
use serde::Serialize;

use super::CommandResult;

#[derive(Debug, Clone)]
pub struct CurveInput {
    pub listed_price: Decimal,
    pub days_listed: u32,
    pub item_type: SeasonType,
    pub month: u32,
}

#[derive(Debug, Serialize)]
struct CurveReport {
    listed_price: Decimal,
    item_type: SeasonType,
    month: u32,
    seasonal_multiplier: Decimal,
    demand_tier: DemandTier,
    curve: PriceCurve,
}

pub fn run(
    input: &CurveInput,
    config_path: Option<PathBuf>,
    overrides: ConfigOverrides,
    json: bool,
) -> CommandResult {
    let config = match EngineConfig::load(LoadOptions {
        config_path,
        overrides,
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("curve", "config_validation", error.to_string(), 2)
        }
    };

    let model = ProfileSeasonalModel::new(
        config.pricing.peak_multiplier,
        config.pricing.off_season_multiplier,
    );
    let multiplier = model.multiplier(input.item_type, input.month);

    let curve = match generate_curve(
        input.listed_price,
        input.days_listed,
        multiplier,
        config.pricing.days_listed_cap,
    ) {
        Ok(curve) => curve,
        Err(error) => return CommandResult::failure("curve", "invalid_input", error.to_string(), 2),
    };

    if json {
        let report = CurveReport {
            listed_price: input.listed_price,
            item_type: input.item_type,
            month: input.month,
            seasonal_multiplier: multiplier,
            demand_tier: classify_multiplier(multiplier),
            curve,
        };
        return match serde_json::to_string_pretty(&report) {
            Ok(output) => CommandResult::success(output),
            Err(error) => CommandResult::failure("curve", "serialization", error.to_string(), 1),
        };
    }

    CommandResult::success(render_table(&curve, multiplier))
}

fn render_table(curve: &PriceCurve, multiplier: Decimal) -> String {
    let mut lines = Vec::new();
    lines.push(format!("seasonal multiplier: {multiplier}"));
    lines.push(format!("{:>8}  {:>12}  {:>15}", "price", "probability%", "expected value"));
    for point in curve.points() {
        lines.push(format!(
            "{:>8}  {:>12}  {:>15}",
            point.price, point.sale_probability, point.expected_value
        ));
    }
    lines.join("\n")
}
