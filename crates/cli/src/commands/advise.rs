use std::path::PathBuf;

use listwise_core::{
    ConfigOverrides, CounterReason, DecisionRuntime, DeterministicDecisionRuntime, EngineConfig,
    ListingEvaluation, LoadOptions, Recommendation, RecommendationContext, SeasonType,
    StorageState,
};
use rust_decimal::Decimal;
use serde::Serialize;

use super::CommandResult;

#[derive(Debug, Clone)]
pub struct AdviseInput {
    pub listed_price: Decimal,
    pub days_listed: u32,
    pub received_offer: Decimal,
    pub item_type: SeasonType,
    pub month: u32,
    pub storage: StorageState,
}

#[derive(Debug, Serialize)]
struct AdviseReport {
    context: RecommendationContext,
    evaluation: ListingEvaluation,
    recommendation_text: String,
}

pub fn run(
    input: &AdviseInput,
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
            return CommandResult::failure("advise", "config_validation", error.to_string(), 2)
        }
    };

    let context = RecommendationContext {
        listed_price: input.listed_price,
        days_listed: input.days_listed,
        received_offer: input.received_offer,
        item_type: input.item_type,
        month: input.month,
        storage: input.storage,
    };

    let runtime = DeterministicDecisionRuntime::from_config(&config);
    let evaluation = match runtime.evaluate(&context) {
        Ok(evaluation) => evaluation,
        Err(error) => return CommandResult::failure("advise", "invalid_input", error.to_string(), 2),
    };

    let recommendation_text = render_recommendation(&evaluation.recommendation);

    if json {
        let report = AdviseReport { context, evaluation, recommendation_text };
        return match serde_json::to_string_pretty(&report) {
            Ok(output) => CommandResult::success(output),
            Err(error) => CommandResult::failure("advise", "serialization", error.to_string(), 1),
        };
    }

    CommandResult::success(render_text(&context, &evaluation, &recommendation_text))
}

pub fn render_recommendation(recommendation: &Recommendation) -> String {
    match recommendation {
        Recommendation::Accept => "Accept the offer".to_string(),
        Recommendation::Counter { price, reason: CounterReason::OffSeason } => {
            format!("Consider {price} ({})", CounterReason::OffSeason.annotation())
        }
        Recommendation::Counter { price, reason } => {
            format!("Counter with {price} ({})", reason.annotation())
        }
    }
}

fn render_text(
    context: &RecommendationContext,
    evaluation: &ListingEvaluation,
    recommendation_text: &str,
) -> String {
    let mut lines = Vec::new();

    lines.push("Storage Status".to_string());
    lines.push(format!(
        "  current storage: {}/{} items",
        context.storage.current, context.storage.max
    ));
    lines.push(format!("  storage pressure: {}", evaluation.storage_urgency));

    lines.push("Seasonal Analysis".to_string());
    lines.push(format!("  current month: {}", month_name(context.month)));
    lines.push(format!("  {}", evaluation.demand_tier.advisory()));

    lines.push("Price Analysis".to_string());
    lines.push(format!(
        "  optimal price: {} (sale probability {}%, expected value {})",
        evaluation.optimal.price,
        evaluation.optimal.sale_probability,
        evaluation.optimal.expected_value
    ));
    lines.push(format!(
        "  offer {} maps to price point {} (expected value {})",
        context.received_offer, evaluation.offer.point.price, evaluation.offer.point.expected_value
    ));
    lines.push(format!("  {recommendation_text}"));

    lines.join("\n")
}

fn month_name(month: u32) -> String {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    match month {
        1..=12 => NAMES[(month - 1) as usize].to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use listwise_core::{CounterReason, Recommendation};

    use super::render_recommendation;

    #[test]
    fn acceptance_renders_without_a_counter_price() {
        assert_eq!(render_recommendation(&Recommendation::Accept), "Accept the offer");
    }

    #[test]
    fn off_season_counters_render_as_a_suggestion() {
        let text = render_recommendation(&Recommendation::Counter {
            price: 20,
            reason: CounterReason::OffSeason,
        });
        assert_eq!(text, "Consider 20 (off-season pricing)");
    }

    #[test]
    fn other_counters_render_with_their_annotation() {
        let text = render_recommendation(&Recommendation::Counter {
            price: 20,
            reason: CounterReason::StoragePressure,
        });
        assert_eq!(text, "Counter with 20 (due to high storage pressure)");
    }
}
