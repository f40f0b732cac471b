//! What-if comparison of final corpus across candidate return rates.
use crate::core::error::{PlanError, ensure_non_negative};
use crate::core::simulation::{ContributionTiming, SimulationRequest, YearlyRecord, simulate};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_WHAT_IF_RATES: [f64; 3] = [12.0, 15.0, 18.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateComparison {
    pub rate: f64,
    pub final_corpus: f64,
    pub yearly: Vec<YearlyRecord>,
}

/// Simulates the same SIP once per candidate rate.
///
/// Every run starts from a zero balance, regardless of any lump sum used in
/// the primary plan. Results keep the order of `rates`.
pub fn compare(
    contribution: f64,
    horizon_years: u32,
    timing: ContributionTiming,
    rates: &[f64],
) -> Result<Vec<RateComparison>, PlanError> {
    if rates.is_empty() {
        return Err(PlanError::invalid("rates", "at least one rate is required"));
    }
    for &rate in rates {
        ensure_non_negative("rates", rate)?;
    }

    rates
        .iter()
        .map(|&rate| {
            let request = SimulationRequest::new(contribution, rate, horizon_years, timing)?;
            let simulation = simulate(&request);
            debug!(rate, final_corpus = simulation.final_balance(), "What-if run");
            Ok(RateComparison {
                rate,
                final_corpus: simulation.final_balance(),
                yearly: simulation.yearly,
            })
        })
        .collect()
}
