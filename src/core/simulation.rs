//! Month-by-month compounding of a fixed SIP contribution.
use crate::core::error::{PlanError, ensure_non_negative};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

pub const MONTHS_PER_YEAR: u32 = 12;

/// When a month's contribution lands relative to that month's interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionTiming {
    /// Contribute, then earn interest in the same month.
    #[serde(alias = "start-of-period", alias = "begin")]
    Start,
    /// Earn interest on the existing balance, then contribute.
    #[default]
    #[serde(alias = "end-of-period")]
    End,
}

impl Display for ContributionTiming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ContributionTiming::Start => "start of period",
                ContributionTiming::End => "end of period",
            }
        )
    }
}

impl FromStr for ContributionTiming {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" | "begin" | "start-of-period" => Ok(ContributionTiming::Start),
            "end" | "end-of-period" => Ok(ContributionTiming::End),
            _ => Err(anyhow::anyhow!("Invalid contribution timing: {}", s)),
        }
    }
}

/// A validated simulation input. Built only through [`SimulationRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRequest {
    contribution: f64,
    annual_rate_percent: f64,
    horizon_years: u32,
    timing: ContributionTiming,
    initial_balance: f64,
}

impl SimulationRequest {
    pub fn new(
        contribution: f64,
        annual_rate_percent: f64,
        horizon_years: u32,
        timing: ContributionTiming,
    ) -> Result<Self, PlanError> {
        let contribution = ensure_non_negative("contribution", contribution)?;
        let annual_rate_percent = ensure_non_negative("annual_rate", annual_rate_percent)?;
        if horizon_years == 0 {
            return Err(PlanError::invalid("years", "must be >= 1, got 0"));
        }
        if horizon_years.checked_mul(MONTHS_PER_YEAR).is_none() {
            return Err(PlanError::invalid(
                "years",
                format!("{horizon_years} years exceeds the supported month count"),
            ));
        }
        Ok(Self {
            contribution,
            annual_rate_percent,
            horizon_years,
            timing,
            initial_balance: 0.0,
        })
    }

    pub fn with_initial_balance(self, initial_balance: f64) -> Result<Self, PlanError> {
        let initial_balance = ensure_non_negative("initial", initial_balance)?;
        Ok(Self {
            initial_balance,
            ..self
        })
    }

    pub fn contribution(&self) -> f64 {
        self.contribution
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    pub fn timing(&self) -> ContributionTiming {
        self.timing
    }

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / MONTHS_PER_YEAR as f64
    }

    pub fn total_months(&self) -> u32 {
        // Bounded by the constructor
        self.horizon_years * MONTHS_PER_YEAR
    }

    /// Nominal amount put in by the end of `year`, lump sum included.
    pub fn invested_through(&self, year: u32) -> f64 {
        self.initial_balance + self.contribution * (f64::from(year) * f64::from(MONTHS_PER_YEAR))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month: u32,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: u32,
    pub balance: f64,
    pub invested: f64,
    pub returns: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub monthly: Vec<MonthlyRecord>,
    pub yearly: Vec<YearlyRecord>,
}

impl Simulation {
    pub fn final_balance(&self) -> f64 {
        self.yearly.last().map_or(0.0, |y| y.balance)
    }

    pub fn total_invested(&self) -> f64 {
        self.yearly.last().map_or(0.0, |y| y.invested)
    }

    pub fn total_returns(&self) -> f64 {
        self.yearly.last().map_or(0.0, |y| y.returns)
    }

    /// `(year, balance)` and `(year, invested)` points for charting.
    pub fn yearly_series(&self) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
        self.yearly
            .iter()
            .map(|r| ((r.year as f64, r.balance), (r.year as f64, r.invested)))
            .unzip()
    }
}

/// Runs the monthly compounding recurrence for `request`.
pub fn simulate(request: &SimulationRequest) -> Simulation {
    let rate = request.monthly_rate();
    let contribution = request.contribution;
    let mut balance = request.initial_balance;

    let monthly: Vec<MonthlyRecord> = (1..=request.total_months())
        .map(|month| {
            balance = match request.timing {
                ContributionTiming::Start => (balance + contribution) * (1.0 + rate),
                ContributionTiming::End => balance * (1.0 + rate) + contribution,
            };
            MonthlyRecord { month, balance }
        })
        .collect();

    let yearly = aggregate_yearly(request, &monthly);
    debug!(
        months = monthly.len(),
        years = yearly.len(),
        timing = %request.timing,
        "Simulation complete"
    );

    Simulation { monthly, yearly }
}

/// Snapshots the last month of every year.
fn aggregate_yearly(request: &SimulationRequest, monthly: &[MonthlyRecord]) -> Vec<YearlyRecord> {
    monthly
        .chunks(MONTHS_PER_YEAR as usize)
        .filter_map(|months| months.last())
        .map(|last| {
            let year = (last.month - 1) / MONTHS_PER_YEAR + 1;
            let invested = request.invested_through(year);
            YearlyRecord {
                year,
                balance: last.balance,
                invested,
                returns: last.balance - invested,
            }
        })
        .collect()
}
