//! Reference fund performance data and selection.

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use rust_decimal::{Decimal, prelude::*};
use rust_finprim::rate::cagr;
use serde::{Deserialize, Serialize};

/// Static performance figures for a named fund, all in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundPerformance {
    pub name: String,
    pub cagr: f64,
    pub return_3y: f64,
    pub return_5y: f64,
}

impl FundPerformance {
    pub fn new(name: &str, cagr: f64, return_3y: f64, return_5y: f64) -> Self {
        Self {
            name: name.to_string(),
            cagr,
            return_3y,
            return_5y,
        }
    }

    /// Annualized equivalent of the cumulative 3 year return.
    pub fn annualized_3y(&self) -> Result<f64> {
        annualize(self.return_3y, 3)
    }

    /// Annualized equivalent of the cumulative 5 year return.
    pub fn annualized_5y(&self) -> Result<f64> {
        annualize(self.return_5y, 5)
    }
}

#[async_trait]
pub trait FundDataProvider: Send + Sync {
    async fn list_funds(&self) -> Result<Vec<String>>;
    async fn fetch_performance(&self, name: &str) -> Result<FundPerformance>;
}

/// Converts a cumulative percentage return over `years` into a CAGR percentage.
pub fn annualize(cumulative_percent: f64, years: u32) -> Result<f64> {
    if years == 0 {
        bail!("Cannot annualize over zero years");
    }
    let begin_bal = Decimal::from(100);
    let end_bal = Decimal::from_f64(100.0 + cumulative_percent)
        .ok_or_else(|| anyhow!("Invalid cumulative return: {cumulative_percent}"))?;
    if end_bal <= Decimal::ZERO {
        bail!("Cumulative return of {cumulative_percent}% leaves nothing to annualize");
    }
    let rate = cagr(begin_bal, end_bal, Decimal::from(years));
    (rate * Decimal::from(100))
        .to_f64()
        .ok_or_else(|| anyhow!("CAGR percentage conversion failed"))
}

/// Picks the funds named in `selection`, in the order of `available`.
///
/// An empty selection means every fund.
pub fn select_funds(available: &[String], selection: &[String]) -> Result<Vec<String>> {
    if selection.is_empty() {
        return Ok(available.to_vec());
    }

    let unknown: Vec<&String> = selection
        .iter()
        .filter(|name| !available.iter().any(|a| a.eq_ignore_ascii_case(name)))
        .collect();
    if !unknown.is_empty() {
        bail!(
            "Unknown fund(s): {}. Available: {}",
            unknown
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            available.join(", ")
        );
    }

    Ok(available
        .iter()
        .filter(|a| selection.iter().any(|s| s.eq_ignore_ascii_case(a)))
        .cloned()
        .collect())
}
