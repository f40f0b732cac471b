use crate::core::funds::{FundDataProvider, FundPerformance};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tracing::debug;

/// Serves fund performance from an in-memory table.
#[derive(Debug, Clone)]
pub struct StaticFundProvider {
    funds: Vec<FundPerformance>,
}

impl StaticFundProvider {
    pub fn new(funds: Vec<FundPerformance>) -> Self {
        Self { funds }
    }

    /// The built-in mock dataset.
    pub fn mock() -> Self {
        Self::new(mock_funds())
    }
}

impl Default for StaticFundProvider {
    fn default() -> Self {
        Self::mock()
    }
}

pub fn mock_funds() -> Vec<FundPerformance> {
    vec![
        FundPerformance::new("Alpha Growth Fund", 12.5, 42.0, 80.0),
        FundPerformance::new("Beta Equity Fund", 15.2, 52.5, 100.0),
        FundPerformance::new("Gamma Balanced Fund", 10.8, 35.0, 65.0),
    ]
}

#[async_trait]
impl FundDataProvider for StaticFundProvider {
    async fn list_funds(&self) -> Result<Vec<String>> {
        Ok(self.funds.iter().map(|f| f.name.clone()).collect())
    }

    async fn fetch_performance(&self, name: &str) -> Result<FundPerformance> {
        debug!("Looking up fund: {}", name);
        self.funds
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| anyhow!("Unknown fund: {}", name))
    }
}
