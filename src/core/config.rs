use crate::core::compare::DEFAULT_WHAT_IF_RATES;
use crate::core::error::PlanError;
use crate::core::funds::FundPerformance;
use crate::core::simulation::{ContributionTiming, SimulationRequest};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlanConfig {
    pub initial: f64,
    pub monthly: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub timing: ContributionTiming,
}

impl Default for PlanConfig {
    fn default() -> Self {
        PlanConfig {
            initial: 0.0,
            monthly: 10_000.0,
            annual_rate: 12.0,
            years: 20,
            timing: ContributionTiming::End,
        }
    }
}

impl PlanConfig {
    pub fn to_request(&self) -> Result<SimulationRequest, PlanError> {
        SimulationRequest::new(self.monthly, self.annual_rate, self.years, self.timing)?
            .with_initial_balance(self.initial)
    }
}

/// Command line values that take precedence over the config file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlanOverrides {
    pub initial: Option<f64>,
    pub monthly: Option<f64>,
    pub annual_rate: Option<f64>,
    pub years: Option<u32>,
    pub timing: Option<ContributionTiming>,
}

impl PlanOverrides {
    pub fn apply(&self, plan: &PlanConfig) -> PlanConfig {
        PlanConfig {
            initial: self.initial.unwrap_or(plan.initial),
            monthly: self.monthly.unwrap_or(plan.monthly),
            annual_rate: self.annual_rate.unwrap_or(plan.annual_rate),
            years: self.years.unwrap_or(plan.years),
            timing: self.timing.unwrap_or(plan.timing),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WhatIfConfig {
    pub rates: Vec<f64>,
}

impl Default for WhatIfConfig {
    fn default() -> Self {
        WhatIfConfig {
            rates: DEFAULT_WHAT_IF_RATES.to_vec(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub plan: PlanConfig,
    pub what_if: WhatIfConfig,
    /// Replaces the built-in mock fund table when present.
    pub funds: Option<Vec<FundPerformance>>,
    pub currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            plan: PlanConfig::default(),
            what_if: WhatIfConfig::default(),
            funds: None,
            currency: "INR".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when it is absent.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "sipplan", "sipplan")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config = Self::from_yaml(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
plan:
  initial: 50000
  monthly: 15000
  annual_rate: 11.5
  years: 15
  timing: start
what_if:
  rates: [8, 10.5]
funds:
  - name: "Delta Index Fund"
    cagr: 13.1
    return_3y: 44.0
    return_5y: 85.0
currency: "USD"
"#;

        let config = AppConfig::from_yaml(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.plan.initial, 50_000.0);
        assert_eq!(config.plan.monthly, 15_000.0);
        assert_eq!(config.plan.annual_rate, 11.5);
        assert_eq!(config.plan.years, 15);
        assert_eq!(config.plan.timing, ContributionTiming::Start);
        assert_eq!(config.what_if.rates, vec![8.0, 10.5]);
        let funds = config.funds.expect("funds present");
        assert_eq!(funds.len(), 1);
        assert_eq!(funds[0].name, "Delta Index Fund");
        assert_eq!(funds[0].return_5y, 85.0);
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_yaml("plan:\n  monthly: 2500\n").unwrap();
        assert_eq!(config.plan.monthly, 2_500.0);
        assert_eq!(config.plan.annual_rate, 12.0);
        assert_eq!(config.plan.years, 20);
        assert_eq!(config.plan.timing, ContributionTiming::End);
        assert_eq!(config.what_if.rates, vec![12.0, 15.0, 18.0]);
        assert!(config.funds.is_none());
        assert_eq!(config.currency, "INR");

        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_fractional_years_rejected() {
        assert!(AppConfig::from_yaml("plan:\n  years: 2.5\n").is_err());
        assert!(AppConfig::from_yaml("plan:\n  years: -1\n").is_err());
        assert!(AppConfig::from_yaml("plan:\n  timing: sometimes\n").is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let plan = PlanConfig::default();
        let overrides = PlanOverrides {
            monthly: Some(500.0),
            timing: Some(ContributionTiming::Start),
            ..Default::default()
        };
        let merged = overrides.apply(&plan);
        assert_eq!(merged.monthly, 500.0);
        assert_eq!(merged.timing, ContributionTiming::Start);
        assert_eq!(merged.years, plan.years);
        assert_eq!(merged.annual_rate, plan.annual_rate);
    }

    #[test]
    fn test_to_request_validates() {
        let plan = PlanConfig {
            initial: -10.0,
            ..Default::default()
        };
        assert_eq!(plan.to_request().unwrap_err().field(), "initial");

        let plan = PlanConfig {
            years: 0,
            ..Default::default()
        };
        assert_eq!(plan.to_request().unwrap_err().field(), "years");

        let request = PlanConfig::default().to_request().unwrap();
        assert_eq!(request.total_months(), 240);
    }
}
