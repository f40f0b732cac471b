pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{AppConfig, PlanOverrides};
use crate::providers::StaticFundProvider;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Plan {
        overrides: PlanOverrides,
        show_table: bool,
        json: bool,
    },
    Compare {
        overrides: PlanOverrides,
        /// Replaces the configured what-if rates when not empty.
        rates: Vec<f64>,
    },
    Funds {
        overrides: PlanOverrides,
        selected: Vec<String>,
        project: bool,
    },
    Export {
        overrides: PlanOverrides,
        output: Option<PathBuf>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("SIP planner starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Plan {
            overrides,
            show_table,
            json,
        } => {
            let request = overrides.apply(&config.plan).to_request()?;
            cli::plan::run(
                &request,
                &config.currency,
                &cli::plan::PlanOutput { show_table, json },
            )
        }
        AppCommand::Compare { overrides, rates } => {
            let request = overrides.apply(&config.plan).to_request()?;
            let rates = if rates.is_empty() {
                &config.what_if.rates
            } else {
                &rates
            };
            cli::compare::run(&request, rates, &config.currency)
        }
        AppCommand::Funds {
            overrides,
            selected,
            project,
        } => {
            let projection = if project {
                Some(overrides.apply(&config.plan).to_request()?)
            } else {
                None
            };
            let mock_data = config.funds.is_none();
            let provider = config
                .funds
                .clone()
                .map_or_else(StaticFundProvider::mock, StaticFundProvider::new);
            cli::funds::run(
                &provider,
                &selected,
                projection.as_ref(),
                &config.currency,
                mock_data,
            )
            .await
        }
        AppCommand::Export { overrides, output } => {
            let request = overrides.apply(&config.plan).to_request()?;
            cli::export::run(&request, output.as_deref())
        }
    }
}
