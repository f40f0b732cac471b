use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use sipplan::core::config::PlanOverrides;
use sipplan::core::log::init_logging;
use sipplan::core::simulation::ContributionTiming;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTiming {
    /// Contribute at the start of the month, then earn interest
    Start,
    /// Earn interest, then contribute at the end of the month
    End,
}

impl From<CliTiming> for ContributionTiming {
    fn from(value: CliTiming) -> Self {
        match value {
            CliTiming::Start => ContributionTiming::Start,
            CliTiming::End => ContributionTiming::End,
        }
    }
}

/// Plan inputs; any value given here overrides the config file.
#[derive(Args, Debug, Clone)]
struct PlanArgs {
    /// Initial lump-sum investment
    #[arg(long, allow_negative_numbers = true)]
    initial: Option<f64>,
    /// Monthly SIP amount
    #[arg(long, allow_negative_numbers = true)]
    monthly: Option<f64>,
    /// Expected annual return in percent
    #[arg(long = "annual-rate", allow_negative_numbers = true)]
    annual_rate: Option<f64>,
    /// Investment horizon in whole years
    #[arg(long)]
    years: Option<u32>,
    /// Contribution timing
    #[arg(long, value_enum)]
    timing: Option<CliTiming>,
}

impl From<PlanArgs> for PlanOverrides {
    fn from(args: PlanArgs) -> Self {
        PlanOverrides {
            initial: args.initial,
            monthly: args.monthly,
            annual_rate: args.annual_rate,
            years: args.years,
            timing: args.timing.map(Into::into),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Simulate the SIP and show corpus growth
    Plan {
        #[command(flatten)]
        plan: PlanArgs,
        /// Hide the year-wise table
        #[arg(long)]
        no_table: bool,
        /// Print the monthly and yearly series as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare final corpus across candidate return rates
    Compare {
        #[command(flatten)]
        plan: PlanArgs,
        /// Candidate annual rate in percent (repeatable); defaults to the configured rates
        #[arg(long = "rate", allow_negative_numbers = true)]
        rates: Vec<f64>,
    },
    /// Display the reference fund performance table
    Funds {
        #[command(flatten)]
        plan: PlanArgs,
        /// Fund to include (repeatable); all funds when omitted
        #[arg(long = "fund")]
        funds: Vec<String>,
        /// Project the plan's SIP at each fund's CAGR
        #[arg(long)]
        project: bool,
    },
    /// Export the monthly balance series as CSV
    Export {
        #[command(flatten)]
        plan: PlanArgs,
        /// Output file; `-` or omitted writes to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl From<Commands> for sipplan::AppCommand {
    fn from(cmd: Commands) -> sipplan::AppCommand {
        match cmd {
            Commands::Plan {
                plan,
                no_table,
                json,
            } => sipplan::AppCommand::Plan {
                overrides: plan.into(),
                show_table: !no_table,
                json,
            },
            Commands::Compare { plan, rates } => sipplan::AppCommand::Compare {
                overrides: plan.into(),
                rates,
            },
            Commands::Funds {
                plan,
                funds,
                project,
            } => sipplan::AppCommand::Funds {
                overrides: plan.into(),
                selected: funds,
                project,
            },
            Commands::Export { plan, output } => sipplan::AppCommand::Export {
                overrides: plan.into(),
                output,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => sipplan::cli::setup::setup(),
        Some(cmd) => sipplan::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plan_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "sipplan", "plan", "--monthly", "5000", "--annual-rate", "10", "--years", "15",
            "--timing", "start", "--no-table",
        ])
        .unwrap();
        let cmd: sipplan::AppCommand = cli.command.unwrap().into();
        assert_eq!(
            cmd,
            sipplan::AppCommand::Plan {
                overrides: PlanOverrides {
                    initial: None,
                    monthly: Some(5000.0),
                    annual_rate: Some(10.0),
                    years: Some(15),
                    timing: Some(ContributionTiming::Start),
                },
                show_table: false,
                json: false,
            }
        );
    }

    #[test]
    fn negative_amounts_reach_validation() {
        let cli = Cli::try_parse_from(["sipplan", "export", "--monthly", "-5"]).unwrap();
        match cli.command {
            Some(Commands::Export { plan, .. }) => assert_eq!(plan.monthly, Some(-5.0)),
            _ => panic!("Expected export command"),
        }
    }

    #[test]
    fn fractional_years_are_rejected() {
        assert!(Cli::try_parse_from(["sipplan", "plan", "--years", "2.5"]).is_err());
    }

    #[test]
    fn example_config_names_real_plan_flags() {
        let example = include_str!("../docs/example_config.yaml");
        let flags: Vec<&str> = example
            .lines()
            .filter(|line| line.starts_with('#'))
            .flat_map(|line| line.split(|c: char| !(c.is_alphanumeric() || c == '-')))
            .filter(|word| word.starts_with("--"))
            .collect();
        assert!(flags.contains(&"--annual-rate"));
        for flag in flags {
            let value = if flag == "--timing" { "start" } else { "1" };
            assert!(
                Cli::try_parse_from(["sipplan", "plan", flag, value]).is_ok(),
                "plan does not accept {flag}"
            );
        }
    }

    #[test]
    fn compare_collects_repeated_rates() {
        let cli =
            Cli::try_parse_from(["sipplan", "compare", "--rate", "8", "--rate", "10.5"]).unwrap();
        match cli.command {
            Some(Commands::Compare { rates, .. }) => assert_eq!(rates, vec![8.0, 10.5]),
            _ => panic!("Expected compare command"),
        }
    }
}
