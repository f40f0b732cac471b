use super::chart::{self, Bar};
use super::ui;
use crate::core::funds::{FundDataProvider, FundPerformance, select_funds};
use crate::core::simulation::{SimulationRequest, simulate};
use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use futures::future::join_all;
use tracing::{debug, info};

struct FundRow {
    name: String,
    performance: Option<FundPerformance>,
    projected_corpus: Option<f64>,
    error: Option<String>,
}

/// Shows the reference fund table for `selection` (all funds when empty).
///
/// With `projection`, each fund's CAGR is run through the simulator using the
/// plan's contribution, horizon and timing, starting from zero. `mock_data`
/// marks the built-in dataset in the title.
pub async fn run(
    provider: &(dyn FundDataProvider + Send + Sync),
    selection: &[String],
    projection: Option<&SimulationRequest>,
    currency: &str,
    mock_data: bool,
) -> Result<()> {
    info!("Loading reference fund data...");
    let available = provider.list_funds().await?;
    let selected = select_funds(&available, selection)?;

    if selected.is_empty() {
        println!("No funds to display.");
        return Ok(());
    }

    let rows = collect_rows(provider, &selected, projection).await;

    println!(
        "{}",
        ui::style_text(table_title(mock_data), ui::StyleType::Title)
    );
    println!("{}", fund_table(&rows, projection.is_some(), currency));

    println!(
        "\n{}",
        ui::style_text("CAGR Comparison", ui::StyleType::Title)
    );
    println!("{}", cagr_chart(&rows, ui::terminal_width()));
    Ok(())
}

fn table_title(mock_data: bool) -> &'static str {
    if mock_data {
        "Mutual Fund Tracker (Mock Data)"
    } else {
        "Mutual Fund Tracker"
    }
}

async fn collect_rows(
    provider: &(dyn FundDataProvider + Send + Sync),
    selected: &[String],
    projection: Option<&SimulationRequest>,
) -> Vec<FundRow> {
    let pb = ui::new_progress_bar(selected.len() as u64, true);
    pb.set_message("Fetching fund data...");

    let futures = selected.iter().map(|name| {
        let pb_clone = pb.clone();
        async move {
            let result = provider.fetch_performance(name).await;
            pb_clone.inc(1);
            (name.clone(), result)
        }
    });
    let fetched = join_all(futures).await;
    pb.finish_and_clear();

    fetched
        .into_iter()
        .map(|(name, result)| match result {
            Ok(performance) => {
                let projected_corpus = projection.and_then(|plan| project(plan, &performance));
                FundRow {
                    name,
                    performance: Some(performance),
                    projected_corpus,
                    error: None,
                }
            }
            Err(e) => FundRow {
                name,
                performance: None,
                projected_corpus: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// Final corpus of the plan's SIP at the fund's CAGR, ignoring any lump sum.
fn project(plan: &SimulationRequest, fund: &FundPerformance) -> Option<f64> {
    match SimulationRequest::new(plan.contribution(), fund.cagr, plan.horizon_years(), plan.timing()) {
        Ok(request) => Some(simulate(&request).final_balance()),
        Err(e) => {
            debug!("Skipping projection for {}: {e}", fund.name);
            None
        }
    }
}

fn fund_table(rows: &[FundRow], with_projection: bool, currency: &str) -> Table {
    let mut table = ui::new_styled_table();
    let mut header = vec![
        ui::header_cell("Fund"),
        ui::header_cell("CAGR (%)"),
        ui::header_cell("3Y Return (%)"),
        ui::header_cell("5Y Return (%)"),
        ui::header_cell("3Y Annualized (%)"),
        ui::header_cell("5Y Annualized (%)"),
    ];
    if with_projection {
        header.push(ui::header_cell(&format!("Projected Corpus ({currency})")));
    }
    table.set_header(header);

    for row in rows {
        let mut cells = vec![Cell::new(&row.name)];
        match &row.performance {
            Some(fund) => {
                cells.push(ui::percent_cell(fund.cagr));
                cells.push(ui::percent_cell(fund.return_3y));
                cells.push(ui::percent_cell(fund.return_5y));
                cells.push(fund.annualized_3y().map_or_else(|_| ui::na_cell(), ui::percent_cell));
                cells.push(fund.annualized_5y().map_or_else(|_| ui::na_cell(), ui::percent_cell));
            }
            None => {
                let err = row.error.as_deref().unwrap_or("Data not available");
                cells.push(Cell::new(format!("Error: {err}")).fg(Color::Red));
                cells.extend((0..4).map(|_| ui::na_cell()));
            }
        }
        if with_projection {
            cells.push(
                row.projected_corpus
                    .map_or_else(ui::na_cell, ui::highlight_amount_cell),
            );
        }
        table.add_row(cells);
    }

    table
}

fn cagr_chart(rows: &[FundRow], width: usize) -> String {
    let bars: Vec<Bar> = rows
        .iter()
        .filter_map(|row| {
            row.performance
                .as_ref()
                .map(|fund| Bar::new(fund.name.clone(), fund.cagr, chart::FILLED))
        })
        .collect();
    chart::render_with(&bars, width, |v| format!("{v:.1}%"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::simulation::ContributionTiming;
    use crate::providers::static_funds::StaticFundProvider;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct FlakyProvider;

    #[async_trait]
    impl FundDataProvider for FlakyProvider {
        async fn list_funds(&self) -> Result<Vec<String>> {
            Ok(vec!["Good Fund".to_string(), "Broken Fund".to_string()])
        }

        async fn fetch_performance(&self, name: &str) -> Result<FundPerformance> {
            if name == "Good Fund" {
                Ok(FundPerformance::new(name, 12.0, 40.0, 76.0))
            } else {
                Err(anyhow!("Fund data unavailable"))
            }
        }
    }

    #[tokio::test]
    async fn test_rows_follow_selection() {
        let provider = StaticFundProvider::mock();
        let selected = vec!["Beta Equity Fund".to_string()];
        let rows = collect_rows(&provider, &selected, None).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Beta Equity Fund");
        assert_eq!(rows[0].performance.as_ref().unwrap().cagr, 15.2);
        assert!(rows[0].projected_corpus.is_none());
    }

    #[tokio::test]
    async fn test_projection_uses_fund_cagr() {
        let provider = StaticFundProvider::new(vec![FundPerformance::new("Twelve", 12.0, 40.0, 76.0)]);
        let plan = SimulationRequest::new(10_000.0, 8.0, 20, ContributionTiming::End)
            .unwrap()
            .with_initial_balance(500_000.0)
            .unwrap();
        let rows = collect_rows(&provider, &["Twelve".to_string()], Some(&plan)).await;
        let projected = rows[0].projected_corpus.unwrap();
        assert!((projected - 9_892_553.65).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_reported_in_table() {
        let provider = FlakyProvider;
        let names = provider.list_funds().await.unwrap();
        let rows = collect_rows(&provider, &names, None).await;
        assert!(rows[0].error.is_none());
        assert_eq!(rows[1].error.as_deref(), Some("Fund data unavailable"));

        let rendered = fund_table(&rows, false, "INR").to_string();
        assert!(rendered.contains("Error: Fund data unavailable"));
        assert!(rendered.contains("N/A"));
    }

    #[tokio::test]
    async fn test_run_rejects_unknown_selection() {
        let provider = StaticFundProvider::mock();
        let err = run(&provider, &["Nope".to_string()], None, "INR", true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown fund"));
    }

    #[test]
    fn title_marks_only_the_mock_dataset() {
        assert_eq!(table_title(true), "Mutual Fund Tracker (Mock Data)");
        assert_eq!(table_title(false), "Mutual Fund Tracker");
    }

    #[test]
    fn projection_column_is_optional() {
        let rows = vec![FundRow {
            name: "Alpha Growth Fund".to_string(),
            performance: Some(FundPerformance::new("Alpha Growth Fund", 12.5, 42.0, 80.0)),
            projected_corpus: Some(1_234_567.0),
            error: None,
        }];
        let without = fund_table(&rows, false, "INR").to_string();
        assert!(!without.contains("Projected Corpus"));
        let with = fund_table(&rows, true, "INR").to_string();
        assert!(with.contains("Projected Corpus (INR)"));
        assert!(with.contains("1,234,567"));
        assert!(with.contains("12.4"));
    }

    #[test]
    fn chart_skips_failed_rows() {
        let rows = vec![
            FundRow {
                name: "A".to_string(),
                performance: Some(FundPerformance::new("A", 10.8, 35.0, 65.0)),
                projected_corpus: None,
                error: None,
            },
            FundRow {
                name: "B".to_string(),
                performance: None,
                projected_corpus: None,
                error: Some("boom".to_string()),
            },
        ];
        let chart = cagr_chart(&rows, 40);
        assert_eq!(chart.lines().count(), 1);
        assert!(chart.ends_with("10.8%"));
    }
}
