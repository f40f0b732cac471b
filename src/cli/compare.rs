use super::chart::{self, Bar};
use super::ui;
use crate::core::compare::{RateComparison, compare};
use crate::core::simulation::SimulationRequest;
use anyhow::Result;
use comfy_table::Table;
use tracing::info;

/// Runs the what-if comparison for the plan's contribution, horizon and timing.
///
/// The plan's initial lump sum is not part of these runs.
pub fn run(request: &SimulationRequest, rates: &[f64], currency: &str) -> Result<()> {
    info!(?rates, "Running what-if comparison");
    let results = compare(
        request.contribution(),
        request.horizon_years(),
        request.timing(),
        rates,
    )?;

    println!(
        "{}",
        ui::style_text("What-if Growth Comparison", ui::StyleType::Title)
    );
    println!("{}", comparison_table(&results, currency));

    println!(
        "\n{}",
        ui::style_text("Corpus Growth at Different Return Rates", ui::StyleType::Title)
    );
    println!("{}", growth_chart(&results, ui::terminal_width()));
    Ok(())
}

fn comparison_table(results: &[RateComparison], currency: &str) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Rate (%)"),
        ui::header_cell(&format!("Final Corpus ({currency})")),
    ]);
    for result in results {
        table.add_row(vec![
            ui::percent_cell(result.rate),
            ui::highlight_amount_cell(result.final_corpus),
        ]);
    }
    table
}

/// Year-end corpus per rate, grouped by year.
fn growth_chart(results: &[RateComparison], width: usize) -> String {
    let years = results.iter().map(|r| r.yearly.len()).max().unwrap_or(0);
    let bars: Vec<Bar> = (0..years)
        .flat_map(|idx| {
            results.iter().filter_map(move |r| {
                r.yearly.get(idx).map(|y| {
                    Bar::new(
                        format!("Y{} @ {}%", y.year, r.rate),
                        y.balance,
                        chart::FILLED,
                    )
                })
            })
        })
        .collect();
    chart::render(&bars, width)
}
