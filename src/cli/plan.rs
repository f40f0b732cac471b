use super::chart::{self, Bar};
use super::ui;
use crate::core::simulation::{Simulation, SimulationRequest, simulate};
use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::info;

pub struct PlanOutput {
    pub show_table: bool,
    pub json: bool,
}

pub fn run(request: &SimulationRequest, currency: &str, output: &PlanOutput) -> Result<()> {
    info!(
        monthly = request.contribution(),
        rate = request.annual_rate_percent(),
        years = request.horizon_years(),
        "Running SIP plan"
    );
    let simulation = simulate(request);

    if output.json {
        let json = serde_json::to_string_pretty(&simulation)
            .context("Failed to serialize simulation as JSON")?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "{}",
        ui::style_text(
            &format!(
                "SIP plan: {} / month at {:.1}% for {} years ({})",
                ui::format_amount(request.contribution()),
                request.annual_rate_percent(),
                request.horizon_years(),
                request.timing()
            ),
            ui::StyleType::Title
        )
    );
    if request.initial_balance() > 0.0 {
        println!(
            "{}",
            ui::style_text(
                &format!("Initial investment: {}", ui::format_amount(request.initial_balance())),
                ui::StyleType::Subtle
            )
        );
    }
    println!("{}", render_metrics(&simulation, currency));

    println!(
        "\n{}",
        ui::style_text("Invested vs Estimated Corpus", ui::StyleType::Title)
    );
    println!("{}", growth_chart(&simulation, ui::terminal_width()));

    if output.show_table {
        println!(
            "\n{}",
            ui::style_text("Year-wise snapshot", ui::StyleType::Title)
        );
        println!("{}", yearly_table(&simulation, currency));
    }

    Ok(())
}

fn render_metrics(simulation: &Simulation, currency: &str) -> String {
    [
        ("Total Invested", simulation.total_invested()),
        ("Estimated Corpus", simulation.final_balance()),
        ("Estimated Returns", simulation.total_returns()),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            "{} {}",
            ui::style_text(&format!("{label} ({currency}):"), ui::StyleType::MetricLabel),
            ui::style_text(&ui::format_amount(*value), ui::StyleType::MetricValue)
        )
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Two bars per year: invested (light) then corpus (filled).
fn growth_chart(simulation: &Simulation, width: usize) -> String {
    let (corpus, invested) = simulation.yearly_series();
    let bars: Vec<Bar> = invested
        .iter()
        .zip(&corpus)
        .flat_map(|(&(year, paid_in), &(_, balance))| {
            [
                Bar::new(format!("Y{year} invested"), paid_in, chart::LIGHT),
                Bar::new(format!("Y{year} corpus"), balance, chart::FILLED),
            ]
        })
        .collect();
    chart::render(&bars, width)
}

fn yearly_table(simulation: &Simulation, currency: &str) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Year"),
        ui::header_cell(&format!("Invested ({currency})")),
        ui::header_cell(&format!("Estimated Corpus ({currency})")),
        ui::header_cell(&format!("Returns ({currency})")),
    ]);

    for year in &simulation.yearly {
        table.add_row(vec![
            Cell::new(year.year),
            ui::amount_cell(year.invested),
            ui::amount_cell(year.balance),
            ui::amount_cell(year.returns),
        ]);
    }

    table
}
