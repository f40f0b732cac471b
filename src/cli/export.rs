use crate::core::export::write_monthly_csv;
use crate::core::simulation::{SimulationRequest, simulate};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Writes the monthly series as CSV to `output`, or to stdout for `None` / `-`.
pub fn run(request: &SimulationRequest, output: Option<&Path>) -> Result<()> {
    let simulation = simulate(request);

    match output {
        Some(path) if path != Path::new("-") => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create export file: {}", path.display()))?;
            write_monthly_csv(&simulation.monthly, BufWriter::new(file))
                .with_context(|| format!("Failed to write export file: {}", path.display()))?;
            info!(
                rows = simulation.monthly.len(),
                "Exported monthly balances to {}",
                path.display()
            );
        }
        _ => {
            let stdout = std::io::stdout();
            write_monthly_csv(&simulation.monthly, stdout.lock())?;
        }
    }

    Ok(())
}
