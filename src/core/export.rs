//! CSV export of the monthly balance series.
//!
//! Balances are written with the shortest representation that parses back to
//! the same `f64`, so an export read back with [`read_monthly_csv`] is lossless.

use crate::core::simulation::MonthlyRecord;
use anyhow::{Context, Result};
use std::io::{Read, Write};

pub const DEFAULT_EXPORT_FILE: &str = "sip_monthly.csv";

/// Writes `month,balance` followed by one row per record.
pub fn write_monthly_csv<W: Write>(records: &[MonthlyRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    // Header is written explicitly so an empty series still has one
    csv_writer
        .write_record(["month", "balance"])
        .context("Failed to write CSV header")?;
    for record in records {
        csv_writer
            .write_record([record.month.to_string(), record.balance.to_string()])
            .with_context(|| format!("Failed to write CSV row for month {}", record.month))?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn read_monthly_csv<R: Read>(reader: R) -> Result<Vec<MonthlyRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (line, row) in csv_reader.deserialize::<MonthlyRecord>().enumerate() {
        let record = row.with_context(|| format!("Failed to parse CSV row {}", line + 1))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::simulation::{ContributionTiming, SimulationRequest, simulate};

    #[test]
    fn writes_header_and_rows() {
        let records = vec![
            MonthlyRecord { month: 1, balance: 1000.0 },
            MonthlyRecord { month: 2, balance: 2010.5 },
        ];
        let mut out = Vec::new();
        write_monthly_csv(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "month,balance\n1,1000\n2,2010.5\n");
    }

    #[test]
    fn round_trips_a_simulation() {
        let request = SimulationRequest::new(10_000.0, 12.0, 5, ContributionTiming::Start)
            .unwrap()
            .with_initial_balance(25_000.0)
            .unwrap();
        let simulation = simulate(&request);

        let mut out = Vec::new();
        write_monthly_csv(&simulation.monthly, &mut out).unwrap();
        let parsed = read_monthly_csv(out.as_slice()).unwrap();

        assert_eq!(parsed, simulation.monthly);
    }

    #[test]
    fn empty_series_still_has_header() {
        let mut out = Vec::new();
        write_monthly_csv(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "month,balance\n");
        assert!(read_monthly_csv("month,balance\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_rows() {
        let err = read_monthly_csv("month,balance\n1,abc\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
