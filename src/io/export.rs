//! CSV export for federate step records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::session::StepRecord;

/// Schema v1 column header for CSV telemetry export.
const HEADER: &str = "time_step,wind_speed_m_s,wind_direction_deg,\
                      turbine_0_kw,turbine_1_kw,turbine_2_kw,turbine_3_kw,\
                      farm_power_kw";

/// Exports step records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step using the schema v1
/// column layout. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[StepRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes step records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[StepRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in records {
        wtr.write_record(&[
            r.time_step.to_string(),
            format!("{:.4}", r.wind_speed_m_s),
            format!("{:.4}", r.wind_direction_deg),
            format!("{:.4}", r.turbine_power_kw[0]),
            format!("{:.4}", r.turbine_power_kw[1]),
            format!("{:.4}", r.turbine_power_kw[2]),
            format!("{:.4}", r.turbine_power_kw[3]),
            format!("{:.4}", r.farm_power_kw),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
