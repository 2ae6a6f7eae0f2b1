//! Post-hoc run summary from step records.

use std::fmt;

use crate::session::StepRecord;

/// Aggregate summary of a completed federate run.
///
/// Computed post-hoc from `Vec<StepRecord>` so the printed summary always
/// agrees with the per-step data.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Number of executed time steps.
    pub steps: usize,
    /// Mean farm power across all steps (kW).
    pub mean_farm_power_kw: f64,
    /// Peak farm power across all steps (kW).
    pub peak_farm_power_kw: f64,
    /// Farm energy over the run (kWh, farm power integrated over the step
    /// length).
    pub farm_energy_kwh: f64,
    /// Wind speed at the final step (m/s).
    pub final_wind_speed_m_s: f64,
    /// Wind direction at the final step (degrees).
    pub final_wind_direction_deg: f64,
}

impl RunReport {
    /// Computes the summary from the complete step record vector.
    ///
    /// # Arguments
    ///
    /// * `records` - Complete run records, in step order
    /// * `time_delta_s` - Step length in seconds, for the energy integral
    pub fn from_records(records: &[StepRecord], time_delta_s: f64) -> Self {
        let Some(last) = records.last() else {
            return Self {
                steps: 0,
                mean_farm_power_kw: 0.0,
                peak_farm_power_kw: 0.0,
                farm_energy_kwh: 0.0,
                final_wind_speed_m_s: 0.0,
                final_wind_direction_deg: 0.0,
            };
        };

        let mut sum = 0.0_f64;
        let mut peak = f64::MIN;
        for record in records {
            sum += record.farm_power_kw;
            peak = peak.max(record.farm_power_kw);
        }

        Self {
            steps: records.len(),
            mean_farm_power_kw: sum / records.len() as f64,
            peak_farm_power_kw: peak,
            farm_energy_kwh: sum * time_delta_s / 3600.0,
            final_wind_speed_m_s: last.wind_speed_m_s,
            final_wind_direction_deg: last.wind_direction_deg,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Report ---")?;
        writeln!(f, "Steps completed:  {}", self.steps)?;
        writeln!(f, "Mean farm power:  {:.1} kW", self.mean_farm_power_kw)?;
        writeln!(f, "Peak farm power:  {:.1} kW", self.peak_farm_power_kw)?;
        writeln!(f, "Farm energy:      {:.3} kWh", self.farm_energy_kwh)?;
        write!(
            f,
            "Final wind:       {:.2} m/s @ {:.1} deg",
            self.final_wind_speed_m_s, self.final_wind_direction_deg
        )
    }
}
