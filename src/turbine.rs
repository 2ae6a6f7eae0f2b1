//! Stand-in turbine power model.
//!
//! Placeholder for a high-fidelity solver: each turbine gets a distinct
//! deterministic polynomial of the inflow wind speed, with the downstream
//! pair derated to 3/5 as if waked. The paired control center expects these
//! exact values, so the formulas are part of the exchange contract.

/// Number of turbines in the simulated farm.
pub const NUM_TURBINES: usize = 4;

/// Computes the per-turbine power output for the given wind speed.
///
/// Pure and stateless; defined for every finite speed. A negative speed
/// produces a negative cube, which is accepted (the model is a placeholder,
/// not aerodynamics).
///
/// # Arguments
///
/// * `wind_speed` - Inflow wind speed (m/s)
///
/// # Returns
///
/// Power per turbine in kW, indexed by turbine:
/// `[s³ + 100, s³ + 50, s³·3/5 + 50, s³·3/5]`
///
/// # Examples
///
/// ```
/// use windfarm_federate::turbine::turbine_powers;
///
/// let powers = turbine_powers(6.0);
/// assert_eq!(powers, [316.0, 266.0, 179.6, 129.6]);
/// ```
pub fn turbine_powers(wind_speed: f64) -> [f64; NUM_TURBINES] {
    let cube = wind_speed * wind_speed * wind_speed;
    [
        cube + 100.0,
        cube + 50.0,
        cube * 3.0 / 5.0 + 50.0,
        cube * 3.0 / 5.0,
    ]
}

/// Sums per-turbine outputs into farm-level power (kW).
pub fn farm_power_kw(turbine_powers: &[f64]) -> f64 {
    turbine_powers.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formulas_hold_for_a_representative_speed() {
        let s = 7.3_f64;
        let cube = s * s * s;
        let powers = turbine_powers(s);
        assert_eq!(powers.len(), NUM_TURBINES);
        assert!((powers[0] - (cube + 100.0)).abs() < 1e-9);
        assert!((powers[1] - (cube + 50.0)).abs() < 1e-9);
        assert!((powers[2] - (0.6 * cube + 50.0)).abs() < 1e-9);
        assert!((powers[3] - 0.6 * cube).abs() < 1e-9);
    }

    #[test]
    fn calm_air_leaves_only_the_offsets() {
        assert_eq!(turbine_powers(0.0), [100.0, 50.0, 50.0, 0.0]);
    }

    #[test]
    fn negative_speed_is_accepted() {
        let powers = turbine_powers(-2.0);
        assert_eq!(powers[1], -8.0 + 50.0);
        assert_eq!(powers[3], -4.8);
    }

    #[test]
    fn recomputation_is_idempotent() {
        assert_eq!(turbine_powers(8.25), turbine_powers(8.25));
    }

    #[test]
    fn farm_power_sums_all_turbines() {
        let powers = turbine_powers(6.0);
        assert!((farm_power_kw(&powers) - (316.0 + 266.0 + 179.6 + 129.6)).abs() < 1e-9);
    }
}
