//! Integration tests for presets and TOML-driven configuration.

mod common;

use windfarm_federate::config::FederateConfig;

#[test]
fn baseline_preset_runs_to_its_horizon() {
    let config = FederateConfig::from_preset("baseline").unwrap();
    assert!(config.validate().is_empty());
    let mut session = common::build_session(&config);
    let records = session.run().unwrap();
    assert_eq!(records.len(), 10);
}

#[test]
fn gusty_preset_ramps_the_wind_over_a_longer_run() {
    let config = FederateConfig::from_preset("gusty").unwrap();
    assert!(config.validate().is_empty());
    let mut session = common::build_session(&config);
    let records = session.run().unwrap();
    assert_eq!(records.len(), 60);
    // Step 59 sees the control signal from the grant of t=59.
    assert_eq!(records[59].wind_speed_m_s, 5.0 + 0.25 * 59.0);
    assert_eq!(records[59].wind_direction_deg, 250.0 - 0.5 * 59.0);
}

#[test]
fn toml_configuration_drives_a_run_end_to_end() {
    let config = FederateConfig::from_toml_str(
        r#"
        [federation]
        horizon_s = 3.0

        [farm]
        initial_wind_speed_m_s = 4.0
        initial_wind_direction_deg = 180.0

        [control_center]
        wind_speed_m_s = 10.0
        wind_direction_deg = 200.0
        "#,
    )
    .unwrap();
    assert!(config.validate().is_empty());

    let mut session = common::build_session(&config);
    let records = session.run().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].wind_speed_m_s, 4.0);
    assert_eq!(records[0].wind_direction_deg, 180.0);
    assert_eq!(records[1].wind_speed_m_s, 10.0);
    assert_eq!(records[1].wind_direction_deg, 200.0);
    // 10^3 = 1000
    assert_eq!(records[2].turbine_power_kw[0], 1100.0);
    assert_eq!(records[2].turbine_power_kw[3], 600.0);
}

#[test]
fn invalid_timing_is_caught_before_a_run() {
    let config = FederateConfig::from_toml_str(
        r#"
        [federation]
        horizon_s = 0.0
        "#,
    )
    .unwrap();
    let errors = config.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "federation.horizon_s");
}
