//! Integration tests for the federate session over the in-process runtime.

mod common;

use windfarm_federate::codec::BOOTSTRAP_SENTINEL;
use windfarm_federate::runtime::FederateMode;
use windfarm_federate::session::SessionState;

#[test]
fn full_run_produces_one_record_per_step() {
    let mut session = common::build_session(&common::default_config());
    let records = session.run().unwrap();
    assert_eq!(records.len(), 10);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.time_step, i as u64);
    }
}

#[test]
fn sentinel_opens_the_status_channel() {
    let mut session = common::build_session(&common::default_config());
    session.run().unwrap();
    let published = session.runtime().published();
    assert_eq!(published.len(), 11); // 1 sentinel + 10 status records
    assert_eq!(published[0], (0.0, BOOTSTRAP_SENTINEL.to_string()));
}

#[test]
fn status_is_published_before_each_time_advance() {
    let mut session = common::build_session(&common::default_config());
    session.run().unwrap();
    // Every status record carries the time at which it was published, so a
    // peer observing the bus sees step t's status before time moves past t.
    for (i, (time, payload)) in session.runtime().published().iter().skip(1).enumerate() {
        assert_eq!(*time, i as f64);
        assert!(
            payload.starts_with(&format!("[{i},")),
            "step {i} payload was {payload}"
        );
    }
}

#[test]
fn bootstrap_status_uses_the_initial_wind_state() {
    let mut session = common::build_session(&common::default_config());
    session.run().unwrap();
    // Initial wind 6 m/s at 290 deg, regardless of the control channel junk.
    assert_eq!(
        session.runtime().published()[1].1,
        "[0,6,290,316,266,179.6,129.6]"
    );
}

#[test]
fn wind_propagates_from_the_first_granted_step() {
    let mut session = common::build_session(&common::default_config());
    let records = session.run().unwrap();
    assert_eq!(records[0].wind_speed_m_s, 6.0);
    assert_eq!(records[0].wind_direction_deg, 290.0);
    for record in &records[1..] {
        assert_eq!(record.wind_speed_m_s, 8.0);
        assert_eq!(record.wind_direction_deg, 240.0);
        // 8^3 = 512
        assert_eq!(record.turbine_power_kw[0], 612.0);
        assert_eq!(record.turbine_power_kw[1], 562.0);
    }
}

#[test]
fn ramping_control_signal_is_tracked_step_by_step() {
    let mut config = common::config_with_horizon(8.0);
    config.control_center.wind_speed_m_s = 5.0;
    config.control_center.wind_direction_deg = 250.0;
    config.control_center.speed_ramp_m_s_per_step = 0.25;
    config.control_center.direction_ramp_deg_per_step = -0.5;
    let mut session = common::build_session(&config);
    let records = session.run().unwrap();
    assert_eq!(records.len(), 8);
    for (k, record) in records.iter().enumerate().skip(1) {
        assert_eq!(record.wind_speed_m_s, 5.0 + 0.25 * k as f64);
        assert_eq!(record.wind_direction_deg, 250.0 - 0.5 * k as f64);
    }
}

#[test]
fn session_finalizes_with_no_further_bus_traffic() {
    let mut session = common::build_session(&common::default_config());
    session.run().unwrap();
    assert_eq!(session.state(), SessionState::Finalized);
    assert_eq!(session.runtime().mode(), FederateMode::Finalized);
    assert_eq!(session.runtime().published().len(), 11);
}

#[test]
fn fractional_horizon_rounds_up_to_the_covering_step() {
    // Grants land at 0, 1, 2, ...; a horizon of 2.5 is first reached at the
    // grant of t=3, after three executed steps.
    let mut session = common::build_session(&common::config_with_horizon(2.5));
    let records = session.run().unwrap();
    assert_eq!(records.len(), 3);
}

#[test]
fn two_identical_runs_produce_identical_records() {
    let config = common::default_config();
    let mut session1 = common::build_session(&config);
    let mut session2 = common::build_session(&config);
    assert_eq!(session1.run().unwrap(), session2.run().unwrap());
}
