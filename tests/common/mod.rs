//! Shared test fixtures for integration tests.

use windfarm_federate::config::FederateConfig;
use windfarm_federate::runtime::{InProcessRuntime, WindProfile};
use windfarm_federate::session::FederateSession;

/// Default federate configuration (baseline preset, 10 s horizon).
pub fn default_config() -> FederateConfig {
    FederateConfig::baseline()
}

/// Baseline configuration with an overridden horizon.
pub fn config_with_horizon(horizon_s: f64) -> FederateConfig {
    let mut config = FederateConfig::baseline();
    config.federation.horizon_s = horizon_s;
    config
}

/// In-process runtime built from a configuration's control-center profile.
pub fn runtime_for(config: &FederateConfig) -> InProcessRuntime {
    let cc = &config.control_center;
    InProcessRuntime::new(
        &config.federation.core_type,
        &config.federation.core_init,
        WindProfile {
            speed_m_s: cc.wind_speed_m_s,
            direction_deg: cc.wind_direction_deg,
            speed_ramp_m_s: cc.speed_ramp_m_s_per_step,
            direction_ramp_deg: cc.direction_ramp_deg_per_step,
        },
    )
}

/// Session over an in-process runtime built from the same configuration.
pub fn build_session(config: &FederateConfig) -> FederateSession<InProcessRuntime> {
    FederateSession::new(runtime_for(config), config)
}
