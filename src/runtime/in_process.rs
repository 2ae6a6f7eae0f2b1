//! Broker-free federation runtime with a built-in control-center standin.
//!
//! Grants time in fixed increments and plays the control-center side of the
//! exchange, so the federate runs end to end without an external broker.
//! Integration tests drive the session through this runtime and inspect its
//! publish log.

use crate::codec;

use super::{
    FederateMode, FederationRuntime, PublicationHandle, RuntimeError, SubscriptionHandle,
};

/// Wind signal the standin control center feeds back each step.
///
/// Holds the step-0 conditions plus optional per-step ramps, covering the
/// constant and slowly-varying input modes of a real control center.
#[derive(Debug, Clone)]
pub struct WindProfile {
    /// Wind speed at step 0 (m/s).
    pub speed_m_s: f64,
    /// Wind direction at step 0 (degrees).
    pub direction_deg: f64,
    /// Speed change applied per granted step (m/s).
    pub speed_ramp_m_s: f64,
    /// Direction change applied per granted step (degrees).
    pub direction_ramp_deg: f64,
}

impl WindProfile {
    /// Profile that holds the same wind conditions for the whole run.
    pub fn constant(speed_m_s: f64, direction_deg: f64) -> Self {
        Self {
            speed_m_s,
            direction_deg,
            speed_ramp_m_s: 0.0,
            direction_ramp_deg: 0.0,
        }
    }

    /// Control-center wind conditions after `steps` granted steps.
    fn at_step(&self, steps: u64) -> (f64, f64) {
        (
            self.speed_m_s + self.speed_ramp_m_s * steps as f64,
            self.direction_deg + self.direction_ramp_deg * steps as f64,
        )
    }
}

/// In-process federation runtime.
///
/// Time starts at 0.0 and advances by the configured delta on every granted
/// step. After each grant the control value becomes
/// `[time, wind_speed, wind_direction]` for the new step; until the first
/// grant it holds the control center's own bootstrap record, which
/// subscribers must ignore at step 0. Only the most recent control value is
/// observable (last-write-wins), matching bus semantics.
pub struct InProcessRuntime {
    core_type: String,
    core_init: String,
    mode: FederateMode,
    time: f64,
    time_delta: f64,
    steps_granted: u64,
    profile: WindProfile,
    subscriptions: Vec<String>,
    publications: Vec<String>,
    control_value: String,
    published: Vec<(f64, String)>,
}

impl InProcessRuntime {
    /// Creates a runtime identified by a core type (e.g. `"zmq"`) and an
    /// init string (e.g. `"--federates=1"`), with the given control-center
    /// wind profile.
    pub fn new(core_type: &str, core_init: &str, profile: WindProfile) -> Self {
        Self {
            core_type: core_type.to_string(),
            core_init: core_init.to_string(),
            mode: FederateMode::Created,
            time: 0.0,
            time_delta: 1.0,
            steps_granted: 0,
            profile,
            subscriptions: Vec::new(),
            publications: Vec::new(),
            control_value: codec::BOOTSTRAP_SENTINEL.to_string(),
            published: Vec::new(),
        }
    }

    /// Core type identifier this runtime was created with.
    pub fn core_type(&self) -> &str {
        &self.core_type
    }

    /// Core init string this runtime was created with.
    pub fn core_init(&self) -> &str {
        &self.core_init
    }

    /// Current lifecycle mode.
    pub fn mode(&self) -> FederateMode {
        self.mode
    }

    /// Every value published through this runtime, with the simulation time
    /// at which it was published.
    pub fn published(&self) -> &[(f64, String)] {
        &self.published
    }

    fn transition(&mut self, from: FederateMode, to: FederateMode) -> Result<(), RuntimeError> {
        if self.mode != from {
            return Err(RuntimeError::InvalidTransition {
                from: self.mode,
                to,
            });
        }
        self.mode = to;
        Ok(())
    }

    fn require_setup_open(&self, operation: &'static str) -> Result<(), RuntimeError> {
        if self.mode != FederateMode::Created {
            return Err(RuntimeError::SetupClosed {
                operation,
                mode: self.mode,
            });
        }
        Ok(())
    }

    fn require_executing(&self, operation: &'static str) -> Result<(), RuntimeError> {
        if self.mode != FederateMode::Executing {
            return Err(RuntimeError::Endpoint {
                operation,
                message: format!("not permitted in {} mode", self.mode),
            });
        }
        Ok(())
    }
}

impl FederationRuntime for InProcessRuntime {
    fn set_time_delta(&mut self, seconds: f64) -> Result<(), RuntimeError> {
        self.require_setup_open("set_time_delta")?;
        self.time_delta = seconds;
        Ok(())
    }

    fn register_subscription(
        &mut self,
        name: &str,
        _kind: &str,
    ) -> Result<SubscriptionHandle, RuntimeError> {
        self.require_setup_open("register_subscription")?;
        self.subscriptions.push(name.to_string());
        Ok(SubscriptionHandle(self.subscriptions.len() - 1))
    }

    fn register_global_publication(
        &mut self,
        name: &str,
        _kind: &str,
    ) -> Result<PublicationHandle, RuntimeError> {
        self.require_setup_open("register_global_publication")?;
        self.publications.push(name.to_string());
        Ok(PublicationHandle(self.publications.len() - 1))
    }

    fn enter_initializing(&mut self) -> Result<(), RuntimeError> {
        self.transition(FederateMode::Created, FederateMode::Initializing)
    }

    fn enter_executing(&mut self) -> Result<(), RuntimeError> {
        self.transition(FederateMode::Initializing, FederateMode::Executing)
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn request_next_step(&mut self) -> Result<f64, RuntimeError> {
        self.require_executing("request_next_step")?;
        self.time += self.time_delta;
        self.steps_granted += 1;
        let (speed, direction) = self.profile.at_step(self.steps_granted);
        self.control_value = codec::encode_fields(&[self.time, speed, direction]);
        Ok(self.time)
    }

    fn latest_string(&mut self, subscription: SubscriptionHandle) -> Result<String, RuntimeError> {
        self.require_executing("latest_string")?;
        if subscription.0 >= self.subscriptions.len() {
            return Err(RuntimeError::Endpoint {
                operation: "latest_string",
                message: format!("unknown subscription handle {}", subscription.0),
            });
        }
        Ok(self.control_value.clone())
    }

    fn publish_string(
        &mut self,
        publication: PublicationHandle,
        value: &str,
    ) -> Result<(), RuntimeError> {
        self.require_executing("publish_string")?;
        if publication.0 >= self.publications.len() {
            return Err(RuntimeError::Endpoint {
                operation: "publish_string",
                message: format!("unknown publication handle {}", publication.0),
            });
        }
        self.published.push((self.time, value.to_string()));
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), RuntimeError> {
        self.transition(FederateMode::Executing, FederateMode::Finalized)
    }
}
