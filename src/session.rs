//! Federate session: lifecycle state machine and the time-step loop.
//!
//! The session owns one subscription ("control") and one publication
//! ("status"), advances simulated time in lockstep with the federation, and
//! maps between the local wind state and the wire records. Within every step
//! it performs exactly one subscription read and one publication write, and
//! the write happens strictly before the time advance, so peers observe each
//! status record before this federate moves past the step.

use std::fmt;

use crate::codec;
use crate::config::FederateConfig;
use crate::runtime::{FederationRuntime, PublicationHandle, RuntimeError, SubscriptionHandle};
use crate::turbine::{self, NUM_TURBINES};

/// Logical name of the inbound control-signal subscription.
pub const CONTROL_TOPIC: &str = "control";
/// Logical name of the outbound status publication.
pub const STATUS_TOPIC: &str = "status";
/// Wire type registered for both endpoints.
const ENDPOINT_TYPE: &str = "string";

/// Wind conditions received from the control center.
///
/// Both fields are independent scalars with no enforced physical range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindState {
    /// Wind speed (m/s).
    pub speed_m_s: f64,
    /// Wind direction (degrees).
    pub direction_deg: f64,
}

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Initializing,
    Executing,
    Finalized,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Created => "created",
            SessionState::Initializing => "initializing",
            SessionState::Executing => "executing",
            SessionState::Finalized => "finalized",
        };
        write!(f, "{name}")
    }
}

/// Fatal session error. Not recovered; the caller terminates.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// A federation runtime call failed.
    Runtime(RuntimeError),
    /// A session method was called out of lifecycle order.
    State {
        operation: &'static str,
        state: SessionState,
    },
}

impl From<RuntimeError> for SessionError {
    fn from(err: RuntimeError) -> Self {
        SessionError::Runtime(err)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Runtime(err) => write!(f, "federation runtime: {err}"),
            SessionError::State { operation, state } => {
                write!(f, "{operation} called in {state} state")
            }
        }
    }
}

/// Complete record of one executed time step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    /// Integer time step the record was computed for.
    pub time_step: u64,
    /// Wind speed used for this step (m/s).
    pub wind_speed_m_s: f64,
    /// Wind direction used for this step (degrees).
    pub wind_direction_deg: f64,
    /// Per-turbine power output (kW).
    pub turbine_power_kw: [f64; NUM_TURBINES],
    /// Farm-level power output (kW).
    pub farm_power_kw: f64,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>3} | wind {:>5.2} m/s @ {:>5.1} deg | turbines [{:.1}, {:.1}, {:.1}, {:.1}] kW | farm {:>7.1} kW",
            self.time_step,
            self.wind_speed_m_s,
            self.wind_direction_deg,
            self.turbine_power_kw[0],
            self.turbine_power_kw[1],
            self.turbine_power_kw[2],
            self.turbine_power_kw[3],
            self.farm_power_kw,
        )
    }
}

/// A wind-farm federate participating in a time-stepped co-simulation.
///
/// Generic over `R: FederationRuntime` for static dispatch, so the same
/// session runs against a broker-backed runtime or the in-process standin.
///
/// Lifecycle: `Created → Initializing → Executing → Finalized`, driven by
/// [`FederateSession::initialize`], [`FederateSession::start`],
/// [`FederateSession::execute`], and [`FederateSession::finalize`], or all at
/// once by [`FederateSession::run`]. Calls out of order fail with
/// [`SessionError::State`]; registration failures propagate fatally and are
/// never retried.
pub struct FederateSession<R: FederationRuntime> {
    runtime: R,
    state: SessionState,
    wind: WindState,
    horizon_s: f64,
    time_delta_s: f64,
    subscription: Option<SubscriptionHandle>,
    publication: Option<PublicationHandle>,
}

impl<R: FederationRuntime> FederateSession<R> {
    /// Creates a session in the `Created` state.
    ///
    /// The initial wind state comes from the farm configuration and is what
    /// the bootstrap step computes with, since the first subscribed value
    /// carries no physical meaning.
    pub fn new(runtime: R, config: &FederateConfig) -> Self {
        Self {
            runtime,
            state: SessionState::Created,
            wind: WindState {
                speed_m_s: config.farm.initial_wind_speed_m_s,
                direction_deg: config.farm.initial_wind_direction_deg,
            },
            horizon_s: config.federation.horizon_s,
            time_delta_s: config.federation.time_delta_s,
            subscription: None,
            publication: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current wind state.
    pub fn wind(&self) -> WindState {
        self.wind
    }

    /// The underlying runtime, for inspection.
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Registers both endpoints and enters initializing mode.
    ///
    /// Registration happens at most once per session; a failure here is
    /// fatal and leaves the session unusable.
    pub fn initialize(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Created {
            return Err(SessionError::State {
                operation: "initialize",
                state: self.state,
            });
        }
        self.runtime.set_time_delta(self.time_delta_s)?;
        self.subscription = Some(
            self.runtime
                .register_subscription(CONTROL_TOPIC, ENDPOINT_TYPE)?,
        );
        self.publication = Some(
            self.runtime
                .register_global_publication(STATUS_TOPIC, ENDPOINT_TYPE)?,
        );
        self.runtime.enter_initializing()?;
        self.state = SessionState::Initializing;
        Ok(())
    }

    /// Enters executing mode and publishes the bootstrap sentinel.
    ///
    /// This is the last point where registration errors can surface; after
    /// it no new endpoints may be added.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Initializing {
            return Err(SessionError::State {
                operation: "start",
                state: self.state,
            });
        }
        let Some(publication) = self.publication else {
            return Err(SessionError::State {
                operation: "start",
                state: self.state,
            });
        };
        self.runtime.enter_executing()?;
        self.runtime
            .publish_string(publication, codec::BOOTSTRAP_SENTINEL)?;
        self.state = SessionState::Executing;
        Ok(())
    }

    /// Runs the time-step loop until the simulation horizon is reached.
    ///
    /// Each iteration reads the latest control value, updates the wind state
    /// (skipped on the bootstrap step, time ≤ 0), recomputes turbine powers,
    /// publishes the status record, and blocks on the next time grant.
    /// Returns one [`StepRecord`] per executed step.
    pub fn execute(&mut self) -> Result<Vec<StepRecord>, SessionError> {
        if self.state != SessionState::Executing {
            return Err(SessionError::State {
                operation: "execute",
                state: self.state,
            });
        }
        let (Some(subscription), Some(publication)) = (self.subscription, self.publication) else {
            return Err(SessionError::State {
                operation: "execute",
                state: self.state,
            });
        };

        let mut records = Vec::new();
        let mut time = self.runtime.current_time();
        while time < self.horizon_s {
            let raw = self.runtime.latest_string(subscription)?;
            // The bootstrap value is read but never decoded; the channel
            // holds junk until the first grant.
            if time > 0.0 {
                self.apply_control(&raw);
            }

            let powers = turbine::turbine_powers(self.wind.speed_m_s);
            let time_step = time as u64;
            let status = codec::encode_status(
                time_step,
                self.wind.speed_m_s,
                self.wind.direction_deg,
                &powers,
            );
            self.runtime.publish_string(publication, &status)?;

            records.push(StepRecord {
                time_step,
                wind_speed_m_s: self.wind.speed_m_s,
                wind_direction_deg: self.wind.direction_deg,
                turbine_power_kw: powers,
                farm_power_kw: turbine::farm_power_kw(&powers),
            });

            time = self.runtime.request_next_step()?;
        }
        Ok(records)
    }

    /// Signals the runtime the federate is done. Irreversible.
    pub fn finalize(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Executing {
            return Err(SessionError::State {
                operation: "finalize",
                state: self.state,
            });
        }
        self.runtime.finalize()?;
        self.state = SessionState::Finalized;
        Ok(())
    }

    /// Runs the full lifecycle and returns the step records.
    pub fn run(&mut self) -> Result<Vec<StepRecord>, SessionError> {
        self.initialize()?;
        self.start()?;
        let records = self.execute()?;
        self.finalize()?;
        Ok(records)
    }

    /// Updates the wind state from a raw control record.
    ///
    /// Decoded fields arrive in reverse wire order: direction first, then
    /// speed. A record with fewer than two fields leaves the previous wind
    /// state in place.
    fn apply_control(&mut self, raw: &str) {
        let fields = codec::decode_fields_reversed(raw);
        if let [direction, speed, ..] = fields[..] {
            self.wind = WindState {
                speed_m_s: speed,
                direction_deg: direction,
            };
        }
    }
}
