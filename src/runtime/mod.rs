//! Federation runtime capability contract.
//!
//! The session consumes the federation's time synchronization and pub/sub
//! delivery exclusively through [`FederationRuntime`]; the runtime's internal
//! consensus is out of scope. [`InProcessRuntime`] is a broker-free
//! implementation with a built-in control-center standin, used by the binary
//! and the test suite.

use std::fmt;

pub mod in_process;

pub use in_process::InProcessRuntime;
pub use in_process::WindProfile;

/// Handle to a registered subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionHandle(pub usize);

/// Handle to a registered publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicationHandle(pub usize);

/// Federate lifecycle mode as seen by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederateMode {
    Created,
    Initializing,
    Executing,
    Finalized,
}

impl fmt::Display for FederateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FederateMode::Created => "created",
            FederateMode::Initializing => "initializing",
            FederateMode::Executing => "executing",
            FederateMode::Finalized => "finalized",
        };
        write!(f, "{name}")
    }
}

/// Error raised by a federation runtime operation.
///
/// All variants are fatal: the session propagates them and the process
/// terminates. There is no retry or partial-failure handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Lifecycle transition requested out of order.
    InvalidTransition { from: FederateMode, to: FederateMode },
    /// Endpoint registration or property change after setup closed.
    SetupClosed {
        operation: &'static str,
        mode: FederateMode,
    },
    /// Pub/sub or time operation refused (wrong mode or stale handle).
    Endpoint {
        operation: &'static str,
        message: String,
    },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::InvalidTransition { from, to } => {
                write!(f, "invalid state transition: {from} -> {to}")
            }
            RuntimeError::SetupClosed { operation, mode } => {
                write!(f, "{operation} rejected in {mode} mode: setup is closed")
            }
            RuntimeError::Endpoint { operation, message } => {
                write!(f, "{operation}: {message}")
            }
        }
    }
}

/// Time-synchronization and pub/sub services consumed from the federation.
///
/// Implementations own the simulation clock; the session only reads it and
/// requests advancement. [`FederationRuntime::request_next_step`] is the sole
/// suspension point of the cooperative model and blocks until the federation
/// grants the next time.
pub trait FederationRuntime {
    /// Sets the minimum time granted per step, in seconds. Only valid before
    /// entering initializing mode.
    fn set_time_delta(&mut self, seconds: f64) -> Result<(), RuntimeError>;

    /// Registers a named typed subscription. Only valid before entering
    /// initializing mode.
    fn register_subscription(
        &mut self,
        name: &str,
        kind: &str,
    ) -> Result<SubscriptionHandle, RuntimeError>;

    /// Registers a named typed publication visible to the whole federation.
    /// Only valid before entering initializing mode.
    fn register_global_publication(
        &mut self,
        name: &str,
        kind: &str,
    ) -> Result<PublicationHandle, RuntimeError>;

    /// Enters initializing mode. After this no new endpoints may be added.
    fn enter_initializing(&mut self) -> Result<(), RuntimeError>;

    /// Enters executing mode; the federation starts granting time.
    fn enter_executing(&mut self) -> Result<(), RuntimeError>;

    /// Current granted simulation time (seconds, non-negative).
    fn current_time(&self) -> f64;

    /// Requests advancement to the next time step, blocking until the new
    /// time is granted. Returns the granted time.
    fn request_next_step(&mut self) -> Result<f64, RuntimeError>;

    /// Reads the latest value delivered on a subscription. Only the most
    /// recent value is visible (last-write-wins).
    fn latest_string(&mut self, subscription: SubscriptionHandle) -> Result<String, RuntimeError>;

    /// Publishes a value on a publication.
    fn publish_string(
        &mut self,
        publication: PublicationHandle,
        value: &str,
    ) -> Result<(), RuntimeError>;

    /// Signals the federate is done. Irreversible; no further pub/sub or
    /// time calls are permitted.
    fn finalize(&mut self) -> Result<(), RuntimeError>;
}
