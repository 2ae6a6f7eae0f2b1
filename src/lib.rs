//! Wind-farm co-simulation federate.
//!
//! A time-stepped federate that stands in for a high-fidelity wind-farm
//! solver: it subscribes to a control-center wind signal, computes turbine
//! powers from the received wind state, publishes a status record each step,
//! and advances simulated time in lockstep with the federation runtime.

/// Wire codec for the bracketed text exchange.
pub mod codec;
pub mod config;
/// File output helpers.
pub mod io;
pub mod report;
/// Federation runtime contract and the in-process implementation.
pub mod runtime;
pub mod session;
/// Stand-in turbine power model.
pub mod turbine;
