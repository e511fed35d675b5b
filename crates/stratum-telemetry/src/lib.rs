//! # stratum-telemetry
//!
//! Event bus for collision-resolution telemetry. Emits structured events
//! (step boundaries, outer iterations, layer escalation, energy) that are
//! consumed by pluggable sinks (tracing, JSON lines, in-memory).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::{Emitter, EventBus};
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, JsonLinesSink, TracingSink, VecSink};
