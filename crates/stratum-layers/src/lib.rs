//! # stratum-layers
//!
//! Adaptive penalty layers for collision-free timesteps.
//!
//! ## Key Types
//!
//! - [`SimulationState`]: flat per-DOF buffers with lazy update times
//! - [`LayerConfig`]: base parameters of the layer hierarchy
//! - [`PenaltyGroup`]: one layer: potentials plus a uniform clock
//! - [`ActiveLayers`]: event-driven scheduler with rollback and escalation
//! - [`StepResolver`]: repeats outer iterations until a step converges

pub mod active_layers;
pub mod config;
pub mod group;
pub mod potential;
pub mod queue;
pub mod resolver;
pub mod state;

pub use active_layers::{ActiveLayers, IterationReport};
pub use config::LayerConfig;
pub use group::{Contribution, PenaltyGroup};
pub use potential::{EdgeEdgePotential, PenaltyLaw, VertexFacePotential};
pub use queue::EventQueue;
pub use resolver::{StepReport, StepResolver};
pub use state::SimulationState;
