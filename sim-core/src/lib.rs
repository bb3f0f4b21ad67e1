//! Core 2-D bouncing-circle simulation library.
//!
//! Main components:
//! - [`body`]: a single simulated circle.
//! - [`pool`]: the ordered, resizable collection of bodies.
//! - [`bounds`]: arena rectangle and the providers that compute it.
//! - [`visual`]: the interface to whatever renders the bodies.
//! - [`phases`]: integration, collision, boundary and publish phases.
//! - [`simulation`]: the per-tick orchestrator.
//! - [`config`] / [`error`]: configuration and its loading errors.
//! - [`types`]: shared type aliases and tick reports.

pub mod body;
pub mod bounds;
pub mod config;
pub mod error;
pub mod phases;
pub mod pool;
pub mod simulation;
pub mod types;
pub mod visual;

pub use body::Body;
pub use bounds::{Bounds, BoundsProvider, PerspectiveCamera};
pub use config::{CameraConfig, Config, SpawnParams};
pub use error::ConfigError;
pub use simulation::Simulation;
pub use types::{BodyIndex, TickReport};
pub use visual::{Instance, InstanceBuffer, InstanceId, VisualLayer};
