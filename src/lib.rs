//! Interactive rod-tool controller for an external soft-tissue simulation.
//!
//! The engine owns the deformable tetrahedral mesh and the event loop; this
//! crate owns the controller it calls back into: key-event normalization
//! across the raw encodings hosts deliver, a held-key movement state machine
//! driving an axis-aligned rod tool, and a per-tick cut pass that selects
//! which mesh elements the rod overlaps and hands them to the engine's
//! removal sink.

mod config;
mod controller;
mod cut;
mod data;
mod event;
mod host;
mod input;
mod key;
mod rod;

pub use config::{ConfigError, RodToolConfig};
pub use controller::{EngineBindings, RodCutController};
pub use cut::{removal_candidates, Aabb3};
pub use data::{DataSlot, FieldData, TrackedData};
pub use event::{KeyEventAccess, KeyTransition, SimKeyEvent};
pub use host::{tetrahedral_bar, DemoHost};
pub use input::{is_movement_token, movement_direction, HeldKeys};
pub use key::{normalize, KeyToken, RawKey};
pub use rod::{RodGeometry, RodState};
