//! Read-only inputs the render core consumes from the simulation layer.
//!
//! Machine descriptors, environment enumerations (quality tier, weather) and
//! the per-frame input bundle live here so every render crate agrees on one
//! vocabulary without depending on the simulation itself.

mod environment;
mod frame;
mod machine;

pub use environment::{QualityTier, Weather};
pub use frame::FrameInputs;
pub use machine::{MachineDescriptor, MachineId, MachineMetrics, MachineStatus};
