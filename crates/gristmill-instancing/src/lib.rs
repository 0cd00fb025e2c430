//! Instanced rendering of homogeneous machine populations.
//!
//! Each machine class draws a fixed set of sub-parts. Every sub-part owns
//! one instance buffer holding `parts_per_machine` slots per machine, in
//! machine-list order. Static parts are written once per initialization;
//! dynamic parts are rewritten on every throttled update, collapsed to zero
//! scale while their machine is beyond the class's cull radius.

pub mod classes;
mod layout;
mod renderer;
mod selection;

pub use classes::{MachineClass, PackingStation, PlanSifter, RollerMill, StorageSilo};
pub use layout::{SubPartKind, SubPartLayout, SubPartSpec};
pub use renderer::{InstanceContext, InstancedRenderer, RenderStats};
pub use selection::CulledSelection;
