//! Gristmill application layer.
//!
//! Wires the frame clock, time simulation, animation scheduler and the four
//! machine renderers into one per-frame driver, plus the mock simulation
//! and fixed-step loop used by the headless demo.

pub mod environment;
pub mod frame;
pub mod game_loop;
pub mod mock_sim;

pub use environment::EnvironmentNodes;
pub use frame::{FactoryFrame, FactoryMachines, FrameReport, MachineKind};
pub use game_loop::GameLoop;
pub use mock_sim::MockSimulation;
