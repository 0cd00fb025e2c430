//! Centrally throttled animation of the scene's environment.
//!
//! Scene nodes own their shader parameter blocks as `Rc<RefCell<_>>` and
//! register a weak [`AnimationDescriptor`] with the [`AnimationScheduler`]
//! when they are mounted. Once per displayed frame the scheduler walks each
//! category whose divisor fires and writes fresh values into the live blocks.

mod category;
mod descriptor;
mod error;
mod frame;
mod registry;
mod scheduler;
pub mod update;

pub use category::AnimationCategory;
pub use descriptor::{AnimationDescriptor, BlinkPattern, LightSource};
pub use error::AnimationError;
pub use frame::FrameContext;
pub use registry::AnimationRegistry;
pub use scheduler::{AnimationReport, AnimationScheduler, CategoryDivisors};
