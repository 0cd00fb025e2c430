//! Frame timing for the render core: the frame clock and its per-category
//! throttle, the smoothed simulated time of day, and keyframe interpolation
//! over the 24-hour cycle.

mod clock;
pub mod keyframe;
pub mod sim_time;
pub mod sky;
mod throttle;

pub use clock::{FrameClock, MAX_FRAME_DELTA};
pub use keyframe::{Bracket, Keyframe, KeyframeError, KeyframeTable, Lerp, Rgb8};
pub use sim_time::{
    DEFAULT_DRIFT_THRESHOLD_HOURS, HOURS_PER_DAY, TimeSimulation, TimeState, TimeStep,
    hour_distance, wrap_hour,
};
pub use sky::{SkyPalette, celestial_directions, default_day_cycle};
pub use throttle::{FrameThrottle, UpdateTier};
