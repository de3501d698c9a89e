//! Animation scheduling: options, easing, the frame clock and per-target runs.

pub mod clock;
pub mod ease;
pub mod fx;
pub mod morph;
pub mod options;

pub use clock::{FrameClock, ManualClock, SharedClock, TimerHandle};
pub use ease::{Ease, Easing};
pub use fx::{Fx, Phase};
pub use morph::{Morph, Sampler};
pub use options::{AnimOptions, Loop, Timing};
