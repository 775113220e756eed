//! Animation drivers and the control loop composing them.

pub mod applier;
pub mod blink;
pub mod breathing;
pub mod controller;
pub mod lip_sync;
pub mod scheduler;
pub mod tracking;

pub use applier::DriverSet;
pub use blink::BlinkScheduler;
pub use breathing::BreathingOscillator;
pub use controller::AnimationController;
pub use scheduler::FramePacer;
pub use tracking::TrackingFilter;
