// Hand tracking platform integration
// Boundary traits for the external camera and landmark detector

pub mod capture;
pub mod detector;

pub use capture::{CaptureGuard, FrameSource, FrameSourceFactory};
pub use detector::{DummyHandDetector, HandDetector};
