// Landmark detector bridge
// The ML model lives outside this crate; anything that turns a color frame
// into 21-point hands can sit behind this trait

use crate::models::frame::RawFrame;
use crate::models::gesture::GestureResult;
use crate::models::hand::HandPose;

/// Hand landmark detector.
///
/// Returns zero or more hands, each with normalized landmarks. The engine only
/// looks at the first one.
pub trait HandDetector: Send {
    /// Run inference on a frame
    fn detect(&mut self, frame: &RawFrame) -> GestureResult<Vec<HandPose>>;

    /// Check if the model is loaded
    fn is_initialized(&self) -> bool;

    fn get_model_info(&self) -> String;
}

/// Placeholder used when no detector backend is wired in
#[derive(Debug, Default)]
pub struct DummyHandDetector;

impl HandDetector for DummyHandDetector {
    fn detect(&mut self, _frame: &RawFrame) -> GestureResult<Vec<HandPose>> {
        Ok(vec![])
    }

    fn is_initialized(&self) -> bool {
        false
    }

    fn get_model_info(&self) -> String {
        "Dummy hand detector (no inference)".to_string()
    }
}
