// Captured frames, per-frame engine output and overlay draw instructions

use crate::models::gesture::{Bgr, Gesture, VolumeAction};
use crate::models::hand::PixelPoint;
use serde::{Deserialize, Serialize};

/// A frame handed over by the capture layer
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub timestamp: i64, // Wall clock, milliseconds since the Unix epoch
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

/// Pixel format of captured frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    RGB8,
    BGR8,
}

// ==============================================================================
// Engine output
// ==============================================================================

/// Calibrated thumb-index operating range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRange {
    pub min_dist: f64,
    pub max_dist: f64,
}

impl CalibrationRange {
    pub fn midpoint(&self) -> f64 {
        (self.min_dist + self.max_dist) / 2.0
    }

    pub fn spread(&self) -> f64 {
        self.max_dist - self.min_dist
    }
}

/// Everything the presentation layer needs to know about one processed frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameOutcome {
    pub timestamp: i64,
    pub gesture: Gesture,
    pub color: Bgr,
    pub volume: u8,
    pub calibration: Option<CalibrationRange>,
    pub thumb_index_distance: Option<f64>,
    pub actions: Vec<VolumeAction>,
    pub overlay: Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub top_left: PixelPoint,
    pub bottom_right: PixelPoint,
    pub color: Bgr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub from: PixelPoint,
    pub to: PixelPoint,
    pub color: Bgr,
    pub thickness: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLabel {
    pub text: String,
    pub origin: PixelPoint,
    pub color: Bgr,
}

/// Draw instructions for the renderer; the engine never touches pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub volume_bar_background: Rect,
    pub volume_bar_level: Rect,
    pub gesture_text: TextLabel,
    pub thumb_index_line: Option<Line>,
    pub hand_landmarks: Vec<PixelPoint>,
}

/// A frame plus its engine output, published to stream subscribers
#[derive(Debug, Clone)]
pub struct AnnotatedFrame {
    pub frame: RawFrame,
    pub outcome: FrameOutcome,
}

// ==============================================================================
// Error Types
// ==============================================================================

/// Error types for camera capture operations
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Camera not available: {0}")]
    DeviceUnavailable(String),

    #[error("Frame read failed: {0}")]
    ReadFailed(String),

    #[error("Capture source exhausted")]
    EndOfStream,
}

pub type CaptureResult<T> = Result<T, CaptureError>;
