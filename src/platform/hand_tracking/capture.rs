// Camera capture boundary - frame sources and scoped ownership of the device

use crate::core::config::GestureConfig;
use crate::models::frame::{CaptureResult, RawFrame};
use async_trait::async_trait;

/// A stream of frames from a camera (or anything pretending to be one)
#[async_trait]
pub trait FrameSource: Send {
    /// Read the next frame. Errors end the monitoring run.
    async fn read_frame(&mut self) -> CaptureResult<RawFrame>;

    /// Release the underlying device. Called exactly once by `CaptureGuard`.
    fn release(&mut self);
}

/// Opens a frame source at the configured resolution
pub type FrameSourceFactory =
    Box<dyn Fn(&GestureConfig) -> CaptureResult<Box<dyn FrameSource>> + Send + Sync>;

/// Owns an open source for one monitoring run and releases it on drop,
/// whether the run ended by stop or by a capture failure.
pub struct CaptureGuard {
    source: Option<Box<dyn FrameSource>>,
}

impl CaptureGuard {
    pub fn new(source: Box<dyn FrameSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    pub async fn read_frame(&mut self) -> CaptureResult<RawFrame> {
        match self.source.as_mut() {
            Some(source) => source.read_frame().await,
            None => Err(crate::models::frame::CaptureError::DeviceUnavailable(
                "capture already released".to_string(),
            )),
        }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
            log::debug!("Capture source released");
        }
    }
}
