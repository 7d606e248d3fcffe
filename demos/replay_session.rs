/// Drive the live monitor with a synthetic camera and a scripted hand
/// Run with: cargo run --example replay_session

use async_trait::async_trait;
use gesture_volume::core::config::GestureConfig;
use gesture_volume::core::monitor::{ControlAction, GestureMonitor};
use gesture_volume::models::frame::{CaptureResult, PixelFormat, RawFrame};
use gesture_volume::models::gesture::GestureResult;
use gesture_volume::models::hand::{HandLandmark, HandPose, Keypoint3D, HAND_LANDMARK_COUNT};
use gesture_volume::platform::hand_tracking::{FrameSource, FrameSourceFactory, HandDetector};
use gesture_volume::platform::volume::LoggingActuator;
use std::sync::Arc;
use std::time::Duration;

/// Blank frames stamped with wall-clock time
struct SyntheticCamera {
    width: u32,
    height: u32,
}

#[async_trait]
impl FrameSource for SyntheticCamera {
    async fn read_frame(&mut self) -> CaptureResult<RawFrame> {
        Ok(RawFrame {
            timestamp: chrono::Utc::now().timestamp_millis(),
            width: self.width,
            height: self.height,
            data: vec![0; (self.width * self.height * 3) as usize],
            format: PixelFormat::BGR8,
        })
    }

    fn release(&mut self) {
        println!("  camera released");
    }
}

/// Cycles through a fist, a calibration sweep and a wide pinch
struct ScriptedDetector {
    frame: usize,
}

fn hand(thumb: (f32, f32), index: (f32, f32)) -> HandPose {
    let mut points = vec![Keypoint3D::new(0.5, 0.5, 0.0, 1.0); HAND_LANDMARK_COUNT];
    points[HandLandmark::ThumbTip.index()] = Keypoint3D::new(thumb.0, thumb.1, 0.0, 1.0);
    points[HandLandmark::IndexFingerTip.index()] = Keypoint3D::new(index.0, index.1, 0.0, 1.0);
    HandPose::new(points)
}

impl HandDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &RawFrame) -> GestureResult<Vec<HandPose>> {
        self.frame += 1;
        let pose = match self.frame {
            0..=10 => hand((0.5, 0.5), (0.5, 0.5)),
            11..=70 => {
                let spread = if self.frame % 2 == 0 { 100.0 } else { 300.0 };
                hand((0.25, 0.25), (0.25 + spread / 640.0, 0.25))
            }
            _ => hand((0.25, 0.25), (0.25 + 240.0 / 640.0, 0.25)),
        };
        Ok(vec![pose])
    }

    fn is_initialized(&self) -> bool {
        true
    }

    fn get_model_info(&self) -> String {
        "scripted".to_string()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Gesture Monitor Session ===\n");

    let config = GestureConfig::default();
    let factory: FrameSourceFactory = Box::new(|config: &GestureConfig| {
        Ok(Box::new(SyntheticCamera {
            width: config.frame_width,
            height: config.frame_height,
        }) as Box<dyn FrameSource>)
    });

    let monitor = GestureMonitor::new(
        config,
        factory,
        Box::new(ScriptedDetector { frame: 0 }),
        Arc::new(LoggingActuator),
    );

    let mut frames = monitor.subscribe();
    let response = monitor.control(ControlAction::Start).await?;
    println!("Start: {}", serde_json::to_string(&response)?);

    let mut last_gesture = None;
    let deadline = tokio::time::Instant::now() + Duration::from_secs(4);
    while let Ok(Ok(annotated)) = tokio::time::timeout_at(deadline, frames.recv()).await {
        let outcome = annotated.outcome;
        if last_gesture != Some(outcome.gesture) {
            println!(
                "  {} | volume {} | {}",
                outcome.timestamp,
                outcome.volume,
                outcome.overlay.gesture_text.text
            );
            last_gesture = Some(outcome.gesture);
        }
    }

    println!("\nStatus: {}", serde_json::to_string_pretty(&monitor.status().await)?);

    let response = monitor.control(ControlAction::Stop).await?;
    println!("Stop: {}", serde_json::to_string(&response)?);

    Ok(())
}
