// Gesture monitor - start/stop control, status query and the frame loop task

use crate::core::config::GestureConfig;
use crate::core::session::SessionContext;
use crate::models::frame::AnnotatedFrame;
use crate::models::gesture::GestureResult;
use crate::platform::hand_tracking::{CaptureGuard, FrameSourceFactory, HandDetector};
use crate::platform::volume::VolumeActuator;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

const STREAM_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Start,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    pub status: String,
    pub active: bool,
}

impl ControlResponse {
    fn success(active: bool) -> Self {
        Self {
            status: "success".to_string(),
            active,
        }
    }
}

/// Status for polling by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorStatus {
    pub volume: u8,
    pub gesture: String,
    pub active: bool,
    pub calibrated: bool,
    pub started_at: Option<DateTime<Utc>>,
}

/// Session plus the id of the run allowed to mutate it. Both sit behind one
/// lock so a frame cycle can never observe a half-reset session.
struct MonitorState {
    session: SessionContext,
    run_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
}

/// Drives one `SessionContext` from a camera and a landmark detector
pub struct GestureMonitor {
    config: GestureConfig,
    state: Arc<Mutex<MonitorState>>,
    source_factory: FrameSourceFactory,
    detector: Arc<Mutex<Box<dyn HandDetector>>>,
    actuator: Arc<dyn VolumeActuator>,
    frame_tx: broadcast::Sender<AnnotatedFrame>,
    // Also serializes start/stop against each other
    task: Mutex<Option<JoinHandle<()>>>,
}

impl GestureMonitor {
    pub fn new(
        config: GestureConfig,
        source_factory: FrameSourceFactory,
        detector: Box<dyn HandDetector>,
        actuator: Arc<dyn VolumeActuator>,
    ) -> Self {
        let (frame_tx, _) = broadcast::channel(STREAM_CAPACITY);

        Self {
            state: Arc::new(Mutex::new(MonitorState {
                session: SessionContext::new(config.clone()),
                run_id: None,
                started_at: None,
            })),
            config,
            source_factory,
            detector: Arc::new(Mutex::new(detector)),
            actuator,
            frame_tx,
            task: Mutex::new(None),
        }
    }

    /// Subscribe to annotated frames for the streaming layer
    pub fn subscribe(&self) -> broadcast::Receiver<AnnotatedFrame> {
        self.frame_tx.subscribe()
    }

    pub async fn control(&self, action: ControlAction) -> GestureResult<ControlResponse> {
        match action {
            ControlAction::Start => self.start().await,
            ControlAction::Stop => self.stop().await,
        }
    }

    /// Reset the session, open the camera and start the frame loop.
    /// A no-op while already running.
    pub async fn start(&self) -> GestureResult<ControlResponse> {
        let mut task = self.task.lock().await;

        if self.state.lock().await.run_id.is_some() {
            return Ok(ControlResponse::success(true));
        }

        // A previous run may have ended on its own; make sure it is gone
        if let Some(handle) = task.take() {
            if let Err(e) = handle.await {
                warn!("Previous frame loop ended abnormally: {}", e);
            }
        }

        let source = (self.source_factory)(&self.config)?;
        let capture = CaptureGuard::new(source);

        let run_id = Uuid::new_v4();
        {
            let mut state = self.state.lock().await;
            state.session.reset();
            state.run_id = Some(run_id);
            state.started_at = Some(Utc::now());
        }

        let frame_interval =
            Duration::from_secs_f64(1.0 / f64::from(self.config.target_fps.max(1)));
        *task = Some(tokio::spawn(Self::run_frame_loop(
            run_id,
            capture,
            self.state.clone(),
            self.detector.clone(),
            self.actuator.clone(),
            self.frame_tx.clone(),
            frame_interval,
        )));

        info!("Started gesture monitoring (run {})", run_id);
        Ok(ControlResponse::success(true))
    }

    /// Stop the frame loop and release the camera. Returns once the loop has
    /// exited; at most the frame already in flight completes.
    pub async fn stop(&self) -> GestureResult<ControlResponse> {
        let mut task = self.task.lock().await;

        let stopped = {
            let mut state = self.state.lock().await;
            state.started_at = None;
            state.run_id.take()
        };

        if let Some(handle) = task.take() {
            if let Err(e) = handle.await {
                warn!("Frame loop ended abnormally: {}", e);
            }
        }

        if let Some(run_id) = stopped {
            info!("Stopped gesture monitoring (run {})", run_id);
        }
        Ok(ControlResponse::success(false))
    }

    pub async fn status(&self) -> MonitorStatus {
        let state = self.state.lock().await;
        let session = state.session.status();
        MonitorStatus {
            volume: session.volume,
            gesture: session.gesture,
            active: state.run_id.is_some(),
            calibrated: session.calibrated,
            started_at: state.started_at,
        }
    }

    pub async fn is_active(&self) -> bool {
        self.state.lock().await.run_id.is_some()
    }

    async fn run_frame_loop(
        run_id: Uuid,
        mut capture: CaptureGuard,
        state: Arc<Mutex<MonitorState>>,
        detector: Arc<Mutex<Box<dyn HandDetector>>>,
        actuator: Arc<dyn VolumeActuator>,
        frame_tx: broadcast::Sender<AnnotatedFrame>,
        frame_interval: Duration,
    ) {
        let mut ticker = tokio::time::interval(frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if state.lock().await.run_id != Some(run_id) {
                break;
            }

            let frame = match capture.read_frame().await {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Frame acquisition failed, ending run {}: {}", run_id, e);
                    Self::end_run(&state, run_id).await;
                    break;
                }
            };

            let detected = detector.lock().await.detect(&frame);
            let hands = match detected {
                Ok(hands) => hands,
                Err(e) => {
                    warn!("Hand detection failed, ending run {}: {}", run_id, e);
                    Self::end_run(&state, run_id).await;
                    break;
                }
            };

            let outcome = {
                let mut state = state.lock().await;
                // Stopped (or restarted) while this frame was in flight
                if state.run_id != Some(run_id) {
                    break;
                }
                state.session.process_hands(
                    &hands,
                    frame.width,
                    frame.height,
                    frame.timestamp,
                    actuator.as_ref(),
                )
            };

            // No subscribers is fine
            let _ = frame_tx.send(AnnotatedFrame { frame, outcome });
        }
    }

    async fn end_run(state: &Mutex<MonitorState>, run_id: Uuid) {
        let mut state = state.lock().await;
        if state.run_id == Some(run_id) {
            state.run_id = None;
            state.started_at = None;
        }
    }
}
