// Session context - per-frame orchestration of geometry, classification,
// calibration and dispatch, with all temporal state in one resettable place

use crate::core::action_dispatcher::ActionDispatcher;
use crate::core::calibration::CalibrationTracker;
use crate::core::config::GestureConfig;
use crate::core::finger_state::finger_states;
use crate::core::geometry::{self, landmark_pixels};
use crate::core::gesture_classifier::{ClassifierThresholds, GestureClassifier};
use crate::core::overlay::build_overlay;
use crate::models::frame::{CalibrationRange, FrameOutcome};
use crate::models::gesture::{Gesture, VolumeAction, IDLE_GESTURE_LABEL};
use crate::models::hand::{Finger, HandLandmarks, HandPose, PixelPoint};
use crate::platform::volume::VolumeActuator;
use log::info;
use serde::{Deserialize, Serialize};

/// Values exposed to the status query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub volume: u8,
    pub gesture: String,
    pub calibrated: bool,
    pub calibration: Option<CalibrationRange>,
}

/// All state that lives across frames of one monitoring session.
///
/// Single writer: whoever owns the context drives every mutation through
/// `process_hands` and `reset`.
pub struct SessionContext {
    config: GestureConfig,
    classifier: GestureClassifier,
    calibration: CalibrationTracker,
    dispatcher: ActionDispatcher,
    current_gesture: Option<Gesture>,
    frames_processed: u64,
}

impl SessionContext {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            classifier: GestureClassifier::new(ClassifierThresholds::from(&config)),
            calibration: CalibrationTracker::from_config(&config),
            dispatcher: ActionDispatcher::from_config(&config),
            current_gesture: None,
            frames_processed: 0,
            config,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Run one frame cycle over the detector output.
    ///
    /// Only the first hand is used. A missing, short or non-finite landmark
    /// set yields NO_HAND and leaves calibration and cooldowns untouched.
    pub fn process_hands(
        &mut self,
        hands: &[HandPose],
        width: u32,
        height: u32,
        now_ms: i64,
        actuator: &dyn VolumeActuator,
    ) -> FrameOutcome {
        let landmarks = hands
            .first()
            .and_then(|hand| HandLandmarks::from_keypoints(&hand.landmarks));
        self.process_landmarks(landmarks.as_ref(), width, height, now_ms, actuator)
    }

    pub fn process_landmarks(
        &mut self,
        landmarks: Option<&HandLandmarks>,
        width: u32,
        height: u32,
        now_ms: i64,
        actuator: &dyn VolumeActuator,
    ) -> FrameOutcome {
        self.frames_processed += 1;

        let Some(landmarks) = landmarks else {
            return self.finish(Gesture::NoHand, now_ms, None, vec![], None, vec![]);
        };

        let hand = geometry::measure(landmarks, width, height);
        let states = finger_states(landmarks);
        let gesture = self.classifier.classify(&states, &hand.distances);
        let thumb_index = hand.distances.thumb_index();

        if let Some(range) = self.calibration.observe(thumb_index) {
            info!(
                "Calibration complete: min={:.1} max={:.1}",
                range.min_dist, range.max_dist
            );
        }

        let actions = self.dispatcher.dispatch(
            gesture,
            thumb_index,
            self.calibration.range(),
            now_ms,
            actuator,
        );

        let pinch = (gesture == Gesture::VolumeControl && self.calibration.is_calibrated())
            .then(|| (hand.tips.get(Finger::Thumb), hand.tips.get(Finger::Index)));

        self.finish(
            gesture,
            now_ms,
            Some(thumb_index),
            actions,
            pinch,
            landmark_pixels(landmarks, width, height),
        )
    }

    fn finish(
        &mut self,
        gesture: Gesture,
        now_ms: i64,
        thumb_index_distance: Option<f64>,
        actions: Vec<VolumeAction>,
        pinch: Option<(PixelPoint, PixelPoint)>,
        hand_pixels: Vec<PixelPoint>,
    ) -> FrameOutcome {
        self.current_gesture = Some(gesture);
        let volume = self.dispatcher.volume();

        FrameOutcome {
            timestamp: now_ms,
            gesture,
            color: gesture.color(),
            volume,
            calibration: self.calibration.range(),
            thumb_index_distance,
            actions,
            overlay: build_overlay(gesture, volume, pinch, hand_pixels),
        }
    }

    pub fn volume(&self) -> u8 {
        self.dispatcher.volume()
    }

    pub fn current_gesture(&self) -> Option<Gesture> {
        self.current_gesture
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_calibrated()
    }

    pub fn calibration(&self) -> &CalibrationTracker {
        &self.calibration
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            volume: self.volume(),
            gesture: self
                .current_gesture
                .map_or(IDLE_GESTURE_LABEL, |g| g.label())
                .to_string(),
            calibrated: self.is_calibrated(),
            calibration: self.calibration.range(),
        }
    }

    /// Back to a fresh session: calibration samples, cooldowns, volume estimate
    /// and the reported gesture all return to their initial values
    pub fn reset(&mut self) {
        self.calibration.reset();
        self.dispatcher.reset();
        self.current_gesture = None;
        self.frames_processed = 0;
    }
}
