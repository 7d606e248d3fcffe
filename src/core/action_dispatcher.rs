// Action dispatch - cooldown-gated mute and volume steps with a bounded level estimate

use crate::core::config::GestureConfig;
use crate::models::frame::CalibrationRange;
use crate::models::gesture::{Gesture, VolumeAction};
use crate::platform::volume::VolumeActuator;
use log::debug;

pub const MAX_VOLUME: u8 = 100;

/// Minimum interval between firings of one action class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    interval_ms: i64,
    last_fired_ms: Option<i64>,
}

impl Cooldown {
    pub fn new(interval_ms: i64) -> Self {
        Self {
            interval_ms,
            last_fired_ms: None,
        }
    }

    /// True if never fired, or at least `interval_ms` has passed
    pub fn is_ready(&self, now_ms: i64) -> bool {
        self.last_fired_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= self.interval_ms)
    }

    pub fn mark_fired(&mut self, now_ms: i64) {
        self.last_fired_ms = Some(now_ms);
    }

    pub fn last_fired_ms(&self) -> Option<i64> {
        self.last_fired_ms
    }

    pub fn reset(&mut self) {
        self.last_fired_ms = None;
    }
}

/// Turns per-frame gestures into actuator calls.
///
/// Mute is level-triggered: holding a fist re-fires every mute cooldown.
/// Volume steps need a calibrated range and fire only outside the dead zone
/// around its midpoint; any calibrated volume-control frame that passes the
/// gate restarts its interval, dead zone or not. The volume level is a local estimate and is never
/// read back from the OS.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    mute_cooldown: Cooldown,
    volume_cooldown: Cooldown,
    dead_zone: f64,
    step: u8,
    initial_volume: u8,
    volume: u8,
}

impl ActionDispatcher {
    pub fn new(
        mute_cooldown_ms: i64,
        volume_cooldown_ms: i64,
        dead_zone: f64,
        step: u8,
        initial_volume: u8,
    ) -> Self {
        let initial_volume = initial_volume.min(MAX_VOLUME);
        Self {
            mute_cooldown: Cooldown::new(mute_cooldown_ms),
            volume_cooldown: Cooldown::new(volume_cooldown_ms),
            dead_zone,
            step,
            initial_volume,
            volume: initial_volume,
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self::new(
            config.mute_cooldown_ms,
            config.volume_cooldown_ms,
            config.dead_zone,
            config.volume_step,
            config.initial_volume,
        )
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Evaluate both triggers for one frame and fire whatever passes its gate
    pub fn dispatch(
        &mut self,
        gesture: Gesture,
        thumb_index_distance: f64,
        range: Option<CalibrationRange>,
        now_ms: i64,
        actuator: &dyn VolumeActuator,
    ) -> Vec<VolumeAction> {
        let mut fired = Vec::new();

        if gesture == Gesture::Fist && self.mute_cooldown.is_ready(now_ms) {
            actuator.trigger(VolumeAction::Mute);
            self.mute_cooldown.mark_fired(now_ms);
            fired.push(VolumeAction::Mute);
        }

        if gesture == Gesture::VolumeControl && self.volume_cooldown.is_ready(now_ms) {
            if let Some(range) = range {
                // Dead-zone frames restart the interval too
                self.volume_cooldown.mark_fired(now_ms);
                if let Some(action) = self.volume_step_for(thumb_index_distance, &range) {
                    actuator.trigger(action);
                    self.apply_step(action);
                    fired.push(action);
                }
            }
        }

        if !fired.is_empty() {
            debug!("Fired {:?} at {} (volume estimate {})", fired, now_ms, self.volume);
        }

        fired
    }

    /// Both dead-zone edges are inclusive: exactly `mid ± dead_zone` does nothing
    fn volume_step_for(&self, distance: f64, range: &CalibrationRange) -> Option<VolumeAction> {
        let mid = range.midpoint();
        if distance > mid + self.dead_zone {
            Some(VolumeAction::VolumeUp)
        } else if distance < mid - self.dead_zone {
            Some(VolumeAction::VolumeDown)
        } else {
            None
        }
    }

    fn apply_step(&mut self, action: VolumeAction) {
        self.volume = match action {
            VolumeAction::VolumeUp => self.volume.saturating_add(self.step).min(MAX_VOLUME),
            VolumeAction::VolumeDown => self.volume.saturating_sub(self.step),
            VolumeAction::Mute => self.volume,
        };
    }

    /// Back to the initial level with both cooldowns cleared
    pub fn reset(&mut self) {
        self.volume = self.initial_volume;
        self.mute_cooldown.reset();
        self.volume_cooldown.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::tests::RecordingActuator;

    // Midpoint 200, dead zone [185, 215]
    const RANGE: CalibrationRange = CalibrationRange {
        min_dist: 100.0,
        max_dist: 300.0,
    };

    fn dispatcher_at(volume: u8) -> ActionDispatcher {
        ActionDispatcher::new(500, 80, 15.0, 2, volume)
    }

    #[test]
    fn test_cooldown_gate() {
        let mut cooldown = Cooldown::new(500);
        assert!(cooldown.is_ready(0));
        cooldown.mark_fired(1_000);
        assert!(!cooldown.is_ready(1_499));
        assert!(cooldown.is_ready(1_500));
        cooldown.reset();
        assert!(cooldown.is_ready(1_001));
        assert_eq!(cooldown.last_fired_ms(), None);
    }

    #[test]
    fn test_mute_within_cooldown_fires_once() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        dispatcher.dispatch(Gesture::Fist, 0.0, None, 10_000, &actuator);
        dispatcher.dispatch(Gesture::Fist, 0.0, None, 10_400, &actuator);
        assert_eq!(actuator.calls(), vec![VolumeAction::Mute]);
    }

    #[test]
    fn test_mute_after_cooldown_fires_twice() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        dispatcher.dispatch(Gesture::Fist, 0.0, None, 10_000, &actuator);
        dispatcher.dispatch(Gesture::Fist, 0.0, None, 10_500, &actuator);
        assert_eq!(actuator.calls(), vec![VolumeAction::Mute, VolumeAction::Mute]);
        // Mute never moves the level estimate
        assert_eq!(dispatcher.volume(), 50);
    }

    #[test]
    fn test_held_fist_refires_each_interval() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        // 30 fps for two seconds
        for frame in 0..60 {
            dispatcher.dispatch(Gesture::Fist, 0.0, None, frame * 33, &actuator);
        }
        assert_eq!(actuator.calls().len(), 4);
    }

    #[test]
    fn test_volume_needs_calibration() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        let fired = dispatcher.dispatch(Gesture::VolumeControl, 290.0, None, 0, &actuator);
        assert!(fired.is_empty());
        assert!(actuator.calls().is_empty());
    }

    #[test]
    fn test_volume_only_for_volume_gesture() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        for gesture in [Gesture::OpenPalm, Gesture::OkSign, Gesture::Unknown, Gesture::NoHand] {
            dispatcher.dispatch(gesture, 290.0, Some(RANGE), 0, &actuator);
        }
        assert!(actuator.calls().is_empty());
        assert_eq!(dispatcher.volume(), 50);
    }

    #[test]
    fn test_volume_up_and_down() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        let up = dispatcher.dispatch(Gesture::VolumeControl, 240.0, Some(RANGE), 0, &actuator);
        assert_eq!(up, vec![VolumeAction::VolumeUp]);
        assert_eq!(dispatcher.volume(), 52);

        let down = dispatcher.dispatch(Gesture::VolumeControl, 150.0, Some(RANGE), 100, &actuator);
        assert_eq!(down, vec![VolumeAction::VolumeDown]);
        assert_eq!(dispatcher.volume(), 50);
    }

    #[test]
    fn test_dead_zone_edges_do_nothing() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        for (i, d) in [185.0, 200.0, 215.0].into_iter().enumerate() {
            let fired = dispatcher.dispatch(Gesture::VolumeControl, d, Some(RANGE), i as i64 * 1_000, &actuator);
            assert!(fired.is_empty(), "distance {} should be inside the dead zone", d);
        }
        assert_eq!(dispatcher.volume(), 50);
        let fired = dispatcher.dispatch(Gesture::VolumeControl, 215.001, Some(RANGE), 10_000, &actuator);
        assert_eq!(fired, vec![VolumeAction::VolumeUp]);
    }

    #[test]
    fn test_volume_cooldown() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        dispatcher.dispatch(Gesture::VolumeControl, 290.0, Some(RANGE), 0, &actuator);
        dispatcher.dispatch(Gesture::VolumeControl, 290.0, Some(RANGE), 79, &actuator);
        dispatcher.dispatch(Gesture::VolumeControl, 290.0, Some(RANGE), 80, &actuator);
        assert_eq!(actuator.calls().len(), 2);
        assert_eq!(dispatcher.volume(), 54);
    }

    #[test]
    fn test_dead_zone_frame_consumes_cooldown() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        dispatcher.dispatch(Gesture::VolumeControl, 200.0, Some(RANGE), 0, &actuator);
        let fired = dispatcher.dispatch(Gesture::VolumeControl, 290.0, Some(RANGE), 50, &actuator);
        assert!(fired.is_empty());
        let fired = dispatcher.dispatch(Gesture::VolumeControl, 290.0, Some(RANGE), 80, &actuator);
        assert_eq!(fired, vec![VolumeAction::VolumeUp]);
    }

    #[test]
    fn test_uncalibrated_frame_leaves_cooldown_alone() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        dispatcher.dispatch(Gesture::VolumeControl, 290.0, None, 0, &actuator);
        let fired = dispatcher.dispatch(Gesture::VolumeControl, 290.0, Some(RANGE), 10, &actuator);
        assert_eq!(fired, vec![VolumeAction::VolumeUp]);
    }

    #[test]
    fn test_cooldown_with_extreme_timestamps() {
        let mut cooldown = Cooldown::new(500);
        cooldown.mark_fired(i64::MAX);
        assert!(!cooldown.is_ready(i64::MIN));
        cooldown.mark_fired(i64::MIN);
        assert!(cooldown.is_ready(i64::MAX));
    }

    #[test]
    fn test_cooldowns_are_independent() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        dispatcher.dispatch(Gesture::Fist, 0.0, Some(RANGE), 0, &actuator);
        let fired = dispatcher.dispatch(Gesture::VolumeControl, 290.0, Some(RANGE), 10, &actuator);
        assert_eq!(fired, vec![VolumeAction::VolumeUp]);
        let fired = dispatcher.dispatch(Gesture::Fist, 0.0, Some(RANGE), 100, &actuator);
        assert!(fired.is_empty());
    }

    #[test]
    fn test_volume_caps_at_100() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(99);
        for i in 0..5 {
            dispatcher.dispatch(Gesture::VolumeControl, 290.0, Some(RANGE), i * 100, &actuator);
        }
        assert_eq!(actuator.calls().len(), 5);
        assert_eq!(dispatcher.volume(), 100);
    }

    #[test]
    fn test_volume_floors_at_0() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(1);
        for i in 0..5 {
            dispatcher.dispatch(Gesture::VolumeControl, 110.0, Some(RANGE), i * 100, &actuator);
        }
        assert_eq!(actuator.calls(), vec![VolumeAction::VolumeDown; 5]);
        assert_eq!(dispatcher.volume(), 0);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let actuator = RecordingActuator::default();
        let mut dispatcher = dispatcher_at(50);
        dispatcher.dispatch(Gesture::Fist, 0.0, None, 1_000, &actuator);
        dispatcher.dispatch(Gesture::VolumeControl, 290.0, Some(RANGE), 1_000, &actuator);
        dispatcher.reset();
        assert_eq!(dispatcher.volume(), 50);
        let fired = dispatcher.dispatch(Gesture::Fist, 0.0, None, 1_001, &actuator);
        assert_eq!(fired, vec![VolumeAction::Mute]);
    }
}
