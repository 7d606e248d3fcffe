// Finger extension from a single frame of landmarks (no hysteresis)

use crate::models::hand::{Finger, FingerStates, HandLandmarks};

/// Derive the extension vector for one hand.
///
/// The frame is expected to be mirrored, so an extended thumb tip sits to the
/// left of its IP joint. The other fingers count as extended when the tip is
/// above the PIP joint (image y grows downward).
pub fn finger_states(landmarks: &HandLandmarks) -> FingerStates {
    FingerStates::new(Finger::ALL.map(|finger| is_extended(landmarks, finger)))
}

fn is_extended(landmarks: &HandLandmarks, finger: Finger) -> bool {
    let tip = landmarks.point(finger.tip());
    let joint = landmarks.point(finger.reference_joint());
    match finger {
        Finger::Thumb => tip.x < joint.x,
        _ => tip.y < joint.y,
    }
}
