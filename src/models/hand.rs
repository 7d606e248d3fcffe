// Data models for hand tracking (21 MediaPipe keypoints per hand)

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Number of landmarks the hand model emits per detected hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Accepted band for normalized coordinates. A hand partly out of frame can
/// land slightly outside [0, 1]; anything beyond this is detector garbage.
pub const NORMALIZED_COORDINATE_BAND: RangeInclusive<f32> = -1.0..=2.0;

// ==============================================================================
// Keypoints
// ==============================================================================

/// A keypoint with normalized image coordinates and a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint3D {
    pub x: f32, // Normalized [0, 1] for image coordinates
    pub y: f32, // Normalized [0, 1] for image coordinates
    #[serde(default)]
    pub z: f32, // Depth relative to the wrist; unused by the gesture engine
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

impl Keypoint3D {
    pub fn new(x: f32, y: f32, z: f32, confidence: f32) -> Self {
        Self {
            x,
            y,
            z,
            confidence,
        }
    }

    /// False for NaN/inf and for coordinates outside the normalized band
    fn is_within_band(&self) -> bool {
        NORMALIZED_COORDINATE_BAND.contains(&self.x)
            && NORMALIZED_COORDINATE_BAND.contains(&self.y)
    }
}

/// Integer pixel position after scaling a normalized keypoint to frame size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixel units
    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

// ==============================================================================
// Hand Pose
// ==============================================================================

/// One detected hand as produced by the landmark detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandPose {
    pub landmarks: Vec<Keypoint3D>, // 21 hand landmarks
}

impl HandPose {
    pub fn new(landmarks: Vec<Keypoint3D>) -> Self {
        Self { landmarks }
    }
}

/// MediaPipe Hand Landmark indices (21 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    pub fn index(self) -> usize {
        self as usize
    }
}

// ==============================================================================
// Validated landmark set
// ==============================================================================

/// A landmark set that is known to be complete and numerically sane.
///
/// Everything downstream of the detector works on this type, so the
/// geometry and classification code never has to bounds-check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks {
    points: [Keypoint3D; HAND_LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Returns `None` for short sets, or sets carrying NaN/inf or
    /// out-of-band coordinates. Extra trailing points are ignored.
    pub fn from_keypoints(keypoints: &[Keypoint3D]) -> Option<Self> {
        let head = keypoints.get(..HAND_LANDMARK_COUNT)?;
        if !head.iter().all(Keypoint3D::is_within_band) {
            return None;
        }
        let mut points = [Keypoint3D::new(0.0, 0.0, 0.0, 0.0); HAND_LANDMARK_COUNT];
        points.copy_from_slice(head);
        Some(Self { points })
    }

    pub fn point(&self, landmark: HandLandmark) -> Keypoint3D {
        self.points[landmark.index()]
    }

    pub fn points(&self) -> &[Keypoint3D; HAND_LANDMARK_COUNT] {
        &self.points
    }
}

// ==============================================================================
// Fingers
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Fingers measured against the thumb tip
    pub const NON_THUMB: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn name(&self) -> &'static str {
        match self {
            Finger::Thumb => "Thumb",
            Finger::Index => "Index",
            Finger::Middle => "Middle",
            Finger::Ring => "Ring",
            Finger::Pinky => "Pinky",
        }
    }

    pub fn tip(&self) -> HandLandmark {
        match self {
            Finger::Thumb => HandLandmark::ThumbTip,
            Finger::Index => HandLandmark::IndexFingerTip,
            Finger::Middle => HandLandmark::MiddleFingerTip,
            Finger::Ring => HandLandmark::RingFingerTip,
            Finger::Pinky => HandLandmark::PinkyTip,
        }
    }

    /// Joint the tip is compared against when deciding extension
    pub fn reference_joint(&self) -> HandLandmark {
        match self {
            Finger::Thumb => HandLandmark::ThumbIp,
            Finger::Index => HandLandmark::IndexFingerPip,
            Finger::Middle => HandLandmark::MiddleFingerPip,
            Finger::Ring => HandLandmark::RingFingerPip,
            Finger::Pinky => HandLandmark::PinkyPip,
        }
    }

    fn slot(&self) -> usize {
        *self as usize
    }
}

/// Extension flags in thumb, index, middle, ring, pinky order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerStates([bool; 5]);

impl FingerStates {
    pub fn new(states: [bool; 5]) -> Self {
        Self(states)
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        self.0[finger.slot()]
    }

    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|s| **s).count()
    }

    pub fn none_extended(&self) -> bool {
        self.0.iter().all(|s| !s)
    }

    pub fn all_extended(&self) -> bool {
        self.0.iter().all(|s| *s)
    }

    pub fn as_array(&self) -> [bool; 5] {
        self.0
    }
}

/// Pixel distance from the thumb tip to each other fingertip
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceMap {
    thumb_to: [f64; 4],
}

impl DistanceMap {
    pub fn new(index: f64, middle: f64, ring: f64, pinky: f64) -> Self {
        Self {
            thumb_to: [index, middle, ring, pinky],
        }
    }

    /// `None` for the thumb itself
    pub fn get(&self, finger: Finger) -> Option<f64> {
        match finger {
            Finger::Thumb => None,
            other => Some(self.thumb_to[other.slot() - 1]),
        }
    }

    pub fn thumb_index(&self) -> f64 {
        self.thumb_to[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand() -> Vec<Keypoint3D> {
        (0..HAND_LANDMARK_COUNT)
            .map(|i| Keypoint3D::new(i as f32 / 40.0, 0.5, 0.0, 0.9))
            .collect()
    }

    #[test]
    fn test_landmarks_reject_short_sets() {
        let mut points = flat_hand();
        points.truncate(20);
        assert!(HandLandmarks::from_keypoints(&points).is_none());
        assert!(HandLandmarks::from_keypoints(&[]).is_none());
    }

    #[test]
    fn test_landmarks_reject_non_finite() {
        let mut points = flat_hand();
        points[8].y = f32::NAN;
        assert!(HandLandmarks::from_keypoints(&points).is_none());
    }

    #[test]
    fn test_landmarks_reject_out_of_band() {
        let mut points = flat_hand();
        points[4].x = -1e7;
        assert!(HandLandmarks::from_keypoints(&points).is_none());

        // Slightly off-frame is still a hand
        let mut points = flat_hand();
        points[4].x = -0.2;
        points[8].y = 1.3;
        assert!(HandLandmarks::from_keypoints(&points).is_some());
    }

    #[test]
    fn test_pixel_distance_at_i32_extremes() {
        let a = PixelPoint::new(i32::MIN, 0);
        let b = PixelPoint::new(i32::MAX, 0);
        assert_eq!(a.distance_to(&b), f64::from(i32::MAX) - f64::from(i32::MIN));
    }

    #[test]
    fn test_landmarks_ignore_extra_points() {
        let mut points = flat_hand();
        points.push(Keypoint3D::new(f32::INFINITY, 0.0, 0.0, 1.0));
        let landmarks = HandLandmarks::from_keypoints(&points).unwrap();
        assert_eq!(landmarks.point(HandLandmark::PinkyTip), points[20]);
    }

    #[test]
    fn test_finger_joint_mapping() {
        assert_eq!(Finger::Thumb.reference_joint(), HandLandmark::ThumbIp);
        assert_eq!(Finger::Index.tip().index(), 8);
        assert_eq!(Finger::Ring.reference_joint().index(), 14);
        assert_eq!(Finger::Pinky.tip().index(), 20);
    }

    #[test]
    fn test_distance_map_lookup() {
        let distances = DistanceMap::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(distances.get(Finger::Thumb), None);
        assert_eq!(distances.get(Finger::Middle), Some(20.0));
        assert_eq!(distances.get(Finger::Pinky), Some(40.0));
        assert_eq!(distances.thumb_index(), 10.0);
    }

    #[test]
    fn test_keypoint_defaults_from_json() {
        let kp: Keypoint3D = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).unwrap();
        assert_eq!(kp.z, 0.0);
        assert_eq!(kp.confidence, 1.0);
    }
}
