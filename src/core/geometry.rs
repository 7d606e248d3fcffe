// Landmark geometry - pixel-space fingertip positions and thumb distances

use crate::models::hand::{DistanceMap, Finger, HandLandmarks, Keypoint3D, PixelPoint};

/// Fingertip pixel positions in thumb, index, middle, ring, pinky order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerTips([PixelPoint; 5]);

impl FingerTips {
    pub fn get(&self, finger: Finger) -> PixelPoint {
        self.0[finger as usize]
    }
}

/// Fingertips and the thumb-to-finger distances derived from them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandGeometry {
    pub tips: FingerTips,
    pub distances: DistanceMap,
}

/// Scale a normalized keypoint to pixel space, truncating toward zero
pub fn to_pixel(keypoint: &Keypoint3D, width: u32, height: u32) -> PixelPoint {
    PixelPoint::new(
        (f64::from(keypoint.x) * f64::from(width)) as i32,
        (f64::from(keypoint.y) * f64::from(height)) as i32,
    )
}

pub fn fingertip_positions(landmarks: &HandLandmarks, width: u32, height: u32) -> FingerTips {
    FingerTips(Finger::ALL.map(|finger| to_pixel(&landmarks.point(finger.tip()), width, height)))
}

pub fn thumb_distances(tips: &FingerTips) -> DistanceMap {
    let thumb = tips.get(Finger::Thumb);
    let [index, middle, ring, pinky] =
        Finger::NON_THUMB.map(|finger| thumb.distance_to(&tips.get(finger)));
    DistanceMap::new(index, middle, ring, pinky)
}

pub fn measure(landmarks: &HandLandmarks, width: u32, height: u32) -> HandGeometry {
    let tips = fingertip_positions(landmarks, width, height);
    let distances = thumb_distances(&tips);
    HandGeometry { tips, distances }
}

/// All 21 landmarks in pixel space, for the overlay
pub fn landmark_pixels(landmarks: &HandLandmarks, width: u32, height: u32) -> Vec<PixelPoint> {
    landmarks
        .points()
        .iter()
        .map(|kp| to_pixel(kp, width, height))
        .collect()
}
