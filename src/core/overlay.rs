// Overlay layout - draw instructions for the volume bar, gesture text and pinch line

use crate::models::frame::{Line, Overlay, Rect, TextLabel};
use crate::models::gesture::{Bgr, Gesture};
use crate::models::hand::PixelPoint;

const BAR_LEFT: i32 = 30;
const BAR_RIGHT: i32 = 70;
const BAR_TOP: i32 = 100;
const BAR_BOTTOM: i32 = 400;
const BAR_BACKGROUND: Bgr = Bgr::new(50, 50, 50);
const BAR_FILL: Bgr = Bgr::new(0, 255, 0);
const TEXT_ORIGIN: PixelPoint = PixelPoint { x: 100, y: 50 };
const PINCH_LINE_THICKNESS: u32 = 3;

/// Top edge of the filled bar: volume 0 maps to the bottom, 100 to the top
pub fn volume_bar_top(volume: u8) -> i32 {
    let volume = i32::from(volume.min(100));
    BAR_BOTTOM - (BAR_BOTTOM - BAR_TOP) * volume / 100
}

pub fn build_overlay(
    gesture: Gesture,
    volume: u8,
    pinch: Option<(PixelPoint, PixelPoint)>,
    hand_landmarks: Vec<PixelPoint>,
) -> Overlay {
    Overlay {
        volume_bar_background: Rect {
            top_left: PixelPoint::new(BAR_LEFT, BAR_TOP),
            bottom_right: PixelPoint::new(BAR_RIGHT, BAR_BOTTOM),
            color: BAR_BACKGROUND,
        },
        volume_bar_level: Rect {
            top_left: PixelPoint::new(BAR_LEFT, volume_bar_top(volume)),
            bottom_right: PixelPoint::new(BAR_RIGHT, BAR_BOTTOM),
            color: BAR_FILL,
        },
        gesture_text: TextLabel {
            text: format!("GESTURE: {}", gesture.label()),
            origin: TEXT_ORIGIN,
            color: gesture.color(),
        },
        thumb_index_line: pinch.map(|(from, to)| Line {
            from,
            to,
            color: gesture.color(),
            thickness: PINCH_LINE_THICKNESS,
        }),
        hand_landmarks,
    }
}
