// Gesture labels, display colors, actuation commands and engine errors

use serde::{Deserialize, Serialize};

// ==============================================================================
// Gesture
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gesture {
    Fist,
    OpenPalm,
    ThumbsUp,
    OkSign,
    RockSign,
    VolumeControl,
    Unknown,
    NoHand,
}

impl Gesture {
    /// Human readable label, as shown in the overlay and the status query
    pub fn label(&self) -> &'static str {
        match self {
            Gesture::Fist => "FIST",
            Gesture::OpenPalm => "OPEN PALM",
            Gesture::ThumbsUp => "THUMBS UP",
            Gesture::OkSign => "OK SIGN",
            Gesture::RockSign => "ROCK SIGN",
            Gesture::VolumeControl => "VOLUME CONTROL",
            Gesture::Unknown => "UNKNOWN",
            Gesture::NoHand => "NO HAND",
        }
    }

    pub fn color(&self) -> Bgr {
        match self {
            Gesture::Fist => Bgr::new(0, 0, 255),
            Gesture::OpenPalm => Bgr::new(0, 255, 255),
            Gesture::ThumbsUp => Bgr::new(255, 165, 0),
            Gesture::OkSign => Bgr::new(0, 200, 100),
            Gesture::RockSign => Bgr::new(128, 0, 255),
            Gesture::VolumeControl => Bgr::new(0, 255, 0),
            Gesture::Unknown | Gesture::NoHand => Bgr::new(128, 128, 128),
        }
    }
}

/// Label reported by the status query before any frame has been processed
pub const IDLE_GESTURE_LABEL: &str = "NONE";

/// Overlay color in blue-green-red channel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

// ==============================================================================
// Actuation
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeAction {
    Mute,
    VolumeUp,
    VolumeDown,
}

impl VolumeAction {
    pub fn to_string(&self) -> &'static str {
        match self {
            VolumeAction::Mute => "mute",
            VolumeAction::VolumeUp => "volume_up",
            VolumeAction::VolumeDown => "volume_down",
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Detector failed: {0}")]
    DetectorFailed(String),

    #[error("Capture error: {0}")]
    Capture(#[from] crate::models::frame::CaptureError),

    #[error("Failed to parse landmark record at line {line}: {source}")]
    Replay {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine home directory")]
    NoHomeDirectory,
}

pub type GestureResult<T> = Result<T, GestureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_overlay_text() {
        assert_eq!(Gesture::OpenPalm.label(), "OPEN PALM");
        assert_eq!(Gesture::VolumeControl.label(), "VOLUME CONTROL");
        assert_eq!(Gesture::NoHand.label(), "NO HAND");
    }

    #[test]
    fn test_colors() {
        assert_eq!(Gesture::Fist.color(), Bgr::new(0, 0, 255));
        assert_eq!(Gesture::VolumeControl.color(), Bgr::new(0, 255, 0));
        assert_eq!(Gesture::Unknown.color(), Gesture::NoHand.color());
    }

    #[test]
    fn test_gesture_serializes_as_enum_name() {
        let json = serde_json::to_string(&Gesture::ThumbsUp).unwrap();
        assert_eq!(json, "\"THUMBS_UP\"");
        let back: Gesture = serde_json::from_str("\"OK_SIGN\"").unwrap();
        assert_eq!(back, Gesture::OkSign);
    }
}
