pub mod config;

// Per-frame decision pipeline
pub mod geometry;
pub mod finger_state;
pub mod gesture_classifier;
pub mod calibration;
pub mod action_dispatcher;
pub mod overlay;

// Session orchestration
pub mod session;
pub mod monitor;
pub mod replay;
