pub mod core;
pub mod models;
pub mod platform;

pub use crate::core::config::GestureConfig;
pub use crate::core::monitor::{ControlAction, ControlResponse, GestureMonitor, MonitorStatus};
pub use crate::core::session::{SessionContext, SessionStatus};
pub use crate::models::frame::FrameOutcome;
pub use crate::models::gesture::{Gesture, GestureError, GestureResult, VolumeAction};
pub use crate::platform::volume::{create_actuator, VolumeActuator};
