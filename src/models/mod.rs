// Data models for hand landmarks, gesture results and captured frames

pub mod frame;
pub mod gesture;
pub mod hand;
