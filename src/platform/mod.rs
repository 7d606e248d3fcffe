// OS and device seams: camera/landmark input and system volume output

pub mod hand_tracking;
pub mod volume;
