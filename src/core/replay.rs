// Replay of recorded landmark streams (JSON lines) through a session

use crate::core::session::SessionContext;
use crate::models::frame::FrameOutcome;
use crate::models::gesture::{GestureError, GestureResult};
use crate::models::hand::{HandPose, Keypoint3D};
use crate::platform::volume::VolumeActuator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One recorded frame of detector output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub timestamp_ms: i64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub hands: Vec<Vec<Keypoint3D>>,
}

impl LandmarkRecord {
    pub fn hand_poses(&self) -> Vec<HandPose> {
        self.hands
            .iter()
            .map(|landmarks| HandPose::new(landmarks.clone()))
            .collect()
    }
}

/// Load a recording from disk
pub fn load_records(path: &Path) -> GestureResult<Vec<LandmarkRecord>> {
    let contents = fs::read_to_string(path)?;
    let records = parse_records(&contents)?;
    log::info!("Loaded {} frames from {:?}", records.len(), path);
    Ok(records)
}

/// Parse JSON lines. Blank lines and `#` comments are skipped.
pub fn parse_records(contents: &str) -> GestureResult<Vec<LandmarkRecord>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| GestureError::Replay {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Feed every record through the session in order
pub fn replay_records(
    records: &[LandmarkRecord],
    session: &mut SessionContext,
    actuator: &dyn VolumeActuator,
) -> Vec<FrameOutcome> {
    records
        .iter()
        .map(|record| {
            session.process_hands(
                &record.hand_poses(),
                record.width,
                record.height,
                record.timestamp_ms,
                actuator,
            )
        })
        .collect()
}
