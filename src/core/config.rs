use crate::models::gesture::{GestureError, GestureResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Engine configuration.
///
/// All distance thresholds are in pixel units of the processed frame, so
/// they only mean what they say at the configured frame size (640x480 by
/// default). Changing `frame_width`/`frame_height` without retuning them
/// changes gesture behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// Requested capture width in pixels
    pub frame_width: u32,
    /// Requested capture height in pixels
    pub frame_height: u32,
    /// Thumb-index distance below which a three-finger hand is an OK sign
    pub ok_sign_threshold: f64,
    /// Thumb-index distance below which the hand is in volume-control pose
    pub volume_control_threshold: f64,
    /// Half-width of the band around the calibrated midpoint with no action
    pub dead_zone: f64,
    /// Minimum calibrated spread between min and max distance
    pub min_calibration_spread: f64,
    /// Thumb-index samples collected before calibrating
    pub calibration_samples: usize,
    /// Samples discarded from each tail of the sorted calibration set
    pub calibration_trim: usize,
    /// Minimum interval between mute actuations
    pub mute_cooldown_ms: i64,
    /// Minimum interval between volume step actuations
    pub volume_cooldown_ms: i64,
    /// Volume level change per step
    pub volume_step: u8,
    /// Volume level estimate at session start (0-100)
    pub initial_volume: u8,
    /// Upper bound on frame loop rate
    pub target_fps: u32,
    /// Log actions instead of sending them to the OS
    pub dry_run: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            frame_width: 640,
            frame_height: 480,
            ok_sign_threshold: 35.0,
            volume_control_threshold: 250.0,
            dead_zone: 15.0,
            min_calibration_spread: 150.0,
            calibration_samples: 60,
            calibration_trim: 5,
            mute_cooldown_ms: 500,
            volume_cooldown_ms: 80,
            volume_step: 2,
            initial_volume: 50,
            target_fps: 30,
            dry_run: false,
        }
    }
}

impl GestureConfig {
    /// Load configuration from the default location, creating it with defaults if missing
    pub fn load() -> GestureResult<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> GestureResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: GestureConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> GestureResult<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> GestureResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> GestureResult<()> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(GestureError::InvalidConfig(format!(
                "Invalid frame size: {}x{}. Both dimensions must be non-zero",
                self.frame_width, self.frame_height
            )));
        }

        let thresholds = [
            ("ok_sign_threshold", self.ok_sign_threshold),
            ("volume_control_threshold", self.volume_control_threshold),
            ("dead_zone", self.dead_zone),
            ("min_calibration_spread", self.min_calibration_spread),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(GestureError::InvalidConfig(format!(
                    "Invalid {}: {}. Must be a non-negative number",
                    name, value
                )));
            }
        }

        if self.calibration_samples == 0 {
            return Err(GestureError::InvalidConfig(
                "calibration_samples must be at least 1".to_string(),
            ));
        }

        // Trimming must leave at least one sample
        if self.calibration_trim * 2 >= self.calibration_samples {
            return Err(GestureError::InvalidConfig(format!(
                "Invalid calibration_trim: {}. Trimming both tails must leave samples out of {}",
                self.calibration_trim, self.calibration_samples
            )));
        }

        if self.mute_cooldown_ms < 0 || self.volume_cooldown_ms < 0 {
            return Err(GestureError::InvalidConfig(
                "Cooldowns cannot be negative".to_string(),
            ));
        }

        if self.initial_volume > 100 {
            return Err(GestureError::InvalidConfig(format!(
                "Invalid initial volume: {}. Must be between 0 and 100",
                self.initial_volume
            )));
        }

        if self.target_fps == 0 || self.target_fps > 120 {
            return Err(GestureError::InvalidConfig(format!(
                "Invalid target FPS: {}. Must be between 1 and 120",
                self.target_fps
            )));
        }

        Ok(())
    }

    /// Reset to default configuration
    pub fn reset() -> GestureResult<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    /// Get the configuration file path
    fn get_config_path() -> GestureResult<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| GestureError::NoHomeDirectory)?;

        let mut path = PathBuf::from(home);
        path.push(".gesture_volume");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}
