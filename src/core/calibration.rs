// Calibration tracker - learns the user's thumb-index operating range

use crate::core::config::GestureConfig;
use crate::models::frame::CalibrationRange;

#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationState {
    /// Collecting thumb-index distances, oldest first
    Uncalibrated { samples: Vec<f64> },
    /// Range is fixed for the rest of the session, widening only
    Calibrated(CalibrationRange),
}

/// Two-state tracker: collects a fixed number of samples, collapses them into
/// a trimmed [min, max] range, then widens that range in place.
#[derive(Debug, Clone)]
pub struct CalibrationTracker {
    state: CalibrationState,
    capacity: usize,
    trim: usize,
    min_spread: f64,
}

impl CalibrationTracker {
    /// `capacity` must exceed `2 * trim`; `GestureConfig::validate` enforces it.
    pub fn new(capacity: usize, trim: usize, min_spread: f64) -> Self {
        Self {
            state: CalibrationState::Uncalibrated {
                samples: Vec::with_capacity(capacity),
            },
            capacity,
            trim,
            min_spread,
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self::new(
            config.calibration_samples,
            config.calibration_trim,
            config.min_calibration_spread,
        )
    }

    /// Feed one thumb-index distance.
    ///
    /// Returns the freshly computed range on the frame that completes
    /// calibration, `None` otherwise.
    pub fn observe(&mut self, distance: f64) -> Option<CalibrationRange> {
        match &mut self.state {
            CalibrationState::Uncalibrated { samples } => {
                samples.push(distance);
                if samples.len() < self.capacity {
                    return None;
                }
                let range = trimmed_range(samples, self.trim, self.min_spread);
                self.state = CalibrationState::Calibrated(range);
                Some(range)
            }
            CalibrationState::Calibrated(range) => {
                if distance < range.min_dist {
                    range.min_dist = distance;
                }
                if distance > range.max_dist {
                    range.max_dist = distance;
                }
                None
            }
        }
    }

    pub fn range(&self) -> Option<CalibrationRange> {
        match self.state {
            CalibrationState::Calibrated(range) => Some(range),
            CalibrationState::Uncalibrated { .. } => None,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        matches!(self.state, CalibrationState::Calibrated(_))
    }

    /// Samples collected so far (0 once calibrated)
    pub fn sample_count(&self) -> usize {
        match &self.state {
            CalibrationState::Uncalibrated { samples } => samples.len(),
            CalibrationState::Calibrated(_) => 0,
        }
    }

    pub fn state(&self) -> &CalibrationState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = CalibrationState::Uncalibrated {
            samples: Vec::with_capacity(self.capacity),
        };
    }
}

fn trimmed_range(samples: &[f64], trim: usize, min_spread: f64) -> CalibrationRange {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let min_dist = sorted[trim];
    let mut max_dist = sorted[sorted.len() - 1 - trim];
    if max_dist - min_dist < min_spread {
        max_dist = min_dist + min_spread;
    }

    CalibrationRange { min_dist, max_dist }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> CalibrationTracker {
        CalibrationTracker::from_config(&GestureConfig::default())
    }

    fn calibrated_with(values: impl IntoIterator<Item = f64>) -> CalibrationTracker {
        let mut tracker = tracker();
        for v in values {
            tracker.observe(v);
        }
        assert!(tracker.is_calibrated());
        tracker
    }

    #[test]
    fn test_collects_until_capacity() {
        let mut tracker = tracker();
        for i in 1..60 {
            assert_eq!(tracker.observe(i as f64), None);
            assert_eq!(tracker.sample_count(), i);
        }
        assert!(!tracker.is_calibrated());
        assert!(tracker.range().is_none());
    }

    #[test]
    fn test_trimmed_range_with_spread_floor() {
        let mut tracker = tracker();
        let mut completed = None;
        for i in 1..=60 {
            completed = tracker.observe(i as f64);
        }
        let range = completed.expect("60th sample should calibrate");
        assert_eq!(range.min_dist, 6.0);
        // Trimmed max is 55; spread 49 is below the floor of 150
        assert_eq!(range.max_dist, 156.0);
        assert_eq!(tracker.range(), Some(range));
        assert_eq!(tracker.sample_count(), 0);
    }

    #[test]
    fn test_wide_samples_keep_trimmed_extremes() {
        // Unsorted input; outliers at both ends are dropped
        let mut values: Vec<f64> = (0..60).map(|i| 20.0 + 5.0 * i as f64).collect();
        values.reverse();
        values[0] = 10_000.0;
        values[59] = -50.0;
        let tracker = calibrated_with(values);
        let range = tracker.range().unwrap();
        assert_eq!(range.min_dist, 45.0);
        assert_eq!(range.max_dist, 290.0);
        assert!(range.spread() >= 150.0);
    }

    #[test]
    fn test_widening_after_calibration() {
        let mut tracker = calibrated_with((1..=60).map(f64::from));

        tracker.observe(3.0);
        assert_eq!(tracker.range().unwrap().min_dist, 3.0);

        tracker.observe(200.0);
        assert_eq!(tracker.range().unwrap().max_dist, 200.0);

        let before = tracker.range().unwrap();
        tracker.observe(100.0);
        assert_eq!(tracker.range().unwrap(), before);
    }

    #[test]
    fn test_never_recollapses() {
        let mut tracker = calibrated_with((1..=60).map(f64::from));
        for _ in 0..200 {
            assert_eq!(tracker.observe(50.0), None);
        }
        assert!(tracker.is_calibrated());
        assert_eq!(tracker.range().unwrap().min_dist, 6.0);
    }

    #[test]
    fn test_reset_requires_fresh_samples() {
        let mut tracker = calibrated_with((1..=60).map(f64::from));
        tracker.reset();
        assert!(!tracker.is_calibrated());
        assert_eq!(tracker.sample_count(), 0);
        assert_eq!(
            tracker.state(),
            &CalibrationState::Uncalibrated { samples: vec![] }
        );
        for i in 1..60 {
            tracker.observe(i as f64);
        }
        assert!(!tracker.is_calibrated());
        assert!(tracker.observe(60.0).is_some());
    }
}
