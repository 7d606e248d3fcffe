// Gesture classification - ordered rule table over finger states and thumb distances

use crate::core::config::GestureConfig;
use crate::models::gesture::Gesture;
use crate::models::hand::{DistanceMap, Finger, FingerStates};

/// Distance thresholds the rules compare against, in frame pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierThresholds {
    pub ok_sign: f64,
    pub volume_control: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            ok_sign: 35.0,
            volume_control: 250.0,
        }
    }
}

impl From<&GestureConfig> for ClassifierThresholds {
    fn from(config: &GestureConfig) -> Self {
        Self {
            ok_sign: config.ok_sign_threshold,
            volume_control: config.volume_control_threshold,
        }
    }
}

type Predicate = fn(&FingerStates, &DistanceMap, &ClassifierThresholds) -> bool;

/// One (predicate, result) entry of the rule table
struct Rule {
    gesture: Gesture,
    matches: Predicate,
}

// Rules overlap; the first match wins, so order is part of the contract.
const RULES: [Rule; 6] = [
    Rule {
        gesture: Gesture::Fist,
        matches: |states, _, _| states.none_extended(),
    },
    Rule {
        gesture: Gesture::OpenPalm,
        matches: |states, _, _| states.all_extended(),
    },
    Rule {
        gesture: Gesture::ThumbsUp,
        matches: |states, _, _| {
            states.is_extended(Finger::Thumb) && states.extended_count() == 1
        },
    },
    Rule {
        gesture: Gesture::OkSign,
        matches: |states, distances, thresholds| {
            distances.thumb_index() < thresholds.ok_sign
                && states.is_extended(Finger::Middle)
                && states.is_extended(Finger::Ring)
                && states.is_extended(Finger::Pinky)
        },
    },
    Rule {
        gesture: Gesture::RockSign,
        matches: |states, _, _| {
            states.is_extended(Finger::Index)
                && states.is_extended(Finger::Pinky)
                && !states.is_extended(Finger::Middle)
                && !states.is_extended(Finger::Ring)
        },
    },
    Rule {
        gesture: Gesture::VolumeControl,
        matches: |_, distances, thresholds| distances.thumb_index() < thresholds.volume_control,
    },
];

#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thresholds: ClassifierThresholds,
}

impl GestureClassifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> ClassifierThresholds {
        self.thresholds
    }

    /// Classify one hand. Never returns `Gesture::NoHand`; that label belongs
    /// to frames where the classifier is not run at all.
    pub fn classify(&self, states: &FingerStates, distances: &DistanceMap) -> Gesture {
        RULES
            .iter()
            .find(|rule| (rule.matches)(states, distances, &self.thresholds))
            .map(|rule| rule.gesture)
            .unwrap_or(Gesture::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(bits: [bool; 5]) -> FingerStates {
        FingerStates::new(bits)
    }

    fn thumb_index(distance: f64) -> DistanceMap {
        DistanceMap::new(distance, 100.0, 100.0, 100.0)
    }

    fn all_state_vectors() -> impl Iterator<Item = [bool; 5]> {
        (0u8..32).map(|mask| std::array::from_fn(|i| mask & (1 << i) != 0))
    }

    #[test]
    fn test_no_fingers_is_fist_at_any_distance() {
        let classifier = GestureClassifier::default();
        for d in [0.0, 10.0, 34.9, 100.0, 249.0, 1000.0] {
            assert_eq!(
                classifier.classify(&states([false; 5]), &thumb_index(d)),
                Gesture::Fist
            );
        }
    }

    #[test]
    fn test_all_fingers_is_open_palm_at_any_distance() {
        let classifier = GestureClassifier::default();
        for d in [0.0, 10.0, 100.0, 1000.0] {
            assert_eq!(
                classifier.classify(&states([true; 5]), &thumb_index(d)),
                Gesture::OpenPalm
            );
        }
    }

    #[test]
    fn test_thumbs_up() {
        let classifier = GestureClassifier::default();
        let result = classifier.classify(&states([true, false, false, false, false]), &thumb_index(10.0));
        assert_eq!(result, Gesture::ThumbsUp);
    }

    #[test]
    fn test_ok_sign_needs_close_thumb_and_three_fingers() {
        let classifier = GestureClassifier::default();
        let ok = states([false, false, true, true, true]);
        assert_eq!(classifier.classify(&ok, &thumb_index(34.0)), Gesture::OkSign);
        // At the threshold the OK rule fails and the wider volume rule takes over
        assert_eq!(classifier.classify(&ok, &thumb_index(35.0)), Gesture::VolumeControl);
        assert_eq!(classifier.classify(&ok, &thumb_index(300.0)), Gesture::Unknown);
    }

    #[test]
    fn test_earlier_rules_outrank_volume_control() {
        let classifier = GestureClassifier::default();
        // Both of these also satisfy the volume-control distance rule
        let result = classifier.classify(&states([false, true, true, true, true]), &thumb_index(20.0));
        assert_eq!(result, Gesture::OkSign);
        let result = classifier.classify(&states([true, false, false, false, false]), &thumb_index(20.0));
        assert_eq!(result, Gesture::ThumbsUp);
    }

    #[test]
    fn test_rock_sign_ignores_thumb_and_distance() {
        let classifier = GestureClassifier::default();
        for thumb in [false, true] {
            for d in [5.0, 100.0, 500.0] {
                let result =
                    classifier.classify(&states([thumb, true, false, false, true]), &thumb_index(d));
                assert_eq!(result, Gesture::RockSign);
            }
        }
    }

    #[test]
    fn test_volume_control_threshold_is_exclusive() {
        let classifier = GestureClassifier::default();
        let pinch = states([true, true, false, false, false]);
        assert_eq!(classifier.classify(&pinch, &thumb_index(249.9)), Gesture::VolumeControl);
        assert_eq!(classifier.classify(&pinch, &thumb_index(250.0)), Gesture::Unknown);
    }

    #[test]
    fn test_rule_priority_across_every_state_vector() {
        let classifier = GestureClassifier::default();
        for bits in all_state_vectors() {
            let s = states(bits);
            for d in [0.0, 34.0, 100.0, 400.0] {
                let gesture = classifier.classify(&s, &thumb_index(d));
                let expected = if s.none_extended() {
                    Gesture::Fist
                } else if s.all_extended() {
                    Gesture::OpenPalm
                } else if bits == [true, false, false, false, false] {
                    Gesture::ThumbsUp
                } else if d < 35.0 && bits[2] && bits[3] && bits[4] {
                    Gesture::OkSign
                } else if bits[1] && bits[4] && !bits[2] && !bits[3] {
                    Gesture::RockSign
                } else if d < 250.0 {
                    Gesture::VolumeControl
                } else {
                    Gesture::Unknown
                };
                assert_eq!(gesture, expected, "states {:?} distance {}", bits, d);
                assert_ne!(gesture, Gesture::NoHand);
            }
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = GestureClassifier::new(ClassifierThresholds {
            ok_sign: 10.0,
            volume_control: 50.0,
        });
        let pinch = states([true, true, false, false, false]);
        assert_eq!(classifier.classify(&pinch, &thumb_index(60.0)), Gesture::Unknown);
        assert_eq!(classifier.classify(&pinch, &thumb_index(40.0)), Gesture::VolumeControl);
    }
}
