//! Mood score vector

use serde::{Deserialize, Serialize};
use crate::MOOD_SCORE_KEYS;

/// Six mood intensities, nominally 0.0-1.0 (range is not enforced)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodScores {
    pub happiness: f64,
    pub sadness: f64,
    pub anger: f64,
    pub fear: f64,
    pub joy: f64,
    pub calmness: f64,
}

impl MoodScores {
    /// Same value on every dimension
    pub fn uniform(value: f64) -> Self {
        Self {
            happiness: value,
            sadness: value,
            anger: value,
            fear: value,
            joy: value,
            calmness: value,
        }
    }

    /// Score by key name
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "happiness" => Some(self.happiness),
            "sadness" => Some(self.sadness),
            "anger" => Some(self.anger),
            "fear" => Some(self.fear),
            "joy" => Some(self.joy),
            "calmness" => Some(self.calmness),
            _ => None,
        }
    }

    /// (key, score) pairs in canonical key order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        MOOD_SCORE_KEYS
            .iter()
            .filter_map(move |key| self.get(key).map(|v| (*key, v)))
    }

    /// Highest scoring dimension; ties keep the first in key order
    pub fn dominant(&self) -> (&'static str, f64) {
        self.iter()
            .fold(("happiness", self.happiness), |best, (key, v)| {
                if v > best.1 { (key, v) } else { best }
            })
    }

    /// Every score inside [0.0, 1.0]
    pub fn in_range(&self) -> bool {
        self.iter().all(|(_, v)| (0.0..=1.0).contains(&v))
    }
}
