//! Binary sequence — a sustained two-person back-and-forth.
//!
//! When the last several lines of a channel come from exactly two people,
//! they are almost certainly talking to each other, whether or not they
//! ever type each other's names.

use sociogram_core::graph::InferenceTarget;
use std::collections::{HashSet, VecDeque};

/// Number of consecutive lines that must involve exactly two speakers.
pub const MIN_SEQ_SIZE: usize = 5;

/// Tracks the most recent speakers and reinforces a dyad once the window
/// fills with exactly two of them. The window is cleared after firing so
/// overlapping windows cannot re-fire on the same exchange.
#[derive(Debug, Clone)]
pub struct BinarySequence {
    weighting: f64,
    window: VecDeque<String>,
}

impl BinarySequence {
    pub fn new(weighting: f64) -> Self {
        Self {
            weighting,
            window: VecDeque::with_capacity(MIN_SEQ_SIZE + 1),
        }
    }

    pub fn weighting(&self) -> f64 {
        self.weighting
    }

    /// Number of speakers currently buffered (for tests/inspection).
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn infer(&mut self, target: &mut dyn InferenceTarget, speaker: &str, _message: &str) {
        self.window.push_back(speaker.to_string());
        if self.window.len() > MIN_SEQ_SIZE {
            self.window.pop_front();
        }
        if self.window.len() < MIN_SEQ_SIZE {
            return;
        }

        let distinct: HashSet<&str> = self.window.iter().map(String::as_str).collect();
        if distinct.len() == 2 {
            let mut pair = distinct.into_iter();
            let first = pair.next().unwrap_or_default().to_string();
            let second = pair.next().unwrap_or_default().to_string();
            target.reinforce(&first, &second, self.weighting);
            self.window.clear();
        }
    }
}
