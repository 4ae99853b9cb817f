//! Indirect addressing — "I think bob had a patch for that".
//!
//! Mentioning a known participant anywhere in a message implies an
//! intended addressee; only the first mention counts, so a message that
//! name-drops half the channel still produces at most one reinforcement.

use crate::tokenize::words;
use sociogram_core::graph::InferenceTarget;

/// Reinforces (speaker, first mentioned participant) once per message.
#[derive(Debug, Clone)]
pub struct IndirectAddressing {
    weighting: f64,
}

impl IndirectAddressing {
    pub fn new(weighting: f64) -> Self {
        Self { weighting }
    }

    pub fn weighting(&self) -> f64 {
        self.weighting
    }

    pub fn infer(&mut self, target: &mut dyn InferenceTarget, speaker: &str, message: &str) {
        for word in words(message) {
            if target.knows(word) {
                target.reinforce(speaker, word, self.weighting);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::RecordingTarget;

    #[test]
    fn fires_on_first_known_mention_only() {
        let mut target = RecordingTarget::knowing(&["bob", "carol"]);
        let mut heuristic = IndirectAddressing::new(0.3);
        heuristic.infer(&mut target, "alice", "ask bob or maybe carol");
        assert_eq!(target.calls, vec![("alice".into(), "bob".into(), 0.3)]);
    }

    #[test]
    fn scanning_stops_even_when_the_attempt_is_rejected() {
        // The first mention is the speaker themselves; the store rejects the
        // self-edge, but the heuristic still stops there.
        let mut target = RecordingTarget::knowing(&["alice", "bob"]);
        target.reject_all = true;
        let mut heuristic = IndirectAddressing::new(0.3);
        heuristic.infer(&mut target, "alice", "alice thinks bob is right");
        assert_eq!(target.calls.len(), 1);
        assert_eq!(target.calls[0].1, "alice");
    }

    #[test]
    fn silent_when_nobody_is_mentioned() {
        let mut target = RecordingTarget::knowing(&["bob"]);
        let mut heuristic = IndirectAddressing::new(0.3);
        heuristic.infer(&mut target, "alice", "what a quiet afternoon");
        assert!(target.calls.is_empty());
    }
}
