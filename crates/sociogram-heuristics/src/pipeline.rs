//! The fixed-order inference pipeline.
//!
//! A [`Pipeline`] owns one instance of each heuristic — and therefore all
//! cross-message heuristic state — for a single channel. Heuristic
//! weightings come from configuration, looked up by heuristic name; a
//! missing entry disables that heuristic (weighting 0) and is surfaced as
//! a warning, never an error.

use crate::adjacency::Adjacency;
use crate::binary_sequence::BinarySequence;
use crate::direct::DirectAddressing;
use crate::indirect::IndirectAddressing;
use sociogram_core::graph::InferenceTarget;
use std::collections::BTreeMap;
use tracing::warn;

/// The closed set of heuristic identities, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    DirectAddressing,
    IndirectAddressing,
    Adjacency,
    BinarySequence,
}

impl HeuristicKind {
    /// Every kind, in the order the pipeline runs them.
    pub const ALL: [HeuristicKind; 4] = [
        HeuristicKind::DirectAddressing,
        HeuristicKind::IndirectAddressing,
        HeuristicKind::Adjacency,
        HeuristicKind::BinarySequence,
    ];

    /// The configuration key for this heuristic's weighting.
    pub fn name(&self) -> &'static str {
        match self {
            HeuristicKind::DirectAddressing => "direct-addressing",
            HeuristicKind::IndirectAddressing => "indirect-addressing",
            HeuristicKind::Adjacency => "adjacency",
            HeuristicKind::BinarySequence => "binary-sequence",
        }
    }
}

/// One configured heuristic with its state.
#[derive(Debug, Clone)]
pub enum Heuristic {
    DirectAddressing(DirectAddressing),
    IndirectAddressing(IndirectAddressing),
    Adjacency(Adjacency),
    BinarySequence(BinarySequence),
}

impl Heuristic {
    fn from_kind(kind: HeuristicKind, weighting: f64) -> Self {
        match kind {
            HeuristicKind::DirectAddressing => {
                Heuristic::DirectAddressing(DirectAddressing::new(weighting))
            }
            HeuristicKind::IndirectAddressing => {
                Heuristic::IndirectAddressing(IndirectAddressing::new(weighting))
            }
            HeuristicKind::Adjacency => Heuristic::Adjacency(Adjacency::new(weighting)),
            HeuristicKind::BinarySequence => {
                Heuristic::BinarySequence(BinarySequence::new(weighting))
            }
        }
    }

    pub fn kind(&self) -> HeuristicKind {
        match self {
            Heuristic::DirectAddressing(_) => HeuristicKind::DirectAddressing,
            Heuristic::IndirectAddressing(_) => HeuristicKind::IndirectAddressing,
            Heuristic::Adjacency(_) => HeuristicKind::Adjacency,
            Heuristic::BinarySequence(_) => HeuristicKind::BinarySequence,
        }
    }

    pub fn weighting(&self) -> f64 {
        match self {
            Heuristic::DirectAddressing(h) => h.weighting(),
            Heuristic::IndirectAddressing(h) => h.weighting(),
            Heuristic::Adjacency(h) => h.weighting(),
            Heuristic::BinarySequence(h) => h.weighting(),
        }
    }

    fn infer(&mut self, target: &mut dyn InferenceTarget, speaker: &str, message: &str) {
        match self {
            Heuristic::DirectAddressing(h) => h.infer(target, speaker, message),
            Heuristic::IndirectAddressing(h) => h.infer(target, speaker, message),
            Heuristic::Adjacency(h) => h.infer(target, speaker, message),
            Heuristic::BinarySequence(h) => h.infer(target, speaker, message),
        }
    }
}

/// All four heuristics for one channel, in fixed order.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    heuristics: Vec<Heuristic>,
}

impl Pipeline {
    /// Build a pipeline from configured weightings, keyed by
    /// [`HeuristicKind::name`]. A kind with no entry runs with weighting 0
    /// — it still tracks state, but the store rejects its zero-weight
    /// reinforcements.
    pub fn from_weights(weights: &BTreeMap<String, f64>) -> Self {
        let heuristics = HeuristicKind::ALL
            .iter()
            .map(|&kind| {
                let weighting = match weights.get(kind.name()) {
                    Some(&value) => value,
                    None => {
                        warn!(
                            heuristic = kind.name(),
                            "no weighting configured; heuristic disabled"
                        );
                        0.0
                    }
                };
                Heuristic::from_kind(kind, weighting)
            })
            .collect();
        Self { heuristics }
    }

    /// Feed one accepted message through every heuristic in order.
    ///
    /// Mutations apply immediately: a node created by an earlier
    /// heuristic's reinforcement is visible to the later ones within the
    /// same message.
    pub fn observe(&mut self, target: &mut dyn InferenceTarget, speaker: &str, message: &str) {
        for heuristic in &mut self.heuristics {
            heuristic.infer(target, speaker, message);
        }
    }

    pub fn heuristics(&self) -> &[Heuristic] {
        &self.heuristics
    }
}
