//! Shared types used across all sociogram crates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node in a channel's graph.
///
/// Node identity for *lookups* is the case-folded display name, but all
/// collections key by this opaque surrogate so that renaming a participant
/// never relocates a map entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a deterministic id (for testing).
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u128(seed as u128))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A position in the layout plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A participant in a channel's graph.
///
/// The display name keeps the casing it was first observed with; equality
/// for lookup purposes is case-insensitive (see [`fold_name`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    pub name: String,
    /// Activity counter: +1 per mention, decays over time, floors at 0.
    pub weight: f64,
    pub position: Position,
}

/// A weighted, unordered relationship between two distinct participants.
///
/// An edge's weight is always > 0 while it is stored; decay removes edges
/// rather than keeping them at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeData {
    pub weight: f64,
}

/// Canonical form of a participant name for identity comparisons.
///
/// Two names that fold to the same string denote the same node.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}
