//! Graph store contracts.
//!
//! A [`SocialGraph`] owns one channel's nodes and edges and enforces the
//! identity invariants: nodes are unique by case-folded name, edges are
//! unique by unordered endpoint pair, self-edges never exist, and a stored
//! edge's weight is always positive.

use crate::types::{EdgeData, NodeData, NodeId};

/// The mutable store for one channel's relationship graph.
///
/// Every method takes `&mut self` or `&self` on a single owner, so the
/// remove/rename/reinsert hazards of a name-keyed map cannot arise: name
/// changes update one field plus one index entry and are atomic with
/// respect to lookups.
pub trait SocialGraph {
    /// Find or create the canonical node for `name` (case-insensitive)
    /// and increment its activity weight by 1.
    fn add_node(&mut self, name: &str) -> NodeId;

    /// Reinforce the unordered edge between `source` and `target`.
    ///
    /// Returns `false` without mutating anything when the two names fold
    /// to the same node or when `weight` is not positive. Otherwise both
    /// nodes are counted as mentioned (via [`SocialGraph::add_node`]) and
    /// the edge's weight grows by `weight`.
    fn add_edge(&mut self, source: &str, target: &str, weight: f64) -> bool;

    /// Delete the node named `name` and every edge incident to it.
    /// Returns whether anything was removed.
    fn remove_node(&mut self, name: &str) -> bool;

    /// Rename `old_name` to `new_name`, absorbing any distinct node already
    /// keyed by `new_name` (that node and its edges are deleted first).
    /// Silent no-op when `old_name` is not present.
    fn merge_node(&mut self, old_name: &str, new_name: &str);

    /// Apply temporal decay: every edge weight drops by `amount` (edges at
    /// or below zero are removed); every node weight drops by `amount`,
    /// floored at zero (nodes are never removed by decay).
    fn decay(&mut self, amount: f64);

    /// Nodes that are an endpoint of at least one surviving edge — the set
    /// that layout, bounds, and snapshots operate on.
    fn connected_nodes(&self) -> Vec<NodeId>;

    fn get_node(&self, id: &NodeId) -> Option<&NodeData>;

    fn get_node_mut(&mut self, id: &NodeId) -> Option<&mut NodeData>;

    /// Resolve a display name (case-insensitive) to its node id.
    fn lookup(&self, name: &str) -> Option<NodeId>;

    fn contains_name(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    fn get_edge(&self, a: &NodeId, b: &NodeId) -> Option<&EdgeData>;

    fn all_nodes(&self) -> Vec<NodeId>;

    fn all_edges(&self) -> Vec<(NodeId, NodeId, &EdgeData)>;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;
}

/// The surface an inference heuristic drives.
///
/// Heuristics are pure reinforcement signals: they may test whether a name
/// is known and may request one edge reinforcement at a time, nothing else.
/// The per-channel engine implements `reinforce` so that every successful
/// mutation also runs the layout/snapshot/decay cycle; the bare graph store
/// implements it as a plain edge update so heuristics can be exercised in
/// isolation.
pub trait InferenceTarget {
    /// Whether a node with this name exists anywhere in the graph.
    ///
    /// Deliberately includes nodes with no edges: a participant who has
    /// gone quiet is still a valid addressee.
    fn knows(&self, name: &str) -> bool;

    /// Request a reinforcement of the unordered (source, target) edge.
    /// Returns whether the graph actually changed.
    fn reinforce(&mut self, source: &str, target: &str, weight: f64) -> bool;
}
