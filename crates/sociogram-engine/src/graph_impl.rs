//! Concrete implementation of the `SocialGraph` trait using petgraph.
//!
//! The store keeps the graph in a `StableUnGraph` with two HashMap side
//! indexes: surrogate id → petgraph index, and case-folded name →
//! surrogate id. Stable indices matter here because nodes are removed
//! (administrative ignores, rename-merge losers) and the side indexes must
//! survive removals unchanged.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use rand::Rng;
use sociogram_core::graph::{InferenceTarget, SocialGraph};
use sociogram_core::types::{fold_name, EdgeData, NodeData, NodeId, Position};
use std::collections::{HashMap, HashSet};

/// Petgraph-backed store for one channel's relationship graph.
#[derive(Debug)]
pub struct PetSocialGraph {
    graph: StableUnGraph<NodeData, EdgeData>,
    /// Map from surrogate id to petgraph's internal index.
    node_index: HashMap<NodeId, NodeIndex>,
    /// Case-folded display name → surrogate id. Exactly one entry per node.
    name_index: HashMap<String, NodeId>,
}

impl PetSocialGraph {
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::default(),
            node_index: HashMap::new(),
            name_index: HashMap::new(),
        }
    }

    /// Insert a fully-formed node, preserving its weight and position.
    ///
    /// Restore path only; regular mutation goes through
    /// [`SocialGraph::add_node`]. When the name is already taken the
    /// existing node wins and its id is returned.
    pub fn insert_node(&mut self, data: NodeData) -> NodeId {
        let key = fold_name(&data.name);
        if let Some(&existing) = self.name_index.get(&key) {
            return existing;
        }
        let id = data.id;
        let idx = self.graph.add_node(data);
        self.node_index.insert(id, idx);
        self.name_index.insert(key, id);
        id
    }

    /// Insert a fully-formed edge between two existing nodes (restore
    /// path). Ignored when either endpoint is unknown or the pair is a
    /// self-pair.
    pub fn insert_edge(&mut self, a: NodeId, b: NodeId, data: EdgeData) {
        if a == b {
            return;
        }
        let (Some(&a_idx), Some(&b_idx)) = (self.node_index.get(&a), self.node_index.get(&b))
        else {
            return;
        };
        if self.graph.find_edge(a_idx, b_idx).is_none() {
            self.graph.add_edge(a_idx, b_idx, data);
        }
    }

    fn random_position() -> Position {
        let mut rng = rand::thread_rng();
        Position::new(rng.gen::<f64>(), rng.gen::<f64>())
    }
}

impl Default for PetSocialGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialGraph for PetSocialGraph {
    fn add_node(&mut self, name: &str) -> NodeId {
        let key = fold_name(name);
        if let Some(&id) = self.name_index.get(&key) {
            if let Some(&idx) = self.node_index.get(&id) {
                if let Some(node) = self.graph.node_weight_mut(idx) {
                    node.weight += 1.0;
                }
            }
            return id;
        }

        let data = NodeData {
            id: NodeId::new(),
            name: name.to_string(),
            weight: 1.0,
            position: Self::random_position(),
        };
        let id = data.id;
        let idx = self.graph.add_node(data);
        self.node_index.insert(id, idx);
        self.name_index.insert(key, id);
        id
    }

    fn add_edge(&mut self, source: &str, target: &str, weight: f64) -> bool {
        // Self-pairs and non-positive weights are normal control flow, not
        // errors; nothing may change in either case.
        if fold_name(source) == fold_name(target) || weight <= 0.0 {
            return false;
        }

        let source_id = self.add_node(source);
        let target_id = self.add_node(target);
        let source_idx = self.node_index[&source_id];
        let target_idx = self.node_index[&target_id];

        if let Some(edge_idx) = self.graph.find_edge(source_idx, target_idx) {
            if let Some(edge) = self.graph.edge_weight_mut(edge_idx) {
                edge.weight += weight;
            }
        } else {
            self.graph.add_edge(source_idx, target_idx, EdgeData { weight });
        }
        true
    }

    fn remove_node(&mut self, name: &str) -> bool {
        let key = fold_name(name);
        let Some(id) = self.name_index.remove(&key) else {
            return false;
        };
        if let Some(idx) = self.node_index.remove(&id) {
            // Incident edges go with the node; stable indices keep the
            // remaining entries of node_index valid.
            self.graph.remove_node(idx);
        }
        true
    }

    fn merge_node(&mut self, old_name: &str, new_name: &str) {
        let Some(old_id) = self.lookup(old_name) else {
            return;
        };

        // Some renames only differ in case; removing the "new" node then
        // would remove the node being renamed.
        if fold_name(old_name) != fold_name(new_name) {
            self.remove_node(new_name);
        }

        let old_key = fold_name(old_name);
        if let Some(&idx) = self.node_index.get(&old_id) {
            if let Some(node) = self.graph.node_weight_mut(idx) {
                node.name = new_name.to_string();
            }
        }
        self.name_index.remove(&old_key);
        self.name_index.insert(fold_name(new_name), old_id);
    }

    fn decay(&mut self, amount: f64) {
        // Decrease all edge weightings and remove non-positive edges.
        let edge_indices: Vec<_> = self.graph.edge_indices().collect();
        let mut dead = Vec::new();
        for edge_idx in edge_indices {
            if let Some(edge) = self.graph.edge_weight_mut(edge_idx) {
                edge.weight -= amount;
                if edge.weight <= 0.0 {
                    dead.push(edge_idx);
                }
            }
        }
        for edge_idx in dead {
            self.graph.remove_edge(edge_idx);
        }

        // Decrease all node weightings, floored at zero. Decay never
        // removes a node.
        let node_indices: Vec<_> = self.graph.node_indices().collect();
        for node_idx in node_indices {
            if let Some(node) = self.graph.node_weight_mut(node_idx) {
                node.weight = (node.weight - amount).max(0.0);
            }
        }
    }

    fn connected_nodes(&self) -> Vec<NodeId> {
        let mut connected = HashSet::new();
        for edge_idx in self.graph.edge_indices() {
            if let Some((a, b)) = self.graph.edge_endpoints(edge_idx) {
                connected.insert(self.graph[a].id);
                connected.insert(self.graph[b].id);
            }
        }
        connected.into_iter().collect()
    }

    fn get_node(&self, id: &NodeId) -> Option<&NodeData> {
        let idx = self.node_index.get(id)?;
        self.graph.node_weight(*idx)
    }

    fn get_node_mut(&mut self, id: &NodeId) -> Option<&mut NodeData> {
        let idx = *self.node_index.get(id)?;
        self.graph.node_weight_mut(idx)
    }

    fn lookup(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(&fold_name(name)).copied()
    }

    fn get_edge(&self, a: &NodeId, b: &NodeId) -> Option<&EdgeData> {
        let a_idx = self.node_index.get(a)?;
        let b_idx = self.node_index.get(b)?;
        let edge_idx = self.graph.find_edge(*a_idx, *b_idx)?;
        self.graph.edge_weight(edge_idx)
    }

    fn all_nodes(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].id)
            .collect()
    }

    fn all_edges(&self) -> Vec<(NodeId, NodeId, &EdgeData)> {
        self.graph
            .edge_indices()
            .filter_map(|idx| {
                let (a, b) = self.graph.edge_endpoints(idx)?;
                Some((self.graph[a].id, self.graph[b].id, &self.graph[idx]))
            })
            .collect()
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl InferenceTarget for PetSocialGraph {
    fn knows(&self, name: &str) -> bool {
        self.contains_name(name)
    }

    fn reinforce(&mut self, source: &str, target: &str, weight: f64) -> bool {
        self.add_edge(source, target, weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_weight(graph: &PetSocialGraph, a: &str, b: &str) -> Option<f64> {
        let a_id = graph.lookup(a)?;
        let b_id = graph.lookup(b)?;
        graph.get_edge(&a_id, &b_id).map(|e| e.weight)
    }

    fn node_weight(graph: &PetSocialGraph, name: &str) -> f64 {
        let id = graph.lookup(name).expect("node exists");
        graph.get_node(&id).expect("node data").weight
    }

    #[test]
    fn add_node_is_idempotent_and_case_insensitive() {
        let mut graph = PetSocialGraph::new();
        let first = graph.add_node("Alice");
        let second = graph.add_node("alice");
        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
        // Weight incremented on every mention.
        assert_eq!(node_weight(&graph, "ALICE"), 2.0);
        // Display name keeps the first observed casing.
        assert_eq!(graph.get_node(&first).unwrap().name, "Alice");
    }

    #[test]
    fn self_edges_are_rejected() {
        let mut graph = PetSocialGraph::new();
        assert!(!graph.add_edge("alice", "alice", 1.0));
        assert!(!graph.add_edge("alice", "ALICE", 1.0));
        assert_eq!(graph.edge_count(), 0);
        // Rejection must not even create the node.
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn non_positive_weights_are_rejected_without_side_effects() {
        let mut graph = PetSocialGraph::new();
        graph.add_node("alice");
        graph.add_node("bob");
        assert!(!graph.add_edge("alice", "bob", 0.0));
        assert!(!graph.add_edge("alice", "bob", -2.5));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(node_weight(&graph, "alice"), 1.0);
        assert_eq!(node_weight(&graph, "bob"), 1.0);
    }

    #[test]
    fn edge_weights_accumulate_regardless_of_argument_order() {
        let mut graph = PetSocialGraph::new();
        assert!(graph.add_edge("alice", "bob", 2.0));
        assert!(graph.add_edge("bob", "alice", 3.0));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(edge_weight(&graph, "alice", "bob"), Some(5.0));
        // Each successful reinforcement also counts both mentions.
        assert_eq!(node_weight(&graph, "alice"), 2.0);
        assert_eq!(node_weight(&graph, "bob"), 2.0);
    }

    #[test]
    fn decay_is_linear_and_floors_nodes_at_zero() {
        let mut graph = PetSocialGraph::new();
        graph.add_edge("alice", "bob", 3.0);
        graph.add_edge("alice", "carol", 0.5);

        graph.decay(1.0);

        // Heavy edge survives with exactly weight - amount.
        assert_eq!(edge_weight(&graph, "alice", "bob"), Some(2.0));
        // Light edge dropped to <= 0 and is gone, not retained at zero.
        let alice = graph.lookup("alice").unwrap();
        let carol = graph.lookup("carol").unwrap();
        assert!(graph.get_edge(&alice, &carol).is_none());
        assert_eq!(graph.edge_count(), 1);

        // Nodes survive decay; weights floor at zero.
        for _ in 0..10 {
            graph.decay(1.0);
        }
        assert_eq!(graph.node_count(), 3);
        assert_eq!(node_weight(&graph, "carol"), 0.0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn remove_node_takes_incident_edges_with_it() {
        let mut graph = PetSocialGraph::new();
        graph.add_edge("alice", "bob", 1.0);
        graph.add_edge("alice", "carol", 1.0);
        graph.add_edge("bob", "carol", 1.0);

        assert!(graph.remove_node("alice"));
        assert!(!graph.remove_node("alice"));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(edge_weight(&graph, "bob", "carol"), Some(1.0));
    }

    #[test]
    fn removal_keeps_the_remaining_indexes_valid() {
        let mut graph = PetSocialGraph::new();
        graph.add_edge("alice", "bob", 1.0);
        graph.add_edge("carol", "dave", 1.0);
        graph.remove_node("alice");

        // Lookups and mutation on survivors still work.
        assert_eq!(edge_weight(&graph, "carol", "dave"), Some(1.0));
        assert!(graph.add_edge("carol", "dave", 1.0));
        assert_eq!(edge_weight(&graph, "carol", "dave"), Some(2.0));
    }

    #[test]
    fn merge_preserves_edges_under_the_new_name() {
        let mut graph = PetSocialGraph::new();
        graph.add_edge("xavier", "bob", 2.0);
        graph.add_edge("xavier", "carol", 1.5);
        let id = graph.lookup("xavier").unwrap();

        graph.merge_node("xavier", "Yvonne");

        // Same node, new name; every edge retained.
        assert_eq!(graph.lookup("yvonne"), Some(id));
        assert!(graph.lookup("xavier").is_none());
        assert_eq!(graph.get_node(&id).unwrap().name, "Yvonne");
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(edge_weight(&graph, "Yvonne", "bob"), Some(2.0));
        assert_eq!(edge_weight(&graph, "Yvonne", "carol"), Some(1.5));
    }

    #[test]
    fn merge_absorbs_an_existing_node_under_the_new_name() {
        let mut graph = PetSocialGraph::new();
        graph.add_edge("old", "bob", 2.0);
        graph.add_edge("new", "carol", 9.0);

        graph.merge_node("old", "new");

        // The previous "new" node and its edges are gone; the renamed node
        // keeps only its own history.
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(edge_weight(&graph, "new", "bob"), Some(2.0));
        assert!(graph.lookup("old").is_none());
    }

    #[test]
    fn merge_handles_case_only_renames() {
        let mut graph = PetSocialGraph::new();
        graph.add_edge("alice", "bob", 1.0);
        let id = graph.lookup("alice").unwrap();

        graph.merge_node("alice", "Alice");

        assert_eq!(graph.lookup("alice"), Some(id));
        assert_eq!(graph.get_node(&id).unwrap().name, "Alice");
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn merge_of_missing_node_is_a_noop() {
        let mut graph = PetSocialGraph::new();
        graph.add_edge("alice", "bob", 1.0);
        graph.merge_node("ghost", "phantom");
        assert_eq!(graph.node_count(), 2);
        assert!(graph.lookup("phantom").is_none());
    }

    mod layout {
        use super::*;
        use sociogram_core::bounds::calc_bounds;
        use sociogram_core::layout::{run_layout_iterations, LayoutConfig};
        use sociogram_core::types::Position;

        fn place(graph: &mut PetSocialGraph, name: &str, x: f64, y: f64) {
            let id = graph.lookup(name).expect("node exists");
            graph.get_node_mut(&id).unwrap().position = Position::new(x, y);
        }

        fn separation(graph: &PetSocialGraph, a: &str, b: &str) -> f64 {
            let a = graph.get_node(&graph.lookup(a).unwrap()).unwrap().position;
            let b = graph.get_node(&graph.lookup(b).unwrap()).unwrap().position;
            a.distance_to(&b)
        }

        #[test]
        fn zero_iterations_leave_positions_unchanged() {
            let mut graph = PetSocialGraph::new();
            graph.add_edge("alice", "bob", 1.0);
            place(&mut graph, "alice", 1.25, -3.5);
            place(&mut graph, "bob", 4.0, 2.0);

            run_layout_iterations(&mut graph, &LayoutConfig::default(), 0);

            let alice = graph.get_node(&graph.lookup("alice").unwrap()).unwrap();
            assert_eq!(alice.position, Position::new(1.25, -3.5));
            let bob = graph.get_node(&graph.lookup("bob").unwrap()).unwrap();
            assert_eq!(bob.position, Position::new(4.0, 2.0));
        }

        #[test]
        fn two_nodes_converge_toward_the_ideal_edge_length() {
            let config = LayoutConfig::default();
            let mut graph = PetSocialGraph::new();
            graph.add_edge("alice", "bob", 1.0);
            place(&mut graph, "alice", 0.0, 0.0);
            place(&mut graph, "bob", 0.3, 0.0);

            let initial_error = (separation(&graph, "alice", "bob") - config.k).abs();
            run_layout_iterations(&mut graph, &config, 400);
            let settled = separation(&graph, "alice", "bob");

            // The spring/repulsion equilibrium sits near k; from a nearly
            // coincident start the pair must move most of the way there.
            assert!((settled - config.k).abs() < initial_error / 2.0);
            assert!(settled > 1.0 && settled < 4.0, "separation {settled}");
        }

        #[test]
        fn convergence_also_holds_from_far_apart() {
            let config = LayoutConfig::default();
            let mut graph = PetSocialGraph::new();
            graph.add_edge("alice", "bob", 1.0);
            place(&mut graph, "alice", 0.0, 0.0);
            place(&mut graph, "bob", 20.0, 0.0);

            run_layout_iterations(&mut graph, &config, 800);
            let settled = separation(&graph, "alice", "bob");
            assert!(settled > 1.0 && settled < 4.0, "separation {settled}");
        }

        #[test]
        fn coincident_nodes_are_forced_apart() {
            let config = LayoutConfig::default();
            let mut graph = PetSocialGraph::new();
            graph.add_edge("alice", "bob", 1.0);
            place(&mut graph, "alice", 5.0, 5.0);
            place(&mut graph, "bob", 5.0, 5.0);

            run_layout_iterations(&mut graph, &config, 5);
            assert!(separation(&graph, "alice", "bob") > 0.0);
        }

        #[test]
        fn isolated_nodes_do_not_move() {
            let mut graph = PetSocialGraph::new();
            graph.add_edge("alice", "bob", 1.0);
            graph.add_node("lurker");
            place(&mut graph, "lurker", 7.0, 7.0);

            run_layout_iterations(&mut graph, &LayoutConfig::default(), 50);

            let lurker = graph.get_node(&graph.lookup("lurker").unwrap()).unwrap();
            assert_eq!(lurker.position, Position::new(7.0, 7.0));
        }

        #[test]
        fn bounds_match_the_target_aspect_ratio() {
            let mut graph = PetSocialGraph::new();
            graph.add_edge("alice", "bob", 3.0);
            graph.add_edge("bob", "carol", 1.0);
            place(&mut graph, "alice", 0.0, 0.0);
            place(&mut graph, "bob", 30.0, 4.0);
            place(&mut graph, "carol", 15.0, 10.0);

            let bounds = calc_bounds(&graph, 800, 600, 10.0).expect("visible nodes");
            let ratio = bounds.framed.width() / bounds.framed.height();
            assert!((ratio - 800.0 / 600.0).abs() < 1e-9);
            assert_eq!(bounds.max_edge_weight, 3.0);
            // Pre-stretch extents cover the node spread.
            assert_eq!(bounds.fitted.width(), 30.0);
            assert_eq!(bounds.fitted.height(), 10.0);
        }

        #[test]
        fn bounds_enforce_the_minimum_diagram_size() {
            let mut graph = PetSocialGraph::new();
            graph.add_edge("alice", "bob", 1.0);
            place(&mut graph, "alice", 0.0, 0.0);
            place(&mut graph, "bob", 1.0, 1.0);

            let bounds = calc_bounds(&graph, 400, 400, 10.0).expect("visible nodes");
            assert!((bounds.fitted.width() - 10.0).abs() < 1e-9);
            assert!((bounds.fitted.height() - 10.0).abs() < 1e-9);
        }

        #[test]
        fn no_visible_nodes_means_no_bounds() {
            let mut graph = PetSocialGraph::new();
            graph.add_node("lurker");
            assert!(calc_bounds(&graph, 800, 600, 10.0).is_none());
        }
    }

    #[test]
    fn connected_nodes_excludes_the_edgeless() {
        let mut graph = PetSocialGraph::new();
        graph.add_edge("alice", "bob", 1.0);
        graph.add_node("lurker");

        let connected = graph.connected_nodes();
        assert_eq!(connected.len(), 2);
        let lurker = graph.lookup("lurker").unwrap();
        assert!(!connected.contains(&lurker));

        // Decay the edge away: nobody is visible, everyone still tracked.
        graph.decay(2.0);
        assert!(graph.connected_nodes().is_empty());
        assert_eq!(graph.node_count(), 3);
    }
}
