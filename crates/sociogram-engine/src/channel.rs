//! Per-channel engine — one graph, one pipeline, one mutation cycle.
//!
//! Each inbound message is processed to completion before the next:
//! heuristics run in order, and every successful edge reinforcement
//! triggers the full cycle — layout relaxation, bounds recomputation,
//! snapshot emission, restore-point write, temporal decay. Snapshot and
//! persistence failures are logged and never leave the graph's weights
//! stale: decay always runs.

use sociogram_core::bounds::{calc_bounds, Bounds};
use sociogram_core::graph::{InferenceTarget, SocialGraph};
use sociogram_core::layout::run_layout;
use sociogram_core::snapshot::{Snapshot, SnapshotEdge, SnapshotNode, SnapshotSink};
use sociogram_heuristics::Pipeline;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::EngineConfig;
use crate::graph_impl::PetSocialGraph;
use crate::session;

/// Node and edge counts for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} nodes and {} edges", self.nodes, self.edges)
    }
}

/// The inference and layout engine for a single channel.
pub struct ChannelEngine {
    label: String,
    graph: PetSocialGraph,
    pipeline: Pipeline,
    config: EngineConfig,
    frame: u64,
    last_artifact: Option<PathBuf>,
}

impl ChannelEngine {
    /// Fresh engine for a channel.
    pub fn new(label: &str, config: EngineConfig) -> Self {
        Self::with_graph(label, PetSocialGraph::new(), config)
    }

    /// Engine resuming from a restored graph.
    pub fn with_graph(label: &str, graph: PetSocialGraph, config: EngineConfig) -> Self {
        let pipeline = Pipeline::from_weights(&config.weights);
        Self {
            label: label.to_string(),
            graph,
            pipeline,
            config,
            frame: 0,
            last_artifact: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn graph(&self) -> &PetSocialGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut PetSocialGraph {
        &mut self.graph
    }

    /// Frames produced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The most recent artifact the sink reported writing.
    pub fn last_artifact(&self) -> Option<&Path> {
        self.last_artifact.as_deref()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
        }
    }

    /// Count a participant sighting (message, join, user list) without
    /// running inference.
    pub fn observe_name(&mut self, name: &str) {
        self.graph.add_node(name);
    }

    /// Feed one accepted message through the heuristic pipeline.
    ///
    /// The caller has already stripped protocol formatting and applied the
    /// ignore filter. Each heuristic that fires runs a full mutation cycle
    /// against `sink` before the next heuristic is consulted.
    pub fn infer(&mut self, speaker: &str, message: &str, sink: &mut dyn SnapshotSink) {
        let mut pipeline = std::mem::take(&mut self.pipeline);
        pipeline.observe(&mut LiveCycle { engine: self, sink }, speaker, message);
        self.pipeline = pipeline;
    }

    /// Administrative removal: delete the participant and, when anything
    /// was removed, force a redraw cycle.
    pub fn remove_participant(&mut self, name: &str, sink: &mut dyn SnapshotSink) -> bool {
        let removed = self.graph.remove_node(name);
        if removed {
            self.complete_cycle(sink);
        }
        removed
    }

    /// Apply a rename; when the merged node is visible the channel needs
    /// redrawing.
    pub fn rename(&mut self, old_name: &str, new_name: &str, sink: &mut dyn SnapshotSink) {
        let Some(id) = self.graph.lookup(old_name) else {
            return;
        };
        self.graph.merge_node(old_name, new_name);
        if self.graph.connected_nodes().contains(&id) {
            self.complete_cycle(sink);
        }
    }

    /// Layout → bounds → snapshot → restore point → decay.
    fn complete_cycle(&mut self, sink: &mut dyn SnapshotSink) {
        self.frame += 1;

        run_layout(&mut self.graph, &self.config.layout);

        let bounds = calc_bounds(
            &self.graph,
            self.config.render.width,
            self.config.render.height,
            self.config.min_diagram_size,
        );
        if let Some(bounds) = bounds {
            let snapshot = self.build_snapshot(bounds);
            match sink.publish(&snapshot) {
                Ok(Some(path)) => self.last_artifact = Some(path),
                Ok(None) => {}
                Err(err) => {
                    warn!(channel = %self.label, %err, "snapshot publish failed");
                }
            }
        }

        if self.config.create_restore_points {
            if let Err(err) = session::save_graph(&self.graph, &self.label, &self.config.output_dir)
            {
                warn!(channel = %self.label, %err, "restore point write failed");
            }
        }

        // Decay runs whether or not the snapshot landed.
        self.graph.decay(self.config.temporal_decay);
    }

    fn build_snapshot(&self, bounds: Bounds) -> Snapshot {
        let mut nodes: Vec<SnapshotNode> = self
            .graph
            .connected_nodes()
            .iter()
            .filter_map(|id| self.graph.get_node(id))
            .map(|node| SnapshotNode {
                name: node.name.clone(),
                position: node.position,
                weight: node.weight,
            })
            .collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));

        let mut edges: Vec<SnapshotEdge> = self
            .graph
            .all_edges()
            .iter()
            .filter_map(|(a, b, edge)| {
                Some(SnapshotEdge {
                    source: self.graph.get_node(a)?.name.clone(),
                    target: self.graph.get_node(b)?.name.clone(),
                    weight: edge.weight,
                })
            })
            .collect();
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

        Snapshot {
            channel: self.label.clone(),
            frame: self.frame,
            nodes,
            edges,
            bounds,
            params: self.config.render.clone(),
        }
    }
}

/// Pipeline-facing view of the engine: reinforcements that stick also run
/// the mutation cycle.
struct LiveCycle<'a> {
    engine: &'a mut ChannelEngine,
    sink: &'a mut dyn SnapshotSink,
}

impl InferenceTarget for LiveCycle<'_> {
    fn knows(&self, name: &str) -> bool {
        self.engine.graph.contains_name(name)
    }

    fn reinforce(&mut self, source: &str, target: &str, weight: f64) -> bool {
        if self.engine.graph.add_edge(source, target, weight) {
            self.engine.complete_cycle(self.sink);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{CountingSink, FailingSink};
    use sociogram_core::snapshot::NullSink;

    /// Engine with inference-friendly settings and no filesystem traffic.
    fn engine(label: &str) -> ChannelEngine {
        let mut config = EngineConfig::default();
        config.create_restore_points = false;
        config.layout.iterations = 10;
        ChannelEngine::new(label, config)
    }

    fn edge_weight(engine: &ChannelEngine, a: &str, b: &str) -> Option<f64> {
        let graph = engine.graph();
        let a = graph.lookup(a)?;
        let b = graph.lookup(b)?;
        graph.get_edge(&a, &b).map(|e| e.weight)
    }

    fn say(engine: &mut ChannelEngine, sink: &mut dyn SnapshotSink, speaker: &str, message: &str) {
        engine.observe_name(speaker);
        engine.infer(speaker, message, sink);
    }

    #[test]
    fn direct_address_builds_an_edge_and_a_frame() {
        let mut sink = CountingSink::default();
        let mut engine = engine("#test");

        say(&mut engine, &mut sink, "bob", "anyone around?");
        assert_eq!(engine.stats().edges, 0);

        say(&mut engine, &mut sink, "alice", "bob: me");
        assert!(edge_weight(&engine, "alice", "bob").is_some());
        assert!(engine.frame() > 0);
        assert_eq!(sink.published.len() as u64, engine.frame());
    }

    #[test]
    fn every_successful_reinforcement_produces_one_frame() {
        let mut sink = CountingSink::default();
        let mut engine = engine("#test");

        say(&mut engine, &mut sink, "bob", "hello");
        say(&mut engine, &mut sink, "alice", "bob: hi");
        // Direct and indirect both fire on "bob", adjacency fires on the
        // turn-taking: three cycles, three frames.
        assert_eq!(engine.frame(), 3);
        assert_eq!(sink.published, vec![
            ("#test".to_string(), 1),
            ("#test".to_string(), 2),
            ("#test".to_string(), 3),
        ]);
    }

    #[test]
    fn decay_runs_once_per_cycle() {
        let mut sink = NullSink;
        let mut engine = engine("#test");
        let decay = engine.config.temporal_decay;

        say(&mut engine, &mut sink, "bob", "hello");
        say(&mut engine, &mut sink, "alice", "hi there");

        // Only adjacency fired (weight 0.1): one cycle, one decay.
        let weight = edge_weight(&engine, "alice", "bob").expect("adjacency edge");
        assert!((weight - (0.1 - decay)).abs() < 1e-9);
    }

    #[test]
    fn binary_sequence_fires_through_the_engine() {
        let mut sink = NullSink;
        let mut config = EngineConfig::default();
        config.create_restore_points = false;
        config.layout.iterations = 10;
        // Isolate the binary-sequence heuristic.
        config.weights = [("binary-sequence".to_string(), 0.5)].into_iter().collect();
        let mut engine = ChannelEngine::new("#test", config);

        for speaker in ["a", "a", "a", "b", "b"] {
            say(&mut engine, &mut sink, speaker, "...");
        }

        assert_eq!(engine.stats().edges, 1);
        assert!(edge_weight(&engine, "a", "b").is_some());
    }

    #[test]
    fn sink_failure_does_not_stop_decay() {
        let mut sink = FailingSink;
        let mut engine = engine("#test");

        say(&mut engine, &mut sink, "bob", "hello");
        say(&mut engine, &mut sink, "alice", "hi");

        let decay = engine.config.temporal_decay;
        let weight = edge_weight(&engine, "alice", "bob").expect("edge exists");
        assert!((weight - (0.1 - decay)).abs() < 1e-9, "decay must still apply");
    }

    #[test]
    fn admin_removal_forces_a_redraw() {
        let mut sink = CountingSink::default();
        let mut engine = engine("#test");

        say(&mut engine, &mut sink, "bob", "hello");
        say(&mut engine, &mut sink, "alice", "hi");
        let frames_before = engine.frame();

        assert!(engine.remove_participant("alice", &mut sink));
        assert_eq!(engine.frame(), frames_before + 1);
        assert!(engine.graph().lookup("alice").is_none());

        // Removing an unknown participant draws nothing.
        assert!(!engine.remove_participant("ghost", &mut sink));
        assert_eq!(engine.frame(), frames_before + 1);
    }

    #[test]
    fn rename_of_a_visible_node_redraws() {
        let mut sink = CountingSink::default();
        let mut engine = engine("#test");

        say(&mut engine, &mut sink, "bob", "hello");
        say(&mut engine, &mut sink, "alice", "hi");
        let frames_before = engine.frame();

        engine.rename("alice", "alys", &mut sink);
        assert_eq!(engine.frame(), frames_before + 1);
        assert!(edge_weight(&engine, "alys", "bob").is_some());

        // Renaming an unknown nick is silent.
        engine.rename("ghost", "phantom", &mut sink);
        assert_eq!(engine.frame(), frames_before + 1);
    }

    #[test]
    fn snapshots_carry_visible_nodes_and_bounds() {
        let mut sink = CountingSink::default();
        let mut engine = engine("#test");
        say(&mut engine, &mut sink, "bob", "hello");
        say(&mut engine, &mut sink, "carol", "hey bob");

        let snapshot = {
            let graph = engine.graph();
            let bounds = calc_bounds(graph, 800, 600, 10.0).expect("visible nodes");
            engine.build_snapshot(bounds)
        };

        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.edges.len(), 1);
        let ratio = snapshot.bounds.framed.width() / snapshot.bounds.framed.height();
        assert!((ratio - 800.0 / 600.0).abs() < 1e-9);
        assert_eq!(snapshot.params.width, 800);
    }
}
