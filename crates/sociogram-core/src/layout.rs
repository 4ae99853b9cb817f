//! Spring-embedder layout.
//!
//! Iterative force-directed placement over the visible (connected) node
//! set: all visible node pairs repel with magnitude `k²/d` inside a cutoff
//! radius, edges act as springs with magnitude `(d² − k²)/k` scaled up for
//! heavier relationships, and each iteration integrates the accumulated
//! forces with damping and a per-axis movement clamp.
//!
//! Nodes with no edges are not moved; they keep their last coordinates and
//! are never drawn.

use crate::graph::SocialGraph;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tunable constants for the spring embedder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Ideal edge length.
    #[serde(default = "default_k")]
    pub k: f64,
    /// Damping applied to accumulated forces before movement.
    #[serde(default = "default_c")]
    pub c: f64,
    /// Repulsion cutoff; also the distance long edges are clamped to.
    #[serde(default = "default_max_repulsive_distance")]
    pub max_repulsive_distance: f64,
    /// Per-axis movement clamp per iteration.
    #[serde(default = "default_max_movement")]
    pub max_movement: f64,
    /// Relaxation iterations per mutation cycle.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

fn default_k() -> f64 {
    2.0
}
fn default_c() -> f64 {
    0.01
}
fn default_max_repulsive_distance() -> f64 {
    6.0
}
fn default_max_movement() -> f64 {
    0.5
}
fn default_iterations() -> usize {
    300
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            k: default_k(),
            c: default_c(),
            max_repulsive_distance: default_max_repulsive_distance(),
            max_movement: default_max_movement(),
            iterations: default_iterations(),
        }
    }
}

/// Below this squared distance two nodes count as coincident and get a
/// random displacement instead, avoiding division by zero and breaking
/// perfect overlap symmetry.
const MIN_DISTANCE_SQUARED: f64 = 0.01;

/// Small nonzero displacement for coincident nodes.
fn jitter() -> f64 {
    rand::random::<f64>() / 10.0 + 0.1
}

/// Relax the visible subgraph for the configured number of iterations.
pub fn run_layout(graph: &mut dyn SocialGraph, config: &LayoutConfig) {
    run_layout_iterations(graph, config, config.iterations);
}

/// Relax the visible subgraph for an explicit number of iterations.
///
/// Zero iterations leaves every position untouched.
pub fn run_layout_iterations(
    graph: &mut dyn SocialGraph,
    config: &LayoutConfig,
    iterations: usize,
) {
    let ids = graph.connected_nodes();
    if ids.is_empty() {
        return;
    }

    // Work on local arrays; the store is only touched again for write-back.
    let index: HashMap<NodeId, usize> = ids
        .iter()
        .copied()
        .enumerate()
        .map(|(i, id)| (id, i))
        .collect();

    let n = ids.len();
    let mut xs = vec![0.0; n];
    let mut ys = vec![0.0; n];
    for (i, id) in ids.iter().enumerate() {
        if let Some(node) = graph.get_node(id) {
            xs[i] = node.position.x;
            ys[i] = node.position.y;
        }
    }

    // Every edge endpoint is by definition a connected node.
    let edges: Vec<(usize, usize, f64)> = graph
        .all_edges()
        .iter()
        .filter_map(|(a, b, edge)| Some((*index.get(a)?, *index.get(b)?, edge.weight)))
        .collect();

    let k = config.k;
    let cutoff = config.max_repulsive_distance;

    // Transient force accumulators, zeroed after every iteration.
    let mut fx = vec![0.0; n];
    let mut fy = vec![0.0; n];

    for _ in 0..iterations {
        // Node-node repulsion.
        for a in 0..n {
            for b in (a + 1)..n {
                let mut dx = xs[b] - xs[a];
                let mut dy = ys[b] - ys[a];
                let mut d2 = dx * dx + dy * dy;
                if d2 < MIN_DISTANCE_SQUARED {
                    dx = jitter();
                    dy = jitter();
                    d2 = dx * dx + dy * dy;
                }
                let d = d2.sqrt();
                if d < cutoff {
                    let repulsive = k * k / d;
                    fx[b] += repulsive * dx / d;
                    fy[b] += repulsive * dy / d;
                    fx[a] -= repulsive * dx / d;
                    fy[a] -= repulsive * dy / d;
                }
            }
        }

        // Edge attraction.
        for &(a, b, weight) in &edges {
            let mut dx = xs[b] - xs[a];
            let mut dy = ys[b] - ys[a];
            let mut d2 = dx * dx + dy * dy;
            if d2 < MIN_DISTANCE_SQUARED {
                dx = jitter();
                dy = jitter();
                d2 = dx * dx + dy * dy;
            }
            let mut d = d2.sqrt();
            // Long edges behave as if at the cutoff distance, which keeps
            // the contraction energy bounded.
            if d > cutoff {
                d = cutoff;
            }

            let mut attractive = (d * d - k * k) / k;
            // Heavier relationships pull more tightly.
            attractive *= weight.max(1.0).ln() * 0.5 + 1.0;

            fx[b] -= attractive * dx / d;
            fy[b] -= attractive * dy / d;
            fx[a] += attractive * dx / d;
            fy[a] += attractive * dy / d;
        }

        // Integrate and reset the accumulators.
        for i in 0..n {
            let max = config.max_movement;
            let x_movement = (config.c * fx[i]).clamp(-max, max);
            let y_movement = (config.c * fy[i]).clamp(-max, max);
            xs[i] += x_movement;
            ys[i] += y_movement;
            fx[i] = 0.0;
            fy[i] = 0.0;
        }
    }

    for (i, id) in ids.iter().enumerate() {
        if let Some(node) = graph.get_node_mut(id) {
            node.position.x = xs[i];
            node.position.y = ys[i];
        }
    }
}
