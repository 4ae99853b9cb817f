//! Session persistence — versioned save/restore of a channel's graph.
//!
//! Serializes the graph (nodes with weights and positions, edges with
//! weights) to JSON behind an explicit version tag. A restore only
//! succeeds when the stored tag matches the running engine's version
//! exactly; anything else — missing file, corrupt data, foreign version —
//! is reported as "no usable snapshot" and the caller starts fresh. There
//! is no partial or best-effort decoding of foreign payloads.

use crate::graph_impl::PetSocialGraph;
use crate::VERSION;
use serde::{Deserialize, Serialize};
use sociogram_core::error::{Result, SociogramError};
use sociogram_core::graph::SocialGraph;
use sociogram_core::types::{EdgeData, NodeData, NodeId, Position};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Serializable snapshot of one channel's graph state.
///
/// Deliberately excludes cosmetic state (captions, frame counters): only
/// what is needed to resume inference and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphState {
    pub version: String,
    pub channel: String,
    pub nodes: Vec<PersistedNode>,
    pub edges: Vec<PersistedEdge>,
}

/// Serializable node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedNode {
    pub name: String,
    pub weight: f64,
    pub x: f64,
    pub y: f64,
}

/// Serializable edge, endpoints by display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// The on-disk identifier for a channel: case-folded, with a leading
/// channel-prefix character removed.
pub fn channel_slug(channel: &str) -> String {
    let folded = channel.to_lowercase();
    match folded.strip_prefix(['#', '&', '!', '+']) {
        Some(stripped) => stripped.to_string(),
        None => folded,
    }
}

/// Where a channel's restore point lives under `output_dir`.
pub fn restore_path(output_dir: &Path, channel: &str) -> PathBuf {
    let slug = channel_slug(channel);
    output_dir.join(&slug).join(format!("{slug}-restore.json"))
}

/// Capture the current graph state for persistence.
pub fn capture(graph: &PetSocialGraph, channel: &str) -> GraphState {
    let nodes: Vec<PersistedNode> = graph
        .all_nodes()
        .iter()
        .filter_map(|id| graph.get_node(id))
        .map(|node| PersistedNode {
            name: node.name.clone(),
            weight: node.weight,
            x: node.position.x,
            y: node.position.y,
        })
        .collect();

    let edges: Vec<PersistedEdge> = graph
        .all_edges()
        .iter()
        .filter_map(|(a, b, edge)| {
            Some(PersistedEdge {
                source: graph.get_node(a)?.name.clone(),
                target: graph.get_node(b)?.name.clone(),
                weight: edge.weight,
            })
        })
        .collect();

    GraphState {
        version: VERSION.to_string(),
        channel: channel.to_string(),
        nodes,
        edges,
    }
}

/// Write the graph's restore point under `output_dir`.
pub fn save_graph(graph: &PetSocialGraph, channel: &str, output_dir: &Path) -> Result<()> {
    let state = capture(graph, channel);
    let path = restore_path(output_dir, channel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load and version-gate a persisted graph state.
pub fn load_state(path: &Path) -> Result<GraphState> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SociogramError::snapshot_not_found(path.display().to_string())
        } else {
            SociogramError::Io(e.to_string())
        }
    })?;

    let state: GraphState =
        serde_json::from_str(&json).map_err(|e| SociogramError::corrupt_snapshot(e.to_string()))?;

    if state.version != VERSION {
        return Err(SociogramError::version_mismatch(VERSION, state.version));
    }
    Ok(state)
}

/// Rebuild a graph store from a persisted state.
///
/// Fresh surrogate ids are assigned; identity is carried by the names.
pub fn restore_graph(state: &GraphState) -> PetSocialGraph {
    let mut graph = PetSocialGraph::new();
    let mut ids: HashMap<String, NodeId> = HashMap::new();

    for node in &state.nodes {
        let id = graph.insert_node(NodeData {
            id: NodeId::new(),
            name: node.name.clone(),
            weight: node.weight,
            position: Position::new(node.x, node.y),
        });
        ids.insert(node.name.clone(), id);
    }

    for edge in &state.edges {
        if let (Some(&a), Some(&b)) = (ids.get(&edge.source), ids.get(&edge.target)) {
            graph.insert_edge(
                a,
                b,
                EdgeData {
                    weight: edge.weight,
                },
            );
        }
    }

    graph
}

/// Load a channel's restore point from `output_dir`, if a usable one
/// exists.
pub fn load_graph(output_dir: &Path, channel: &str) -> Result<PetSocialGraph> {
    let state = load_state(&restore_path(output_dir, channel))?;
    Ok(restore_graph(&state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_prefix_and_folds_case() {
        assert_eq!(channel_slug("#Rust"), "rust");
        assert_eq!(channel_slug("&Ops"), "ops");
        assert_eq!(channel_slug("!Audit"), "audit");
        assert_eq!(channel_slug("+Help"), "help");
        assert_eq!(channel_slug("lobby"), "lobby");
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        let mut graph = PetSocialGraph::new();
        graph.add_edge("Alice", "Bob", 2.5);
        graph.add_edge("Alice", "Carol", 1.0);
        graph.add_node("lurker");

        save_graph(&graph, "#test", dir.path()).unwrap();

        let restored = load_graph(dir.path(), "#test").unwrap();
        assert_eq!(restored.node_count(), 4);
        assert_eq!(restored.edge_count(), 2);

        let alice = restored.lookup("alice").unwrap();
        let bob = restored.lookup("bob").unwrap();
        assert_eq!(restored.get_edge(&alice, &bob).unwrap().weight, 2.5);
        // Display casing and weights survive the round trip.
        assert_eq!(restored.get_node(&alice).unwrap().name, "Alice");
        assert_eq!(restored.get_node(&alice).unwrap().weight, 2.0);
    }

    #[test]
    fn missing_restore_point_reports_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_graph(dir.path(), "#nowhere").unwrap_err();
        assert!(err.is_restore_fallback());
    }

    #[test]
    fn corrupt_restore_point_reports_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = restore_path(dir.path(), "#test");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_state(&path).unwrap_err();
        assert!(err.is_restore_fallback());
    }

    #[test]
    fn foreign_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let mut graph = PetSocialGraph::new();
        graph.add_edge("alice", "bob", 1.0);
        save_graph(&graph, "#test", dir.path()).unwrap();

        // Rewrite the tag as if an older engine had produced the file.
        let path = restore_path(dir.path(), "#test");
        let mut state: GraphState =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        state.version = "sociogram 0.0.1".to_string();
        std::fs::write(&path, serde_json::to_string(&state).unwrap()).unwrap();

        let err = load_state(&path).unwrap_err();
        assert!(err.is_restore_fallback());
        assert!(err.to_string().contains("0.0.1"));
    }
}
