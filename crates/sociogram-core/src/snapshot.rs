//! Snapshot boundary — the render-ready extract handed to external
//! collaborators.
//!
//! The engine never rasterizes. After every successful mutation it builds a
//! [`Snapshot`] (visible nodes, edges, bounds, render parameters) and hands
//! it to a [`SnapshotSink`]. Sink failures are logged by the caller and
//! never abort the mutation cycle.

use crate::bounds::Bounds;
use crate::error::Result;
use crate::types::Position;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters the external renderer needs to turn a snapshot into an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderParams {
    /// Target image width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Target image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Border around the drawing area.
    #[serde(default = "default_border_size")]
    pub border_size: u32,
    /// Radius of a drawn node.
    #[serde(default = "default_node_radius")]
    pub node_radius: u32,
    /// Edges below this weight are omitted from drawing (they stay in the
    /// graph).
    #[serde(default)]
    pub edge_threshold: f64,
    /// Whether edges are drawn at all.
    #[serde(default = "default_show_edges")]
    pub show_edges: bool,
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}
fn default_border_size() -> u32 {
    50
}
fn default_node_radius() -> u32 {
    5
}
fn default_show_edges() -> bool {
    true
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            border_size: default_border_size(),
            node_radius: default_node_radius(),
            edge_threshold: 0.0,
            show_edges: default_show_edges(),
        }
    }
}

/// A visible node as seen by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub name: String,
    pub position: Position,
    pub weight: f64,
}

/// An edge as seen by the renderer, endpoints by display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// One render-ready frame of a channel's graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub channel: String,
    pub frame: u64,
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
    pub bounds: Bounds,
    pub params: RenderParams,
}

/// Consumer of render-ready snapshots.
///
/// `publish` may return the location of a produced artifact (e.g. a file
/// path) so the engine can answer "most recent artifact" requests. Errors
/// are non-fatal to the engine: the cycle completes and decay still runs.
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: &Snapshot) -> Result<Option<PathBuf>>;
}

/// A sink that discards every snapshot. Useful for tests and for running
/// inference without a rendering collaborator.
#[derive(Debug, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn publish(&mut self, _snapshot: &Snapshot) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}
