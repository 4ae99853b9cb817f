//! Drawing bounds for a layout.
//!
//! Computes the extent of the visible node set, enforces a minimum diagram
//! size, and stretches the proportionally-small axis so the final extent
//! matches the target viewport's aspect ratio without distorting relative
//! node placement on the other axis.

use crate::graph::SocialGraph;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Bounds for one frame: the extent after minimum-size expansion
/// (`fitted`), the extent after aspect-ratio stretching (`framed`), and the
/// heaviest edge weight for stroke/alpha scaling by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub fitted: Extent,
    pub framed: Extent,
    pub max_edge_weight: f64,
}

/// Compute bounds over the visible nodes for a `width × height` target.
///
/// Returns `None` when no node is visible (nothing to draw).
pub fn calc_bounds(
    graph: &dyn SocialGraph,
    width: u32,
    height: u32,
    min_diagram_size: f64,
) -> Option<Bounds> {
    let visible = graph.connected_nodes();
    if visible.is_empty() {
        return None;
    }

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for id in &visible {
        let Some(node) = graph.get_node(id) else {
            continue;
        };
        min_x = min_x.min(node.position.x);
        max_x = max_x.max(node.position.x);
        min_y = min_y.min(node.position.y);
        max_y = max_y.max(node.position.y);
    }

    let raw = Extent {
        min_x,
        max_x,
        min_y,
        max_y,
    };

    let max_edge_weight = graph
        .all_edges()
        .iter()
        .map(|(_, _, edge)| edge.weight)
        .fold(0.0f64, f64::max);

    let fitted = expand_to_minimum(raw, min_diagram_size);
    let framed = stretch_to_aspect(fitted, width as f64, height as f64);

    Some(Bounds {
        fitted,
        framed,
        max_edge_weight,
    })
}

/// Expand any axis whose span is below `min_size` symmetrically about its
/// midpoint.
pub fn expand_to_minimum(extent: Extent, min_size: f64) -> Extent {
    let mut out = extent;
    if out.width() < min_size {
        let mid_x = (out.max_x + out.min_x) / 2.0;
        out.min_x = mid_x - min_size / 2.0;
        out.max_x = mid_x + min_size / 2.0;
    }
    if out.height() < min_size {
        let mid_y = (out.max_y + out.min_y) / 2.0;
        out.min_y = mid_y - min_size / 2.0;
        out.max_y = mid_y + min_size / 2.0;
    }
    out
}

/// Stretch whichever axis is proportionally too small so that
/// `width()/height()` equals `target_width/target_height`.
pub fn stretch_to_aspect(extent: Extent, target_width: f64, target_height: f64) -> Extent {
    let mut out = extent;
    let ratio = (out.width() / out.height()) / (target_width / target_height);
    if ratio > 1.0 {
        // Diagram is proportionally wider than the target: grow Y.
        let dy = out.height() * ratio - out.height();
        out.min_y -= dy / 2.0;
        out.max_y += dy / 2.0;
    } else if ratio < 1.0 {
        // Diagram is proportionally taller than the target: grow X.
        let dx = out.width() / ratio - out.width();
        out.min_x -= dx / 2.0;
        out.max_x += dx / 2.0;
    }
    out
}
