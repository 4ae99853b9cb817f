//! Prelude module for convenient imports.
//!
//! ```rust
//! use sociogram_core::prelude::*;
//! ```

pub use crate::bounds::{calc_bounds, Bounds, Extent};
pub use crate::error::{Result, SociogramError};
pub use crate::graph::{InferenceTarget, SocialGraph};
pub use crate::layout::{run_layout, run_layout_iterations, LayoutConfig};
pub use crate::snapshot::{
    NullSink, RenderParams, Snapshot, SnapshotEdge, SnapshotNode, SnapshotSink,
};
pub use crate::types::{fold_name, EdgeData, NodeData, NodeId, Position};
