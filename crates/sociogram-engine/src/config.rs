//! Engine configuration.
//!
//! All tunables for one engine instance: heuristic weightings, layout
//! constants, decay, bounds fitting, render parameters, and output
//! locations. Use with [`crate::Network::new`] or
//! [`crate::ChannelEngine::new`]; every field has a serde default so a
//! partial TOML file works.

use serde::{Deserialize, Serialize};
use sociogram_core::layout::LayoutConfig;
use sociogram_core::snapshot::RenderParams;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Configuration for one engine (shared by all channels of a network).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Weight subtracted from every node and edge after each mutation
    /// cycle (default: 0.02).
    #[serde(default = "default_temporal_decay")]
    pub temporal_decay: f64,
    /// Minimum span of either bounds axis before aspect fitting
    /// (default: 10.0).
    #[serde(default = "default_min_diagram_size")]
    pub min_diagram_size: f64,
    /// Directory that artifacts and restore points are written under, one
    /// subdirectory per channel (default: "output").
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Keep one artifact per frame (default: true).
    #[serde(default = "default_true")]
    pub create_archive: bool,
    /// Keep a "current" artifact overwritten every frame (default: true).
    #[serde(default = "default_true")]
    pub create_current: bool,
    /// Persist graph state after every cycle and restore it when a channel
    /// is first seen (default: true).
    #[serde(default = "default_true")]
    pub create_restore_points: bool,
    /// Heuristic weightings, keyed by heuristic name. A missing entry
    /// disables that heuristic with a warning.
    #[serde(default = "default_weights")]
    pub weights: BTreeMap<String, f64>,
    /// Spring-embedder constants.
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Parameters supplied to the external renderer with every snapshot.
    #[serde(default)]
    pub render: RenderParams,
}

fn default_weights() -> BTreeMap<String, f64> {
    [
        ("direct-addressing", 1.0),
        ("indirect-addressing", 0.3),
        ("adjacency", 0.1),
        ("binary-sequence", 0.5),
    ]
    .into_iter()
    .map(|(name, weight)| (name.to_string(), weight))
    .collect()
}

fn default_temporal_decay() -> f64 {
    0.02
}

fn default_min_diagram_size() -> f64 {
    10.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            temporal_decay: default_temporal_decay(),
            min_diagram_size: default_min_diagram_size(),
            output_dir: default_output_dir(),
            create_archive: true,
            create_current: true,
            create_restore_points: true,
            weights: default_weights(),
            layout: LayoutConfig::default(),
            render: RenderParams::default(),
        }
    }
}
