//! # Sociogram
//!
//! Social relationship inference and force-directed layout for group chat
//! channels. Sociogram watches `(channel, speaker, message)` events, runs
//! a small pipeline of inference heuristics over each message, and keeps
//! one weighted relationship graph per channel. Every successful
//! reinforcement relaxes the layout, fits the drawing bounds, and emits a
//! render-ready snapshot; weights decay afterwards so stale relationships
//! fade out on their own.
//!
//! ## Quick Start
//!
//! ```rust
//! use sociogram::prelude::*;
//!
//! let mut config = EngineConfig::default();
//! config.create_restore_points = false;
//!
//! let mut network = Network::new(config, Box::new(NullSink));
//! network.observe_message("#rust", "alice", "morning everyone");
//! network.observe_message("#rust", "bob", "alice: morning!");
//!
//! let stats = network.stats();
//! assert_eq!(stats[0].0, "#rust");
//! assert_eq!(stats[0].1.edges, 1);
//! ```
//!
//! ## Architecture
//!
//! - [`sociogram_core`] — shared types, the `SocialGraph` store contract,
//!   the spring-embedder layout, bounds fitting, and the snapshot boundary
//! - [`sociogram_heuristics`] — the four message heuristics and their
//!   fixed-order pipeline
//! - [`sociogram_engine`] — the petgraph-backed store, per-channel engine,
//!   versioned persistence, artifact sinks, and the channel router
//!
//! ## The heuristics
//!
//! | Heuristic | Signal |
//! |-----------|--------|
//! | direct-addressing | "bob: have you seen this?" |
//! | indirect-addressing | first mention of a known participant |
//! | adjacency | consecutive messages from different speakers |
//! | binary-sequence | five lines from exactly two speakers |
//!
//! Each heuristic's contribution is a configured weighting; an
//! unconfigured heuristic is disabled with a warning rather than an error.
//!
//! ## Persistence
//!
//! Each channel's graph is written as versioned JSON after every cycle and
//! picked back up the first time the channel is seen again. A restore
//! point from a different engine version is discarded and the channel
//! starts fresh — never a startup error.

// Re-export all subcrates
pub use sociogram_core as core;
pub use sociogram_engine as engine;
pub use sociogram_heuristics as heuristics;

/// Prelude module for convenient imports.
///
/// ```rust
/// use sociogram::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use sociogram_core::bounds::{calc_bounds, Bounds, Extent};
    pub use sociogram_core::error::{Result, SociogramError};
    pub use sociogram_core::graph::{InferenceTarget, SocialGraph};
    pub use sociogram_core::layout::{run_layout, run_layout_iterations, LayoutConfig};
    pub use sociogram_core::snapshot::{
        NullSink, RenderParams, Snapshot, SnapshotEdge, SnapshotNode, SnapshotSink,
    };
    pub use sociogram_core::types::{fold_name, EdgeData, NodeData, NodeId, Position};

    // Heuristics
    pub use sociogram_heuristics::{
        Adjacency, BinarySequence, DirectAddressing, Heuristic, HeuristicKind,
        IndirectAddressing, Pipeline, MIN_SEQ_SIZE,
    };

    // Engine
    pub use sociogram_engine::session::{
        capture, load_graph, load_state, restore_graph, save_graph, GraphState,
    };
    pub use sociogram_engine::{
        ChannelEngine, EngineConfig, GraphStats, JsonSnapshotWriter, Network, PetSocialGraph,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
