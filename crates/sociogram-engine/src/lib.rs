//! # Sociogram Engine
//!
//! The runtime half of sociogram: the petgraph-backed graph store, the
//! per-channel engine that runs the heuristics → mutation → layout →
//! bounds → snapshot → decay cycle, versioned session persistence, snapshot
//! artifact sinks, and the multi-channel network router that maps inbound
//! chat events onto engines.

pub mod artifact;
pub mod channel;
pub mod config;
pub mod graph_impl;
pub mod network;
pub mod session;

pub use artifact::JsonSnapshotWriter;
pub use channel::{ChannelEngine, GraphStats};
pub use config::EngineConfig;
pub use graph_impl::PetSocialGraph;
pub use network::Network;
pub use session::GraphState;

/// Version tag written into persisted graph state. A restore is rejected
/// unless the stored tag matches this exactly.
pub const VERSION: &str = concat!("sociogram ", env!("CARGO_PKG_VERSION"));
