//! # Sociogram Core
//!
//! Shared types and contracts for inferring social relationship graphs
//! from chat traffic:
//!
//! - **types** — node/edge value types keyed by opaque surrogate ids
//! - **graph** — the `SocialGraph` store contract and the
//!   `InferenceTarget` surface that heuristics drive
//! - **layout** — the spring-embedder that assigns 2-D coordinates
//! - **bounds** — viewport fitting with aspect-ratio preservation
//! - **snapshot** — the render/persist boundary handed to external
//!   collaborators
//! - **error** — structured error types
//!
//! ## Quick Start
//!
//! ```rust
//! use sociogram_core::prelude::*;
//!
//! let pos = Position::new(0.0, 0.0);
//! let id = NodeId::from_seed(42);
//! assert_ne!(id, NodeId::from_seed(43));
//! ```

pub mod bounds;
pub mod error;
pub mod graph;
pub mod layout;
pub mod prelude;
pub mod snapshot;
pub mod types;
