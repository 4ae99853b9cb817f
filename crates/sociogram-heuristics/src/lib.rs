//! # Sociogram Heuristics
//!
//! The inference heuristics that turn raw chat messages into edge
//! reinforcements. Each heuristic inspects one `(speaker, message)` pair
//! and may request a single edge reinforcement, weighted by a configured
//! scalar. None of them ever removes anything — forgetting is the decay
//! policy's job.
//!
//! The four heuristics run in a fixed order on every accepted message:
//!
//! 1. [`DirectAddressing`] — "bob: have you seen this?"
//! 2. [`IndirectAddressing`] — "I think bob had a patch for that"
//! 3. [`Adjacency`] — raw conversational turn-taking
//! 4. [`BinarySequence`] — a sustained two-person back-and-forth
//!
//! Each variant carries only the state it needs; Adjacency's last-speaker
//! slot and BinarySequence's window are scoped to one [`Pipeline`]
//! instance, i.e. to one channel.

pub mod adjacency;
pub mod binary_sequence;
pub mod direct;
pub mod indirect;
pub mod pipeline;
pub mod tokenize;

pub use adjacency::Adjacency;
pub use binary_sequence::{BinarySequence, MIN_SEQ_SIZE};
pub use direct::DirectAddressing;
pub use indirect::IndirectAddressing;
pub use pipeline::{Heuristic, HeuristicKind, Pipeline};
