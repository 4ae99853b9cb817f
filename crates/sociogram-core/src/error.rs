//! Error types for sociogram operations.
//!
//! Provides structured error handling instead of panics. Most failures in
//! the engine are deliberately non-fatal (a snapshot that cannot be written
//! must never stall decay), so these types mostly surface at the
//! persistence and configuration boundaries.

use std::error::Error;
use std::fmt;

/// Result type for sociogram operations.
pub type Result<T> = std::result::Result<T, SociogramError>;

/// Errors that can occur during sociogram operations.
#[derive(Debug, Clone)]
pub enum SociogramError {
    /// Graph-related errors.
    Graph(GraphError),
    /// Snapshot/persistence errors.
    Snapshot(SnapshotError),
    /// Configuration errors.
    Config(ConfigError),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for SociogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SociogramError::Graph(e) => write!(f, "Graph error: {}", e),
            SociogramError::Snapshot(e) => write!(f, "Snapshot error: {}", e),
            SociogramError::Config(e) => write!(f, "Config error: {}", e),
            SociogramError::Io(msg) => write!(f, "I/O error: {}", msg),
            SociogramError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for SociogramError {}

impl From<std::io::Error> for SociogramError {
    fn from(e: std::io::Error) -> Self {
        SociogramError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SociogramError {
    fn from(e: serde_json::Error) -> Self {
        SociogramError::Serialization(e.to_string())
    }
}

/// Graph-related errors.
#[derive(Debug, Clone)]
pub enum GraphError {
    /// Node not found.
    NodeNotFound(String),
    /// Edge not found.
    EdgeNotFound(String, String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::NodeNotFound(name) => write!(f, "Node not found: {}", name),
            GraphError::EdgeNotFound(a, b) => write!(f, "Edge not found: {} -- {}", a, b),
        }
    }
}

/// Snapshot and persistence errors.
#[derive(Debug, Clone)]
pub enum SnapshotError {
    /// No restore file exists for the channel.
    NotFound(String),
    /// Restore file exists but cannot be decoded.
    Corrupt(String),
    /// Restore file was written by a different engine version.
    VersionMismatch { expected: String, found: String },
    /// A snapshot artifact could not be written.
    WriteFailed(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NotFound(path) => write!(f, "Restore file not found: {}", path),
            SnapshotError::Corrupt(msg) => write!(f, "Restore file corrupt: {}", msg),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SnapshotError::WriteFailed(msg) => write!(f, "Write failed: {}", msg),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Missing required field.
    MissingField(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::MissingField(field) => write!(f, "Missing required field: {}", field),
        }
    }
}

// Convenience constructors
impl SociogramError {
    pub fn node_not_found(name: impl Into<String>) -> Self {
        SociogramError::Graph(GraphError::NodeNotFound(name.into()))
    }

    pub fn version_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        SociogramError::Snapshot(SnapshotError::VersionMismatch {
            expected: expected.into(),
            found: found.into(),
        })
    }

    pub fn snapshot_not_found(path: impl Into<String>) -> Self {
        SociogramError::Snapshot(SnapshotError::NotFound(path.into()))
    }

    pub fn corrupt_snapshot(msg: impl Into<String>) -> Self {
        SociogramError::Snapshot(SnapshotError::Corrupt(msg.into()))
    }

    /// Whether this error means "no usable snapshot" rather than a defect.
    pub fn is_restore_fallback(&self) -> bool {
        matches!(
            self,
            SociogramError::Snapshot(
                SnapshotError::NotFound(_)
                    | SnapshotError::Corrupt(_)
                    | SnapshotError::VersionMismatch { .. }
            )
        )
    }
}
