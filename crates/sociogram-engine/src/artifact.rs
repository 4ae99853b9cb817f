//! Snapshot artifact sinks.
//!
//! The engine hands every frame to a [`SnapshotSink`]; these sinks write
//! the render-ready JSON artifacts an external renderer (or anything else)
//! consumes. Rasterization itself is outside the engine.

use sociogram_core::error::Result;
use sociogram_core::snapshot::{Snapshot, SnapshotSink};
use std::path::{Path, PathBuf};

use crate::session::channel_slug;

/// Writes each snapshot as JSON under `<output_dir>/<channel-slug>/`.
///
/// With `create_archive`, every frame is kept as
/// `<slug>-<frame:08>.json`; with `create_current`, the latest frame
/// overwrites `<slug>-current.json`. The returned path (archive preferred)
/// becomes the channel's "most recent artifact".
#[derive(Debug, Clone)]
pub struct JsonSnapshotWriter {
    output_dir: PathBuf,
    create_archive: bool,
    create_current: bool,
}

impl JsonSnapshotWriter {
    pub fn new(output_dir: impl Into<PathBuf>, create_archive: bool, create_current: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            create_archive,
            create_current,
        }
    }

    fn channel_dir(&self, channel: &str) -> PathBuf {
        self.output_dir.join(channel_slug(channel))
    }
}

impl SnapshotSink for JsonSnapshotWriter {
    fn publish(&mut self, snapshot: &Snapshot) -> Result<Option<PathBuf>> {
        if !self.create_archive && !self.create_current {
            return Ok(None);
        }

        let dir = self.channel_dir(&snapshot.channel);
        std::fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(snapshot)?;
        let slug = channel_slug(&snapshot.channel);

        let mut latest: Option<PathBuf> = None;

        if self.create_current {
            let current = dir.join(format!("{slug}-current.json"));
            std::fs::write(&current, &json)?;
            latest = Some(current);
        }

        if self.create_archive {
            let archive = dir.join(format!("{slug}-{:08}.json", snapshot.frame));
            std::fs::write(&archive, &json)?;
            latest = Some(archive);
        }

        Ok(latest)
    }
}

/// A sink that counts frames without writing anything (tests).
#[derive(Debug, Default)]
pub struct CountingSink {
    pub published: Vec<(String, u64)>,
}

impl SnapshotSink for CountingSink {
    fn publish(&mut self, snapshot: &Snapshot) -> Result<Option<PathBuf>> {
        self.published
            .push((snapshot.channel.clone(), snapshot.frame));
        Ok(None)
    }
}

/// A sink that always fails (tests for the non-fatal failure path).
#[derive(Debug, Default)]
pub struct FailingSink;

impl SnapshotSink for FailingSink {
    fn publish(&mut self, _snapshot: &Snapshot) -> Result<Option<PathBuf>> {
        Err(sociogram_core::error::SociogramError::Io(
            "sink unavailable".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociogram_core::bounds::{Bounds, Extent};
    use sociogram_core::snapshot::RenderParams;

    fn frame(channel: &str, frame: u64) -> Snapshot {
        let extent = Extent {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        };
        Snapshot {
            channel: channel.to_string(),
            frame,
            nodes: Vec::new(),
            edges: Vec::new(),
            bounds: Bounds {
                fitted: extent,
                framed: extent,
                max_edge_weight: 0.0,
            },
            params: RenderParams::default(),
        }
    }

    #[test]
    fn writes_archive_and_current_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonSnapshotWriter::new(dir.path(), true, true);

        let latest = sink.publish(&frame("#test", 3)).unwrap();

        let channel_dir = dir.path().join("test");
        assert!(channel_dir.join("test-00000003.json").exists());
        assert!(channel_dir.join("test-current.json").exists());
        // Archive frame wins as the "most recent artifact".
        assert_eq!(latest, Some(channel_dir.join("test-00000003.json")));
    }

    #[test]
    fn current_only_mode_reports_the_current_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonSnapshotWriter::new(dir.path(), false, true);

        let latest = sink.publish(&frame("#test", 1)).unwrap();

        let channel_dir = dir.path().join("test");
        assert!(!channel_dir.join("test-00000001.json").exists());
        assert_eq!(latest, Some(channel_dir.join("test-current.json")));
    }

    #[test]
    fn disabled_writer_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonSnapshotWriter::new(dir.path(), false, false);
        assert_eq!(sink.publish(&frame("#test", 1)).unwrap(), None);
        assert!(!dir.path().join("test").exists());
    }
}
