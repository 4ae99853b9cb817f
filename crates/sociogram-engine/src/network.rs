//! Multi-channel router.
//!
//! A [`Network`] owns one [`ChannelEngine`] per channel and maps inbound
//! chat events onto them: message inference, presence sightings, nick
//! renames, administrative removals, and "most recent artifact" lookups.
//! The chat protocol itself (connecting, joining, reconnecting) lives in
//! an external client; by the time an event reaches the network it is
//! already normalized text.

use sociogram_core::snapshot::SnapshotSink;
use sociogram_core::types::fold_name;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

use crate::channel::{ChannelEngine, GraphStats};
use crate::config::EngineConfig;
use crate::session;

/// One engine per channel, plus the ignore policy and the shared snapshot
/// sink.
pub struct Network {
    config: EngineConfig,
    engines: HashMap<String, ChannelEngine>,
    /// Case-folded names that contribute nothing.
    ignored: HashSet<String>,
    sink: Box<dyn SnapshotSink>,
}

impl Network {
    pub fn new(config: EngineConfig, sink: Box<dyn SnapshotSink>) -> Self {
        Self {
            config,
            engines: HashMap::new(),
            ignored: HashSet::new(),
            sink,
        }
    }

    /// Seed the ignore list (builder style).
    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.ignored.insert(fold_name(name.as_ref()));
        }
        self
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(&fold_name(name))
    }

    /// An inbound channel message. The caller has already stripped
    /// protocol formatting/color codes from `message`.
    pub fn observe_message(&mut self, channel: &str, speaker: &str, message: &str) {
        if self.is_ignored(speaker) {
            return;
        }
        self.ensure_engine(channel);
        let Some(engine) = self.engines.get_mut(&fold_name(channel)) else {
            return;
        };
        engine.observe_name(speaker);
        engine.infer(speaker, message, self.sink.as_mut());
    }

    /// A join, user-list entry, kick, or mode change: the participant was
    /// seen, but there is nothing to infer from.
    pub fn observe_presence(&mut self, channel: &str, name: &str) {
        if self.is_ignored(name) {
            return;
        }
        self.ensure_engine(channel);
        if let Some(engine) = self.engines.get_mut(&fold_name(channel)) {
            engine.observe_name(name);
        }
    }

    /// A nick change: merge the old identity into the new one on every
    /// channel.
    pub fn rename_nick(&mut self, old_name: &str, new_name: &str) {
        for engine in self.engines.values_mut() {
            engine.rename(old_name, new_name, self.sink.as_mut());
        }
    }

    /// Administrative removal: silence the participant from now on and
    /// erase them from every channel, redrawing the channels that changed.
    pub fn remove_participant(&mut self, name: &str) -> usize {
        self.ignored.insert(fold_name(name));
        let mut removed_from = 0;
        for engine in self.engines.values_mut() {
            if engine.remove_participant(name, self.sink.as_mut()) {
                removed_from += 1;
            }
        }
        removed_from
    }

    /// The most recent artifact produced for a channel, if any.
    pub fn last_artifact(&self, channel: &str) -> Option<&Path> {
        self.engines
            .get(&fold_name(channel))
            .and_then(|engine| engine.last_artifact())
    }

    pub fn channel(&self, channel: &str) -> Option<&ChannelEngine> {
        self.engines.get(&fold_name(channel))
    }

    pub fn channel_count(&self) -> usize {
        self.engines.len()
    }

    /// Per-channel graph sizes, sorted by channel label.
    pub fn stats(&self) -> Vec<(String, GraphStats)> {
        let mut stats: Vec<(String, GraphStats)> = self
            .engines
            .values()
            .map(|engine| (engine.label().to_string(), engine.stats()))
            .collect();
        stats.sort_by(|a, b| a.0.cmp(&b.0));
        stats
    }

    /// Get-or-create a channel's engine, restoring persisted state the
    /// first time the channel is seen.
    fn ensure_engine(&mut self, channel: &str) {
        let key = fold_name(channel);
        if self.engines.contains_key(&key) {
            return;
        }

        let engine = if self.config.create_restore_points {
            match session::load_graph(&self.config.output_dir, channel) {
                Ok(graph) => {
                    debug!(channel, "restored graph state");
                    ChannelEngine::with_graph(channel, graph, self.config.clone())
                }
                Err(err) if err.is_restore_fallback() => {
                    debug!(channel, %err, "no usable restore point; starting fresh");
                    ChannelEngine::new(channel, self.config.clone())
                }
                Err(err) => {
                    warn!(channel, %err, "restore failed; starting fresh");
                    ChannelEngine::new(channel, self.config.clone())
                }
            }
        } else {
            ChannelEngine::new(channel, self.config.clone())
        };

        self.engines.insert(key, engine);
    }
}
