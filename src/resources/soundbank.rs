//! Preloaded sound names for an agent.
//!
//! Sound clips live as `<name>.wav` files in the agent's `sounds/` folder and
//! frames refer to them by file stem. The bank only tracks which names exist
//! and whether output is enabled; the audio backend plays the clips.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use rustc_hash::FxHashSet;

#[derive(Resource, Debug, Clone, Default)]
pub struct SoundBank {
    enabled: bool,
    names: FxHashSet<String>,
    played: Vec<String>,
}

impl SoundBank {
    /// A bank that never plays anything.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enabled bank containing exactly `names`.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: true,
            names: names.into_iter().map(Into::into).collect(),
            played: Vec::new(),
        }
    }

    /// Register every `*.wav` file in `dir`.
    ///
    /// A missing directory yields a disabled bank.
    pub fn preload(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                info!("No sounds loaded from {:?}: {}", dir, e);
                return Self::disabled();
            }
        };

        let mut names = FxHashSet::default();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("wav") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                debug!("Loading sound: {} {:?}", stem, path);
                names.insert(stem.to_string());
            }
        }
        info!("Loaded {} sounds from {:?}", names.len(), dir);
        Self {
            enabled: true,
            names,
            played: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Play `name`. Returns false when output is disabled or the name is
    /// unknown.
    pub fn play(&mut self, name: &str) -> bool {
        if !self.enabled || !self.names.contains(name) {
            return false;
        }
        self.played.push(name.to_string());
        true
    }

    /// Clips played so far, oldest first.
    pub fn played(&self) -> &[String] {
        &self.played
    }
}
