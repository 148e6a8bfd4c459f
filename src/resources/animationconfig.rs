//! Animation definitions for an agent.
//!
//! [`AnimationConfig`] is the immutable, validated form of an agent's
//! `config.json`. It is loaded once when the agent is built and shared
//! read-only afterwards; systems and the playback engine look animations up
//! by name.
//!
//! # Document Format
//!
//! ```json
//! {
//!   "framesize": [124, 93],
//!   "animations": {
//!     "Wave": {
//!       "frames": [
//!         { "duration": 100, "spriteIndex": 0 },
//!         { "duration": 100, "spriteIndex": 1, "exitBranch": 3, "sound": "7",
//!           "branching": { "branches": [ { "frameIndex": 0, "weight": 40 } ] } },
//!         { "duration": 100, "spriteIndex": 2 },
//!         { "duration": 100 }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Frames without a `spriteIndex` draw nothing (`-1`). Unknown keys are
//! ignored so converted ClippyJS documents load unchanged.

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading an animation document.
///
/// Any of these aborts agent construction; there is no partial load.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read animation config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed animation config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tile size {width}x{height}")]
    InvalidTileSize { width: u32, height: u32 },
    #[error("animation config defines no animations")]
    NoAnimations,
    #[error("animation '{animation}' has no frames")]
    EmptyAnimation { animation: String },
    #[error("animation '{animation}' frame {frame}: sprite index {sprite_index} is below -1")]
    InvalidSpriteIndex {
        animation: String,
        frame: usize,
        sprite_index: i32,
    },
    #[error("animation '{animation}' frame {frame}: exit branch {target} is out of range (0..{frame_count})")]
    ExitBranchOutOfRange {
        animation: String,
        frame: usize,
        target: usize,
        frame_count: usize,
    },
    #[error("animation '{animation}' frame {frame}: branch target {target} is out of range (0..{frame_count})")]
    BranchOutOfRange {
        animation: String,
        frame: usize,
        target: usize,
        frame_count: usize,
    },
    #[error("animation '{animation}' frame {frame}: branch weights sum to zero")]
    ZeroBranchWeight { animation: String, frame: usize },
}

/// One weighted alternative for the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub weight: u32,
    pub frame_index: usize,
}

/// One timed step of an animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Time in milliseconds this frame stays current.
    pub duration_ms: u64,
    /// Atlas index, or `-1` for an empty frame.
    pub sprite_index: i32,
    /// Frame to jump to when a graceful stop is pending.
    pub exit_branch: Option<usize>,
    /// Weighted alternatives, walked in declared order.
    pub branching: Vec<Branch>,
    /// Key into the preloaded sound set.
    pub sound: Option<String>,
}

impl Frame {
    pub fn has_branching(&self) -> bool {
        !self.branching.is_empty()
    }
}

/// An ordered sequence of frames. Order is the default advancement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub frames: Vec<Frame>,
}

impl Animation {
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[derive(Deserialize)]
struct RawDocument {
    framesize: [u32; 2],
    #[serde(default)]
    animations: FxHashMap<String, RawAnimation>,
}

#[derive(Deserialize)]
struct RawAnimation {
    #[serde(default)]
    frames: Vec<RawFrame>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrame {
    duration: u64,
    #[serde(default = "no_sprite")]
    sprite_index: i32,
    exit_branch: Option<usize>,
    branching: Option<RawBranching>,
    sound: Option<String>,
}

#[derive(Deserialize)]
struct RawBranching {
    #[serde(default)]
    branches: Vec<Branch>,
}

fn no_sprite() -> i32 {
    -1
}

/// Validated animation catalog of one agent.
///
/// Cloning is cheap: the animation table is shared behind an [`Arc`].
#[derive(Resource, Debug, Clone)]
pub struct AnimationConfig {
    tile_width: u32,
    tile_height: u32,
    animations: Arc<FxHashMap<String, Animation>>,
}

impl AnimationConfig {
    /// Read and validate a config document from disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!(
            "Loaded {} animations from {:?} (tile {}x{})",
            config.animations.len(),
            path,
            config.tile_width,
            config.tile_height
        );
        Ok(config)
    }

    /// Parse and validate a config document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawDocument = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> Result<Self, ConfigError> {
        let [tile_width, tile_height] = raw.framesize;
        if tile_width == 0 || tile_height == 0 {
            return Err(ConfigError::InvalidTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        if raw.animations.is_empty() {
            return Err(ConfigError::NoAnimations);
        }

        let mut animations = FxHashMap::default();
        for (name, raw_animation) in raw.animations {
            let animation = validate_animation(&name, raw_animation)?;
            animations.insert(name, animation);
        }

        Ok(Self {
            tile_width,
            tile_height,
            animations: Arc::new(animations),
        })
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// All animation names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.animations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of the ambient animations (prefix `Idle`), sorted.
    pub fn idle_names(&self) -> Vec<&str> {
        self.names()
            .into_iter()
            .filter(|name| name.starts_with("Idle"))
            .collect()
    }
}

fn validate_animation(name: &str, raw: RawAnimation) -> Result<Animation, ConfigError> {
    let frame_count = raw.frames.len();
    if frame_count == 0 {
        return Err(ConfigError::EmptyAnimation {
            animation: name.to_string(),
        });
    }

    let mut frames = Vec::with_capacity(frame_count);
    for (index, raw_frame) in raw.frames.into_iter().enumerate() {
        if raw_frame.sprite_index < -1 {
            return Err(ConfigError::InvalidSpriteIndex {
                animation: name.to_string(),
                frame: index,
                sprite_index: raw_frame.sprite_index,
            });
        }
        if let Some(target) = raw_frame.exit_branch {
            if target >= frame_count {
                return Err(ConfigError::ExitBranchOutOfRange {
                    animation: name.to_string(),
                    frame: index,
                    target,
                    frame_count,
                });
            }
        }

        // An empty `branches` list is treated like a missing `branching` key.
        let branching = raw_frame.branching.map(|b| b.branches).unwrap_or_default();
        if !branching.is_empty() {
            let total: u64 = branching.iter().map(|b| u64::from(b.weight)).sum();
            if total == 0 {
                return Err(ConfigError::ZeroBranchWeight {
                    animation: name.to_string(),
                    frame: index,
                });
            }
            if let Some(branch) = branching.iter().find(|b| b.frame_index >= frame_count) {
                return Err(ConfigError::BranchOutOfRange {
                    animation: name.to_string(),
                    frame: index,
                    target: branch.frame_index,
                    frame_count,
                });
            }
        }

        frames.push(Frame {
            duration_ms: raw_frame.duration,
            sprite_index: raw_frame.sprite_index,
            exit_branch: raw_frame.exit_branch,
            branching,
            sound: raw_frame.sound,
        });
    }

    Ok(Animation { frames })
}
