//! Agent host settings.
//!
//! Settings are loaded from an INI file. Defaults keep the host runnable
//! when the file or any key is missing.
//!
//! # Settings File Format
//!
//! ```ini
//! [agent]
//! root = ./assets/agents
//! name = Demo
//! visible = true
//!
//! [sound]
//! enabled = true
//!
//! [host]
//! target_fps = 60
//!
//! [atlas]
//! sheet_width = 0
//! ```
//!
//! The `DESKAGENT_AGENTS` environment variable overrides `agent.root`.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_AGENTS_ROOT: &str = "./assets/agents";
const DEFAULT_AGENT_NAME: &str = "Demo";
const DEFAULT_VISIBLE: bool = true;
const DEFAULT_SOUND_ENABLED: bool = true;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_SHEET_WIDTH: u32 = 0;
const DEFAULT_SETTINGS_PATH: &str = "./deskagent.ini";

/// Environment variable overriding the agents root directory.
pub const AGENTS_ROOT_ENV: &str = "DESKAGENT_AGENTS";

#[derive(Resource, Debug, Clone)]
pub struct AgentSettings {
    /// Directory holding one folder per agent.
    pub agents_root: PathBuf,
    /// Agent folder name under `agents_root`.
    pub agent_name: String,
    /// Whether the agent starts visible.
    pub visible: bool,
    /// Whether sound cues are played.
    pub sound_enabled: bool,
    /// Host loop frequency.
    pub target_fps: u32,
    /// Atlas image width in pixels, 0 when unknown.
    pub sheet_width: u32,
    /// Path to the settings file.
    pub settings_path: PathBuf,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentSettings {
    pub fn new() -> Self {
        Self {
            agents_root: PathBuf::from(DEFAULT_AGENTS_ROOT),
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            visible: DEFAULT_VISIBLE,
            sound_enabled: DEFAULT_SOUND_ENABLED,
            target_fps: DEFAULT_TARGET_FPS,
            sheet_width: DEFAULT_SHEET_WIDTH,
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: path.into(),
            ..Self::new()
        }
    }

    /// Load settings from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.settings_path)
            .map_err(|e| format!("Failed to load settings file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded settings: agent={} root={:?} visible={} sound={} fps={}",
            self.agent_name, self.agents_root, self.visible, self.sound_enabled, self.target_fps
        );
        Ok(())
    }

    /// Parse settings from INI text. Missing values retain their current values.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse settings: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [agent] section
        if let Some(root) = config.get("agent", "root") {
            self.agents_root = PathBuf::from(root);
        }
        if let Some(name) = config.get("agent", "name") {
            self.agent_name = name;
        }
        if let Some(visible) = config.getbool("agent", "visible").ok().flatten() {
            self.visible = visible;
        }

        // [sound] section
        if let Some(enabled) = config.getbool("sound", "enabled").ok().flatten() {
            self.sound_enabled = enabled;
        }

        // [host] section
        if let Some(fps) = config.getuint("host", "target_fps").ok().flatten() {
            self.target_fps = (fps as u32).max(1);
        }

        // [atlas] section
        if let Some(width) = config.getuint("atlas", "sheet_width").ok().flatten() {
            self.sheet_width = width as u32;
        }
    }

    /// Apply the `DESKAGENT_AGENTS` override if it is set.
    pub fn apply_env(&mut self) {
        if let Ok(root) = std::env::var(AGENTS_ROOT_ENV) {
            info!("Agents root overridden by {}: {}", AGENTS_ROOT_ENV, root);
            self.agents_root = PathBuf::from(root);
        }
    }

    /// Save settings to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set(
            "agent",
            "root",
            Some(self.agents_root.to_string_lossy().into_owned()),
        );
        config.set("agent", "name", Some(self.agent_name.clone()));
        config.set("agent", "visible", Some(self.visible.to_string()));
        config.set("sound", "enabled", Some(self.sound_enabled.to_string()));
        config.set("host", "target_fps", Some(self.target_fps.to_string()));
        config.set("atlas", "sheet_width", Some(self.sheet_width.to_string()));

        config
            .write(&self.settings_path)
            .map_err(|e| format!("Failed to save settings file: {}", e))?;

        info!("Saved settings to {:?}", self.settings_path);
        Ok(())
    }

    /// Folder of the configured agent.
    pub fn agent_dir(&self) -> PathBuf {
        self.agents_root.join(&self.agent_name)
    }

    pub fn config_path(&self) -> PathBuf {
        self.agent_dir().join("config.json")
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.agent_dir().join("sounds")
    }

    /// Host frame length in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.target_fps.max(1))
    }
}
