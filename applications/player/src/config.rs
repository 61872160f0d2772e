/// Player configuration
use crate::error::{PlayerError, Result};
use segue_core::PlayMode;
use segue_library::{LibraryView, SortKey};
use segue_queue::{QueueConfig, DEFAULT_HISTORY_SIZE};
use segue_transition::{ControlSettings, CoverTiming};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "segue.toml";

/// Prefix of environment overrides, e.g. `SEGUE_LIBRARY__DIRECTORY`
pub const ENV_PREFIX: &str = "SEGUE";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_library")]
    pub library: LibrarySettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_transition")]
    pub transition: TransitionSettings,

    #[serde(default = "default_controls")]
    pub controls: ControlsSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LibrarySettings {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    #[serde(default)]
    pub sort: SortKey,

    #[serde(default = "default_true")]
    pub ascending: bool,

    #[serde(default)]
    pub favorites_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default)]
    pub mode: PlayMode,

    #[serde(default)]
    pub start_index: usize,

    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Length assumed for tracks whose duration is unknown
    #[serde(default = "default_track_seconds")]
    pub track_seconds: u64,

    /// Length of one background clip before the next one rotates in
    #[serde(default = "default_clip_seconds")]
    pub clip_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransitionSettings {
    #[serde(default = "default_slide_duration_ms")]
    pub slide_duration_ms: u64,

    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ControlsSettings {
    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: f64,

    #[serde(default = "default_restart_threshold_seconds")]
    pub restart_threshold_seconds: f64,

    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `segue.toml`; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(PlayerError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with SEGUE_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.transition.slide_duration_ms == 0 {
            return Err(PlayerError::Config(
                "transition.slide_duration_ms must be positive".to_string(),
            ));
        }
        if !self.controls.skip_seconds.is_finite() || self.controls.skip_seconds <= 0.0 {
            return Err(PlayerError::Config(
                "controls.skip_seconds must be a positive number".to_string(),
            ));
        }
        if !self.controls.restart_threshold_seconds.is_finite()
            || self.controls.restart_threshold_seconds < 0.0
        {
            return Err(PlayerError::Config(
                "controls.restart_threshold_seconds must not be negative".to_string(),
            ));
        }
        if self.controls.tick_ms == 0 {
            return Err(PlayerError::Config(
                "controls.tick_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            mode: self.playback.mode,
            start_index: self.playback.start_index,
            history_size: self.playback.history_size,
            shuffle_seed: self.playback.shuffle_seed,
        }
    }

    pub fn library_view(&self) -> LibraryView {
        LibraryView {
            sort: self.library.sort,
            ascending: self.library.ascending,
            favorites_only: self.library.favorites_only,
        }
    }

    pub fn cover_timing(&self) -> CoverTiming {
        CoverTiming::from_millis(self.transition.slide_duration_ms, self.transition.stagger_ms)
    }

    pub fn control_settings(&self) -> ControlSettings {
        ControlSettings {
            skip_seconds: self.controls.skip_seconds,
            restart_threshold_seconds: self.controls.restart_threshold_seconds,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.controls.tick_ms)
    }
}

// Default values
fn default_library() -> LibrarySettings {
    LibrarySettings {
        directory: default_directory(),
        sort: SortKey::Id,
        ascending: true,
        favorites_only: false,
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("./library")
}

fn default_true() -> bool {
    true
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        mode: PlayMode::Sequential,
        start_index: 0,
        shuffle_seed: None,
        history_size: default_history_size(),
        track_seconds: default_track_seconds(),
        clip_seconds: default_clip_seconds(),
    }
}

fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

fn default_track_seconds() -> u64 {
    180
}

fn default_clip_seconds() -> u64 {
    30
}

fn default_transition() -> TransitionSettings {
    TransitionSettings {
        slide_duration_ms: default_slide_duration_ms(),
        stagger_ms: default_stagger_ms(),
    }
}

fn default_slide_duration_ms() -> u64 {
    450
}

fn default_stagger_ms() -> u64 {
    80
}

fn default_controls() -> ControlsSettings {
    ControlsSettings {
        skip_seconds: default_skip_seconds(),
        restart_threshold_seconds: default_restart_threshold_seconds(),
        tick_ms: default_tick_ms(),
    }
}

fn default_skip_seconds() -> f64 {
    5.0
}

fn default_restart_threshold_seconds() -> f64 {
    3.0
}

fn default_tick_ms() -> u64 {
    250
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            playback: default_playback(),
            transition: default_transition(),
            controls: default_controls(),
        }
    }
}
