use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use crate::rename::MovieFormat;

/// What to do with a movie once its destination is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Duplicate to the destination, keeping the source
    Copy,
    /// Relocate to the destination
    Move,
    /// Report what would happen without touching the filesystem
    Test,
}

impl Action {
    pub fn description(&self) -> &'static str {
        match self {
            Action::Copy => "copy",
            Action::Move => "move",
            Action::Test => "test",
        }
    }

    pub fn mutates_filesystem(&self) -> bool {
        !matches!(self, Action::Test)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Root configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_action")]
    pub action: Action,
    #[serde(default = "default_movie_exts")]
    pub movie_exts: Vec<String>,
    #[serde(default)]
    pub movie_format: MovieFormat,
    /// Root for relative destinations; defaults to each movie's own directory
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Replace existing destination files instead of skipping them
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default)]
    pub subtitles: SubtitleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            action: default_action(),
            movie_exts: default_movie_exts(),
            movie_format: MovieFormat::default(),
            output_dir: None,
            overwrite: false,
            subtitles: SubtitleConfig::default(),
        }
    }
}

/// Subtitle discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubtitleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_subtitle_exts")]
    pub exts: Vec<String>,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            exts: default_subtitle_exts(),
        }
    }
}

fn default_action() -> Action {
    Action::Test
}

fn default_true() -> bool {
    true
}

fn default_movie_exts() -> Vec<String> {
    ["mkv", "mp4", "avi", "m4v", "mov", "wmv"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_subtitle_exts() -> Vec<String> {
    ["srt", "sub", "idx", "ass", "ssa", "vtt"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
