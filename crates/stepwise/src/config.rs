//! Configuration file support for stepwise.
//!
//! Data lives in a `.stepwise/` directory:
//! - `.stepwise/config.toml` - Configuration file
//! - `.stepwise/logs/` - Log files written during `play`
//!
//! Config discovery searches for `.stepwise/config.toml` starting from the
//! current directory and walking up to parent directories.

use std::path::{Path, PathBuf};

/// The stepwise data directory name.
pub const STEPWISE_DIR: &str = ".stepwise";
/// The config file name within the stepwise directory.
pub const CONFIG_FILE: &str = "config.toml";

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stepwise_engines::MIN_BUCKETS;
use stepwise_engines::playback::{MAX_SPEED, MIN_SPEED};
use stepwise_trace::GridCell;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    /// Input-size guardrails.
    pub limits: LimitsConfig,
    /// Grid used by pathfinding runs and `compare`.
    pub grid: GridConfig,
    pub hash_table: HashTableConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Speed multiplier, 0.25 to 4.0.
    pub speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Longest array accepted by the sorting algorithms.
    pub max_array_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_array_len: 20 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub start: GridCell,
    pub end: GridCell,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 45,
            cols: 60,
            start: (4, 4),
            end: (40, 55),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HashTableConfig {
    /// Bucket count.
    pub size: usize,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self { size: 7 }
    }
}

/// How `run` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per step plus final metrics.
    #[default]
    Summary,
    /// The whole step list as one JSON document.
    Json,
    /// One JSON step per line.
    Jsonl,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Nearest `.stepwise` directory holding a config file, from `start` upward.
pub fn find_dir_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(STEPWISE_DIR))
        .find(|stepwise_dir| stepwise_dir.join(CONFIG_FILE).exists())
}

/// The `.stepwise` directory in use.
///
/// `--config` may name the directory or the config file inside it; without
/// it, the discovered directory, if any.
pub fn stepwise_dir(override_path: Option<&Path>) -> Option<PathBuf> {
    match override_path {
        Some(path) if path.is_file() => Some(
            path.parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf(),
        ),
        Some(path) => Some(path.to_path_buf()),
        None => std::env::current_dir()
            .ok()
            .and_then(|current| find_dir_from(&current)),
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Find and load configuration from current or parent directories.
    pub fn find_and_load() -> Result<Option<(Self, PathBuf)>> {
        let current = std::env::current_dir()?;
        Self::find_and_load_from(&current)
    }

    /// Find and load configuration starting from a specific directory.
    ///
    /// Returns the parsed config and the `.stepwise` directory it came from.
    pub fn find_and_load_from(start: &Path) -> Result<Option<(Self, PathBuf)>> {
        match find_dir_from(start) {
            Some(stepwise_dir) => {
                let config = Self::from_file(&stepwise_dir.join(CONFIG_FILE))?;
                Ok(Some((config, stepwise_dir)))
            }
            None => Ok(None),
        }
    }

    /// Default config file contents written by `stepwise init`.
    pub fn default_toml() -> &'static str {
        r#"# stepwise configuration

[playback]
speed = 1.0  # 0.25 to 4.0; one step per 1000/speed ms

[limits]
max_array_len = 20  # Longest array accepted by the sorts

# Grid for pathfinding runs and `stepwise compare`
[grid]
rows = 45
cols = 60
start = [4, 4]
end = [40, 55]

[hash_table]
size = 7  # Bucket count, at least 3

[output]
format = "summary"  # Options: "summary", "json", "jsonl"
"#
    }
}

/// Configuration validation error.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

impl Config {
    /// Validate the configuration.
    ///
    /// Returns a list of validation errors if any are found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ConfigValidationError {
                field: field.to_string(),
                message,
            })
        };

        if !(MIN_SPEED..=MAX_SPEED).contains(&self.playback.speed) {
            push(
                "playback.speed",
                format!(
                    "Speed {} is outside {}..={}.",
                    self.playback.speed, MIN_SPEED, MAX_SPEED
                ),
            );
        }

        if self.limits.max_array_len == 0 {
            push("limits.max_array_len", "Array limit cannot be zero.".to_string());
        }

        let grid = &self.grid;
        if grid.rows == 0 || grid.cols == 0 {
            push(
                "grid",
                format!("Grid must be at least 1x1, got {}x{}.", grid.rows, grid.cols),
            );
        } else {
            for (field, (row, col)) in [("grid.start", grid.start), ("grid.end", grid.end)] {
                if row >= grid.rows || col >= grid.cols {
                    push(
                        field,
                        format!(
                            "({}, {}) is outside the {}x{} grid.",
                            row, col, grid.rows, grid.cols
                        ),
                    );
                }
            }
        }

        if self.hash_table.size < MIN_BUCKETS {
            push(
                "hash_table.size",
                format!(
                    "Size {} is below the minimum of {} buckets.",
                    self.hash_table.size, MIN_BUCKETS
                ),
            );
        }

        errors
    }
}
