//! Game configuration loaded from TOML.
//!
//! Every key is optional. Lookup order for the file is: an explicit path,
//! then `BLOCKFALL_CONFIG`, then `./blockfall.toml` if it exists. With no file
//! at all the defaults apply.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::core::GameOptions;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, FRAME_SLEEP_MS, SOFT_DROP_GRACE_MS, SOFT_DROP_MS};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "BLOCKFALL_CONFIG";

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "blockfall.toml";

pub const DEFAULT_LOG_FILE: &str = "blockfall.log";

pub const MIN_WIDTH: u8 = 7;
pub const MAX_WIDTH: u8 = 100;
pub const MIN_HEIGHT: u8 = 4;
pub const MAX_HEIGHT: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: u8,
    pub height: u8,
    pub start_level: u32,
    /// Fixed RNG seed; unset means a time-based seed.
    pub seed: Option<u32>,
    pub soft_drop_ms: u64,
    pub soft_drop_grace_ms: u64,
    pub frame_sleep_ms: u64,
    /// Pause after each cleared row
    pub line_clear_delay_ms: u64,
    /// Pause on the final board before leaving the terminal
    pub loss_delay_ms: u64,
    /// Directory of `<Kind>Piece.txt` records; unset means built-in shapes.
    pub pieces_dir: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            start_level: 0,
            seed: None,
            soft_drop_ms: SOFT_DROP_MS as u64,
            soft_drop_grace_ms: SOFT_DROP_GRACE_MS as u64,
            frame_sleep_ms: FRAME_SLEEP_MS as u64,
            line_clear_delay_ms: 60,
            loss_delay_ms: 1000,
            pieces_dir: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub seed: Option<u32>,
    pub level: Option<u32>,
    pub pieces_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load using the standard lookup order.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = env::var_os(CONFIG_ENV).map(PathBuf::from);
        match locate(explicit, env_path, Path::new(DEFAULT_CONFIG_FILE)) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(level) = overrides.level {
            self.start_level = level;
        }
        if let Some(dir) = overrides.pieces_dir {
            self.pieces_dir = Some(dir);
        }
        if let Some(file) = overrides.log_file {
            self.log_file = file;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.width) {
            bail!(
                "width {} out of range {MIN_WIDTH}..={MAX_WIDTH}",
                self.width
            );
        }
        if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&self.height) {
            bail!(
                "height {} out of range {MIN_HEIGHT}..={MAX_HEIGHT}",
                self.height
            );
        }
        if self.soft_drop_ms == 0 {
            bail!("soft_drop_ms must be positive");
        }
        Ok(())
    }

    pub fn line_clear_delay(&self) -> Duration {
        Duration::from_millis(self.line_clear_delay_ms)
    }

    pub fn loss_delay(&self) -> Duration {
        Duration::from_millis(self.loss_delay_ms)
    }

    /// Game options for this config. `fallback_seed` is used when no seed is set.
    pub fn game_options(&self, fallback_seed: u32) -> GameOptions {
        GameOptions {
            width: self.width,
            height: self.height,
            start_level: self.start_level,
            seed: self.seed.unwrap_or(fallback_seed),
            soft_drop: Duration::from_millis(self.soft_drop_ms),
            soft_drop_grace: Duration::from_millis(self.soft_drop_grace_ms),
            frame_sleep: Duration::from_millis(self.frame_sleep_ms),
        }
    }
}

/// Pick the config file to read, if any.
///
/// Explicit and environment paths are returned even when missing so that a
/// typo surfaces as an error instead of silently using defaults.
fn locate(explicit: Option<&Path>, env_path: Option<PathBuf>, local: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_path.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path);
    }
    local.is_file().then(|| local.to_path_buf())
}
