//! User settings: a JSON file in the platform config directory, layered with
//! environment and command-line overrides.
//!
//! Precedence, lowest to highest: built-in defaults, settings file,
//! `SKYHOP_PROFILE`, command-line flags.

use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, FRAME_MS, MAX_FRAME_DELTA_MS};
use crate::game::{ProfileSelection, TuningOverrides, TuningSource};
use crate::ui::canvas::CellSize;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the profile selection.
pub const PROFILE_ENV: &str = "SKYHOP_PROFILE";

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("could not determine the configuration directory")]
    NoConfigDir,
}

/// Everything a host needs to set up sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub profile: ProfileSelection,
    pub tuning: TuningOverrides,
    /// Simulation frame length in milliseconds.
    pub frame_ms: u64,
    /// Virtual pixels per terminal cell.
    pub cell_width: f64,
    pub cell_height: f64,
    /// Fixed RNG seed for reproducible obstacle layouts.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: ProfileSelection::Auto,
            tuning: TuningOverrides::default(),
            frame_ms: FRAME_MS,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            seed: None,
        }
    }
}

/// Platform directories for settings and logs.
pub fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "skyhop").ok_or(ConfigError::NoConfigDir)
}

impl Settings {
    /// Default settings file location, e.g. `~/.config/skyhop/settings.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(project_dirs()?.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings: Settings =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(PROFILE_ENV) {
            self.profile = value
                .parse()
                .map_err(|reason| ConfigError::Invalid {
                    field: "profile",
                    reason,
                })?;
        }
        Ok(())
    }

    /// Apply command-line flags. Anything given here beats the file and env.
    pub fn apply_cli(&mut self, profile: Option<ProfileSelection>, seed: Option<u64>) {
        if let Some(profile) = profile {
            self.profile = profile;
        }
        if seed.is_some() {
            self.seed = seed;
        }
    }

    /// Read the settings file, then layer env and command-line overrides.
    pub fn resolve<F>(
        path: &Path,
        lookup: F,
        profile: Option<ProfileSelection>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::load(path)?;
        settings.apply_env(lookup)?;
        settings.apply_cli(profile, seed);
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would stall or break the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: Option<f64>) -> Result<(), ConfigError> {
            match value {
                Some(v) if !(v.is_finite() && v > 0.0) => Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {}", v),
                }),
                _ => Ok(()),
            }
        }

        let tuning = &self.tuning;
        positive("tuning.gravity", tuning.gravity)?;
        positive("tuning.scroll_speed", tuning.scroll_speed)?;
        positive("tuning.obstacle_width", tuning.obstacle_width)?;
        positive("tuning.gap_height", tuning.gap_height)?;
        positive("cell_width", Some(self.cell_width))?;
        positive("cell_height", Some(self.cell_height))?;

        if let Some(impulse) = tuning.flap_impulse {
            if !(impulse.is_finite() && impulse < 0.0) {
                return Err(ConfigError::Invalid {
                    field: "tuning.flap_impulse",
                    reason: format!("must be negative (upward), got {}", impulse),
                });
            }
        }
        if tuning.spawn_interval == Some(0) {
            return Err(ConfigError::Invalid {
                field: "tuning.spawn_interval",
                reason: "must be at least one frame".to_string(),
            });
        }
        if self.frame_ms == 0 || self.frame_ms > MAX_FRAME_DELTA_MS {
            return Err(ConfigError::Invalid {
                field: "frame_ms",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_FRAME_DELTA_MS, self.frame_ms
                ),
            });
        }
        Ok(())
    }

    pub fn tuning_source(&self) -> TuningSource {
        TuningSource::Profile {
            selection: self.profile,
            overrides: self.tuning,
        }
    }

    pub fn cell_size(&self) -> CellSize {
        CellSize::new(self.cell_width, self.cell_height)
    }
}
