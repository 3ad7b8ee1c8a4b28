//! Centralized camera-interaction options with TOML preset support.
//!
//! All tunable gesture parameters are consolidated here. Options serialize
//! to/from TOML so applications can ship presets; every struct uses
//! `#[serde(default)]` so partial files (e.g. only overriding
//! `default_depth`) work correctly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::UnicamError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera gesture parameters.
    pub camera: CameraOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, UnicamError> {
        let content = std::fs::read_to_string(path).map_err(UnicamError::Io)?;
        toml::from_str(&content).map_err(|e| UnicamError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), UnicamError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| UnicamError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(UnicamError::Io)?;
        }
        std::fs::write(path, content).map_err(UnicamError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

/// Tunable parameters of the UniCam gesture state machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Depth along the look vector used for the rotation pivot when a click
    /// does not hit any geometry. The right value depends on the scene; a
    /// good choice is the depth of the scene centroid relative to the
    /// camera.
    pub default_depth: f32,
    /// Drag distance in normalized device coordinates that routes the
    /// gesture to pan (horizontal) or dolly (vertical).
    pub drag_threshold: f32,
    /// Seconds to wait for a button-up before ruling out the quick-click
    /// rotation gesture.
    pub decision_timeout: f64,
    /// Smoothed angular velocity (rad/s) above which releasing a rotation
    /// enters the spinning state.
    pub spin_threshold: f32,
    /// Width in seconds of the angular-velocity smoothing window.
    pub velocity_window: f64,
    /// Screen-space offset in normalized device coordinates projected to
    /// the pivot depth to size the trackball bounding sphere.
    pub trackball_size: f32,
    /// Screen-space radius in normalized device coordinates of the pivot
    /// marker sphere.
    pub marker_scale: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            default_depth: 4.0,
            drag_threshold: 0.01,
            decision_timeout: 1.0,
            spin_threshold: 0.2,
            velocity_window: 0.2,
            trackball_size: 0.75,
            marker_scale: 0.015,
        }
    }
}
