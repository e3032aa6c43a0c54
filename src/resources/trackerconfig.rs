//! Tracker configuration resource.
//!
//! Holds the fixed constants of the overlay: detection radius, reconciliation
//! cadence, retention window and beam/label appearance. Values are loaded once
//! at startup from an INI file and never mutated by systems afterwards.
//!
//! # Configuration File Format
//!
//! ```ini
//! [tracking]
//! check_radius = 128
//! cooldown_ms = 5000
//! retention_ms = 660000
//!
//! [beam]
//! red = 1.0
//! green = 0.2
//! blue = 0.2
//! alpha = 0.5
//! width = 0.5
//! height = 2.0
//!
//! [label]
//! offset = 0.5
//! scale = 0.02
//!
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 120
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

const DEFAULT_CHECK_RADIUS: f64 = 128.0;
const DEFAULT_COOLDOWN_MS: u64 = 5_000;
/// Eleven minutes.
const DEFAULT_RETENTION_MS: u64 = 660_000;
const DEFAULT_BEAM_COLOR: [f32; 3] = [1.0, 0.2, 0.2];
const DEFAULT_BEAM_ALPHA: f32 = 0.5;
const DEFAULT_BEAM_WIDTH: f32 = 0.5;
const DEFAULT_BEAM_HEIGHT: f32 = 2.0;
const DEFAULT_LABEL_OFFSET: f32 = 0.5;
const DEFAULT_LABEL_SCALE: f32 = 0.02;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_CONFIG_PATH: &str = "./lastseen.ini";

/// Tracker configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Radius in world units for both drawing and offline notifications.
    pub check_radius: f64,
    /// Minimum time between reconciliation cycles.
    pub cooldown_ms: u64,
    /// How long a stale record is kept after it was last observed.
    pub retention_ms: u64,
    /// Beam RGB color, components in `0.0..=1.0`.
    pub beam_color: [f32; 3],
    /// Constant beam translucency.
    pub beam_alpha: f32,
    /// Full width of the beam prism.
    pub beam_width: f32,
    /// Height of the beam prism above the recorded position.
    pub beam_height: f32,
    /// Gap between the top of the beam and the label anchor.
    pub label_offset: f32,
    /// World units per text pixel.
    pub label_scale: f32,
    /// Viewer window width in pixels.
    pub window_width: u32,
    /// Viewer window height in pixels.
    pub window_height: u32,
    /// Viewer target frames per second.
    pub target_fps: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerConfig {
    /// Create a configuration with the built-in defaults.
    pub fn new() -> Self {
        Self {
            check_radius: DEFAULT_CHECK_RADIUS,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            retention_ms: DEFAULT_RETENTION_MS,
            beam_color: DEFAULT_BEAM_COLOR,
            beam_alpha: DEFAULT_BEAM_ALPHA,
            beam_width: DEFAULT_BEAM_WIDTH,
            beam_height: DEFAULT_BEAM_HEIGHT,
            label_offset: DEFAULT_LABEL_OFFSET,
            label_scale: DEFAULT_LABEL_SCALE,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Squared check radius, compared against squared distances on the render path.
    pub fn check_radius_sq(&self) -> f64 {
        self.check_radius * self.check_radius
    }

    /// Beam color with its alpha, as RGBA.
    pub fn beam_rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.beam_color;
        [r, g, b, self.beam_alpha]
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: radius={}, cooldown={}ms, retention={}ms, beam={}x{}",
            self.check_radius,
            self.cooldown_ms,
            self.retention_ms,
            self.beam_width,
            self.beam_height
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [tracking] section
        if let Some(radius) = config.getfloat("tracking", "check_radius").ok().flatten() {
            if radius.is_finite() && radius >= 0.0 {
                self.check_radius = radius;
            } else {
                warn!(
                    "Ignoring invalid check_radius {}, keeping {}",
                    radius, self.check_radius
                );
            }
        }
        if let Some(cooldown) = config.getuint("tracking", "cooldown_ms").ok().flatten() {
            self.cooldown_ms = cooldown;
        }
        if let Some(retention) = config.getuint("tracking", "retention_ms").ok().flatten() {
            self.retention_ms = retention;
        }

        // [beam] section
        let channels = ["red", "green", "blue"];
        for (slot, key) in self.beam_color.iter_mut().zip(channels) {
            if let Some(v) = config.getfloat("beam", key).ok().flatten() {
                *slot = v as f32;
            }
        }
        if let Some(alpha) = config.getfloat("beam", "alpha").ok().flatten() {
            self.beam_alpha = alpha as f32;
        }
        if let Some(width) = config.getfloat("beam", "width").ok().flatten() {
            self.beam_width = width as f32;
        }
        if let Some(height) = config.getfloat("beam", "height").ok().flatten() {
            self.beam_height = height as f32;
        }

        // [label] section
        if let Some(offset) = config.getfloat("label", "offset").ok().flatten() {
            self.label_offset = offset as f32;
        }
        if let Some(scale) = config.getfloat("label", "scale").ok().flatten() {
            self.label_scale = scale as f32;
        }

        // [window] section
        let window = [
            ("width", &mut self.window_width),
            ("height", &mut self.window_height),
            ("target_fps", &mut self.target_fps),
        ];
        for (key, slot) in window {
            let Some(value) = config.getuint("window", key).ok().flatten() else {
                continue;
            };
            match u32::try_from(value) {
                Ok(v) => *slot = v,
                Err(_) => warn!("Ignoring out of range window {} {}", key, value),
            }
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("tracking", "check_radius", Some(self.check_radius.to_string()));
        config.set("tracking", "cooldown_ms", Some(self.cooldown_ms.to_string()));
        config.set("tracking", "retention_ms", Some(self.retention_ms.to_string()));

        let [r, g, b] = self.beam_color;
        config.set("beam", "red", Some(r.to_string()));
        config.set("beam", "green", Some(g.to_string()));
        config.set("beam", "blue", Some(b.to_string()));
        config.set("beam", "alpha", Some(self.beam_alpha.to_string()));
        config.set("beam", "width", Some(self.beam_width.to_string()));
        config.set("beam", "height", Some(self.beam_height.to_string()));

        config.set("label", "offset", Some(self.label_offset.to_string()));
        config.set("label", "scale", Some(self.label_scale.to_string()));

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
