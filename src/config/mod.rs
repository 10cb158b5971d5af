mod plugin;

use std::path::{Path, PathBuf};

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::ConfigPlugin;
pub(crate) use plugin::watch_config_changes;
use serde::Deserialize;
use thiserror::Error;

use crate::controller::{ControllerError, GroundProbeSet, MovementConfig};

/// Config path relative to the asset root.
pub const DEFAULT_CONFIG_PATH: &str = "config/game.config.toml";

/// Extensions the hot-reload asset loader claims. Any `.toml` file under the
/// asset root qualifies.
pub const CONFIG_EXTENSIONS: &[&str] = &["config.toml", "toml"];

#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub player: PlayerConfig,
  pub ground: GroundConfig,
  pub platforms: PlatformsConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),
  #[error(transparent)]
  Controller(#[from] ControllerError),
}

impl GameConfig {
  /// Parses and validates a config document.
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let config: GameConfig = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  /// Checks the player tunables and probes. Shared by startup and hot reload.
  pub fn validate(&self) -> Result<(), ControllerError> {
    self.player.movement.validate()?;
    self.player.probes.probe_set()?;
    Ok(())
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&source)
  }
}

#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
  pub viewport_width: f32,
  pub viewport_height: f32,
  /// Follow smoothing rate, higher is snappier.
  #[serde(default = "default_camera_smoothness")]
  pub smoothness: f32,
}

fn default_camera_smoothness() -> f32 {
  8.0
}

#[derive(Deserialize, Debug, Clone)]
pub struct PhysicsConfig {
  /// Downward gravity magnitude in world units per second squared.
  pub gravity: f32,
  /// World units per physics meter.
  #[serde(default = "default_length_unit")]
  pub length_unit: f32,
  #[serde(default = "default_fixed_hz")]
  pub fixed_hz: f64,
}

fn default_length_unit() -> f32 {
  50.0
}

fn default_fixed_hz() -> f64 {
  60.0
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlayerConfig {
  pub spawn_x: f32,
  pub spawn_y: f32,
  pub collider_radius: f32,
  pub collider_length: f32,
  pub color: [f32; 3],
  #[serde(default)]
  pub movement: MovementConfig,
  pub probes: ProbeConfig,
}

/// Foot probe placement. Offsets are relative to the body origin; each probe
/// casts straight down for `length` units.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProbeConfig {
  pub center: Option<[f32; 2]>,
  pub left: Option<[f32; 2]>,
  pub right: Option<[f32; 2]>,
  pub length: f32,
}

/// A single downward ground ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeRay {
  pub offset: Vec2,
  pub length: f32,
}

impl ProbeConfig {
  pub fn probe_set(&self) -> Result<GroundProbeSet<ProbeRay>, ControllerError> {
    let ray = |offset: Option<[f32; 2]>| {
      offset.map(|[x, y]| ProbeRay {
        offset: Vec2::new(x, y),
        length: self.length,
      })
    };
    GroundProbeSet::try_new(ray(self.center), ray(self.left), ray(self.right))
  }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GroundConfig {
  pub y_position: f32,
  pub width: f32,
  pub height: f32,
  pub color: [f32; 3],
}

/// Seeded staircase of floating platforms. Gaps and rises are sized from the
/// player's jump, so every platform is reachable from the previous one.
#[derive(Deserialize, Debug, Clone)]
pub struct PlatformsConfig {
  pub seed: u64,
  pub count: u32,
  pub width_min: f32,
  pub width_max: f32,
  pub height: f32,
  /// Left edge of the first platform.
  pub x_start: f32,
  /// Highest platform top, measured from the ground surface.
  pub max_rise: f32,
  pub color: [f32; 3],
}

/// Asset-relative path of the config in use.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub String);

impl Default for ConfigPath {
  fn default() -> Self {
    Self(DEFAULT_CONFIG_PATH.to_string())
  }
}

impl ConfigPath {
  /// Whether the asset loader can watch this path. Other files still load at
  /// startup but are never reloaded.
  pub fn is_hot_reloadable(&self) -> bool {
    Path::new(&self.0)
      .extension()
      .is_some_and(|ext| ext == "toml")
  }

  /// Path on disk, resolved against the `assets/` directory.
  pub fn file_path(&self) -> PathBuf {
    Path::new("assets").join(&self.0)
  }
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub player: PlayerConfig,
  pub ground: GroundConfig,
  pub platforms: PlatformsConfig,
}

impl From<GameConfig> for ConfigLoaded {
  fn from(config: GameConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      physics: config.physics,
      player: config.player,
      ground: config.ground,
      platforms: config.platforms,
    }
  }
}
