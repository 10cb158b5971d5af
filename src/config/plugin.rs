use bevy::{
  asset::AssetEvent, camera::ScalingMode, ecs::message::MessageReader, prelude::*,
  window::PrimaryWindow,
};
use bevy_common_assets::toml::TomlAssetPlugin;

use super::{CONFIG_EXTENSIONS, ConfigHandle, ConfigLoaded, ConfigPath, GameConfig};
use crate::core::GravityConfig;

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<ConfigPath>()
      .add_plugins(TomlAssetPlugin::<GameConfig>::new(CONFIG_EXTENSIONS))
      .add_systems(PreStartup, load_config_sync)
      .add_systems(
        Update,
        (
          watch_config_changes,
          update_window_on_config_change,
          update_gravity_on_config_change,
          update_camera_on_config_change,
        ),
      );
  }
}

/// Sets up the hot-reload handle and, unless the app was built with a config
/// already in place, loads it from disk.
fn load_config_sync(
  mut commands: Commands,
  path: Res<ConfigPath>,
  asset_server: Res<AssetServer>,
  loaded: Option<Res<ConfigLoaded>>,
) -> Result {
  if !path.is_hot_reloadable() {
    warn!("{} is not a .toml file, config hot reload is off", path.0);
  }
  let handle: Handle<GameConfig> = asset_server.load(path.0.clone());
  commands.insert_resource(ConfigHandle(handle));

  if loaded.is_none() {
    let config = GameConfig::load(path.file_path())?;
    info!("Loaded config from {}", path.0);
    commands.insert_resource(ConfigLoaded::from(config));
  }

  Ok(())
}

/// Publishes a modified config asset as [`ConfigLoaded`] once it validates.
pub(crate) fn watch_config_changes(
  mut commands: Commands,
  config_handle: Res<ConfigHandle>,
  mut messages: MessageReader<AssetEvent<GameConfig>>,
  configs: Res<Assets<GameConfig>>,
) {
  for event in messages.read() {
    let AssetEvent::Modified { id } = event else {
      continue;
    };
    if config_handle.0.id() != *id {
      continue;
    }
    let Some(config) = configs.get(&config_handle.0) else {
      continue;
    };

    match config.validate() {
      Ok(()) => {
        info!("Config reloaded!");
        commands.insert_resource(ConfigLoaded::from(config.clone()));
      }
      Err(err) => warn!("Ignoring config reload: {err}"),
    }
  }
}

fn update_window_on_config_change(
  config: Res<ConfigLoaded>,
  mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
  if config.is_changed() {
    if let Ok(mut window) = windows.single_mut() {
      window
        .resolution
        .set(config.window.width as f32, config.window.height as f32);
      window.title.clone_from(&config.window.title);
    }
  }
}

fn update_gravity_on_config_change(config: Res<ConfigLoaded>, mut gravity: ResMut<GravityConfig>) {
  if config.is_changed() && gravity.value != config.physics.gravity {
    gravity.value = config.physics.gravity;
  }
}

fn update_camera_on_config_change(
  config: Res<ConfigLoaded>,
  mut camera_query: Query<&mut Projection, With<Camera2d>>,
) {
  if config.is_changed() {
    for mut projection in camera_query.iter_mut() {
      if let Projection::Orthographic(ref mut ortho) = *projection {
        ortho.scaling_mode = ScalingMode::AutoMin {
          min_width: config.camera.viewport_width,
          min_height: config.camera.viewport_height,
        };
      }
    }
  }
}
