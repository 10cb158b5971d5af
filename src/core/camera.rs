use bevy::{camera::ScalingMode, prelude::*};

use crate::config::ConfigLoaded;
use crate::player::components::Player;

/// Marker component for the game camera
#[derive(Component)]
pub struct GameCamera;

/// Simple orthographic 2D camera setup
pub fn setup_camera(mut commands: Commands, config: Res<ConfigLoaded>) {
  commands.spawn((
    GameCamera,
    Camera2d,
    Camera {
      order: 0,
      clear_color: ClearColorConfig::Custom(Color::srgb(0.08, 0.09, 0.12)),
      ..default()
    },
    Projection::Orthographic(OrthographicProjection {
      near: -1000.0,
      far: 1000.0,
      scale: 1.0,
      viewport_origin: Vec2::new(0.5, 0.5),
      scaling_mode: ScalingMode::AutoMin {
        min_width: config.camera.viewport_width,
        min_height: config.camera.viewport_height,
      },
      area: Rect::default(),
    }),
    Transform::from_xyz(config.player.spawn_x, config.player.spawn_y, 0.0),
  ));
}

/// Eases the camera toward the player. Runs after the fixed steps so it sees
/// this frame's body position.
pub fn camera_follow(
  config: Res<ConfigLoaded>,
  player_query: Query<&Transform, (With<Player>, Without<GameCamera>)>,
  mut camera_query: Query<&mut Transform, With<GameCamera>>,
  time: Res<Time>,
) {
  let Ok(player) = player_query.single() else {
    return;
  };
  let Ok(mut camera) = camera_query.single_mut() else {
    return;
  };

  let t = (config.camera.smoothness * time.delta_secs()).clamp(0.0, 1.0);
  let target = player.translation.truncate();
  let current = camera.translation.truncate();
  let next = current.lerp(target, t);
  camera.translation.x = next.x;
  camera.translation.y = next.y;
}
