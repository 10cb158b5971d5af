pub(crate) mod camera;
mod physics;

use bevy::prelude::*;
pub use physics::{GravityConfig, PhysicsPlugin, sync_gravity};

/// Camera and physics backend. Needs [`ConfigLoaded`](crate::config::ConfigLoaded)
/// at startup.
pub struct CorePlugin {
  pub length_unit: f32,
  pub gravity: f32,
}

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(PhysicsPlugin {
        length_unit: self.length_unit,
        gravity: self.gravity,
      })
      .add_systems(Startup, camera::setup_camera)
      .add_systems(Update, camera::camera_follow);
  }
}
