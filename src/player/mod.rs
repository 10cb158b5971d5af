pub mod body;
pub mod components;
pub mod movement;
mod spawn;


use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
pub use spawn::{player_body_bundle, spawn_player};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, spawn_player)
      // Update: once per rendered frame
      .add_systems(
        Update,
        (
          movement::apply_player_config,
          movement::read_player_input,
          movement::apply_frame_input,
        )
          .chain(),
      )
      // FixedUpdate: once per physics step, ahead of the Rapier step
      .add_systems(
        FixedUpdate,
        (movement::apply_physics_step, movement::integrate_velocity)
          .chain()
          .before(PhysicsSet::SyncBackend),
      );
  }
}
