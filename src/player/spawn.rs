use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
  FrameInput, GroundContacts, GroundSensors, JumpLatch, Player, PlayerController,
};
use crate::config::{ConfigLoaded, PlayerConfig};
use crate::controller::MovementController;
use crate::input::{PlayerInput, player_input_actions};

pub fn spawn_player(mut commands: Commands, config: Res<ConfigLoaded>) -> Result {
  let player = &config.player;
  let entity = commands.spawn(player_body_bundle(player)?).id();
  commands
    .entity(entity)
    .insert((PlayerInput, player_input_actions()));

  info!("Spawned player at ({}, {})", player.spawn_x, player.spawn_y);
  Ok(())
}

/// Everything the movement systems need on the player entity, minus input
/// bindings.
///
/// Fails when the movement tunables are invalid or a ground probe is missing.
pub fn player_body_bundle(player: &PlayerConfig) -> Result<impl Bundle, BevyError> {
  let controller = MovementController::new(player.movement)?;
  let sensors = GroundSensors(player.probes.probe_set()?);

  // Rapier capsule_y uses half_height (cylinder part) and radius
  let half_height = player.collider_length / 2.0;
  let size = Vec2::new(
    player.collider_radius * 2.0,
    player.collider_length + player.collider_radius * 2.0,
  );

  let body = (
    RigidBody::Dynamic,
    Collider::capsule_y(half_height, player.collider_radius),
    // Unit mass, so a steering force equals its acceleration.
    ColliderMassProperties::Density(0.0),
    AdditionalMassProperties::Mass(1.0),
    LockedAxes::ROTATION_LOCKED,
    Friction {
      coefficient: 0.0,
      combine_rule: CoefficientCombineRule::Min,
    },
    Damping {
      linear_damping: 0.0,
      angular_damping: 0.0,
    },
    Velocity::zero(),
    ExternalForce::default(),
    ExternalImpulse::default(),
    GravityScale(controller.state().gravity_scale),
    Sleeping::disabled(),
  );

  Ok((
    Player,
    Name::new("Player"),
    Sprite {
      color: Color::srgb(player.color[0], player.color[1], player.color[2]),
      custom_size: Some(size),
      ..default()
    },
    Transform::from_xyz(player.spawn_x, player.spawn_y, 10.0),
    body,
    PlayerController(controller),
    FrameInput::default(),
    JumpLatch::default(),
    sensors,
    GroundContacts::default(),
  ))
}
