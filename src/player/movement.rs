use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use bevy_rapier2d::prelude::*;

use super::body::{BodyParts, RapierBody};
use super::components::{
  FrameInput, GroundContacts, GroundSensors, JumpLatch, Player, PlayerController,
};
use crate::config::ConfigLoaded;
use crate::controller::{GroundProbe, GroundTransition, RawInput};
use crate::input::{Jump, Move, PlayerInput, Run};

/// Runs in Update: samples the input actions into [`FrameInput`].
pub fn read_player_input(
  mut players: Query<(&Actions<PlayerInput>, &mut FrameInput, &mut JumpLatch), With<Player>>,
  move_actions: Query<(&Action<Move>, &ActionState)>,
  jump_actions: Query<&ActionState, With<Action<Jump>>>,
  run_actions: Query<&ActionState, With<Action<Run>>>,
) {
  let active = |state: &ActionState| matches!(state, ActionState::Fired | ActionState::Ongoing);

  for (actions, mut frame_input, mut latch) in &mut players {
    let mut raw = RawInput::default();

    for action_entity in actions.iter() {
      if let Ok((action, state)) = move_actions.get(action_entity) {
        if active(state) {
          raw.move_horizontal = **action;
        }
      }
      if let Ok(state) = jump_actions.get(action_entity) {
        raw.jump_held |= active(state);
      }
      if let Ok(state) = run_actions.get(action_entity) {
        raw.run_held |= active(state);
      }
    }
    raw.jump_pressed = latch.update(raw.jump_held);

    frame_input.0 = raw;
  }
}

/// Runs in Update after [`read_player_input`]: the per-frame controller
/// decision. Sets gravity scale and queues the jump impulse.
pub fn apply_frame_input(
  mut players: Query<(&FrameInput, &mut PlayerController, BodyParts), With<Player>>,
  time: Res<Time>,
) {
  for (frame_input, mut controller, parts) in &mut players {
    let mut body = RapierBody::new(parts, GroundProbe::NONE);
    let commands = controller.drive_frame(&mut body, frame_input.0, time.delta_secs());

    if let Some(impulse) = commands.impulse {
      debug!("Jump: impulse={impulse}");
    }
    if frame_input.0.move_horizontal != 0.0 {
      trace!(
        "Frame: move={:.2}, accel={}, gravity_scale={}, max_velocity={:.1}",
        frame_input.0.move_horizontal,
        commands.steering_force,
        commands.gravity_scale,
        controller.state().max_velocity
      );
    }
  }
}

/// Runs in FixedUpdate before Rapier syncs: drag decision, steering force,
/// then the grounded refresh from the foot probes.
pub fn apply_physics_step(
  mut players: Query<
    (
      Entity,
      &Transform,
      &GroundSensors,
      &mut GroundContacts,
      &mut PlayerController,
      BodyParts,
    ),
    With<Player>,
  >,
  rapier_context: ReadRapierContext,
  time: Res<Time>,
) {
  let Ok(context) = rapier_context.single() else {
    return;
  };
  let dt = time.delta_secs();

  for (entity, transform, sensors, mut contacts, mut controller, parts) in &mut players {
    let origin = transform.translation.truncate();
    let filter = QueryFilter::default()
      .exclude_rigid_body(entity)
      .exclude_sensors();

    let probe = sensors.0.sample(|_, ray| {
      context
        .cast_ray(origin + ray.offset, Vec2::NEG_Y, ray.length, true, filter)
        .is_some()
    });
    contacts.0 = probe;

    let mut body = RapierBody::new(parts, probe);
    body.reset_force();
    let command = controller.drive_physics_step(&mut body, dt);

    match command.transition {
      Some(GroundTransition::Landed) => debug!("Landed at {origin}"),
      Some(GroundTransition::LeftGround) => debug!("Left ground at {origin}"),
      None => {}
    }
    trace!(
      "Step: force={}, drag={}, probe={:?}",
      command.force, command.drag, probe
    );
  }
}

/// Runs in FixedUpdate after [`apply_physics_step`]: ground speed cap and
/// stop drag on the body's velocity.
pub fn integrate_velocity(
  mut players: Query<(&mut PlayerController, BodyParts), With<Player>>,
  time: Res<Time>,
) {
  for (mut controller, parts) in &mut players {
    let mut body = RapierBody::new(parts, GroundProbe::NONE);
    controller.drive_integration(&mut body, time.delta_secs());
  }
}

/// Swaps in reloaded movement tunables and foot probes. An invalid section is
/// logged and the previous one kept.
pub fn apply_player_config(
  config: Res<ConfigLoaded>,
  mut players: Query<(&mut PlayerController, &mut GroundSensors), With<Player>>,
) {
  if !config.is_changed() {
    return;
  }

  let movement = config.player.movement;
  for (mut controller, mut sensors) in &mut players {
    if *controller.config() != movement {
      match controller.reconfigure(movement) {
        Ok(()) => info!("Movement config applied"),
        Err(err) => warn!("Keeping previous movement config: {err}"),
      }
    }

    match config.player.probes.probe_set() {
      Ok(probes) if probes != sensors.0 => {
        sensors.0 = probes;
        info!("Ground probes applied");
      }
      Ok(_) => {}
      Err(err) => warn!("Keeping previous ground probes: {err}"),
    }
  }
}
