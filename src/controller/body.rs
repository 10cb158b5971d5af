use bevy::math::Vec2;

use super::{FrameCommands, ForceCommand, GroundProbe, MovementController, RawInput};

/// Capabilities the controller needs from the simulated body.
///
/// The Rapier adapter in `player::body` implements this over ECS components;
/// tests implement it in memory.
pub trait CharacterBody {
  fn linear_velocity(&self) -> Vec2;

  fn set_linear_velocity(&mut self, velocity: Vec2);

  /// Adds `force` to the force accumulated for the current physics step.
  fn apply_force(&mut self, force: Vec2);

  /// Instantaneous velocity change.
  fn apply_impulse(&mut self, impulse: Vec2);

  fn set_gravity_scale(&mut self, scale: f32);

  /// Samples the three foot probes.
  fn probe_ground(&self) -> GroundProbe;
}

impl MovementController {
  /// Runs the frame decision against `body` and forwards its commands.
  pub fn drive_frame(
    &mut self,
    body: &mut impl CharacterBody,
    raw: RawInput,
    frame_dt: f32,
  ) -> FrameCommands {
    let commands = self.on_frame_input(raw, frame_dt, body.linear_velocity().y);
    if let Some(impulse) = commands.impulse {
      body.apply_impulse(impulse);
    }
    body.set_gravity_scale(commands.gravity_scale);
    commands
  }

  /// Runs one physics step against `body`: samples the probes, applies the
  /// steering force, then refreshes grounded state.
  pub fn drive_physics_step(&mut self, body: &mut impl CharacterBody, dt: f32) -> ForceCommand {
    let probe = body.probe_ground();
    let command = self.on_physics_step(dt, probe);
    body.apply_force(command.force);
    command
  }

  /// Clamps and damps the body's velocity in place.
  pub fn drive_integration(&mut self, body: &mut impl CharacterBody, dt: f32) -> Vec2 {
    let velocity = self.on_integrate_velocity(dt, body.linear_velocity());
    body.set_linear_velocity(velocity);
    velocity
  }
}
