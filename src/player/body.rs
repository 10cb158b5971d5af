use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::controller::{CharacterBody, GroundProbe};

/// [`CharacterBody`] over a Rapier dynamic body's components.
///
/// Writes go through `Mut`, so components are only flagged as changed (and
/// re-synced into Rapier) when a value actually differs.
pub struct RapierBody<'w> {
  pub velocity: Mut<'w, Velocity>,
  pub force: Mut<'w, ExternalForce>,
  pub impulse: Mut<'w, ExternalImpulse>,
  pub gravity_scale: Mut<'w, GravityScale>,
  /// Probe signals sampled before the step. Only read by the physics step.
  pub probe: GroundProbe,
}

/// Body components the controller drives, as a query fragment.
pub type BodyParts = (
  &'static mut Velocity,
  &'static mut ExternalForce,
  &'static mut ExternalImpulse,
  &'static mut GravityScale,
);

impl<'w> RapierBody<'w> {
  pub fn new(
    (velocity, force, impulse, gravity_scale): (
      Mut<'w, Velocity>,
      Mut<'w, ExternalForce>,
      Mut<'w, ExternalImpulse>,
      Mut<'w, GravityScale>,
    ),
    probe: GroundProbe,
  ) -> Self {
    Self {
      velocity,
      force,
      impulse,
      gravity_scale,
      probe,
    }
  }

  /// Clears the force accumulated for the previous step. Rapier keeps
  /// `ExternalForce` until it is overwritten.
  pub fn reset_force(&mut self) {
    if self.force.force != Vec2::ZERO {
      self.force.force = Vec2::ZERO;
    }
  }
}

impl CharacterBody for RapierBody<'_> {
  fn linear_velocity(&self) -> Vec2 {
    self.velocity.linvel
  }

  fn set_linear_velocity(&mut self, velocity: Vec2) {
    if self.velocity.linvel != velocity {
      self.velocity.linvel = velocity;
    }
  }

  fn apply_force(&mut self, force: Vec2) {
    if force != Vec2::ZERO {
      self.force.force += force;
    }
  }

  fn apply_impulse(&mut self, impulse: Vec2) {
    self.impulse.impulse += impulse;
  }

  fn set_gravity_scale(&mut self, scale: f32) {
    if self.gravity_scale.0 != scale {
      self.gravity_scale.0 = scale;
    }
  }

  fn probe_ground(&self) -> GroundProbe {
    self.probe
  }
}
