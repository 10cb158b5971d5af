use serde::Deserialize;

use super::error::ControllerError;

/// Tunables for a [`MovementController`](super::MovementController).
///
/// Loaded once and never mutated afterwards. Swapping configs replaces the
/// whole value (see [`MovementController::reconfigure`](super::MovementController::reconfigure)).
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MovementConfig {
  /// Speed at which the body accelerates while being steered.
  pub acceleration_speed: f32,
  /// Scales base acceleration while running on the ground.
  pub acceleration_run_scale: f32,
  /// Scales base acceleration while airborne. Must lie in `[0, 1]`.
  pub acceleration_aerial_scale: f32,
  pub max_walk_velocity: f32,
  pub max_run_velocity: f32,
  /// Drag applied when the body stops steering on the ground. X axis only.
  pub stop_drag: f32,
  /// Magnitude of the jump impulse.
  pub jump_force: f32,
  /// Gravity scale while jump is held and the body is ascending.
  pub jump_gravity_scale: f32,
  /// Gravity scale for every other airborne case.
  pub fall_gravity_scale: f32,
}

impl Default for MovementConfig {
  fn default() -> Self {
    Self {
      acceleration_speed: 250.0,
      acceleration_run_scale: 1.5,
      acceleration_aerial_scale: 0.25,
      max_walk_velocity: 300.0,
      max_run_velocity: 600.0,
      stop_drag: 15.0,
      jump_force: 300.0,
      jump_gravity_scale: 1.0,
      fall_gravity_scale: 3.5,
    }
  }
}

impl MovementConfig {
  /// Checks every tunable is finite and positive, and the aerial scale is a
  /// fraction.
  pub fn validate(&self) -> Result<(), ControllerError> {
    let positive = [
      ("acceleration_speed", self.acceleration_speed),
      ("acceleration_run_scale", self.acceleration_run_scale),
      ("max_walk_velocity", self.max_walk_velocity),
      ("max_run_velocity", self.max_run_velocity),
      ("stop_drag", self.stop_drag),
      ("jump_force", self.jump_force),
      ("jump_gravity_scale", self.jump_gravity_scale),
      ("fall_gravity_scale", self.fall_gravity_scale),
    ];
    for (field, value) in positive {
      if !value.is_finite() || value <= 0.0 {
        return Err(ControllerError::InvalidConfig { field, value });
      }
    }

    let aerial = self.acceleration_aerial_scale;
    if !(0.0..=1.0).contains(&aerial) {
      return Err(ControllerError::InvalidConfig {
        field: "acceleration_aerial_scale",
        value: aerial,
      });
    }

    Ok(())
  }

  /// Lower and upper bound of the smoothed speed cap.
  pub fn velocity_bounds(&self) -> (f32, f32) {
    (
      self.max_walk_velocity.min(self.max_run_velocity),
      self.max_walk_velocity.max(self.max_run_velocity),
    )
  }
}
