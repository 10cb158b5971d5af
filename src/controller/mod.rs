//! Engine-agnostic platformer movement controller.
//!
//! The controller is driven at two cadences by its host:
//!
//! 1. [`MovementController::on_frame_input`] once per rendered frame,
//! 2. [`MovementController::on_physics_step`] then
//!    [`MovementController::on_integrate_velocity`] once per fixed physics
//!    step.
//!
//! Grounded state is refreshed only at the end of a physics step, so frame
//! decisions and the following integration always see the value written by the
//! previous step.

mod body;
mod config;
mod error;
mod probe;

#[cfg(test)]
mod tests;

use bevy::math::Vec2;
pub use body::CharacterBody;
pub use config::MovementConfig;
pub use error::{ControllerError, ProbeSlot};
pub use probe::{GroundProbe, GroundProbeSet};

/// Axis values at or below this magnitude count as "not steering".
pub const MOVING_THRESHOLD: f32 = 1e-3;

/// Rate constant for the exponential approach of the speed cap.
pub const VELOCITY_TRANSITION_SPEED: f32 = 10.0;

/// Raw per-frame input as read from the input source.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RawInput {
  pub move_horizontal: f32,
  /// Jump went down this frame.
  pub jump_pressed: bool,
  pub jump_held: bool,
  pub run_held: bool,
}

/// Input as seen by the controller for one frame. Replaced wholesale every
/// frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
  pub move_horizontal: f32,
  pub is_moving: bool,
  pub is_jump_press: bool,
  pub is_jump_hold: bool,
  pub is_run_hold: bool,
}

impl InputSnapshot {
  pub fn from_raw(raw: RawInput) -> Self {
    let move_horizontal = if raw.move_horizontal.is_nan() {
      0.0
    } else {
      raw.move_horizontal.clamp(-1.0, 1.0)
    };

    Self {
      move_horizontal,
      is_moving: move_horizontal.abs() > MOVING_THRESHOLD,
      is_jump_press: raw.jump_pressed,
      is_jump_hold: raw.jump_held,
      is_run_hold: raw.run_held,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
  pub is_grounded: bool,
  /// Steering acceleration. `y` is always zero.
  pub acceleration: Vec2,
  /// Smoothed horizontal speed cap, enforced only on the ground.
  pub max_velocity: f32,
  pub drag: f32,
  pub gravity_scale: f32,
  /// Most recent non-negative step duration seen by any entry point.
  pub last_dt: f32,
}

/// What a frame decision asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCommands {
  /// One-shot jump impulse, present only on the frame the jump fires.
  pub impulse: Option<Vec2>,
  pub gravity_scale: f32,
  /// Force the next physics step will request.
  pub steering_force: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTransition {
  Landed,
  LeftGround,
}

/// What a physics step asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceCommand {
  /// Force to add to the body for this step.
  pub force: Vec2,
  /// Drag decided for this step, consumed by the integration pass.
  pub drag: f32,
  /// Grounded state written at the end of the step.
  pub grounded: bool,
  pub transition: Option<GroundTransition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementController {
  config: MovementConfig,
  input: InputSnapshot,
  state: ControllerState,
}

impl Default for MovementController {
  fn default() -> Self {
    Self::from_valid(MovementConfig::default())
  }
}

impl MovementController {
  pub fn new(config: MovementConfig) -> Result<Self, ControllerError> {
    config.validate()?;
    Ok(Self::from_valid(config))
  }

  fn from_valid(config: MovementConfig) -> Self {
    Self {
      config,
      input: InputSnapshot::default(),
      state: ControllerState {
        is_grounded: false,
        acceleration: Vec2::ZERO,
        max_velocity: config.max_walk_velocity,
        drag: 0.0,
        gravity_scale: config.fall_gravity_scale,
        last_dt: 0.0,
      },
    }
  }

  pub fn config(&self) -> &MovementConfig {
    &self.config
  }

  pub fn input(&self) -> &InputSnapshot {
    &self.input
  }

  pub fn state(&self) -> &ControllerState {
    &self.state
  }

  pub fn is_grounded(&self) -> bool {
    self.state.is_grounded
  }

  /// Replaces the whole config. Runtime state is kept, with the speed cap
  /// pulled into the new walk/run range.
  pub fn reconfigure(&mut self, config: MovementConfig) -> Result<(), ControllerError> {
    config.validate()?;
    self.config = config;
    let (lo, hi) = config.velocity_bounds();
    self.state.max_velocity = self.state.max_velocity.clamp(lo, hi);
    Ok(())
  }

  /// Per-frame decision: steering acceleration, jump trigger, gravity mode and
  /// speed cap smoothing.
  ///
  /// `vertical_velocity` is the body's current world-space `vy` (Y up).
  pub fn on_frame_input(
    &mut self,
    raw: RawInput,
    frame_dt: f32,
    vertical_velocity: f32,
  ) -> FrameCommands {
    self.record_dt(frame_dt);
    self.input = InputSnapshot::from_raw(raw);

    let grounded = self.state.is_grounded;
    let config = &self.config;

    let mut acc = config.acceleration_speed;
    if grounded {
      if self.input.is_run_hold {
        acc *= config.acceleration_run_scale;
      }
    } else {
      acc *= config.acceleration_aerial_scale;
    }
    self.state.acceleration = Vec2::new(self.input.move_horizontal * acc, 0.0);

    let impulse = (grounded && self.input.is_jump_press).then(|| Vec2::Y * config.jump_force);

    self.state.gravity_scale = if grounded {
      0.0
    } else if self.input.is_jump_hold && vertical_velocity > 0.0 {
      config.jump_gravity_scale
    } else {
      config.fall_gravity_scale
    };

    let target = if self.input.is_run_hold {
      config.max_run_velocity
    } else {
      config.max_walk_velocity
    };
    let t = clamp01(frame_dt * VELOCITY_TRANSITION_SPEED);
    let (lo, hi) = config.velocity_bounds();
    self.state.max_velocity = lerp(self.state.max_velocity, target, t).clamp(lo, hi);

    FrameCommands {
      impulse,
      gravity_scale: self.state.gravity_scale,
      steering_force: self.state.acceleration,
    }
  }

  /// Per-physics-step decision: drag, steering force, then the grounded
  /// refresh from `probe`.
  ///
  /// Drag uses the grounded value from the previous step and the input from
  /// the previous frame. The new grounded value is written last.
  pub fn on_physics_step(&mut self, dt: f32, probe: GroundProbe) -> ForceCommand {
    self.record_dt(dt);

    let was_grounded = self.state.is_grounded;
    self.state.drag = if was_grounded && !self.input.is_moving {
      self.config.stop_drag
    } else {
      0.0
    };

    let force = if dt > 0.0 {
      self.state.acceleration
    } else {
      Vec2::ZERO
    };

    let grounded = probe.any();
    self.state.is_grounded = grounded;

    let transition = match (was_grounded, grounded) {
      (false, true) => Some(GroundTransition::Landed),
      (true, false) => Some(GroundTransition::LeftGround),
      _ => None,
    };

    ForceCommand {
      force,
      drag: self.state.drag,
      grounded,
      transition,
    }
  }

  /// Velocity integration pass: ground speed cap, then drag decay on `vx`.
  /// `vy` passes through.
  pub fn on_integrate_velocity(&mut self, dt: f32, velocity: Vec2) -> Vec2 {
    self.record_dt(dt);
    self.integrate_with_last_dt(velocity)
  }

  /// Same as [`Self::on_integrate_velocity`] for hosts whose integration
  /// phase carries no duration. Uses the last recorded step duration.
  ///
  /// The decay is not clamped: when `dt * drag > 1` the horizontal velocity
  /// overshoots and flips sign.
  pub fn integrate_with_last_dt(&self, velocity: Vec2) -> Vec2 {
    let mut vx = velocity.x;

    if self.state.is_grounded {
      let max = self.state.max_velocity;
      vx = vx.clamp(-max, max);
    }

    let dt = self.state.last_dt;
    if dt > 0.0 {
      vx *= 1.0 - dt * self.state.drag;
    }

    Vec2::new(vx, velocity.y)
  }

  fn record_dt(&mut self, dt: f32) {
    self.state.last_dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
  }
}

fn clamp01(x: f32) -> f32 {
  if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
  from + (to - from) * t
}
