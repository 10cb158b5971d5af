use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::{ConfigLoaded, PlatformsConfig};
use crate::controller::MovementConfig;

/// Static walkable surface.
#[derive(Component)]
pub struct Platform;

/// What a single held jump from flat ground covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpReach {
  /// Apex above the take-off surface.
  pub height: f32,
  /// Horizontal distance at the top speed cap, back down to take-off height.
  pub distance: f32,
}

impl JumpReach {
  /// Ballistic estimate for a unit-mass body: the impulse is the launch speed,
  /// the rise uses the jump gravity scale and the fall the fall scale.
  pub fn new(movement: &MovementConfig, gravity: f32) -> Self {
    let gravity = gravity.max(f32::EPSILON);
    let rise_gravity = gravity * movement.jump_gravity_scale;
    let fall_gravity = gravity * movement.fall_gravity_scale;
    let launch = movement.jump_force;

    let height = launch * launch / (2.0 * rise_gravity);
    let airtime = launch / rise_gravity + (2.0 * height / fall_gravity).sqrt();
    let (_, top_speed) = movement.velocity_bounds();

    Self {
      height,
      distance: top_speed * airtime,
    }
  }
}

// Fractions of the jump envelope used between consecutive platforms.
const RISE_RANGE: std::ops::RangeInclusive<f32> = -0.6..=0.7;
const GAP_RANGE: std::ops::RangeInclusive<f32> = 0.25..=0.6;

/// Lays out a left-to-right staircase starting from the ground surface.
/// Each platform's top is within the jump height of the previous one and the
/// gap between them is within the jump distance.
pub fn layout_platforms(config: &PlatformsConfig, ground_top: f32, reach: JumpReach) -> Vec<Rect> {
  let mut rng = StdRng::seed_from_u64(config.seed);
  let floor = ground_top + config.height;
  let ceiling = ground_top + config.max_rise;

  let mut rects = Vec::with_capacity(config.count as usize);
  let mut left = config.x_start;
  let mut top = ground_top;

  for _ in 0..config.count {
    let width = rng.random_range(config.width_min..=config.width_max);
    let rise = reach.height * rng.random_range(RISE_RANGE);
    top = (top + rise).min(ceiling).max(floor);

    rects.push(Rect::new(left, top - config.height, left + width, top));
    left += width + reach.distance * rng.random_range(GAP_RANGE);
  }

  rects
}

pub fn spawn_platforms(mut commands: Commands, config: Res<ConfigLoaded>) {
  let ground = &config.ground;
  let platforms = &config.platforms;
  let ground_top = ground.y_position + ground.height / 2.0;
  let reach = JumpReach::new(&config.player.movement, config.physics.gravity);

  // Rapier cuboid uses half-extents
  commands.spawn((
    Platform,
    Name::new("Ground"),
    Sprite::from_color(
      Color::srgb(ground.color[0], ground.color[1], ground.color[2]),
      Vec2::new(ground.width, ground.height),
    ),
    Transform::from_xyz(0.0, ground.y_position, 0.0),
    RigidBody::Fixed,
    Collider::cuboid(ground.width / 2.0, ground.height / 2.0),
  ));

  let color = Color::srgb(platforms.color[0], platforms.color[1], platforms.color[2]);
  let rects = layout_platforms(platforms, ground_top, reach);
  for (i, rect) in rects.iter().enumerate() {
    let size = rect.size();
    commands.spawn((
      Platform,
      Name::new(format!("Platform {i}")),
      Sprite::from_color(color, size),
      Transform::from_translation(rect.center().extend(0.0)),
      RigidBody::Fixed,
      Collider::cuboid(size.x / 2.0, size.y / 2.0),
    ));
  }

  debug!(
    "Spawned ground and {} platforms (jump height {:.1}, distance {:.1})",
    rects.len(),
    reach.height,
    reach.distance
  );
}
