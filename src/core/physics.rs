use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Downward gravity magnitude fed to Rapier. Bodies scale it through their
/// own `GravityScale`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GravityConfig {
  pub value: f32,
}

/// Rapier running in `FixedUpdate`, so the player's fixed-step systems and the
/// solver share one cadence.
pub struct PhysicsPlugin {
  pub length_unit: f32,
  pub gravity: f32,
}

impl Plugin for PhysicsPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(
        RapierPhysicsPlugin::<NoUserData>::default()
          .with_length_unit(self.length_unit)
          .in_fixed_schedule(),
      )
      .insert_resource(GravityConfig {
        value: self.gravity,
      })
      .add_systems(FixedUpdate, sync_gravity.before(PhysicsSet::SyncBackend));
  }
}

/// Pushes [`GravityConfig`] into every Rapier context.
pub fn sync_gravity(gravity: Res<GravityConfig>, mut contexts: Query<&mut RapierConfiguration>) {
  let target = Vec2::new(0.0, -gravity.value);
  for mut config in &mut contexts {
    if config.gravity != target {
      debug!("Rapier gravity set to {target}");
      config.gravity = target;
    }
  }
}
