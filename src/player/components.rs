use bevy::prelude::*;

use crate::config::ProbeRay;
use crate::controller::{GroundProbe, GroundProbeSet, MovementController, RawInput};

#[derive(Component)]
pub struct Player;

#[derive(Component, Debug, Deref, DerefMut)]
pub struct PlayerController(pub MovementController);

/// Input sampled for the current frame.
#[derive(Component, Debug, Default)]
pub struct FrameInput(pub RawInput);

/// Turns the level jump signal into a press edge, so a held key jumps once.
#[derive(Component, Debug, Default)]
pub struct JumpLatch {
  held: bool,
}

impl JumpLatch {
  /// Returns true only on the frame `held` goes from released to pressed.
  pub fn update(&mut self, held: bool) -> bool {
    let pressed = held && !self.held;
    self.held = held;
    pressed
  }
}

/// Downward rays under the left foot, centre and right foot.
#[derive(Component, Debug, Clone)]
pub struct GroundSensors(pub GroundProbeSet<ProbeRay>);

/// Probe signals from the latest physics step.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct GroundContacts(pub GroundProbe);
