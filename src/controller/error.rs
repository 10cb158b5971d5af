use std::fmt;

use thiserror::Error;

/// Foot position of a ground probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeSlot {
  Center,
  Left,
  Right,
}

impl ProbeSlot {
  pub const ALL: [ProbeSlot; 3] = [ProbeSlot::Center, ProbeSlot::Left, ProbeSlot::Right];

  pub fn name(self) -> &'static str {
    match self {
      ProbeSlot::Center => "center",
      ProbeSlot::Left => "left",
      ProbeSlot::Right => "right",
    }
  }
}

impl fmt::Display for ProbeSlot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Construction-time failures. Per-call inputs are clamped, never rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ControllerError {
  #[error("movement config field `{field}` has invalid value {value}")]
  InvalidConfig { field: &'static str, value: f32 },

  #[error("ground probe `{0}` is not configured")]
  MissingGroundProbe(ProbeSlot),
}
