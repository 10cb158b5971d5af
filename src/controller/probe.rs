use super::error::{ControllerError, ProbeSlot};

/// Contact signals sampled by the three foot probes during one physics step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GroundProbe {
  pub center: bool,
  pub left: bool,
  pub right: bool,
}

impl GroundProbe {
  pub const NONE: Self = Self {
    center: false,
    left: false,
    right: false,
  };

  pub const ALL: Self = Self {
    center: true,
    left: true,
    right: true,
  };

  /// Any contact counts as grounded.
  pub fn any(&self) -> bool {
    self.center || self.left || self.right
  }
}

/// The three probe collaborators, one per foot position.
///
/// Can only be built with all three present. A missing probe fails here, at
/// construction, instead of on every step.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundProbeSet<P> {
  pub center: P,
  pub left: P,
  pub right: P,
}

impl<P> GroundProbeSet<P> {
  pub fn try_new(
    center: Option<P>,
    left: Option<P>,
    right: Option<P>,
  ) -> Result<Self, ControllerError> {
    Ok(Self {
      center: center.ok_or(ControllerError::MissingGroundProbe(ProbeSlot::Center))?,
      left: left.ok_or(ControllerError::MissingGroundProbe(ProbeSlot::Left))?,
      right: right.ok_or(ControllerError::MissingGroundProbe(ProbeSlot::Right))?,
    })
  }

  pub fn get(&self, slot: ProbeSlot) -> &P {
    match slot {
      ProbeSlot::Center => &self.center,
      ProbeSlot::Left => &self.left,
      ProbeSlot::Right => &self.right,
    }
  }

  /// Runs `query` against each probe and collects the contact signals.
  pub fn sample(&self, mut query: impl FnMut(ProbeSlot, &P) -> bool) -> GroundProbe {
    GroundProbe {
      center: query(ProbeSlot::Center, &self.center),
      left: query(ProbeSlot::Left, &self.left),
      right: query(ProbeSlot::Right, &self.right),
    }
  }
}
