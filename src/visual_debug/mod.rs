use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use bevy_rapier2d::prelude::*;

use crate::player::components::{GroundContacts, GroundSensors, Player, PlayerController};

/// Resource for frame-by-frame debug mode
#[derive(Resource, Default)]
pub struct FrameStepMode {
  pub enabled: bool,
  advance_requested: bool,
}

/// Whether the controller state panel is shown. Toggled with F3.
#[derive(Resource)]
pub struct ControllerPanelVisible(pub bool);

impl Default for ControllerPanelVisible {
  fn default() -> Self {
    Self(true)
  }
}

pub struct VisualDebugPlugin;

impl Plugin for VisualDebugPlugin {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
      app.add_plugins(EguiPlugin::default());
    }
    app
      .init_resource::<FrameStepMode>()
      .init_resource::<ControllerPanelVisible>()
      .add_systems(PreUpdate, (frame_step_control, toggle_controller_panel))
      .add_systems(Update, draw_debug_vectors)
      .add_systems(
        EguiPrimaryContextPass,
        show_controller_panel.run_if(|visible: Res<ControllerPanelVisible>| visible.0),
      );
  }
}

/// Controls frame-by-frame stepping mode
/// F5: Toggle frame-step mode
/// Period: Advance one frame (when in frame-step mode)
fn frame_step_control(
  keyboard: Res<ButtonInput<KeyCode>>,
  mut frame_step: ResMut<FrameStepMode>,
  mut time: ResMut<Time<Virtual>>,
) {
  if keyboard.just_pressed(KeyCode::F5) {
    frame_step.enabled = !frame_step.enabled;
    if frame_step.enabled {
      time.pause();
      info!("Frame-step mode ENABLED (press . to advance, F5 to disable)");
    } else {
      time.unpause();
      info!("Frame-step mode DISABLED");
    }
  }

  if frame_step.enabled {
    if keyboard.just_pressed(KeyCode::Period) {
      frame_step.advance_requested = true;
      time.unpause();
    } else if frame_step.advance_requested {
      frame_step.advance_requested = false;
      time.pause();
    }
  }
}

fn toggle_controller_panel(
  keyboard: Res<ButtonInput<KeyCode>>,
  mut visible: ResMut<ControllerPanelVisible>,
) {
  if keyboard.just_pressed(KeyCode::F3) {
    visible.0 = !visible.0;
  }
}

/// Draws velocity (yellow), steering force (green) and the foot probes (red
/// when clear, cyan on contact).
fn draw_debug_vectors(
  mut gizmos: Gizmos,
  players: Query<
    (
      &Transform,
      &Velocity,
      &PlayerController,
      &GroundSensors,
      &GroundContacts,
    ),
    With<Player>,
  >,
) {
  const VELOCITY_SCALE: f32 = 0.25;
  const FORCE_SCALE: f32 = 0.2;

  for (transform, velocity, controller, sensors, contacts) in &players {
    let position = transform.translation.truncate();

    if velocity.linvel.length_squared() > 0.01 {
      gizmos.line_2d(
        position,
        position + velocity.linvel * VELOCITY_SCALE,
        Color::srgb(1.0, 1.0, 0.0),
      );
    }

    let force = controller.state().acceleration;
    if force != Vec2::ZERO {
      gizmos.line_2d(
        position,
        position + force * FORCE_SCALE,
        Color::srgb(0.0, 1.0, 0.0),
      );
    }

    let hits = [contacts.0.center, contacts.0.left, contacts.0.right];
    let rays = [&sensors.0.center, &sensors.0.left, &sensors.0.right];
    for (ray, hit) in rays.into_iter().zip(hits) {
      let start = position + ray.offset;
      let end = start - Vec2::Y * ray.length;
      let color = if hit {
        Color::srgb(0.0, 1.0, 1.0)
      } else {
        Color::srgb(1.0, 0.2, 0.2)
      };
      gizmos.line_2d(start, end, color);
    }
  }
}

fn show_controller_panel(
  mut contexts: EguiContexts,
  players: Query<(&PlayerController, &Velocity), With<Player>>,
) {
  let Ok(ctx) = contexts.ctx_mut() else { return };
  let Ok((controller, velocity)) = players.single() else {
    return;
  };
  let state = controller.state();
  let input = controller.input();

  egui::Window::new("Controller")
    .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
    .resizable(false)
    .show(ctx, |ui| {
      ui.label(format!(
        "grounded: {}",
        if state.is_grounded { "yes" } else { "no" }
      ));
      ui.label(format!(
        "velocity: ({:.1}, {:.1})",
        velocity.linvel.x, velocity.linvel.y
      ));
      ui.label(format!("max velocity: {:.1}", state.max_velocity));
      ui.label(format!("acceleration: {:.1}", state.acceleration.x));
      ui.label(format!("drag: {:.1}", state.drag));
      ui.label(format!("gravity scale: {:.2}", state.gravity_scale));
      ui.separator();
      ui.label(format!("move: {:.2}", input.move_horizontal));
      ui.label(format!(
        "jump: {}  run: {}",
        input.is_jump_hold, input.is_run_hold
      ));
    });
}
