use bevy::math::Vec2;

use super::*;

const FIXED_DT: f32 = 1.0 / 60.0;

fn idle() -> RawInput {
  RawInput::default()
}

fn steer(move_horizontal: f32) -> RawInput {
  RawInput {
    move_horizontal,
    ..RawInput::default()
  }
}

/// A controller whose last physics step saw ground under all probes.
fn grounded_controller() -> MovementController {
  let mut controller = MovementController::default();
  controller.on_physics_step(FIXED_DT, GroundProbe::ALL);
  assert!(controller.is_grounded());
  controller
}

fn approx(a: f32, b: f32) -> bool {
  (a - b).abs() < 1e-4
}

#[test]
fn grounded_walk_uses_base_acceleration() {
  let mut controller = grounded_controller();
  let commands = controller.on_frame_input(steer(1.0), FIXED_DT, 0.0);

  assert_eq!(commands.steering_force, Vec2::new(250.0, 0.0));
  assert_eq!(controller.state().acceleration, Vec2::new(250.0, 0.0));
}

#[test]
fn grounded_run_scales_acceleration() {
  let mut controller = grounded_controller();
  let raw = RawInput {
    move_horizontal: -1.0,
    run_held: true,
    ..RawInput::default()
  };
  let commands = controller.on_frame_input(raw, FIXED_DT, 0.0);

  assert_eq!(commands.steering_force, Vec2::new(-375.0, 0.0));
}

#[test]
fn airborne_acceleration_uses_aerial_scale_regardless_of_run() {
  for run_held in [false, true] {
    let mut controller = MovementController::default();
    assert!(!controller.is_grounded());

    let raw = RawInput {
      move_horizontal: 1.0,
      run_held,
      ..RawInput::default()
    };
    let commands = controller.on_frame_input(raw, FIXED_DT, 0.0);

    assert_eq!(
      commands.steering_force,
      Vec2::new(62.5, 0.0),
      "run_held={run_held}"
    );
  }
}

#[test]
fn axis_input_is_clamped_and_nan_is_ignored() {
  let mut controller = grounded_controller();

  controller.on_frame_input(steer(4.0), FIXED_DT, 0.0);
  assert_eq!(controller.input().move_horizontal, 1.0);
  assert_eq!(controller.state().acceleration, Vec2::new(250.0, 0.0));

  controller.on_frame_input(steer(-2.5), FIXED_DT, 0.0);
  assert_eq!(controller.input().move_horizontal, -1.0);

  controller.on_frame_input(steer(f32::NAN), FIXED_DT, 0.0);
  assert_eq!(controller.input().move_horizontal, 0.0);
  assert!(!controller.input().is_moving);
  assert_eq!(controller.state().acceleration, Vec2::ZERO);
}

#[test]
fn tiny_axis_values_do_not_count_as_moving() {
  let mut controller = grounded_controller();

  controller.on_frame_input(steer(0.0005), FIXED_DT, 0.0);
  assert!(!controller.input().is_moving);

  controller.on_frame_input(steer(-0.002), FIXED_DT, 0.0);
  assert!(controller.input().is_moving);
}

#[test]
fn acceleration_has_no_vertical_component() {
  let mut controller = MovementController::default();
  for (i, axis) in [-1.0, -0.3, 0.0, 0.7, 1.0].into_iter().enumerate() {
    let probe = if i % 2 == 0 {
      GroundProbe::ALL
    } else {
      GroundProbe::NONE
    };
    controller.on_physics_step(FIXED_DT, probe);
    controller.on_frame_input(steer(axis), FIXED_DT, 10.0);
    assert_eq!(controller.state().acceleration.y, 0.0);
  }
}

#[test]
fn jump_fires_only_when_grounded_on_press() {
  let mut controller = grounded_controller();
  let press = RawInput {
    jump_pressed: true,
    jump_held: true,
    ..RawInput::default()
  };

  let commands = controller.on_frame_input(press, FIXED_DT, 0.0);
  assert_eq!(commands.impulse, Some(Vec2::new(0.0, 300.0)));

  // Holding without a new press edge does not jump again.
  let hold = RawInput {
    jump_held: true,
    ..RawInput::default()
  };
  let commands = controller.on_frame_input(hold, FIXED_DT, 0.0);
  assert_eq!(commands.impulse, None);

  // A press while airborne is ignored.
  let mut airborne = MovementController::default();
  let commands = airborne.on_frame_input(press, FIXED_DT, 0.0);
  assert_eq!(commands.impulse, None);
}

#[test]
fn gravity_scale_follows_grounded_and_jump_state() {
  let config = MovementConfig::default();

  let mut grounded = grounded_controller();
  let held = RawInput {
    jump_held: true,
    ..RawInput::default()
  };
  assert_eq!(grounded.on_frame_input(held, FIXED_DT, 50.0).gravity_scale, 0.0);
  assert_eq!(grounded.on_frame_input(idle(), FIXED_DT, -50.0).gravity_scale, 0.0);

  let mut airborne = MovementController::default();
  // Ascending with jump held: reduced gravity.
  assert_eq!(
    airborne.on_frame_input(held, FIXED_DT, 50.0).gravity_scale,
    config.jump_gravity_scale
  );
  // Jump released while ascending.
  assert_eq!(
    airborne.on_frame_input(idle(), FIXED_DT, 50.0).gravity_scale,
    config.fall_gravity_scale
  );
  // Held but falling.
  assert_eq!(
    airborne.on_frame_input(held, FIXED_DT, -50.0).gravity_scale,
    config.fall_gravity_scale
  );
  // Held at the apex.
  assert_eq!(
    airborne.on_frame_input(held, FIXED_DT, 0.0).gravity_scale,
    config.fall_gravity_scale
  );
}

#[test]
fn drag_applies_only_when_grounded_and_idle() {
  let mut controller = grounded_controller();
  controller.on_frame_input(idle(), FIXED_DT, 0.0);
  assert_eq!(controller.on_physics_step(FIXED_DT, GroundProbe::ALL).drag, 15.0);

  controller.on_frame_input(steer(0.5), FIXED_DT, 0.0);
  assert_eq!(controller.on_physics_step(FIXED_DT, GroundProbe::ALL).drag, 0.0);

  let mut airborne = MovementController::default();
  airborne.on_frame_input(idle(), FIXED_DT, 0.0);
  assert_eq!(airborne.on_physics_step(FIXED_DT, GroundProbe::NONE).drag, 0.0);
}

#[test]
fn drag_uses_grounded_state_from_previous_step() {
  // Airborne body touching down this step: no drag yet.
  let mut landing = MovementController::default();
  landing.on_frame_input(idle(), FIXED_DT, 0.0);
  let command = landing.on_physics_step(FIXED_DT, GroundProbe::ALL);
  assert_eq!(command.drag, 0.0);
  assert!(command.grounded);
  assert_eq!(command.transition, Some(GroundTransition::Landed));

  // The next step sees the landing.
  assert_eq!(landing.on_physics_step(FIXED_DT, GroundProbe::ALL).drag, 15.0);

  // Grounded body leaving the ground this step still gets drag once.
  let mut leaving = grounded_controller();
  leaving.on_frame_input(idle(), FIXED_DT, 0.0);
  let command = leaving.on_physics_step(FIXED_DT, GroundProbe::NONE);
  assert_eq!(command.drag, 15.0);
  assert!(!command.grounded);
  assert_eq!(command.transition, Some(GroundTransition::LeftGround));
}

#[test]
fn any_single_probe_counts_as_grounded() {
  let probes = [
    GroundProbe {
      center: true,
      ..GroundProbe::NONE
    },
    GroundProbe {
      left: true,
      ..GroundProbe::NONE
    },
    GroundProbe {
      right: true,
      ..GroundProbe::NONE
    },
  ];
  for probe in probes {
    let mut controller = MovementController::default();
    assert!(controller.on_physics_step(FIXED_DT, probe).grounded, "{probe:?}");
  }

  let mut controller = grounded_controller();
  assert!(!controller.on_physics_step(FIXED_DT, GroundProbe::NONE).grounded);
}

#[test]
fn frame_decisions_see_grounded_only_after_the_step() {
  let mut controller = MovementController::default();
  let press = RawInput {
    jump_pressed: true,
    jump_held: true,
    ..RawInput::default()
  };

  // Airborne before any step: no jump.
  assert_eq!(controller.on_frame_input(press, FIXED_DT, 0.0).impulse, None);

  controller.on_physics_step(FIXED_DT, GroundProbe::ALL);
  assert!(controller.on_frame_input(press, FIXED_DT, 0.0).impulse.is_some());
}

#[test]
fn steering_force_is_requested_in_the_air_too() {
  let mut controller = MovementController::default();
  controller.on_frame_input(steer(-1.0), FIXED_DT, 0.0);
  let command = controller.on_physics_step(FIXED_DT, GroundProbe::NONE);
  assert_eq!(command.force, Vec2::new(-62.5, 0.0));
}

#[test]
fn non_positive_step_duration_is_a_no_op() {
  let mut controller = grounded_controller();
  controller.on_frame_input(steer(1.0), FIXED_DT, 0.0);

  for dt in [0.0, -0.5, f32::NAN] {
    let command = controller.on_physics_step(dt, GroundProbe::ALL);
    assert_eq!(command.force, Vec2::ZERO, "dt={dt}");

    let velocity = controller.on_integrate_velocity(dt, Vec2::new(120.0, -3.0));
    assert_eq!(velocity, Vec2::new(120.0, -3.0), "dt={dt}");
  }
}

#[test]
fn grounded_speed_is_clamped_before_drag() {
  let mut controller = grounded_controller();
  controller.on_frame_input(idle(), FIXED_DT, 0.0);
  controller.on_physics_step(0.01, GroundProbe::ALL);

  let velocity = controller.on_integrate_velocity(0.01, Vec2::new(700.0, 0.0));
  assert!(approx(velocity.x, 300.0 * (1.0 - 0.01 * 15.0)), "vx={}", velocity.x);

  let velocity = controller.on_integrate_velocity(0.01, Vec2::new(-700.0, 0.0));
  assert!(approx(velocity.x, -255.0), "vx={}", velocity.x);
}

#[test]
fn grounded_speed_is_clamped_while_steering() {
  let mut controller = grounded_controller();
  controller.on_frame_input(steer(1.0), FIXED_DT, 0.0);
  controller.on_physics_step(FIXED_DT, GroundProbe::ALL);

  let velocity = controller.on_integrate_velocity(FIXED_DT, Vec2::new(700.0, 0.0));
  assert!(approx(velocity.x, 300.0), "vx={}", velocity.x);
}

#[test]
fn airborne_speed_is_never_clamped() {
  let mut controller = MovementController::default();
  controller.on_frame_input(idle(), FIXED_DT, 0.0);
  controller.on_physics_step(FIXED_DT, GroundProbe::NONE);

  let velocity = controller.on_integrate_velocity(FIXED_DT, Vec2::new(900.0, 40.0));
  assert_eq!(velocity, Vec2::new(900.0, 40.0));
}

#[test]
fn large_step_drag_overshoots_and_flips_sign() {
  let mut controller = grounded_controller();
  controller.on_frame_input(idle(), 0.1, 0.0);
  controller.on_physics_step(0.1, GroundProbe::ALL);

  let velocity = controller.on_integrate_velocity(0.1, Vec2::new(100.0, 0.0));
  assert!(approx(velocity.x, -50.0), "vx={}", velocity.x);
}

#[test]
fn vertical_velocity_passes_through_integration() {
  let mut controller = grounded_controller();
  controller.on_frame_input(idle(), FIXED_DT, 0.0);
  controller.on_physics_step(FIXED_DT, GroundProbe::ALL);

  let velocity = controller.on_integrate_velocity(FIXED_DT, Vec2::new(10.0, -123.5));
  assert_eq!(velocity.y, -123.5);
}

#[test]
fn idle_grounded_velocity_converges_to_zero() {
  let mut controller = grounded_controller();
  let mut velocity = Vec2::new(250.0, 0.0);

  for _ in 0..60 {
    controller.on_frame_input(idle(), FIXED_DT, velocity.y);
    controller.on_physics_step(FIXED_DT, GroundProbe::ALL);
    let next = controller.on_integrate_velocity(FIXED_DT, velocity);
    assert!(next.x.abs() < velocity.x.abs());
    velocity = next;
  }

  assert!(velocity.x.abs() < 0.01, "vx={}", velocity.x);
}

#[test]
fn integrate_with_last_dt_reuses_step_duration() {
  let mut controller = grounded_controller();
  controller.on_frame_input(idle(), FIXED_DT, 0.0);
  controller.on_physics_step(0.02, GroundProbe::ALL);

  let velocity = controller.integrate_with_last_dt(Vec2::new(100.0, 0.0));
  assert!(approx(velocity.x, 100.0 * (1.0 - 0.02 * 15.0)), "vx={}", velocity.x);
}

#[test]
fn max_velocity_approaches_run_target_without_overshoot() {
  let mut controller = grounded_controller();
  let config = *controller.config();
  assert_eq!(controller.state().max_velocity, config.max_walk_velocity);

  let run = RawInput {
    run_held: true,
    ..RawInput::default()
  };
  let mut previous = controller.state().max_velocity;
  for _ in 0..120 {
    controller.on_frame_input(run, FIXED_DT, 0.0);
    let current = controller.state().max_velocity;
    assert!(current >= previous);
    assert!(current <= config.max_run_velocity);
    previous = current;
  }
  assert!(config.max_run_velocity - previous < 1.0);

  for _ in 0..120 {
    controller.on_frame_input(idle(), FIXED_DT, 0.0);
    let current = controller.state().max_velocity;
    assert!(current <= previous);
    assert!(current >= config.max_walk_velocity);
    previous = current;
  }
}

#[test]
fn max_velocity_does_not_snap_on_run_toggle() {
  let mut controller = grounded_controller();
  let run = RawInput {
    run_held: true,
    ..RawInput::default()
  };
  controller.on_frame_input(run, FIXED_DT, 0.0);

  // One sixtieth of a second covers a sixth of the gap.
  assert!(approx(controller.state().max_velocity, 300.0 + 300.0 / 6.0));
}

#[test]
fn max_velocity_stays_in_range_when_walk_exceeds_run() {
  let config = MovementConfig {
    max_walk_velocity: 500.0,
    max_run_velocity: 200.0,
    ..MovementConfig::default()
  };
  let mut controller = MovementController::new(config).unwrap();
  let run = RawInput {
    run_held: true,
    ..RawInput::default()
  };
  for frame_dt in [FIXED_DT, 0.05, 0.5, 2.0, -1.0] {
    controller.on_frame_input(run, frame_dt, 0.0);
    let v = controller.state().max_velocity;
    assert!((200.0..=500.0).contains(&v), "v={v}");
  }
}

#[test]
fn invalid_configs_are_rejected() {
  let cases = [
    (
      MovementConfig {
        acceleration_speed: 0.0,
        ..MovementConfig::default()
      },
      "acceleration_speed",
    ),
    (
      MovementConfig {
        stop_drag: f32::INFINITY,
        ..MovementConfig::default()
      },
      "stop_drag",
    ),
    (
      MovementConfig {
        acceleration_aerial_scale: 1.5,
        ..MovementConfig::default()
      },
      "acceleration_aerial_scale",
    ),
    (
      MovementConfig {
        jump_force: -300.0,
        ..MovementConfig::default()
      },
      "jump_force",
    ),
  ];

  for (config, expected) in cases {
    match MovementController::new(config) {
      Err(ControllerError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
      other => panic!("expected InvalidConfig for {expected}, got {other:?}"),
    }
  }
}

#[test]
fn reconfigure_replaces_config_and_keeps_state() {
  let mut controller = grounded_controller();
  let run = RawInput {
    run_held: true,
    ..RawInput::default()
  };
  for _ in 0..120 {
    controller.on_frame_input(run, FIXED_DT, 0.0);
  }
  assert!(controller.state().max_velocity > 590.0);

  let slower = MovementConfig {
    max_run_velocity: 400.0,
    ..MovementConfig::default()
  };
  controller.reconfigure(slower).unwrap();
  assert_eq!(controller.config(), &slower);
  assert_eq!(controller.state().max_velocity, 400.0);
  assert!(controller.is_grounded());

  let broken = MovementConfig {
    fall_gravity_scale: f32::NAN,
    ..MovementConfig::default()
  };
  assert!(controller.reconfigure(broken).is_err());
  assert_eq!(controller.config(), &slower);
}

#[test]
fn probe_set_requires_every_probe() {
  let set = GroundProbeSet::try_new(Some(1), Some(2), Some(3)).unwrap();
  assert_eq!(*set.get(ProbeSlot::Left), 2);
  assert_eq!(set.sample(|_, id| *id == 3), GroundProbe {
    center: false,
    left: false,
    right: true,
  });

  assert_eq!(
    GroundProbeSet::try_new(Some(1), None, Some(3)),
    Err(ControllerError::MissingGroundProbe(ProbeSlot::Left))
  );
  assert_eq!(
    GroundProbeSet::<i32>::try_new(None, None, None),
    Err(ControllerError::MissingGroundProbe(ProbeSlot::Center))
  );
}
