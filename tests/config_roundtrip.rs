//! Config parsing and construction-time validation.
//!
//! Run: cargo test --test config_roundtrip

use std::io::Write;
use std::path::Path;

use platformer::config::{ConfigError, ConfigPath, GameConfig};
use platformer::controller::{ControllerError, MovementConfig, ProbeSlot};

fn shipped_config_path() -> std::path::PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR")).join(ConfigPath::default().file_path())
}

fn shipped_config_source() -> String {
  std::fs::read_to_string(shipped_config_path()).expect("shipped config should exist")
}

#[test]
fn shipped_config_loads_with_default_tunables() {
  let config = GameConfig::load(shipped_config_path()).expect("shipped config should parse");

  assert_eq!(config.player.movement, MovementConfig::default());
  assert_eq!(config.physics.gravity, 980.0);

  let probes = config.player.probes.probe_set().unwrap();
  assert_eq!(probes.left.offset.x, -9.0);
  assert_eq!(probes.right.offset.x, 9.0);
  assert_eq!(probes.center.length, 6.0);
}

#[test]
fn omitted_movement_section_uses_defaults() {
  let source = shipped_config_source();
  let start = source.find("[player.movement]").unwrap();
  let end = source.find("# Offsets from the body origin").unwrap();
  let trimmed = format!("{}{}", &source[..start], &source[end..]);

  let config = GameConfig::from_toml_str(&trimmed).unwrap();
  assert_eq!(config.player.movement, MovementConfig::default());
}

#[test]
fn partial_movement_section_keeps_other_defaults() {
  let source = shipped_config_source().replace("stop_drag = 15.0", "");
  let source = source.replace("max_run_velocity = 600.0", "max_run_velocity = 450.0");

  let config = GameConfig::from_toml_str(&source).unwrap();
  assert_eq!(config.player.movement.max_run_velocity, 450.0);
  assert_eq!(config.player.movement.stop_drag, 15.0);
}

#[test]
fn missing_ground_probe_is_a_construction_error() {
  let source = shipped_config_source().replace("left = [-9.0, -22.0]\n", "");

  match GameConfig::from_toml_str(&source) {
    Err(ConfigError::Controller(ControllerError::MissingGroundProbe(slot))) => {
      assert_eq!(slot, ProbeSlot::Left);
    }
    other => panic!("expected MissingGroundProbe, got {other:?}"),
  }
}

#[test]
fn out_of_range_aerial_scale_is_rejected() {
  let source = shipped_config_source().replace(
    "acceleration_aerial_scale = 0.25",
    "acceleration_aerial_scale = 1.25",
  );

  match GameConfig::from_toml_str(&source) {
    Err(ConfigError::Controller(ControllerError::InvalidConfig { field, value })) => {
      assert_eq!(field, "acceleration_aerial_scale");
      assert_eq!(value, 1.25);
    }
    other => panic!("expected InvalidConfig, got {other:?}"),
  }
}

#[test]
fn malformed_toml_is_a_parse_error() {
  let result = GameConfig::from_toml_str("[window\nwidth = ");
  assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn load_reads_from_disk() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  let source = shipped_config_source().replace("jump_force = 300.0", "jump_force = 420.0");
  file.write_all(source.as_bytes()).unwrap();

  let config = GameConfig::load(file.path()).unwrap();
  assert_eq!(config.player.movement.jump_force, 420.0);

  let missing = file.path().with_extension("missing");
  assert!(matches!(
    GameConfig::load(&missing),
    Err(ConfigError::Read { .. })
  ));
}

#[test]
fn only_toml_paths_are_hot_reloadable() {
  assert!(ConfigPath::default().is_hot_reloadable());
  assert!(ConfigPath("levels/alt.toml".into()).is_hot_reloadable());
  assert!(!ConfigPath("levels/alt.ron".into()).is_hot_reloadable());
  assert!(!ConfigPath("levels/toml".into()).is_hot_reloadable());
}
