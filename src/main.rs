use bevy::{
  prelude::*,
  window::{MonitorSelection, PresentMode, WindowMode, WindowResolution},
};
use clap::Parser;
use platformer::config::{self, ConfigLoaded, ConfigPath, GameConfig};
use platformer::{core, input, player, world};

#[derive(Parser, Debug)]
#[command(about = "Platformer movement sandbox")]
struct Args {
  /// Config path relative to the assets directory. Only `.toml` files are
  /// hot-reloaded.
  #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
  config: String,

  /// Fixed physics rate, overrides the config.
  #[arg(long)]
  hz: Option<f64>,

  /// Run in a window instead of borderless fullscreen.
  #[arg(long)]
  windowed: bool,
}

fn main() {
  let args = Args::parse();
  let config_path = ConfigPath(args.config);
  let config: GameConfig = match GameConfig::load(config_path.file_path()) {
    Ok(config) => config,
    Err(err) => {
      eprintln!("{err}");
      std::process::exit(1);
    }
  };

  let fixed_hz = args.hz.unwrap_or(config.physics.fixed_hz);
  let mode = if args.windowed {
    WindowMode::Windowed
  } else {
    WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
  };

  let mut app = App::new();

  app
    .insert_resource(Time::<Fixed>::from_hz(fixed_hz))
    .insert_resource(config_path)
    .insert_resource(ConfigLoaded::from(config.clone()));

  app
    .add_plugins(
      DefaultPlugins
        .set(ImagePlugin::default_nearest())
        .set(WindowPlugin {
          primary_window: Some(Window {
            resolution: WindowResolution::new(config.window.width, config.window.height),
            title: config.window.title.clone(),
            present_mode: PresentMode::AutoVsync,
            mode,
            ..default()
          }),
          ..default()
        }),
    )
    .add_plugins(config::ConfigPlugin)
    .add_plugins(core::CorePlugin {
      length_unit: config.physics.length_unit,
      gravity: config.physics.gravity,
    })
    .add_plugins(input::InputPlugin)
    .add_plugins(player::PlayerPlugin)
    .add_plugins(world::WorldPlugin);

  #[cfg(feature = "visual_debug")]
  app.add_plugins(platformer::visual_debug::VisualDebugPlugin);

  app.run();
}
