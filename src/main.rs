//! Desk agent host.
//!
//! Loads an agent's animation config, then drives the playback engine
//! headlessly for a while, feeding it the commands given on the command line.
//!
//! - **bevy_ecs** holds the engine, its timers and the presentation state
//! - settings come from `deskagent.ini`, the agent from `<root>/<name>/config.json`
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --list
//! cargo run --release -- --play Wave --look-at 900,40 --duration-ms 8000
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use deskagent::app::{build_schedule, build_world, run_for, send_command};
use deskagent::direction::ScreenPoint;
use deskagent::events::command::AgentCommand;
use deskagent::resources::agentsettings::AgentSettings;
use deskagent::resources::animationconfig::AnimationConfig;
use deskagent::resources::placement::AgentPlacement;
use deskagent::resources::playback::PlaybackEngine;
use deskagent::resources::randomsource::FastRandSource;
use deskagent::resources::soundbank::SoundBank;
use deskagent::resources::spriteatlas::SpriteAtlas;
use deskagent::systems::render::AgentFrame;

/// Animated desktop agent
#[derive(Parser)]
#[command(version, about = "Plays an animated desktop agent from its config.json")]
struct Cli {
    /// Settings file.
    #[arg(long, value_name = "PATH", default_value = "deskagent.ini")]
    settings: PathBuf,

    /// Agent config, overriding the one named in the settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the agent's animation names and exit.
    #[arg(long)]
    list: bool,

    /// Queue an animation. May be repeated.
    #[arg(long, value_name = "NAME")]
    play: Vec<String>,

    /// Loop the animations given with --play.
    #[arg(long = "loop")]
    looping: bool,

    /// Agent center on screen.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    center: Option<ScreenPoint>,

    /// Gesture towards a screen point.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    gesture_at: Option<ScreenPoint>,

    /// Look towards a screen point.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    look_at: Option<ScreenPoint>,

    /// Start hidden: no greeting and no idle animations.
    #[arg(long)]
    hidden: bool,

    /// Seed for branch and idle draws.
    #[arg(long)]
    seed: Option<u64>,

    /// Agent time to simulate.
    #[arg(long, value_name = "MS", default_value_t = 10_000)]
    duration_ms: u64,
}

fn parse_point(text: &str) -> Result<ScreenPoint, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{text}'"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad X: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad Y: {e}"))?;
    Ok(ScreenPoint::new(x, y))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut settings = AgentSettings::with_path(&cli.settings);
    if let Err(e) = settings.load_from_file() {
        warn!("{e}; using defaults");
    }
    settings.apply_env();

    let config_path = cli.config.clone().unwrap_or_else(|| settings.config_path());
    let config = match AnimationConfig::load_from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading {}: {e}", config_path.display());
            std::process::exit(1);
        }
    };

    if cli.list {
        for name in config.names() {
            println!("{name}");
        }
        return;
    }

    let atlas = SpriteAtlas::for_config(&config, settings.sheet_width);
    let sounds = if settings.sound_enabled {
        let sounds_dir = config_path
            .parent()
            .map(|dir| dir.join("sounds"))
            .unwrap_or_else(|| settings.sounds_dir());
        SoundBank::preload(sounds_dir)
    } else {
        SoundBank::disabled()
    };
    let rng = match cli.seed {
        Some(seed) => FastRandSource::seeded(seed),
        None => FastRandSource::new(),
    };
    let visible = settings.visible && !cli.hidden;
    let engine = PlaybackEngine::new(config)
        .with_random_source(rng)
        .with_visible(false);
    let placement = AgentPlacement::new(cli.center.unwrap_or_default());

    let mut world = build_world(engine, atlas, sounds, placement);
    let mut schedule = build_schedule();

    if visible {
        send_command(&mut world, AgentCommand::Show);
    }
    for name in &cli.play {
        send_command(
            &mut world,
            AgentCommand::Play {
                name: name.clone(),
                right_now: false,
                looping: cli.looping,
            },
        );
    }
    if let Some(target) = cli.gesture_at {
        send_command(&mut world, AgentCommand::GestureAt(target));
    }
    if let Some(target) = cli.look_at {
        send_command(&mut world, AgentCommand::LookAt(target));
    }

    let frames = run_for(
        &mut world,
        &mut schedule,
        cli.duration_ms as f64,
        settings.frame_interval_ms(),
    );

    let frame = world.resource::<AgentFrame>();
    let sounds = world.resource::<SoundBank>();
    info!(
        "Ran {} host frames: {} sprite changes, {} sounds played, showing sprite {}",
        frames,
        frame.changes,
        sounds.played().len(),
        frame.sprite_index
    );
}
