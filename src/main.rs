//! # Lantern Main Entry Point
//!
//! Generates a dungeon, sets up the engine and runs the macroquad frame loop.

use clap::Parser;
use lantern::{
    EngineConfig, GameState, GenerationConfig, Generator, InputHandler, LanternError,
    LanternResult, MacroquadDisplay, MessageLevel, PlayerInput, RoomCorridorGenerator,
    ScreenScrollingMode,
};
use log::{error, info};
use macroquad::prelude::{get_time, next_frame, request_new_screen_size};
use std::path::PathBuf;
use std::str::FromStr;

/// Command line arguments for Lantern.
#[derive(Parser, Debug)]
#[command(name = "lantern")]
#[command(about = "A fog-of-war dungeon crawler with a day/night cycle")]
#[command(version)]
struct Args {
    /// Random seed for generation and the engine
    #[arg(short, long)]
    seed: Option<u64>,

    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable fog of war
    #[arg(long)]
    no_fog: bool,

    /// Use only a spanning tree of corridors
    #[arg(long)]
    sparse: bool,

    /// Screen scrolling mode (centered, page, outside)
    #[arg(long)]
    scrolling: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Lantern")]
async fn main() -> LanternResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Lantern v{}", lantern::VERSION);

    if let Err(e) = run_game(&args).await {
        error!("Lantern stopped: {}", e);
        return Err(e);
    }
    Ok(())
}

/// Initializes env_logger; `RUST_LOG` still overrides per module.
fn initialize_logging(log_level: &str) -> LanternResult<()> {
    let level = log::LevelFilter::from_str(log_level).map_err(|_| {
        LanternError::InvalidConfiguration(format!("unknown log level '{}'", log_level))
    })?;
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();
    Ok(())
}

/// Resolves the engine configuration from the config file and flags.
fn engine_config(args: &Args) -> LanternResult<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from_json(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.no_fog {
        config.use_fog_of_war = false;
    }
    if let Some(mode) = &args.scrolling {
        config.scrolling_mode = ScreenScrollingMode::from_str(mode)?;
    }
    config.validate()?;
    Ok(config)
}

/// Builds the session and runs the frame loop until the player quits.
async fn run_game(args: &Args) -> LanternResult<()> {
    let config = engine_config(args)?;

    info!("Generating dungeon with seed: {}", config.seed);
    let gen_config = GenerationConfig::new(config.seed);
    let generator = if args.sparse {
        RoomCorridorGenerator::sparse()
    } else {
        RoomCorridorGenerator::new()
    };
    let mut rng = lantern::generation::utils::create_rng(&gen_config);
    let topology = generator.generate(&gen_config, &mut rng)?;

    let mut game_state = GameState::from_config(&config, topology)?;
    game_state
        .messages
        .add("Welcome to Lantern!", MessageLevel::Info, 0.0);
    game_state.messages.add(
        "WASD/arrows move, SPACE interacts, I opens the inventory",
        MessageLevel::Guide,
        0.0,
    );

    request_new_screen_size(1280.0, 720.0);
    let input_handler = InputHandler::new();
    let mut display = MacroquadDisplay::new(config.screen_rows, config.screen_cols);

    let start = get_time();
    loop {
        let sim_time_s = get_time() - start;
        let input = input_handler.get_input();
        if input == PlayerInput::Quit {
            info!("Player quit the game");
            break;
        }

        game_state.update(sim_time_s, input);

        display.fit_to_window();
        display.begin_frame();
        game_state.draw(&mut display, sim_time_s);
        display.present();

        next_frame().await;
    }

    info!("Game loop ended");
    Ok(())
}
