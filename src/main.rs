mod app;
mod term;

use std::{str::FromStr, time::Duration};

use clap::Parser;
use color_eyre::Result;
use gridsnake::config::{Config, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_SNAKE_LENGTH, DEFAULT_TICK_INTERVAL_MS};
use log::info;

use crate::app::{Flow, SnakeGame};

/// Classic snake on a fixed grid, in the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Grid dimensions in cells as WIDTHxHEIGHT (for example 32x24).
    #[arg(short = 's', long = "size", value_name = "WIDTHxHEIGHT", default_value_t = GridSizeArg::default())]
    size: GridSizeArg,
    /// Number of segments the snake starts with.
    #[arg(short = 'l', long = "length", value_name = "SEGMENTS", default_value_t = DEFAULT_SNAKE_LENGTH)]
    length: usize,
    /// Milliseconds between simulation ticks.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_TICK_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    tick_ms: u64,
    /// Seed for food placement. Drawn at random when omitted.
    #[arg(long = "seed", value_name = "SEED")]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug)]
struct GridSizeArg {
    width: i32,
    height: i32,
}

impl Default for GridSizeArg {
    fn default() -> Self {
        GridSizeArg { width: DEFAULT_GRID_WIDTH, height: DEFAULT_GRID_HEIGHT }
    }
}

impl std::fmt::Display for GridSizeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for GridSizeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
        let width = width.trim().parse::<i32>().map_err(|e| format!("bad width '{}': {}", width, e))?;
        let height = height.trim().parse::<i32>().map_err(|e| format!("bad height '{}': {}", height, e))?;
        if width <= 0 || height <= 0 {
            return Err(format!("grid must be at least 1x1, got {}x{}", width, height));
        }
        Ok(GridSizeArg { width, height })
    }
}

impl CliArgs {
    fn config(&self) -> Config {
        Config::new(self.size.width, self.size.height, self.length)
            .with_tick_interval(Duration::from_millis(self.tick_ms))
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let args = CliArgs::parse();
    let config = args.config();
    config.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("config {:?}, seed {}", config, seed);

    let mut game = SnakeGame::new(config, seed)?;
    game.initialize()?;

    let result = run(&mut game);

    // Leave the alternate screen before anything gets reported
    game.shutdown()?;
    result
}

fn run(game: &mut SnakeGame) -> Result<()> {
    if game.show_intro()? == Flow::Quit {
        return Ok(());
    }

    while game.play()? == Flow::Continue {}

    info!("bye");
    Ok(())
}
