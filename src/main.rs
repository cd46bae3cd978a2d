use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use log::info;
use snake_game::game::GameConfig;
use snake_game::modes::HumanMode;
use snake_game::sound::{Silent, SoundSink, TerminalBell};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snake_game")]
#[command(version, about = "Single-screen snake for the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells along each side of the square grid
    #[arg(long)]
    cell_count: Option<i32>,

    /// Milliseconds between snake moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Frames drawn per second
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Do not ring the terminal bell
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(cell_count) = self.cell_count {
            config.geometry.cell_count = cell_count;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(fps) = self.fps {
            config.frames_per_second = fps;
        }

        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("snake_game=debug"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialise logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    info!("Starting with {:?}", config);

    let sound: Box<dyn SoundSink> = if cli.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new(std::io::stdout()))
    };

    let mut human_mode = HumanMode::new(&config, cli.seed, sound)?;
    human_mode.run().await?;

    Ok(())
}
