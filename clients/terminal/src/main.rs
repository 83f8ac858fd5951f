//! Terminal Pong against the computer.

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Mutex,
};

use clap::Parser;
use color_eyre::eyre::WrapErr;
use pong_core::{Config, GameSession, Side};

use crate::app::App;

mod app;
mod event;
mod ui;

#[derive(Parser, Debug)]
#[command(version, about = "Play Pong against the computer in your terminal")]
struct Cli {
    /// JSON game configuration; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Ticks per second
    #[arg(long)]
    fps: Option<u16>,
    /// Score that ends the game
    #[arg(long)]
    max_score: Option<u32>,
    /// Seed for serve directions
    #[arg(long)]
    seed: Option<u64>,
    /// Name shown for your paddle
    #[arg(long)]
    player_name: Option<String>,
    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Maximum log level
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

impl Cli {
    /// Defaults, then the config file, then command line overrides
    fn game_config(&self) -> color_eyre::Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read {}", path.display()))?;
                Config::from_json(&json)
                    .wrap_err_with(|| format!("failed to load {}", path.display()))?
            }
            None => Config::default(),
        };

        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(max_score) = self.max_score {
            config.max_score = max_score;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(name) = &self.player_name {
            config.player.name = name.clone();
        }
        Ok(config)
    }
}

fn init_logging(path: &Path, level: tracing::Level) -> color_eyre::Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level)?;
    }

    let config = cli.game_config()?;
    let session = GameSession::new(config).wrap_err("invalid game configuration")?;

    let terminal = ratatui::init();
    let result = App::new(session).and_then(|app| app.run(terminal));
    ratatui::restore();
    let session = result?;

    let stats = session.stats();
    match stats.winner {
        Some(winner) => {
            let name = match winner {
                Side::Player => &session.player().name,
                Side::Cpu => &session.computer().name,
            };
            println!(
                "{name} won {} - {} (level {})",
                stats.score(winner),
                stats.score(winner.opposite()),
                stats.level
            );
        }
        None => println!(
            "Quit at {} - {} (level {})",
            stats.player_score, stats.cpu_score, stats.level
        ),
    }
    Ok(())
}
