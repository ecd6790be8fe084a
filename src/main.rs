use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{DifficultyPreset, GameConfig, GameEngine, GameMode, MapType, Obstacles};
use grid_snake::leaderboard::Leaderboard;
use grid_snake::modes::HumanMode;
use log::info;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid with timed food effects and a leaderboard")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Edge behavior
    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    /// Starting speed preset
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyPreset>,

    /// Map type
    #[arg(long, value_enum)]
    map: Option<MapType>,

    /// Obstacle map file (implies --map obstacles)
    #[arg(long)]
    map_file: Option<PathBuf>,

    /// Leaderboard file
    #[arg(long, default_value = "record.dat")]
    leaderboard: PathBuf,

    /// Seed for food and obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(map) = self.map {
            config.map = map;
        }
        if let Some(map_file) = &self.map_file {
            config.map = MapType::Obstacles;
            config.map_file = Some(map_file.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

/// The terminal UI owns stderr, so logs only ever go to a file. Without one no
/// logger is installed and `RUST_LOG` has no effect.
fn log_builder(log_file: Option<&PathBuf>) -> Result<Option<env_logger::Builder>> {
    let Some(path) = log_file else {
        return Ok(None);
    };

    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)));
    Ok(Some(builder))
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    if let Some(mut builder) = log_builder(log_file)? {
        builder.init();
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = cli.game_config()?;

    let mut engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config.clone(), seed),
        None => GameEngine::new(config.clone()),
    };

    if let Some(path) = &config.map_file {
        let obstacles = Obstacles::from_map_file(path, &engine.board())?;
        engine = engine.with_obstacle_map(obstacles);
    }

    info!("Starting with config {:?}, seed {:?}", config, cli.seed);

    let leaderboard = Leaderboard::new(&cli.leaderboard, config.leaderboard_capacity);
    let mut human_mode = HumanMode::new(engine, leaderboard);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_logger_without_log_file() {
        assert!(log_builder(None).unwrap().is_none());
    }

    #[test]
    fn test_log_file_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snake.log");

        assert!(log_builder(Some(&path)).unwrap().is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_log_file_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("snake.log");
        assert!(log_builder(Some(&path)).is_err());
    }
}
