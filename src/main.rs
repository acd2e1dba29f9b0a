//! Blockfall terminal runner (default binary).
//!
//! Loads configuration and shape data, puts the terminal into raw mode and runs
//! the game loop until the player quits or the stack reaches the top.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use blockfall::config::{Config, Overrides};
use blockfall::core::{run, Game, GameEnd, GameStats, Renderer, ShapeTable};
use blockfall::input::TerminalInput;
use blockfall::term::TerminalRenderer;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to $BLOCKFALL_CONFIG, then ./blockfall.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the piece sequence
    #[arg(long)]
    seed: Option<u32>,
    /// Starting level
    #[arg(long)]
    level: Option<u32>,
    /// Directory holding <Kind>Piece.txt shape records
    #[arg(long)]
    pieces_dir: Option<PathBuf>,
    /// Where log output goes
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            level: self.level,
            pieces_dir: self.pieces_dir.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply(cli.overrides());
    config.validate()?;

    init_logging(&config.log_file)?;
    info!("starting with {config:?}");

    let shapes = match &config.pieces_dir {
        Some(dir) => ShapeTable::from_dir(dir)
            .with_context(|| format!("failed to load shapes from {}", dir.display()))?,
        None => ShapeTable::builtin().context("failed to load built-in shapes")?,
    };

    let mut term = TerminalRenderer::new(config.width, config.height, config.line_clear_delay());
    term.enter()?;

    let result = play(&mut term, &shapes, &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let (end, stats) = result?;
    info!(
        "finished ({end:?}) with score {} at level {}, {} lines",
        stats.score, stats.level, stats.lines
    );
    if end == GameEnd::Lost {
        println!(
            "Game over! Score: {}  Level: {}  Lines: {}",
            stats.score, stats.level, stats.lines
        );
    }
    Ok(())
}

fn play(term: &mut TerminalRenderer, shapes: &ShapeTable, config: &Config) -> Result<(GameEnd, GameStats)> {
    let options = config.game_options(time_seed());
    info!("piece seed {}", options.seed);

    let mut game = Game::new(shapes, &options, Instant::now());
    game.start(term);
    term.present()?;

    let mut input = TerminalInput::new();
    let end = run(&mut game, &mut input, term, options.frame_sleep)?;

    if end == GameEnd::Lost {
        term.show_banner("GAME OVER");
        term.present()?;
        thread::sleep(config.loss_delay());
    }
    Ok((end, *game.stats()))
}

/// Log to a file: the terminal is in raw mode on the alternate screen.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_module_path(false)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
