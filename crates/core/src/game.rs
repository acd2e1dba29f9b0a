//! Game loop - ties the board, piece controller, line clears and level timer
//! together.
//!
//! [`Game::frame`] runs one loop iteration for a given instant and optional
//! command. [`run`] drives frames against a real clock, an input source and a
//! renderer until the player quits or loses.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};

use crate::board::Board;
use crate::level::{GameStats, LevelTimer};
use crate::line_clear::{resolve_lock, ClearReport};
use crate::piece::{ActivePiece, PieceController};
use crate::render::{CommandSource, Renderer, Status};
use crate::rng::PieceGenerator;
use crate::shapes::ShapeTable;
use crate::types::{
    Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, FRAME_SLEEP_MS, SOFT_DROP_GRACE_MS,
    SOFT_DROP_MS,
};

/// Tunables for a single game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    pub width: u8,
    pub height: u8,
    pub start_level: u32,
    pub seed: u32,
    /// Gravity cap while soft drop is held
    pub soft_drop: Duration,
    /// How long a soft drop stays held after the last soft-drop command
    pub soft_drop_grace: Duration,
    /// Sleep between loop iterations
    pub frame_sleep: Duration,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            start_level: 0,
            seed: 1,
            soft_drop: Duration::from_millis(SOFT_DROP_MS as u64),
            soft_drop_grace: Duration::from_millis(SOFT_DROP_GRACE_MS as u64),
            frame_sleep: Duration::from_millis(FRAME_SLEEP_MS as u64),
        }
    }
}

/// What the loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
    Lost,
}

/// Why [`run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Quit,
    Lost,
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct Game<'a> {
    board: Board,
    pieces: PieceController<'a>,
    stats: GameStats,
    generator: PieceGenerator,
    timer: LevelTimer,
    last_clear: Option<ClearReport>,
}

impl<'a> Game<'a> {
    pub fn new(shapes: &'a ShapeTable, options: &GameOptions, now: Instant) -> Self {
        Self {
            board: Board::new(options.width, options.height),
            pieces: PieceController::new(shapes),
            stats: GameStats::new(options.start_level),
            generator: PieceGenerator::new(options.seed),
            timer: LevelTimer::new(now, options.start_level)
                .with_soft_drop(options.soft_drop, options.soft_drop_grace),
            last_clear: None,
        }
    }

    /// Replace the board before the game starts (for puzzles and tests).
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Resume from existing stats, e.g. a game already some lines in.
    pub fn with_stats(mut self, stats: GameStats) -> Self {
        self.stats = stats;
        self.timer.set_level(stats.level);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.pieces.active()
    }

    pub fn pieces(&self) -> &PieceController<'a> {
        &self.pieces
    }

    pub fn lost(&self) -> bool {
        self.stats.lost
    }

    /// Report of the most recent lock
    pub fn last_clear(&self) -> Option<&ClearReport> {
        self.last_clear.as_ref()
    }

    pub fn status(&self) -> Status {
        Status {
            score: self.stats.score,
            level: self.stats.level,
            lines: self.stats.lines,
        }
    }

    /// Draw the border and board, then spawn a random first piece.
    pub fn start<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        let kind = self.generator.next_kind();
        self.start_with(kind, renderer)
    }

    /// Draw the border and board, then spawn `kind` as the first piece.
    pub fn start_with<R: Renderer + ?Sized>(&mut self, kind: PieceKind, renderer: &mut R) -> bool {
        renderer.draw_border(self.board.width(), self.board.height());
        for y in 0..self.board.height() {
            for (x, &filled) in self.board.row(y as usize).iter().enumerate() {
                renderer.set_cell(x as u8, y, filled);
            }
        }
        renderer.status(&self.status());
        self.spawn(kind, renderer)
    }

    /// Spawn `kind`. A blocked spawn ends the game.
    pub fn spawn<R: Renderer + ?Sized>(&mut self, kind: PieceKind, renderer: &mut R) -> bool {
        if self.stats.lost {
            return false;
        }
        if self.pieces.spawn(kind, &mut self.board, renderer) {
            debug!("spawned {} piece", kind.as_str());
            true
        } else {
            info!(
                "{} piece blocked at spawn; game over with score {}",
                kind.as_str(),
                self.stats.score
            );
            self.stats.lost = true;
            false
        }
    }

    /// Dispatch one player command.
    pub fn apply<R: Renderer + ?Sized>(
        &mut self,
        command: Command,
        now: Instant,
        renderer: &mut R,
    ) -> Flow {
        match command {
            Command::Quit => {
                info!("quit requested");
                return Flow::Quit;
            }
            _ if self.stats.lost => return Flow::Lost,
            Command::MoveLeft => {
                self.pieces.try_move(-1, 0, &mut self.board, renderer);
            }
            Command::MoveRight => {
                self.pieces.try_move(1, 0, &mut self.board, renderer);
            }
            Command::SoftDrop => self.timer.hold_soft_drop(now),
            Command::RotateCw => {
                self.pieces.try_rotate(1, &mut self.board, renderer);
            }
            Command::RotateCcw => {
                self.pieces.try_rotate(-1, &mut self.board, renderer);
            }
        }
        Flow::Continue
    }

    /// Advance level and gravity to `now`.
    pub fn update<R: Renderer + ?Sized>(&mut self, now: Instant, renderer: &mut R) -> Flow {
        if self.stats.lost {
            return Flow::Lost;
        }

        if self.stats.update_level() {
            info!(
                "level {} reached at {} lines",
                self.stats.level, self.stats.lines
            );
            self.timer.set_level(self.stats.level);
        }

        if self.timer.poll_tick(now) && !self.pieces.try_move(0, 1, &mut self.board, renderer) {
            self.lock_piece(renderer);
        }

        if self.stats.lost {
            Flow::Lost
        } else {
            Flow::Continue
        }
    }

    /// One loop iteration: command, level, gravity, status.
    pub fn frame<R: Renderer + ?Sized>(
        &mut self,
        command: Option<Command>,
        now: Instant,
        renderer: &mut R,
    ) -> Flow {
        if let Some(command) = command {
            let flow = self.apply(command, now, renderer);
            if flow != Flow::Continue {
                return flow;
            }
        }
        let flow = self.update(now, renderer);
        renderer.status(&self.status());
        flow
    }

    /// Lock the active piece, resolve line clears and spawn the next piece.
    pub fn lock_piece<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let Some(locked) = self.pieces.lock() else {
            return;
        };
        let report = resolve_lock(&mut self.board, &mut self.stats, renderer);
        debug!(
            "locked {} at ({}, {}): {} lines, +{} points",
            locked.kind.as_str(),
            locked.x,
            locked.y,
            report.lines(),
            report.score.total
        );
        self.last_clear = Some(report);

        let next = self.generator.next_kind();
        self.spawn(next, renderer);
    }
}

/// Run frames until the player quits or loses.
///
/// Input is polled without blocking; `frame_sleep` only paces the loop.
pub fn run<I, R>(
    game: &mut Game<'_>,
    input: &mut I,
    renderer: &mut R,
    frame_sleep: Duration,
) -> Result<GameEnd>
where
    I: CommandSource + ?Sized,
    R: Renderer + ?Sized,
{
    loop {
        let command = input.poll()?;
        let flow = game.frame(command, Instant::now(), renderer);
        renderer.present()?;

        match flow {
            Flow::Continue => {}
            Flow::Quit => return Ok(GameEnd::Quit),
            Flow::Lost => return Ok(GameEnd::Lost),
        }

        if !frame_sleep.is_zero() {
            thread::sleep(frame_sleep);
        }
    }
}
