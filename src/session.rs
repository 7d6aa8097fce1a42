//! Game session state
//!
//! A [GameSession] owns the maze of the current game together with the
//! player position, the completion timer and the [Phase]. All mutation
//! goes through [GameSession::apply], [GameSession::apply_move],
//! [GameSession::reset] and [GameSession::new_maze].

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::ValidationError;
use crate::grid::{Cell, Grid, Point};
use crate::maze_generator::MazeGenerator;
use crate::resolver::{resolve, Direction, MoveOutcome};

/// Validated side length of a square maze
///
/// Even requests are rounded up to the next odd number, so that corridors
/// and walls alternate all the way to the outer ring.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct MazeSize(usize);

impl MazeSize {
    pub const MIN: usize = 10;
    pub const MAX: usize = 50;

    /// Validate a requested size; bounds apply before odd rounding.
    pub fn new(requested: usize) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&requested) {
            return Err(ValidationError::SizeOutOfRange {
                size: requested,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(if requested % 2 == 0 {
            requested + 1
        } else {
            requested
        }))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for MazeSize {
    type Error = ValidationError;

    fn try_from(requested: usize) -> Result<Self, Self::Error> {
        Self::new(requested)
    }
}

/// Coarse state of the game
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Phase {
    Playing,
    Won,
}

/// Completion timer
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TimerState {
    /// No move accepted since the maze was created or reset
    NotStarted,
    /// Started on the first accepted move
    Running(Instant),
    /// Frozen when the end was reached
    Stopped(Duration),
}

impl TimerState {
    /// Time on the clock: live while running, frozen once stopped
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            TimerState::NotStarted => None,
            TimerState::Running(started) => Some(started.elapsed()),
            TimerState::Stopped(duration) => Some(*duration),
        }
    }
}

/// Request coming from the input layer
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Command {
    Move(Direction),
    Reset,
    Quit,
}

/// What a [Command] did to the session
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum GameEvent {
    /// Nothing changed
    Rejected,
    /// Player stepped onto the given square
    Moved(Point),
    /// Player stepped onto the end square
    Won(Point),
    /// Player is back on the start square with the timer cleared
    Reset,
    /// Caller should end the session
    Quit,
}

/// State of one game on one maze
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    /// Current player position
    position: Point,
    /// Position before the last change, for incremental redraws
    previous: Point,
    timer: TimerState,
    phase: Phase,
    /// Accepted moves since the maze was created or reset
    moves: usize,
}

impl GameSession {
    /// Start a game on a freshly generated maze
    pub fn new(size: MazeSize, generator: &mut MazeGenerator) -> Self {
        Self::from_grid(generator.generate_maze(size.get()))
    }

    /// Start a game on an existing grid, with the player on its start square
    pub fn from_grid(grid: Grid) -> Self {
        let start = grid.start();
        Self {
            grid,
            position: start,
            previous: start,
            timer: TimerState::NotStarted,
            phase: Phase::Playing,
            moves: 0,
        }
    }

    /// Interpret a command from the input layer
    pub fn apply(&mut self, command: Command) -> GameEvent {
        match command {
            Command::Move(direction) => match self.apply_move(direction) {
                MoveOutcome::Rejected => GameEvent::Rejected,
                MoveOutcome::Accepted(p) => GameEvent::Moved(p),
                MoveOutcome::Won(p) => GameEvent::Won(p),
            },
            Command::Reset => {
                self.reset();
                GameEvent::Reset
            }
            Command::Quit => GameEvent::Quit,
        }
    }

    /// Try to step the player one square towards `direction`
    ///
    /// The first accepted step starts the timer; stepping onto the end
    /// square stops it and moves the game to [Phase::Won]. Once won, every
    /// further step is rejected until the session is reset or replaced.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.phase == Phase::Won {
            return MoveOutcome::Rejected;
        }

        let outcome = resolve(&self.grid, self.position, direction);
        let Some(next) = outcome.position() else {
            return outcome;
        };

        let started = match self.timer {
            TimerState::Running(started) => started,
            _ => Instant::now(),
        };
        self.previous = self.position;
        self.position = next;
        self.moves += 1;

        if let MoveOutcome::Won(_) = outcome {
            let elapsed = started.elapsed();
            self.timer = TimerState::Stopped(elapsed);
            self.phase = Phase::Won;
            info!(
                elapsed_ms = elapsed.as_millis() as u64,
                moves = self.moves,
                "maze completed"
            );
        } else {
            self.timer = TimerState::Running(started);
        }
        outcome
    }

    /// Put the player back on the start square of the same maze
    pub fn reset(&mut self) {
        self.previous = self.position;
        self.position = self.grid.start();
        self.timer = TimerState::NotStarted;
        self.phase = Phase::Playing;
        self.moves = 0;
        debug!("session reset");
    }

    /// Discard the current maze and start over on a new one
    pub fn new_maze(&mut self, size: MazeSize, generator: &mut MazeGenerator) {
        *self = Self::new(size, generator);
        debug!(size = size.get(), "new maze");
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.grid.get(Point::new(row, col))
    }

    /// `(height, width)` of the maze
    pub fn dimensions(&self) -> (usize, usize) {
        (self.grid.height(), self.grid.width())
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn previous_position(&self) -> Point {
        self.previous
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timer(&self) -> TimerState {
        self.timer
    }

    /// Elapsed or frozen completion time; `None` before the first move
    pub fn elapsed(&self) -> Option<Duration> {
        self.timer.elapsed()
    }

    pub fn moves(&self) -> usize {
        self.moves
    }
}
