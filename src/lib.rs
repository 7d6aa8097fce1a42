//! Find your way through a randomly generated maze
//!
//! Mazes are *perfect*: every open square is reachable from the start by
//! exactly one simple path. The player starts at `(1, 1)` and the end is
//! always in the opposite corner.
//!
//! # Examples
//! ## Play a game through the library
//! ```
//! use terminal_maze::{new_session, Command, GameEvent, Phase, Point};
//!
//! let mut session = new_session(10).unwrap();
//! assert_eq!(session.dimensions(), (11, 11));
//! assert_eq!(session.position(), Point::new(1, 1));
//!
//! // Follow the only path to the end
//! let grid = session.grid().clone();
//! let path = grid.shortest_path(grid.start(), grid.end()).unwrap();
//! for step in path.windows(2) {
//!     let direction = terminal_maze::Direction::between(step[0], step[1]).unwrap();
//!     let event = session.apply(Command::Move(direction));
//!     assert_ne!(event, GameEvent::Rejected);
//! }
//! assert_eq!(session.phase(), Phase::Won);
//! assert!(session.elapsed().is_some());
//! ```
//!
//! ## Print a seeded maze
//! ```
//! use terminal_maze::MazeGenerator;
//!
//! let mut gen = MazeGenerator::new(Some(1));
//! let grid = gen.generate_maze(11);
//! println!("{}", grid);
//! ```

pub mod error;
pub mod grid;
pub mod maze_generator;
pub mod resolver;
pub mod session;
#[cfg(feature = "tui")]
pub mod terminal;

pub use error::ValidationError;
pub use grid::{Cell, Grid, Point};
pub use maze_generator::MazeGenerator;
pub use resolver::{resolve, Direction, MoveOutcome};
pub use session::{Command, GameEvent, GameSession, MazeSize, Phase, TimerState};

/// Generate a maze of the requested size and start a game on it
///
/// Even sizes are rounded up to the next odd number. Sizes below
/// [MazeSize::MIN] or above [MazeSize::MAX] are rejected.
pub fn new_session(size: usize) -> Result<GameSession, ValidationError> {
    let size = MazeSize::new(size)?;
    Ok(GameSession::new(size, &mut MazeGenerator::new(None)))
}
