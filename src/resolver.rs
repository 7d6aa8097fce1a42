//! Move resolution
//!
//! [resolve] decides what a single directional step does, without touching
//! any game state. The session interprets the returned [MoveOutcome].

use crate::grid::{Cell, Grid, Point};

/// Direction of a single player step
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step as `(d_row, d_col)`
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Direction leading from `from` to an orthogonally adjacent `to`
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| {
            let (dr, dc) = d.delta();
            from.offset(dr, dc) == Some(to)
        })
    }
}

/// Result of resolving one step
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MoveOutcome {
    /// Target is a wall or outside the grid; nothing changes
    Rejected,
    Accepted(Point),
    /// Target is the end square
    Won(Point),
}

impl MoveOutcome {
    /// New player position, if the step was taken
    pub fn position(self) -> Option<Point> {
        match self {
            MoveOutcome::Rejected => None,
            MoveOutcome::Accepted(p) | MoveOutcome::Won(p) => Some(p),
        }
    }
}

/// Resolve a step of the player at `position` towards `direction`.
pub fn resolve(grid: &Grid, position: Point, direction: Direction) -> MoveOutcome {
    let (dr, dc) = direction.delta();
    let Some(candidate) = position.offset(dr, dc) else {
        return MoveOutcome::Rejected;
    };
    match grid.get(candidate) {
        None | Some(Cell::Wall) => MoveOutcome::Rejected,
        Some(Cell::End) => MoveOutcome::Won(candidate),
        Some(Cell::Path | Cell::Start) => MoveOutcome::Accepted(candidate),
    }
}
