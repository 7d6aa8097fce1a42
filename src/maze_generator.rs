//! Maze generation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use crate::grid::{Cell, Grid, Point};

/// Pending cell on the carving stack, with the directions still to try
struct Frame {
    at: Point,
    directions: [(isize, isize); 4],
    next: usize,
}

/// Perfect maze generator.
///
/// Owns the random number generator, so a seeded generator always
/// produces the same sequence of mazes.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// Candidate neighbours, two squares away so a wall stays between corridors
    const DIRECTIONS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a complete maze of the given (odd, validated) size.
    ///
    /// The returned grid has its start and end squares marked.
    pub fn generate_maze(&mut self, size: usize) -> Grid {
        let mut grid = Grid::allocate(size);
        let start = grid.start();
        self.carve(&mut grid, start);
        grid.mark_endpoints();
        grid
    }

    /// Carve a perfect maze into `grid`, starting from `origin`
    ///
    /// Randomized depth-first search. From the current square, go into
    /// the four directions in shuffled order; whenever the square two
    /// steps away is inside the outer wall ring and still a wall, open the
    /// wall between and continue from there. The search keeps its own
    /// stack of frames instead of recursing, so the deepest corridor is
    /// limited by heap, not by the call stack.
    pub fn carve(&mut self, grid: &mut Grid, origin: Point) {
        let mut carved = 0usize;
        let mut stack = vec![self.open(grid, origin, &mut carved)];

        while let Some(frame) = stack.last_mut() {
            let Some(&(dr, dc)) = frame.directions.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let at = frame.at;

            let Some(candidate) = at.offset(dr, dc) else {
                continue;
            };
            if !grid.contains(candidate)
                || grid.is_border(candidate)
                || grid.get(candidate) != Some(Cell::Wall)
            {
                continue;
            }

            // Remove wall between current cell and neighbor
            if let Some(between) = at.offset(dr / 2, dc / 2) {
                self.open(grid, between, &mut carved);
            }
            let frame = self.open(grid, candidate, &mut carved);
            stack.push(frame);
        }

        debug!(
            height = grid.height(),
            width = grid.width(),
            carved,
            "carved maze"
        );
    }

    /// Mark `at` as path and build its frame with freshly shuffled directions
    fn open(&mut self, grid: &mut Grid, at: Point, carved: &mut usize) -> Frame {
        if let Some(cell) = grid.get_mut(at) {
            *cell = Cell::Path;
            *carved += 1;
        }
        let mut directions = Self::DIRECTIONS;
        directions.shuffle(&mut self.random);
        Frame {
            at,
            directions,
            next: 0,
        }
    }
}
