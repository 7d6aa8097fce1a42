//! Maze grid storage
//!
//! The grid is a flat, owned buffer of [Cell]s addressed by [Point]. Every
//! access goes through a bounds-checked accessor, so callers never index
//! outside the grid.

use std::collections::VecDeque;
use std::fmt;

use anyhow::{anyhow, bail};
use itertools::Itertools;

/// Location in the maze
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Point shifted by `(d_row, d_col)`, or `None` if it would go negative.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Point> {
        Some(Point {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Contents of a single grid square
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Cell {
    Wall,
    Path,
    Start,
    End,
}

impl Cell {
    pub const S_WALL: char = '🟫';
    pub const S_PATH: char = '🟩';
    pub const S_START: char = '🏃';
    pub const S_END: char = '❎';

    /// Emoji used for this cell in the text form of a grid
    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => Self::S_WALL,
            Cell::Path => Self::S_PATH,
            Cell::Start => Self::S_START,
            Cell::End => Self::S_END,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            Self::S_WALL => Some(Cell::Wall),
            Self::S_PATH => Some(Cell::Path),
            Self::S_START => Some(Cell::Start),
            Self::S_END => Some(Cell::End),
            _ => None,
        }
    }

    /// Whether the player may stand on this cell
    pub fn is_open(self) -> bool {
        self != Cell::Wall
    }
}

/// Rectangular maze grid
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
    /// Location of the start marker
    start: Point,
    /// Location of the final target
    end: Point,
}

impl Grid {
    /// Allocate an `size`×`size` grid filled entirely with walls.
    ///
    /// Start and end locations are fixed at `(1, 1)` and
    /// `(size - 2, size - 2)`; they are marked on the grid by
    /// [Self::mark_endpoints] once carving is done. The caller is
    /// responsible for passing a validated size (see
    /// [crate::MazeSize]).
    pub fn allocate(size: usize) -> Self {
        Self::with_dimensions(size, size)
    }

    pub(crate) fn with_dimensions(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::Wall; height * width],
            start: Point::new(1, 1),
            end: Point::new(height.saturating_sub(2), width.saturating_sub(2)),
        }
    }

    /// Parse grid from its emoji representation
    ///
    /// - `emojis`: One line per row, using the symbols of [Cell].
    ///
    /// Returns error, if the layout contains unknown characters, rows
    /// of different length, or not exactly one start and one end.
    ///
    /// # Examples
    /// ```
    /// use terminal_maze::{Cell, Grid, Point};
    /// let grid = Grid::parse_emojis(
    ///     "🟫🟫🟫🟫🟫
    /// 🟫🏃🟩🟩🟫
    /// 🟫🟫🟫❎🟫
    /// 🟫🟫🟫🟫🟫",
    /// )
    /// .unwrap();
    /// assert_eq!(grid.get(Point::new(1, 2)), Some(Cell::Path));
    /// assert_eq!(grid.end(), Point::new(2, 3));
    /// ```
    pub fn parse_emojis(emojis: &str) -> anyhow::Result<Self> {
        let rows: Vec<Vec<char>> = emojis
            .lines()
            .map(|row| row.trim().chars().collect())
            .collect();

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            bail!("Maze is empty");
        }

        let mut cells = Vec::with_capacity(height * width);
        let mut start = None;
        let mut end = None;
        for (row, line) in rows.iter().enumerate() {
            if line.len() != width {
                bail!(
                    "Row {} has {} squares, expected {}",
                    row,
                    line.len(),
                    width
                );
            }
            for (col, c) in line.iter().enumerate() {
                let cell = Cell::from_symbol(*c).ok_or_else(|| {
                    anyhow!("Unexpected character `{}` at row={}, col={}", c, row, col)
                })?;
                let slot = match cell {
                    Cell::Start => Some(&mut start),
                    Cell::End => Some(&mut end),
                    _ => None,
                };
                if let Some(slot) = slot {
                    if slot.replace(Point::new(row, col)).is_some() {
                        bail!("Duplicate {:?} at row={}, col={}", cell, row, col);
                    }
                }
                cells.push(cell);
            }
        }

        Ok(Grid {
            height,
            width,
            cells,
            start: start.ok_or_else(|| anyhow!("Start is not found in maze"))?,
            end: end.ok_or_else(|| anyhow!("End is not found in maze"))?,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.height && point.col < self.width
    }

    /// Whether the point lies on the outermost ring of the grid
    pub fn is_border(&self, point: Point) -> bool {
        point.row == 0
            || point.col == 0
            || point.row + 1 == self.height
            || point.col + 1 == self.width
    }

    fn index(&self, point: Point) -> Option<usize> {
        self.contains(point)
            .then(|| point.row * self.width + point.col)
    }

    /// Cell at `point`, or `None` outside the grid
    pub fn get(&self, point: Point) -> Option<Cell> {
        self.index(point).map(|idx| self.cells[idx])
    }

    pub(crate) fn get_mut(&mut self, point: Point) -> Option<&mut Cell> {
        let idx = self.index(point)?;
        self.cells.get_mut(idx)
    }

    /// Place the start and end markers on their (already carved) cells.
    pub(crate) fn mark_endpoints(&mut self) {
        let (start, end) = (self.start, self.end);
        if let Some(cell) = self.get_mut(start) {
            *cell = Cell::Start;
        }
        if let Some(cell) = self.get_mut(end) {
            *cell = Cell::End;
        }
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Every non-wall location, in row-major order
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height)
            .cartesian_product(0..self.width)
            .map(|(row, col)| Point::new(row, col))
            .filter(move |p| self.get(*p).is_some_and(Cell::is_open))
    }

    /// Open orthogonal neighbours of `point`
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| point.offset(dr, dc))
            .filter(move |p| self.get(*p).is_some_and(Cell::is_open))
    }

    /// Shortest walk between two open cells, including both ends
    ///
    /// Breadth-first search over open cells. Returns `None` if either end
    /// is a wall or no walk exists.
    pub fn shortest_path(&self, from: Point, to: Point) -> Option<Vec<Point>> {
        if !self.get(from)?.is_open() || !self.get(to)?.is_open() {
            return None;
        }

        let mut prev: Vec<Option<Point>> = vec![None; self.cells.len()];
        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([from]);
        visited[self.index(from)?] = true;

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = vec![to];
                let mut step = to;
                while let Some(p) = prev[self.index(step)?] {
                    path.push(p);
                    step = p;
                }
                path.reverse();
                return Some(path);
            }
            for next in self.neighbors(current) {
                let idx = self.index(next)?;
                if !visited[idx] {
                    visited[idx] = true;
                    prev[idx] = Some(current);
                    queue.push_back(next);
                }
            }
        }
        None
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .rows()
            .map(|row| row.iter().map(|c| c.symbol()).join(""))
            .join("\n");
        f.write_str(&text)
    }
}
