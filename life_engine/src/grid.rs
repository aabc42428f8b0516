// grid.rs - Grid types for Conway's Game of Life

use std::fmt;

use rand::Rng;

use crate::error::{EngineError, Result};

// Compile-time grid size configuration
pub const GRID_WIDTH: usize = 40;                     // Columns
pub const GRID_HEIGHT: usize = 30;                    // Rows
pub const CELL_COUNT: usize = GRID_WIDTH * GRID_HEIGHT;

/// A randomized cell is alive when its uniform draw exceeds this (~30% alive).
pub const LIVE_THRESHOLD: f64 = 0.7;

const FINGERPRINT_WORDS: usize = CELL_COUNT.div_ceil(64);

pub type TRow = [bool; GRID_WIDTH];

/// Row-major boolean matrix of fixed size. `true` is a live cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [TRow; GRID_HEIGHT],
}

/// Exact bit-packed image of a grid. Two fingerprints are equal iff the grids are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u64; FINGERPRINT_WORDS]);

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// All-dead grid.
    pub const fn new() -> Self {
        Self {
            cells: [[false; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    /// Grid with exactly the listed cells alive.
    pub fn from_live_cells(cells: &[(usize, usize)]) -> Result<Self> {
        let mut grid = Self::new();
        for &(row, col) in cells {
            grid.set(row, col, true)?;
        }
        Ok(grid)
    }

    /// Each cell drawn independently, alive when `uniform(0, 1) > LIVE_THRESHOLD`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut grid = Self::new();
        for row in grid.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.gen_range(0.0..1.0) > LIVE_THRESHOLD;
            }
        }
        grid
    }

    pub const fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub const fn height(&self) -> usize {
        GRID_HEIGHT
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < GRID_HEIGHT && col < GRID_WIDTH
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        self.check(row, col)?;
        Ok(self.cells[row][col])
    }

    /// Sets one cell. Returns whether the cell changed.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<bool> {
        self.check(row, col)?;
        let cell = &mut self.cells[row][col];
        let changed = *cell != alive;
        *cell = alive;
        Ok(changed)
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool> {
        self.check(row, col)?;
        let cell = &mut self.cells[row][col];
        *cell = !*cell;
        Ok(*cell)
    }

    pub fn rows(&self) -> &[TRow; GRID_HEIGHT] {
        &self.cells
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().flatten().filter(|&&alive| alive).count()
    }

    /// `(row, col)` of every live cell in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, &alive)| alive)
                .map(move |(col, _)| (row, col))
        })
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let mut words = [0u64; FINGERPRINT_WORDS];
        for (index, &alive) in self.cells.iter().flatten().enumerate() {
            if alive {
                words[index / 64] |= 1 << (index % 64);
            }
        }
        Fingerprint(words)
    }

    pub(crate) fn alive(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    pub(crate) fn set_row(&mut self, row: usize, cells: TRow) {
        self.cells[row] = cells;
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds { row, col })
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|&alive| if alive { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(population {})\n{self}", self.population())
    }
}
