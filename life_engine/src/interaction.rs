// interaction.rs - Press/drag/release painting over the grid

use crate::error::{EngineError, Result};
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrokeState {
    #[default]
    Idle,
    /// Pointer is down; every entered cell is set to `paint`.
    Drawing { paint: bool },
}

/// Starts a stroke at `(row, col)`: paint value is the negation of that cell,
/// which is set to it immediately.
pub fn begin_stroke(grid: &mut Grid, row: usize, col: usize) -> Result<bool> {
    let paint = !grid.get(row, col)?;
    grid.set(row, col, paint)?;
    Ok(paint)
}

/// Sets `(row, col)` to `paint`. Returns whether the cell changed.
pub fn paint_cell(grid: &mut Grid, row: usize, col: usize, paint: bool) -> Result<bool> {
    grid.set(row, col, paint)
}

/// Ends the stroke; always accepted.
pub fn end_stroke(state: &mut StrokeState) {
    *state = StrokeState::Idle;
}

/// One pointer stroke at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawStroke {
    state: StrokeState,
}

impl DrawStroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Paint value of the active stroke.
    pub fn paint(&self) -> Option<bool> {
        match self.state {
            StrokeState::Drawing { paint } => Some(paint),
            StrokeState::Idle => None,
        }
    }

    /// `Idle -> Drawing`. A press while already drawing starts a new stroke.
    pub fn press(&mut self, grid: &mut Grid, row: usize, col: usize) -> Result<bool> {
        let paint = begin_stroke(grid, row, col)?;
        self.state = StrokeState::Drawing { paint };
        Ok(paint)
    }

    /// Paints an entered cell. No-op when idle or when the cell already matches.
    pub fn enter(&mut self, grid: &mut Grid, row: usize, col: usize) -> Result<bool> {
        if !grid.contains(row, col) {
            return Err(EngineError::OutOfBounds { row, col });
        }
        match self.state {
            StrokeState::Drawing { paint } => paint_cell(grid, row, col, paint),
            StrokeState::Idle => Ok(false),
        }
    }

    pub fn release(&mut self) {
        end_stroke(&mut self.state);
    }
}
