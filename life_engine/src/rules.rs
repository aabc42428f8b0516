// rules.rs - B3/S23 neighbor counting and generation stepping

use tokio::task::JoinSet;

use crate::error::{EngineError, Result};
use crate::grid::{GRID_HEIGHT, GRID_WIDTH, Grid, TRow};

const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Classic Conway transition.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Live cells among the 8 neighbors of `(row, col)`.
///
/// With `wrap` the grid is a torus. Without it, positions off the edge are skipped.
pub fn count_live_neighbors(grid: &Grid, row: usize, col: usize, wrap: bool) -> Result<u8> {
    if !grid.contains(row, col) {
        return Err(EngineError::OutOfBounds { row, col });
    }
    Ok(neighbors(grid, row, col, wrap))
}

fn neighbors(grid: &Grid, row: usize, col: usize, wrap: bool) -> u8 {
    let height = GRID_HEIGHT as isize;
    let width = GRID_WIDTH as isize;
    let mut count = 0;
    for (dr, dc) in OFFSETS {
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        if wrap {
            r = r.rem_euclid(height);
            c = c.rem_euclid(width);
        } else if r < 0 || r >= height || c < 0 || c >= width {
            continue;
        }
        if grid.alive(r as usize, c as usize) {
            count += 1;
        }
    }
    count
}

fn next_row(grid: &Grid, row: usize, wrap: bool) -> TRow {
    let mut cells = [false; GRID_WIDTH];
    for (col, cell) in cells.iter_mut().enumerate() {
        *cell = next_state(grid.alive(row, col), neighbors(grid, row, col, wrap));
    }
    cells
}

/// Next generation, computed from `grid` into a fresh grid.
pub fn step(grid: &Grid, wrap: bool) -> Grid {
    let mut next = Grid::new();
    for row in 0..GRID_HEIGHT {
        next.set_row(row, next_row(grid, row, wrap));
    }
    next
}

/// Row coroutine: evaluates one row of the frozen snapshot.
async fn process_row(row_index: usize, snapshot: Grid, wrap: bool) -> (usize, TRow) {
    let mut row_result = [false; GRID_WIDTH];
    for (col, cell) in row_result.iter_mut().enumerate() {
        *cell = next_state(snapshot.alive(row_index, col), neighbors(&snapshot, row_index, col, wrap));
        tokio::task::yield_now().await;
    }
    (row_index, row_result)
}

/// Same result as [`step`], with every row evaluated as its own tokio task.
///
/// Each task reads its own copy of the snapshot and hands back a finished row,
/// so reads and writes never alias. Must be called from within a tokio runtime.
pub async fn step_rows(grid: &Grid, wrap: bool) -> Result<Grid> {
    let snapshot = *grid;
    let mut tasks = JoinSet::new();
    for row in 0..GRID_HEIGHT {
        tasks.spawn(process_row(row, snapshot, wrap));
    }

    let mut next = Grid::new();
    while let Some(joined) = tasks.join_next().await {
        let (row_index, completed_row) = joined?;
        next.set_row(row_index, completed_row);
    }
    Ok(next)
}
