// session.rs - Simulation state and the mode-gated operations on it

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{SimConfig, TickPeriod};
use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::history::{HistoryTracker, StasisRecord};
use crate::interaction::{DrawStroke, StrokeState};
use crate::patterns::{self, Pattern};
use crate::rules;

/// Result of asking the session for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened.
    Paused,
    Advanced { generation: u64 },
    /// The new grid repeats a recent one; the simulation stopped.
    Stasis { generation: u64 },
    /// The grid was edited after the snapshot was taken; the result was thrown away.
    Discarded,
}

/// Frozen input of one generation step.
#[derive(Debug, Clone, Copy)]
pub struct TickSnapshot {
    grid: Grid,
    wrap: bool,
    revision: u64,
}

impl TickSnapshot {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }
}

/// One simulation: grid, counters, mode flags, stroke and stasis watch.
///
/// Every editing operation is rejected with [`EngineError::Running`] while the
/// simulation runs, and clears the history window and stasis record.
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    generation: u64,
    running: bool,
    wrap_edges: bool,
    tick_period: TickPeriod,
    stroke: DrawStroke,
    history: HistoryTracker,
    stasis: StasisRecord,
    // Bumped whenever the grid changes; lets an off-lock step detect edits.
    revision: u64,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Session {
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            grid: Grid::new(),
            generation: 0,
            running: false,
            wrap_edges: config.wrap_edges,
            tick_period: config.tick_period,
            stroke: DrawStroke::new(),
            history: HistoryTracker::new(),
            stasis: StasisRecord::default(),
            revision: 0,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn wrap_edges(&self) -> bool {
        self.wrap_edges
    }

    pub fn tick_period(&self) -> TickPeriod {
        self.tick_period
    }

    pub fn frame_rate(&self) -> u64 {
        self.tick_period.frame_rate()
    }

    pub fn stasis(&self) -> StasisRecord {
        self.stasis
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.stroke.state()
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_drawing()
    }

    // --- Mode control ---

    /// Starts stepping; a fresh trajectory is watched for stasis.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.forget_trajectory();
        self.running = true;
        log::info!("Simulation started at generation {}", self.generation);
    }

    /// Stops stepping without touching the grid.
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Simulation paused at generation {}", self.generation);
        }
    }

    /// Returns the new running state.
    pub fn toggle_running(&mut self) -> bool {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
        self.running
    }

    /// All-dead grid, generation 0, paused. Accepted in either mode.
    pub fn reset(&mut self) {
        self.running = false;
        self.stroke.release();
        self.grid = Grid::new();
        self.generation = 0;
        self.manual_change();
        log::info!("Grid reset");
    }

    /// Fresh random grid (~30% alive) at generation 0. Leaves the mode unchanged.
    pub fn randomize(&mut self) -> Result<()> {
        self.ensure_paused()?;
        self.grid = Grid::random(&mut self.rng);
        self.generation = 0;
        self.manual_change();
        log::info!("Grid randomized, population {}", self.grid.population());
        Ok(())
    }

    pub fn set_wrap_edges(&mut self, wrap_edges: bool) -> Result<()> {
        self.ensure_paused()?;
        self.wrap_edges = wrap_edges;
        Ok(())
    }

    pub fn set_tick_period(&mut self, tick_period: TickPeriod) {
        self.tick_period = tick_period;
        log::debug!("Tick period {}ms ({} fps)", tick_period.as_millis(), tick_period.frame_rate());
    }

    pub fn set_tick_millis(&mut self, ms: u64) -> Result<()> {
        self.set_tick_period(TickPeriod::from_millis(ms)?);
        Ok(())
    }

    // --- Editing ---

    /// Flips one cell and returns its new state.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool> {
        self.ensure_paused()?;
        let alive = self.grid.toggle(row, col)?;
        self.manual_change();
        Ok(alive)
    }

    /// Press and release on one cell: exactly one toggle.
    pub fn click(&mut self, row: usize, col: usize) -> Result<bool> {
        let paint = self.press(row, col)?;
        self.release();
        Ok(paint)
    }

    /// Pointer down on a cell. Returns the stroke's paint value.
    pub fn press(&mut self, row: usize, col: usize) -> Result<bool> {
        self.ensure_paused()?;
        let paint = self.stroke.press(&mut self.grid, row, col)?;
        self.manual_change();
        log::debug!("Stroke started at ({row}, {col}), painting {paint}");
        Ok(paint)
    }

    /// Pointer entered a cell while down. Returns whether the cell changed.
    pub fn enter(&mut self, row: usize, col: usize) -> Result<bool> {
        self.ensure_paused()?;
        let changed = self.stroke.enter(&mut self.grid, row, col)?;
        if changed {
            self.manual_change();
        }
        Ok(changed)
    }

    /// Pointer up anywhere. Always accepted.
    pub fn release(&mut self) {
        if self.stroke.is_drawing() {
            log::debug!("Stroke ended");
        }
        self.stroke.release();
    }

    /// Overlays `pattern` centered and restarts the generation count.
    pub fn load_pattern(&mut self, pattern: &Pattern) -> Result<usize> {
        self.ensure_paused()?;
        let placed = patterns::load(&mut self.grid, pattern);
        self.generation = 0;
        self.manual_change();
        log::info!("Loaded {} ({placed} cells)", pattern.name);
        Ok(placed)
    }

    pub fn load_pattern_by_key(&mut self, key: &str) -> Result<usize> {
        let pattern = patterns::find(key)?;
        self.load_pattern(pattern)
    }

    /// Overlays `pattern` at an anchor; the generation count is kept.
    pub fn drop_pattern(&mut self, pattern: &Pattern, anchor_row: isize, anchor_col: isize) -> Result<usize> {
        self.ensure_paused()?;
        let placed = patterns::drop_at(&mut self.grid, pattern, anchor_row, anchor_col);
        self.manual_change();
        log::info!("Dropped {} at ({anchor_row}, {anchor_col}), {placed} cells placed", pattern.name);
        Ok(placed)
    }

    /// Drops `pattern` on the cell a drag-and-drop target index names.
    pub fn drop_pattern_at_index(&mut self, pattern: &Pattern, index: usize) -> Result<usize> {
        let (row, col) = patterns::cell_for_drop_index(index);
        self.drop_pattern(pattern, row as isize, col as isize)
    }

    // --- Stepping ---

    /// Inputs for the next generation, or `None` while paused.
    pub fn begin_tick(&self) -> Option<TickSnapshot> {
        self.running.then_some(TickSnapshot {
            grid: self.grid,
            wrap: self.wrap_edges,
            revision: self.revision,
        })
    }

    /// Accepts a generation computed from `snapshot`.
    ///
    /// Rejected when the session was paused or edited since the snapshot.
    pub fn commit_tick(&mut self, snapshot: TickSnapshot, next: Grid) -> TickOutcome {
        if !self.running {
            return TickOutcome::Paused;
        }
        if snapshot.revision != self.revision {
            log::warn!("Discarding generation computed from a stale grid");
            return TickOutcome::Discarded;
        }

        self.history.seed(&self.grid);
        let repeated = self.history.observe(&next);
        self.grid = next;
        self.generation += 1;
        self.revision += 1;

        if repeated {
            self.running = false;
            self.stasis.mark(self.generation);
            log::info!("Stasis detected at generation {}", self.generation);
            TickOutcome::Stasis { generation: self.generation }
        } else {
            log::debug!("Generation {}: population {}", self.generation, self.grid.population());
            TickOutcome::Advanced { generation: self.generation }
        }
    }

    /// One synchronous generation.
    pub fn tick(&mut self) -> TickOutcome {
        match self.begin_tick() {
            Some(snapshot) => {
                let next = rules::step(&snapshot.grid, snapshot.wrap);
                self.commit_tick(snapshot, next)
            }
            None => TickOutcome::Paused,
        }
    }

    fn ensure_paused(&self) -> Result<()> {
        if self.running {
            log::debug!("Ignoring edit while running");
            return Err(EngineError::Running);
        }
        Ok(())
    }

    fn forget_trajectory(&mut self) {
        self.history.clear();
        self.stasis.clear();
    }

    fn manual_change(&mut self) {
        self.forget_trajectory();
        self.revision += 1;
    }
}
