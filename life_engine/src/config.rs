// config.rs - Runtime settings for a simulation session

use std::time::Duration;

use crate::error::{EngineError, Result};

pub const MIN_TICK_MS: u64 = 50;
pub const MAX_TICK_MS: u64 = 1000;
pub const TICK_STEP_MS: u64 = 50;
pub const DEFAULT_TICK_MS: u64 = 200;

/// Interval between generations while the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPeriod(u64);

impl TickPeriod {
    /// Accepts periods in `50..=1000` ms on a 50 ms step.
    pub fn from_millis(ms: u64) -> Result<Self> {
        if !(MIN_TICK_MS..=MAX_TICK_MS).contains(&ms) || ms % TICK_STEP_MS != 0 {
            return Err(EngineError::InvalidTickPeriod(ms));
        }
        Ok(Self(ms))
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Displayed frame rate, `round(1000 / period)`.
    pub fn frame_rate(self) -> u64 {
        (1000.0 / self.0 as f64).round() as u64
    }
}

impl Default for TickPeriod {
    fn default() -> Self {
        Self(DEFAULT_TICK_MS)
    }
}

/// Initial settings for a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub tick_period: TickPeriod,
    pub wrap_edges: bool,
    /// Seed for randomize; drawn from OS entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_period: TickPeriod::default(),
            wrap_edges: true,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_wrap_edges(mut self, wrap_edges: bool) -> Self {
        self.wrap_edges = wrap_edges;
        self
    }

    pub fn with_tick_period(mut self, tick_period: TickPeriod) -> Self {
        self.tick_period = tick_period;
        self
    }
}
