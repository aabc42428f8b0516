//! Error types for the engine.

use thiserror::Error;

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A direct cell operation addressed a cell outside the grid.
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds {
        /// Row index that was requested.
        row: usize,
        /// Column index that was requested.
        col: usize,
    },

    /// The simulation is running; editing input is ignored until it is paused.
    #[error("simulation is running")]
    Running,

    /// Tick period outside 50..=1000 ms or not a multiple of 50 ms.
    #[error("invalid tick period: {0}ms")]
    InvalidTickPeriod(u64),

    /// No pattern is registered under this key.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// A row task of the concurrent stepper did not complete.
    #[error("row task failed: {0}")]
    RowTask(#[from] tokio::task::JoinError),
}

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
