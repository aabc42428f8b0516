//! Conway's Game of Life on a fixed 40x30 grid.
//!
//! The [`Session`] owns the grid and gates every edit on the paused/running
//! mode. A [`Driver`] advances a [`SharedSession`] on a tokio runtime and stops
//! on its own once the grid repeats one of its last six states.
//!
//! ```
//! use life_engine::{Session, SimConfig, TickOutcome, patterns};
//!
//! let mut session = Session::new(SimConfig::default().with_seed(1));
//! session.load_pattern(&patterns::BLINKER).unwrap();
//! session.start();
//! assert_eq!(session.tick(), TickOutcome::Advanced { generation: 1 });
//! assert_eq!(session.tick(), TickOutcome::Stasis { generation: 2 });
//! assert!(!session.is_running());
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod history;
pub mod interaction;
pub mod patterns;
pub mod rules;
pub mod session;

pub use config::{SimConfig, TickPeriod};
pub use driver::{Driver, SharedSession};
pub use error::{EngineError, Result};
pub use grid::{Fingerprint, GRID_HEIGHT, GRID_WIDTH, Grid};
pub use history::{HISTORY_CAPACITY, HistoryBuffer, HistoryTracker, StasisRecord, observe_history};
pub use interaction::{DrawStroke, StrokeState};
pub use patterns::{PATTERNS, Pattern};
pub use session::{Session, TickOutcome, TickSnapshot};
