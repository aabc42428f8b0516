// history.rs - Recent-state window for stasis detection
//
// The window holds 6 fingerprints, so repeats with period 1..=6 are caught.
// Longer cycles (e.g. a period-15 pentadecathlon) are never reported.

use std::collections::VecDeque;

use crate::grid::{Fingerprint, Grid};

pub const HISTORY_CAPACITY: usize = 6;

/// Most-recent-first fingerprints of recently seen grids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryBuffer {
    entries: VecDeque<Fingerprint>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains(fingerprint)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Fingerprint> {
        self.entries.iter()
    }

    /// Pushes to the front, evicting the oldest entry past capacity.
    pub fn push(&mut self, fingerprint: Fingerprint) {
        self.entries.push_front(fingerprint);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Tests `fingerprint` against `buffer`.
///
/// On a match the buffer comes back unchanged; otherwise the fingerprint is
/// recorded as the newest entry.
pub fn observe_history(buffer: &HistoryBuffer, fingerprint: Fingerprint) -> (bool, HistoryBuffer) {
    let mut updated = buffer.clone();
    if buffer.contains(&fingerprint) {
        return (true, updated);
    }
    updated.push(fingerprint);
    (false, updated)
}

/// Whether and when the simulation was found repeating itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StasisRecord {
    generation: Option<u64>,
}

impl StasisRecord {
    pub fn detected(&self) -> bool {
        self.generation.is_some()
    }

    /// Generation number at which the repeat was seen.
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    pub(crate) fn mark(&mut self, generation: u64) {
        self.generation = Some(generation);
    }

    pub(crate) fn clear(&mut self) {
        self.generation = None;
    }
}

/// Stateful wrapper over [`HistoryBuffer`] used by a running session.
#[derive(Debug, Clone, Default)]
pub struct HistoryTracker {
    buffer: HistoryBuffer,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &HistoryBuffer {
        &self.buffer
    }

    /// Records the grid a fresh trajectory starts from.
    pub fn seed(&mut self, grid: &Grid) {
        if self.buffer.is_empty() {
            self.buffer.push(grid.fingerprint());
        }
    }

    /// Returns `true` when `next` repeats a state in the window.
    pub fn observe(&mut self, next: &Grid) -> bool {
        let (matched, updated) = observe_history(&self.buffer, next.fingerprint());
        self.buffer = updated;
        matched
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(row: usize, col: usize) -> Grid {
        Grid::from_live_cells(&[(row, col)]).unwrap()
    }

    #[test]
    fn unseen_fingerprint_is_pushed_to_front() {
        let buffer = HistoryBuffer::new();
        let (matched, buffer) = observe_history(&buffer, single(0, 0).fingerprint());
        assert!(!matched);
        let (matched, buffer) = observe_history(&buffer, single(0, 1).fingerprint());
        assert!(!matched);
        let newest: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(newest, vec![single(0, 1).fingerprint(), single(0, 0).fingerprint()]);
    }

    #[test]
    fn match_leaves_buffer_unchanged() {
        let (_, buffer) = observe_history(&HistoryBuffer::new(), single(1, 1).fingerprint());
        let (matched, after) = observe_history(&buffer, single(1, 1).fingerprint());
        assert!(matched);
        assert_eq!(after, buffer);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut buffer = HistoryBuffer::new();
        for col in 0..7 {
            let (matched, updated) = observe_history(&buffer, single(0, col).fingerprint());
            assert!(!matched);
            buffer = updated;
        }
        assert_eq!(buffer.len(), HISTORY_CAPACITY);
        assert!(!buffer.contains(&single(0, 0).fingerprint()));
        assert!(buffer.contains(&single(0, 1).fingerprint()));
        assert_eq!(buffer.iter().next(), Some(&single(0, 6).fingerprint()));
    }

    #[test]
    fn tracker_detects_repeat_within_window() {
        let mut tracker = HistoryTracker::new();
        tracker.seed(&single(2, 2));
        for col in 3..8 {
            assert!(!tracker.observe(&single(2, col)));
        }
        assert!(tracker.observe(&single(2, 2)));
    }

    #[test]
    fn tracker_misses_period_seven() {
        let mut tracker = HistoryTracker::new();
        tracker.seed(&single(2, 0));
        for col in 1..7 {
            assert!(!tracker.observe(&single(2, col)));
        }
        assert!(!tracker.observe(&single(2, 0)));
    }

    #[test]
    fn seed_only_fills_empty_buffer() {
        let mut tracker = HistoryTracker::new();
        tracker.seed(&single(0, 0));
        tracker.seed(&single(0, 1));
        assert_eq!(tracker.buffer().len(), 1);
        tracker.clear();
        assert!(tracker.buffer().is_empty());
    }

    #[test]
    fn stasis_record_round_trip() {
        let mut record = StasisRecord::default();
        assert!(!record.detected());
        record.mark(4);
        assert_eq!(record.generation(), Some(4));
        record.clear();
        assert_eq!(record, StasisRecord::default());
    }
}
