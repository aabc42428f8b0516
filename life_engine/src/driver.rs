// driver.rs - Timed generation driver on the tokio runtime

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::TickPeriod;
use crate::rules;
use crate::session::{Session, TickOutcome};

/// Session handle shared by the front end and the driver.
///
/// [`update`](Self::update) wakes the driver only when the run flag or tick
/// period actually changed; rejected or cosmetic edits leave the timer alone.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
    changes: Arc<watch::Sender<u64>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(session)),
            changes: Arc::new(changes),
        }
    }

    pub fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        f(&self.lock())
    }

    pub fn update<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let (out, rearm) = {
            let mut session = self.lock();
            let before = timing(&session);
            let out = f(&mut session);
            (out, timing(&session) != before)
        };
        if rearm {
            self.changes.send_modify(|version| *version = version.wrapping_add(1));
        }
        out
    }

    fn commit<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        f(&mut self.lock())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // Poisoning is ignored; every session field stays individually valid.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn timing(session: &Session) -> (bool, TickPeriod) {
    (session.is_running(), session.tick_period())
}

/// Periodic task advancing a [`SharedSession`] one generation per tick.
///
/// Ticks never overlap: each one is awaited to completion before the interval
/// is polled again, and late ticks are skipped rather than bunched up. The task
/// is aborted when the driver is dropped.
pub struct Driver {
    task: JoinHandle<()>,
}

impl Driver {
    /// Must be called from within a tokio runtime.
    pub fn spawn(session: SharedSession) -> Self {
        Self {
            task: tokio::spawn(run(session)),
        }
    }

    pub fn shutdown(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(session: SharedSession) {
    let mut changes = session.subscribe();
    loop {
        let (running, period) = session.read(|s| (s.is_running(), s.tick_period()));
        if !running {
            if changes.changed().await.is_err() {
                return;
            }
            continue;
        }

        log::debug!("Driver armed at {}ms", period.as_millis());
        let period = period.as_duration();
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if !matches!(advance(&session).await, TickOutcome::Advanced { .. }) {
                        break;
                    }
                }
                changed = changes.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}

async fn advance(session: &SharedSession) -> TickOutcome {
    let Some(snapshot) = session.read(Session::begin_tick) else {
        return TickOutcome::Paused;
    };
    match rules::step_rows(snapshot.grid(), snapshot.wrap()).await {
        Ok(next) => session.commit(|s| s.commit_tick(snapshot, next)),
        Err(err) => {
            log::error!("Generation step failed: {err}");
            session.update(Session::pause);
            TickOutcome::Paused
        }
    }
}
