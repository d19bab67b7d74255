//! Fixed-interval tick scheduler.
//!
//! A pure timing primitive: one registered callback, dispatched once per
//! interval while running and not paused. The callback returns
//! `ControlFlow::Break` to stop the scheduler from inside a tick. Hosts
//! either call `pump` from their own loop or hand control to `run`.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// The per-tick callback.
pub type TickCallback = Box<dyn FnMut() -> ControlFlow<()>>;

/// Ticks of lag tolerated before the schedule is re-based on the current time.
const MAX_CATCH_UP_TICKS: u32 = 2;

pub struct TickScheduler {
    interval: Duration,
    callback: Option<TickCallback>,
    running: bool,
    paused: bool,
    next_due: Option<Instant>,
    dispatched: u64,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            interval: Duration::from_millis(skyfire_core::constants::TICK_INTERVAL_MS),
            callback: None,
            running: false,
            paused: false,
            next_due: None,
            dispatched: 0,
        }
    }

    /// Register the tick callback, replacing any earlier one.
    pub fn initialize(&mut self, interval: Duration, callback: TickCallback) {
        if self.callback.is_some() {
            log::warn!("Tick callback replaced");
        }
        self.interval = interval.max(Duration::from_millis(1));
        self.callback = Some(callback);
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Begin dispatching with the first tick due at `now`. Clears any
    /// pause. Calling it while already running keeps the current schedule.
    pub fn start_at(&mut self, now: Instant) {
        if self.callback.is_none() {
            log::warn!("Scheduler started without a callback");
            return;
        }
        self.paused = false;
        if !self.running {
            self.running = true;
            self.next_due = Some(now);
            log::info!("Scheduler started at {:?} per tick", self.interval);
        }
    }

    pub fn pause(&mut self) {
        if self.running && !self.paused {
            self.paused = true;
            log::debug!("Scheduler paused after {} ticks", self.dispatched);
        }
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    /// Continue dispatching with the next tick due at `now`. No-op unless paused.
    pub fn resume_at(&mut self, now: Instant) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.next_due = Some(now);
        log::debug!("Scheduler resumed");
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.paused = false;
        self.next_due = None;
        log::info!("Scheduler stopped after {} ticks", self.dispatched);
    }

    /// Dispatch every tick due at `now`. Returns how many ran.
    ///
    /// When the host has fallen more than a couple of ticks behind, the
    /// schedule jumps to `now` instead of replaying the backlog.
    pub fn pump(&mut self, now: Instant) -> u32 {
        let mut ran = 0;
        while self.is_dispatching() {
            let Some(due) = self.next_due else {
                break;
            };
            if due > now {
                break;
            }
            let due = if now - due > self.interval * MAX_CATCH_UP_TICKS {
                log::debug!("Scheduler {:?} behind, skipping ahead", now - due);
                now
            } else {
                due
            };
            self.next_due = Some(due + self.interval);
            ran += 1;
            self.dispatch();
        }
        ran
    }

    /// Start and dispatch on the calling thread until stopped.
    pub fn run(&mut self) {
        self.start();
        while self.running {
            self.pump(Instant::now());
            let wait = match (self.paused, self.next_due) {
                (false, Some(due)) => due.saturating_duration_since(Instant::now()),
                _ => self.interval,
            };
            if self.running && !wait.is_zero() {
                std::thread::sleep(wait);
            }
        }
    }

    fn dispatch(&mut self) {
        let Some(callback) = self.callback.as_mut() else {
            return;
        };
        self.dispatched += 1;
        if callback().is_break() {
            self.stop();
        }
    }

    fn is_dispatching(&self) -> bool {
        self.running && !self.paused
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next tick is due, if dispatching.
    pub fn next_due(&self) -> Option<Instant> {
        if self.is_dispatching() {
            self.next_due
        } else {
            None
        }
    }

    /// Total callbacks run since construction.
    pub fn ticks_dispatched(&self) -> u64 {
        self.dispatched
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(50);

    fn counting() -> (TickScheduler, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let mut scheduler = TickScheduler::new();
        scheduler.initialize(
            INTERVAL,
            Box::new(move || {
                seen.set(seen.get() + 1);
                ControlFlow::Continue(())
            }),
        );
        (scheduler, count)
    }

    #[test]
    fn test_dispatches_once_per_interval() {
        let (mut scheduler, count) = counting();
        let t0 = Instant::now();
        scheduler.start_at(t0);

        assert_eq!(scheduler.pump(t0), 1);
        assert_eq!(scheduler.pump(t0 + INTERVAL / 2), 0);
        assert_eq!(scheduler.pump(t0 + INTERVAL), 1);
        assert_eq!(scheduler.pump(t0 + INTERVAL * 3), 2);
        assert_eq!(count.get(), 4);
        assert_eq!(scheduler.ticks_dispatched(), 4);
    }

    #[test]
    fn test_nothing_before_start() {
        let (mut scheduler, count) = counting();
        assert_eq!(scheduler.pump(Instant::now() + INTERVAL * 10), 0);
        assert_eq!(count.get(), 0);
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_pause_suspends_dispatch() {
        let (mut scheduler, count) = counting();
        let t0 = Instant::now();
        scheduler.start_at(t0);
        scheduler.pump(t0);

        scheduler.pause();
        assert!(scheduler.is_paused());
        assert_eq!(scheduler.pump(t0 + INTERVAL * 2), 0);
        assert_eq!(scheduler.next_due(), None);

        let t1 = t0 + INTERVAL * 20;
        scheduler.resume_at(t1);
        assert_eq!(scheduler.pump(t1), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_resume_without_pause_is_noop() {
        let (mut scheduler, _) = counting();
        let t0 = Instant::now();
        scheduler.start_at(t0);
        scheduler.pump(t0);
        let due = scheduler.next_due();

        scheduler.resume_at(t0 + INTERVAL * 7);
        assert_eq!(scheduler.next_due(), due);
    }

    #[test]
    fn test_start_is_idempotent_and_clears_pause() {
        let (mut scheduler, _) = counting();
        let t0 = Instant::now();
        scheduler.start_at(t0);
        scheduler.pump(t0);
        scheduler.pause();

        scheduler.start_at(t0 + INTERVAL * 5);
        assert!(!scheduler.is_paused());
        assert!(scheduler.is_running());
        assert_eq!(scheduler.next_due(), Some(t0 + INTERVAL));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut scheduler, count) = counting();
        let t0 = Instant::now();
        scheduler.start_at(t0);
        scheduler.stop();
        scheduler.stop();
        assert_eq!(scheduler.pump(t0 + INTERVAL), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_backlog_is_not_replayed() {
        let (mut scheduler, count) = counting();
        let t0 = Instant::now();
        scheduler.start_at(t0);

        let late = t0 + INTERVAL * 100;
        assert_eq!(scheduler.pump(late), 1);
        assert_eq!(scheduler.next_due(), Some(late + INTERVAL));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_break_stops_run() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let mut scheduler = TickScheduler::new();
        scheduler.initialize(
            Duration::from_millis(1),
            Box::new(move || {
                seen.set(seen.get() + 1);
                if seen.get() == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }),
        );

        scheduler.run();

        assert_eq!(count.get(), 3);
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_start_without_callback_does_nothing() {
        let mut scheduler = TickScheduler::new();
        scheduler.start();
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.interval(), Duration::from_millis(50));
    }
}
