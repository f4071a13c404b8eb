//! Pausable stopwatch used for the match clock and the per-side timeout clocks.

use std::time::{Duration, Instant};

/// A stopwatch that can be started once and then paused and resumed.
///
/// Every operation is idempotent: starting a started stopwatch, pausing a
/// paused one, or resuming a running one does nothing. The `*_at` variants
/// take the current instant explicitly so callers can drive time in tests.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started: bool,
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl Stopwatch {
    /// Create a stopwatch that has never been started.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn unpause(&mut self) {
        self.unpause_at(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Start counting from `now`. No-op if the stopwatch was ever started.
    pub fn start_at(&mut self, now: Instant) {
        if self.started {
            return;
        }
        self.started = true;
        self.running_since = Some(now);
    }

    /// Stop counting and bank the time run so far.
    pub fn pause_at(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    /// Resume counting. Has no effect before the first start.
    pub fn unpause_at(&mut self, now: Instant) {
        if self.started && self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Total running time up to `now`, excluding paused intervals.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let current = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.accumulated + current
    }

    /// Whether [`start`](Self::start) has ever been called.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Whether the stopwatch is currently counting.
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_new_stopwatch_is_idle() {
        let sw = Stopwatch::new();
        assert!(!sw.has_started());
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_start_runs() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start_at(t0);
        assert!(sw.has_started());
        assert!(sw.is_running());
        assert_eq!(sw.elapsed_at(t0 + secs(5)), secs(5));
    }

    #[test]
    fn test_second_start_does_not_reset() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start_at(t0);
        sw.start_at(t0 + secs(10));
        assert_eq!(sw.elapsed_at(t0 + secs(12)), secs(12));
    }

    #[test]
    fn test_pause_excludes_paused_interval() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start_at(t0);
        sw.pause_at(t0 + secs(3));
        assert!(!sw.is_running());
        assert!(sw.has_started());
        assert_eq!(sw.elapsed_at(t0 + secs(100)), secs(3));

        sw.unpause_at(t0 + secs(10));
        assert!(sw.is_running());
        assert_eq!(sw.elapsed_at(t0 + secs(12)), secs(5));
    }

    #[test]
    fn test_repeated_pause_and_unpause_are_idempotent() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start_at(t0);
        sw.pause_at(t0 + secs(2));
        sw.pause_at(t0 + secs(4));
        assert_eq!(sw.elapsed_at(t0 + secs(6)), secs(2));

        sw.unpause_at(t0 + secs(6));
        sw.unpause_at(t0 + secs(8));
        assert_eq!(sw.elapsed_at(t0 + secs(9)), secs(5));
    }

    #[test]
    fn test_unpause_before_start_is_ignored() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.unpause_at(t0);
        assert!(!sw.is_running());
        assert!(!sw.has_started());
    }

    #[test]
    fn test_pause_before_start_is_ignored() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.pause_at(t0);
        assert!(!sw.has_started());
        assert_eq!(sw.elapsed_at(t0 + secs(1)), Duration::ZERO);
    }
}
