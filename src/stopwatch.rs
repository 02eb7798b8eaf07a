use std::time::{Duration, Instant};

/// # Stopwatch
/// Measures real time between calls to `tick`, excluding any time spent paused.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    prev_time: Instant,
    delta: Duration,
    total: Duration,
    paused: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Stopwatch {
            prev_time: Instant::now(),
            delta: Duration::ZERO,
            total: Duration::ZERO,
            paused: false,
        }
    }

    /// Restarts from zero, running.
    pub fn reset(&mut self) {
        *self = Stopwatch::new();
    }

    /// Records the time elapsed since the previous tick (zero while paused).
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = if self.paused {
            Duration::ZERO
        } else {
            now - self.prev_time
        };
        self.total += self.delta;
        self.prev_time = now;
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.tick();
            self.paused = true;
        }
    }

    /// Continues timing from now; the paused interval is never counted.
    pub fn resume(&mut self) {
        if self.paused {
            self.prev_time = Instant::now();
            self.delta = Duration::ZERO;
            self.paused = false;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Time between the last two ticks.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Unpaused time accumulated by every tick since the last reset.
    pub fn total(&self) -> Duration {
        self.total
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_tick_measures_elapsed_time() {
        let mut stopwatch = Stopwatch::new();
        sleep(Duration::from_millis(5));
        stopwatch.tick();
        assert!(stopwatch.delta() >= Duration::from_millis(5));
        assert_eq!(stopwatch.total(), stopwatch.delta());
    }

    #[test]
    fn test_paused_time_is_not_counted() {
        let mut stopwatch = Stopwatch::new();
        stopwatch.pause();
        let before = stopwatch.total();
        sleep(Duration::from_millis(20));
        stopwatch.tick();
        assert_eq!(stopwatch.delta(), Duration::ZERO);
        stopwatch.resume();
        stopwatch.tick();
        assert!(stopwatch.total() - before < Duration::from_millis(20));
    }

    #[test]
    fn test_reset() {
        let mut stopwatch = Stopwatch::new();
        sleep(Duration::from_millis(1));
        stopwatch.tick();
        stopwatch.pause();
        stopwatch.reset();
        assert!(!stopwatch.is_paused());
        assert_eq!(stopwatch.total(), Duration::ZERO);
    }
}
