use std::time::Duration;

use crate::constants::TIMER_FREQUENCY;
use crate::stopwatch::Stopwatch;

/// # Timer
/// The delay and sound timers.
///
/// Both count down towards zero at 60Hz of real time regardless of how fast the CPU is clocked.
/// Real time is measured with a pausable stopwatch and collected in an accumulator; every whole
/// 1/60s in the accumulator decrements both counters once.
///
/// - the delay timer can be read and written by programs
/// - while the sound timer is above zero a tone should be playing
#[derive(Debug, Clone)]
pub struct Timer {
    stopwatch: Stopwatch,
    elapsed: Duration,
    delay: u8,
    sound: u8,
}

impl Timer {
    /// Length of one timer period.
    pub const PERIOD: Duration = Duration::from_nanos(1_000_000_000 / TIMER_FREQUENCY as u64);

    pub fn new() -> Self {
        Timer {
            stopwatch: Stopwatch::new(),
            elapsed: Duration::ZERO,
            delay: 0,
            sound: 0,
        }
    }

    /// Zeroes both counters and restarts the clock.
    pub fn reset(&mut self) {
        self.stopwatch.reset();
        self.elapsed = Duration::ZERO;
        self.delay = 0;
        self.sound = 0;
    }

    /// Collects the real time since the last tick and counts down accordingly.
    pub fn tick(&mut self) {
        self.stopwatch.tick();
        self.advance(self.stopwatch.delta());
    }

    /// Counts down as though `elapsed` time had passed.
    pub fn advance(&mut self, elapsed: Duration) {
        self.elapsed += elapsed;
        while self.elapsed >= Self::PERIOD {
            self.elapsed -= Self::PERIOD;
            self.delay = self.delay.saturating_sub(1);
            self.sound = self.sound.saturating_sub(1);
        }
    }

    /// Stops the clock so the counters hold their values.
    pub fn pause(&mut self) {
        self.stopwatch.pause();
    }

    pub fn resume(&mut self) {
        self.stopwatch.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.stopwatch.is_paused()
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    /// Whether a tone should be playing.
    pub fn is_sound(&self) -> bool {
        self.sound > 0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
