use crate::constants::{BACKGROUND_COLOR, CLOCK_RATE, FOREGROUND_COLOR};

/// # Config
/// Start-up settings for a `Chip8`.
///
/// Every field can also be changed on a running machine; this only bundles the initial values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Target CPU cycles per second. The core never paces itself; the run loop reads this.
    pub clock_rate: u32,
    /// Whether the program targets original CHIP-8 rather than S-CHIP. Stored for front ends;
    /// execution never reads it. The single-register `shr`/`shl` form is resolved when assembling.
    pub legacy_mode: bool,
    /// Whether sprites drawn past an edge of the display wrap to the opposite edge.
    pub wrapping: bool,
    pub foreground: u32,
    pub background: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_rate: CLOCK_RATE,
            legacy_mode: true,
            wrapping: true,
            foreground: FOREGROUND_COLOR,
            background: BACKGROUND_COLOR,
        }
    }
}
