/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are loaded into memory starting here; the program counter starts here after a reset.
pub const ROM_START: usize = 0x200;

/// The largest ROM that fits between `ROM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - ROM_START;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of general purpose registers (V0..VF).
pub const REGISTER_COUNT: usize = 16;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// The delay and sound timers count down at this rate, independent of the CPU clock.
pub const TIMER_FREQUENCY: u32 = 60;

/// Default CPU clock rate in cycles per second.
pub const CLOCK_RATE: u32 = 500;

/// Pixel colors are packed RGBA.
pub const BACKGROUND_COLOR: u32 = 0x0000_00FF;
pub const FOREGROUND_COLOR: u32 = 0xFFFF_FFFF;

/// Every glyph in the font is 5 bytes tall.
pub const FONT_GLYPH_SIZE: usize = 5;

/// # Font
/// Sprites for the hexadecimal digits 0..F, stored at the very start of memory.
///
/// Each glyph is 4 pixels wide and 5 pixels tall; only the high nibble of each byte is used.
/// ```text
/// 0xF0  ████
/// 0x90  █  █
/// 0x90  █  █
/// 0x90  █  █
/// 0xF0  ████
/// ```
pub const FONT: [u8; 16 * FONT_GLYPH_SIZE] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
