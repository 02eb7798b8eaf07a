use crate::constants::{REGISTER_COUNT, ROM_START};
use crate::display::Screen;
use crate::input::Input;
use crate::memory::Memory;
use crate::timer::Timer;

/// The Chip8 processor state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the flag register for carry, borrow and collisions
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Stack
/// - return addresses pushed by `call` and popped by `ret`
/// - grows as needed; the classic 16 entry limit is not enforced
///
/// ## Memory
/// - 4096 bytes of addressable memory, the font at the bottom and the ROM from 0x200
/// - a 64x32 screen
///
/// ## Input
/// - the pressed status of keys 0..F
/// - optionally a register waiting for the next key press
///
/// ## Timing
/// - delay and sound timers, decremented at 60Hz of real time
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Vec<u16>,
    pub memory: Memory,
    pub screen: Screen,
    pub input: Input,
    pub timer: Timer,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: ROM_START as u16,
            stack: Vec::new(),
            memory: Memory::new(),
            screen: Screen::new(),
            input: Input::new(),
            timer: Timer::new(),
        }
    }

    /// Returns the processor to its power-on state.
    ///
    /// The screen keeps its colors and wrapping mode.
    pub fn reset(&mut self) {
        self.v = [0; REGISTER_COUNT];
        self.i = 0;
        self.pc = ROM_START as u16;
        self.stack.clear();
        self.memory.clear();
        self.screen.clear();
        self.input.reset();
        self.timer.reset();
    }

    /// Moves the program counter to the next instruction.
    pub fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// The instruction word at the program counter.
    pub fn fetch(&self) -> u16 {
        self.memory.word(self.pc)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
