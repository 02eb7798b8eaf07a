use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::constants::{MAX_ROM_SIZE, REGISTER_COUNT, ROM_START};
use crate::display::Screen;
use crate::error::LoadError;
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::operations::Flow;
use crate::state::State;
use crate::timer::Timer;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - whether execution is `paused`
///  - the `breakpoints`, as instruction indices from the start of the ROM
///  - where the loaded ROM ends, and which file it came from
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - running, pausing and single-stepping the CPU
/// - inspecting registers, memory and the screen for a debugger or renderer
///
/// The machine never paces itself. Whoever drives it calls `run_cycle` at `clock_rate` times per
/// second; the timers keep real time on their own.
pub struct Chip8 {
    state: State,
    paused: bool,
    legacy_mode: bool,
    clock_rate: u32,
    breakpoints: BTreeSet<usize>,
    /// Set when a breakpoint paused the machine so that resuming executes the instruction there.
    passed_breakpoint: Option<u16>,
    rom_end: usize,
    current_rom: Option<PathBuf>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut state = State::new();
        state.screen.set_wrapping(config.wrapping);
        // A fresh screen has no foreground pixels, so this order never merges the two colors
        state.screen.set_foreground_color(config.foreground);
        state.screen.set_background_color(config.background);
        Chip8 {
            state,
            paused: true,
            legacy_mode: config.legacy_mode,
            clock_rate: config.clock_rate,
            breakpoints: BTreeSet::new(),
            passed_breakpoint: None,
            rom_end: ROM_START,
            current_rom: None,
        }
    }

    /// Returns the machine to its power-on state, paused and without a ROM.
    ///
    /// Breakpoints and configuration survive a reset.
    pub fn reset(&mut self) {
        self.state.reset();
        self.paused = true;
        self.passed_breakpoint = None;
        self.rom_end = ROM_START;
        self.current_rom = None;
        log::info!("reset");
    }

    /// Load a rom from a file
    ///
    /// On failure the machine is left exactly as it was.
    pub fn load_rom_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        let rom = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        self.load_rom(&rom)?;
        self.current_rom = Some(path.to_path_buf());
        Ok(())
    }

    /// Resets the machine, copies `rom` in at the ROM origin and starts running.
    ///
    /// A ROM that doesn't fit in memory is rejected without touching the machine.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::TooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.reset();
        self.state.memory.load(ROM_START, rom);
        self.rom_end = ROM_START + rom.len();
        self.paused = false;
        log::info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Loads a program given as instruction words, e.g. the output of the assembler.
    pub fn load_program(&mut self, program: &[u16]) -> Result<(), LoadError> {
        let rom: Vec<u8> = program.iter().flat_map(|word| word.to_be_bytes()).collect();
        self.load_rom(&rom)
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advances the machine by a single cycle
    /// - ticks the timers, even while paused
    /// - pauses if the pc has run outside the ROM or reached a breakpoint
    /// - otherwise fetches and executes the instruction at the pc
    pub fn run_cycle(&mut self) {
        self.state.timer.tick();
        if self.paused || !self.pc_in_rom() {
            return;
        }

        let pc = self.state.pc;
        if self.breakpoints.contains(&self.instruction_index(pc)) && self.passed_breakpoint != Some(pc) {
            log::warn!("hit breakpoint {} at {:#05X}", self.instruction_index(pc), pc);
            self.passed_breakpoint = Some(pc);
            self.paused = true;
            return;
        }

        self.execute();
    }

    /// Executes exactly one instruction whether or not the machine is paused, ignoring breakpoints.
    pub fn step(&mut self) {
        self.state.timer.tick();
        if self.pc_in_rom() {
            self.execute();
        }
    }

    fn execute(&mut self) {
        let instruction = Instruction::from(self.state.fetch());
        log::trace!(
            "{:04X} {:<16} v{:02X?} i{:04X} pc{:04X}",
            instruction.word(),
            instruction.to_string(),
            self.state.v,
            self.state.i,
            self.state.pc
        );
        if let Flow::Pause = instruction.operation()(&mut self.state, instruction) {
            self.paused = true;
        }
        self.passed_breakpoint = None;
    }

    /// Whether the pc points into the loaded ROM; pauses the machine if it doesn't.
    fn pc_in_rom(&mut self) -> bool {
        let pc = self.state.pc as usize;
        if (ROM_START..self.rom_end).contains(&pc) {
            true
        } else {
            log::warn!(
                "pc {:#05X} is outside the ROM ({:#05X}..{:#05X}), pausing",
                pc,
                ROM_START,
                self.rom_end
            );
            self.paused = true;
            false
        }
    }

    fn instruction_index(&self, pc: u16) -> usize {
        (pc as usize).saturating_sub(ROM_START) / 2
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad value 0x0..0xF
    /// * `pressed` whether the key went down or up
    ///
    /// A press completes a pending `key` instruction: the key is written to its register, the pc
    /// moves past it and the machine resumes.
    pub fn set_key_state(&mut self, key: u8, pressed: bool) {
        if let Some(press) = self.state.input.set_key_state(key, pressed) {
            self.state.v[press.register as usize] = press.key;
            self.state.advance_pc();
            self.paused = false;
        }
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.state.input.is_key_pressed(key)
    }

    /// The register a `key` instruction is waiting to fill, if any.
    pub fn waiting_for_key(&self) -> Option<u8> {
        self.state.input.waiting().map(|wait| wait.register)
    }

    pub fn clock_rate(&self) -> u32 {
        self.clock_rate
    }

    pub fn set_clock_rate(&mut self, clock_rate: u32) {
        self.clock_rate = clock_rate;
    }

    pub fn legacy_mode(&self) -> bool {
        self.legacy_mode
    }

    pub fn set_legacy_mode(&mut self, legacy_mode: bool) {
        self.legacy_mode = legacy_mode;
    }

    /// Pause before executing the instruction at `index` (0 is the first instruction of the ROM).
    pub fn add_breakpoint(&mut self, index: usize) {
        self.breakpoints.insert(index);
    }

    pub fn remove_breakpoint(&mut self, index: usize) {
        self.breakpoints.remove(&index);
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    pub fn breakpoints(&self) -> &BTreeSet<usize> {
        &self.breakpoints
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.state.v
    }

    pub fn i(&self) -> u16 {
        self.state.i
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn stack(&self) -> &[u16] {
        &self.state.stack
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn display(&self) -> &Screen {
        &self.state.screen
    }

    /// For changing the palette or wrapping mode.
    pub fn display_mut(&mut self) -> &mut Screen {
        &mut self.state.screen
    }

    pub fn timer(&self) -> &Timer {
        &self.state.timer
    }

    /// Whether a tone should be playing.
    pub fn is_sound(&self) -> bool {
        self.state.timer.is_sound()
    }

    /// The address one past the last byte of the loaded ROM.
    pub fn rom_end(&self) -> usize {
        self.rom_end
    }

    pub fn current_rom(&self) -> Option<&Path> {
        self.current_rom.as_deref()
    }

    /// The next `count` instructions starting at the pc, with their addresses.
    pub fn upcoming_instructions(&self, count: usize) -> Vec<(u16, Instruction)> {
        (0..count)
            .map(|offset| {
                let addr = self.state.pc.wrapping_add((offset as u16).wrapping_mul(2));
                (addr, Instruction::from(self.state.memory.word(addr)))
            })
            .collect()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
