use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chip8_vm::{Chip8, Config};

pub struct RunOptions {
    pub rom: PathBuf,
    pub config: Config,
    /// Stop after this many cycles; otherwise run until the machine pauses.
    pub cycles: Option<u64>,
    pub breakpoints: Vec<usize>,
    /// Whether the clock rate should be ignored
    pub fast_forward: bool,
}

pub fn run(options: RunOptions) -> Result<(), Box<dyn Error>> {
    let mut chip8 = Chip8::with_config(options.config);
    for index in options.breakpoints {
        chip8.add_breakpoint(index);
    }

    // Load ROM
    chip8.load_rom_file(&options.rom)?;
    log::info!("running {}", options.rom.display());

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / chip8.clock_rate().max(1);
    let mut last_cycle = Instant::now();
    let mut executed: u64 = 0;

    while !chip8.is_paused() && options.cycles.map_or(true, |max| executed < max) {
        chip8.run_cycle();
        executed += 1;

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !options.fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    if let Some(register) = chip8.waiting_for_key() {
        log::info!("stopped waiting for a key press into v{:x}", register);
    }
    log::info!("stopped after {} cycles", executed);
    print!("{}", report(&chip8));
    Ok(())
}

/// Registers, stack, upcoming instructions and the screen as text.
fn report(chip8: &Chip8) -> String {
    let mut out = String::new();
    for (idx, value) in chip8.registers().iter().enumerate() {
        out += &format!("v{:x}={:02X}{}", idx, value, if idx % 8 == 7 { "\n" } else { " " });
    }
    out += &format!(
        "i={:04X} pc={:04X} delay={:02X} sound={:02X}\n",
        chip8.i(),
        chip8.pc(),
        chip8.timer().delay(),
        chip8.timer().sound()
    );
    out += &format!("stack={:04X?}\n", chip8.stack());
    for (addr, instruction) in chip8.upcoming_instructions(4) {
        out += &format!("{:04X}  {}\n", addr, instruction);
    }

    let display = chip8.display();
    for row in display.data().chunks(display.width()) {
        let line: String = row
            .iter()
            .map(|pixel| if *pixel == display.foreground_color() { '#' } else { '.' })
            .collect();
        out += &line;
        out.push('\n');
    }
    out
}
