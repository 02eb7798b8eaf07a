use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chip8_vm::constants::{CLOCK_RATE, ROM_START};
use chip8_vm::{compile_program, decompile_program, Config};

mod run;

#[derive(Parser)]
#[command(name = "chip8")]
#[command(about = "Assemble, disassemble and run CHIP-8 programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble a text listing into a ROM
    Asm {
        #[arg(help = "Assembly listing, one instruction or hex constant per line")]
        input: PathBuf,

        #[arg(short, long, help = "Where to write the ROM")]
        output: PathBuf,
    },

    /// Disassemble a ROM into a text listing
    Disasm {
        #[arg(help = "ROM file to disassemble")]
        rom: PathBuf,

        #[arg(short, long, help = "Where to write the listing (default: stdout)")]
        output: Option<PathBuf>,
    },

    /// Run a ROM without a window and print the final machine state
    Run(RunArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    #[arg(help = "ROM file to load")]
    rom: PathBuf,

    #[arg(long, default_value_t = CLOCK_RATE, help = "CPU cycles per second")]
    clock_rate: u32,

    #[arg(long, overrides_with = "no_legacy", help = "Mark the program as original CHIP-8 (default); informational only")]
    legacy: bool,

    #[arg(long, help = "Mark the program as S-CHIP; informational only")]
    no_legacy: bool,

    #[arg(long, help = "Clip sprites at the screen edges instead of wrapping")]
    no_wrap: bool,

    #[arg(long, help = "Stop after this many cycles")]
    cycles: Option<u64>,

    #[arg(long = "break", value_name = "INDEX", help = "Pause before the instruction at INDEX")]
    breakpoints: Vec<usize>,

    #[arg(long, help = "Ignore the clock rate and run as fast as possible")]
    fast: bool,
}

impl RunArgs {
    fn config(&self) -> Config {
        Config {
            clock_rate: self.clock_rate,
            legacy_mode: self.legacy || !self.no_legacy,
            wrapping: !self.no_wrap,
            ..Config::default()
        }
    }
}

fn assemble(input: PathBuf, output: PathBuf) -> Result<(), Box<dyn Error>> {
    let source = fs::read_to_string(&input)?;
    let lines: Vec<&str> = source.lines().collect();
    let result = compile_program(&lines);
    for idx in &result.failures {
        log::warn!("{}:{}: unable to assemble `{}`", input.display(), idx + 1, lines[*idx]);
    }
    fs::write(&output, result.to_bytes())?;
    log::info!(
        "wrote {} instructions to {} ({} failed)",
        result.program.len(),
        output.display(),
        result.failures.len()
    );
    Ok(())
}

fn disassemble(rom: PathBuf, output: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(&rom)?;
    let result = decompile_program(&bytes);
    for idx in &result.failures {
        log::warn!(
            "{:#05X}: {} is not an instruction",
            ROM_START + idx * 2,
            result.program[*idx]
        );
    }

    let mut listing = result.program.join("\n");
    listing.push('\n');
    match output {
        Some(path) => fs::write(path, listing)?,
        None => print!("{}", listing),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("chip8", log::LevelFilter::Info)
        .filter_module("chip8_vm", log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    match Cli::parse().command {
        Command::Asm { input, output } => assemble(input, output),
        Command::Disasm { rom, output } => disassemble(rom, output),
        Command::Run(args) => run::run(run::RunOptions {
            config: args.config(),
            rom: args.rom,
            cycles: args.cycles,
            breakpoints: args.breakpoints,
            fast_forward: args.fast,
        }),
    }
}
