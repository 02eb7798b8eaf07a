pub use assembler::{compile_program, CompileResult};
pub use chip8::Chip8;
pub use config::Config;
pub use disassembler::{decompile_program, DecompileResult};
pub use display::{Display, Screen};
pub use error::{LoadError, ParseInstructionError};
pub use input::{Input, KeyPress, KeyWait};
pub use instruction::{Instruction, Operation};
pub use memory::Memory;
pub use opcode::{Opcode, Operands};
pub use operations::Flow;
pub use state::State;
pub use stopwatch::Stopwatch;
pub use timer::Timer;

mod assembler;
mod chip8;
mod config;
pub mod constants;
mod disassembler;
mod display;
mod error;
mod input;
mod instruction;
mod memory;
mod opcode;
pub mod operations;
mod state;
mod stopwatch;
mod timer;
