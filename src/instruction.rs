use std::fmt;
use std::str::FromStr;

use crate::error::ParseInstructionError;
use crate::opcode::{Arg, Opcode, Operands};
use crate::operations::{self, Flow};
use crate::state::State;

/// A handler that carries out one instruction against the machine state.
pub type Operation = fn(state: &mut State, instruction: Instruction) -> Flow;

/// # Instruction
/// A 16-bit instruction word decomposed into its opcode and every operand field.
///
/// Not every field is meaningful for every opcode; `drw` uses x, y and n while `jmp` only uses nnn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub x: u8,
    pub y: u8,
    pub n: u8,
    pub nn: u8,
    pub nnn: u16,
    word: u16,
}

impl Instruction {
    /// Builds an instruction from an opcode and its packed operand bits.
    ///
    /// Bits of `operands` outside the opcode's operand fields are dropped.
    pub fn new(opcode: Opcode, operands: u16) -> Self {
        let word = if opcode.is_valid() {
            opcode.base() | (operands & opcode.operand_mask())
        } else {
            opcode.base()
        };
        Instruction::with_opcode(opcode, word)
    }

    /// Builds an instruction from the two bytes it occupies in memory (big-endian).
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Instruction::from(u16::from_be_bytes([high, low]))
    }

    fn with_opcode(opcode: Opcode, word: u16) -> Self {
        Instruction {
            opcode,
            x: word.x(),
            y: word.y(),
            n: word.n(),
            nn: word.nn(),
            nnn: word.nnn(),
            word,
        }
    }

    /// The packed 16-bit instruction word.
    pub fn word(&self) -> u16 {
        self.word
    }

    /// The two bytes this instruction occupies in memory.
    pub fn to_bytes(&self) -> [u8; 2] {
        self.word.to_be_bytes()
    }

    /// The handler for this instruction's opcode.
    pub fn operation(&self) -> Operation {
        operation(self.opcode)
    }

    fn render_arg(&self, arg: Arg) -> String {
        match arg {
            Arg::Vx => format!("v{:x}", self.x),
            Arg::Vy => format!("v{:x}", self.y),
            Arg::V0 => String::from("v0"),
            Arg::I => String::from("i"),
            Arg::N => format!("0x{:X}", self.n),
            Arg::Nn => format!("0x{:02X}", self.nn),
            Arg::Nnn => format!("0x{:03X}", self.nnn),
        }
    }
}

impl From<u16> for Instruction {
    fn from(word: u16) -> Self {
        Instruction::with_opcode(Opcode::decode(word), word)
    }
}

impl From<Instruction> for u16 {
    fn from(instruction: Instruction) -> Self {
        instruction.word
    }
}

/// Renders the instruction as a line of assembly, e.g. `drw v1, v2, 0x5`.
///
/// Words that don't decode to an instruction are rendered as a hex constant so they still
/// assemble back to the same word.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.opcode.is_valid() {
            return write!(f, "0x{:04X}", self.word);
        }

        let mut args = self.opcode.args();
        // The single-register shift is the same instruction with vy == vx
        if matches!(self.opcode, Opcode::ShrVx | Opcode::ShlVx) && self.x == self.y {
            args = &args[..1];
        }

        f.write_str(self.opcode.mnemonic())?;
        for (idx, arg) in args.iter().enumerate() {
            let separator = if idx == 0 { " " } else { ", " };
            write!(f, "{}{}", separator, self.render_arg(*arg))?;
        }
        Ok(())
    }
}

/// Parses one line of assembly.
///
/// Case-insensitive; operands are separated by whitespace and/or commas. Registers are written
/// `v` followed by one hex digit and literals are hex, with or without a `0x` prefix.
impl FromStr for Instruction {
    type Err = ParseInstructionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let lowered = line.to_lowercase().replace(',', " ");
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        let (mnemonic, args) = match tokens.split_first() {
            Some((mnemonic, args)) => (*mnemonic, args),
            None => return Err(ParseInstructionError(line.to_string())),
        };

        Opcode::ALL
            .iter()
            .filter(|op| op.mnemonic() == mnemonic)
            .find_map(|op| parse_operands(*op, args).map(|operands| Instruction::new(*op, operands)))
            .ok_or_else(|| ParseInstructionError(line.to_string()))
    }
}

/// Matches `args` against the operand syntax of `opcode`, returning the packed operand bits.
fn parse_operands(opcode: Opcode, args: &[&str]) -> Option<u16> {
    let short_form = args.len() == 1;
    let syntax: &[Arg] = match opcode {
        // shr/shl vx is the non-legacy form; vy defaults to vx
        Opcode::ShrVx | Opcode::ShlVx if short_form => {
            let x = parse_register(args[0])?;
            return Some(x << 8 | x << 4);
        }
        Opcode::StrV0Vx | Opcode::LdV0Vx if short_form => &[Arg::Vx],
        _ => opcode.args(),
    };

    if syntax.len() != args.len() {
        return None;
    }

    let mut operands = 0;
    for (arg, token) in syntax.iter().zip(args) {
        operands |= match arg {
            Arg::Vx => parse_register(token)? << 8,
            Arg::Vy => parse_register(token)? << 4,
            Arg::V0 if *token == "v0" => 0,
            Arg::I if *token == "i" => 0,
            Arg::V0 | Arg::I => return None,
            Arg::N => parse_hex(token, 0xF)?,
            Arg::Nn => parse_hex(token, 0xFF)?,
            Arg::Nnn => parse_hex(token, 0xFFF)?,
        };
    }
    Some(operands)
}

/// `v0`..`vf`
fn parse_register(token: &str) -> Option<u16> {
    let digit = token.strip_prefix('v')?;
    if digit.len() != 1 {
        return None;
    }
    parse_hex(digit, 0xF)
}

/// A hex literal, optionally `0x`-prefixed, no larger than `max`.
pub(crate) fn parse_hex(token: &str, max: u16) -> Option<u16> {
    let lowered = token.to_lowercase();
    let digits = lowered.strip_prefix("0x").unwrap_or(&lowered);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16)
        .ok()
        .filter(|value| *value <= max)
}

/// Selects the correct Operation for a given Opcode
pub fn operation(opcode: Opcode) -> Operation {
    use crate::operations::*;
    match opcode {
        Opcode::SysNnn => sys_nnn,
        Opcode::Cls => cls,
        Opcode::Ret => ret,
        Opcode::JmpNnn => jmp_nnn,
        Opcode::CallNnn => call_nnn,
        Opcode::SeVxNn => se_vx_nn,
        Opcode::SneVxNn => sne_vx_nn,
        Opcode::SeVxVy => se_vx_vy,
        Opcode::MovVxNn => mov_vx_nn,
        Opcode::AddVxNn => add_vx_nn,
        Opcode::MovVxVy => mov_vx_vy,
        Opcode::OrVxVy => or_vx_vy,
        Opcode::AndVxVy => and_vx_vy,
        Opcode::XorVxVy => xor_vx_vy,
        Opcode::AddVxVy => add_vx_vy,
        Opcode::SubVxVy => sub_vx_vy,
        Opcode::ShrVx => shr_vx,
        Opcode::SubnVxVy => subn_vx_vy,
        Opcode::ShlVx => shl_vx,
        Opcode::SneVxVy => sne_vx_vy,
        Opcode::MovINnn => mov_i_nnn,
        Opcode::JmpV0Nnn => jmp_v0_nnn,
        Opcode::RndVxNn => rnd_vx_nn,
        Opcode::DrwVxVyN => drw_vx_vy_n,
        Opcode::SkpVx => skp_vx,
        Opcode::SknpVx => sknp_vx,
        Opcode::GdlyVx => gdly_vx,
        Opcode::KeyVx => key_vx,
        Opcode::SdlyVx => sdly_vx,
        Opcode::SsndVx => ssnd_vx,
        Opcode::AddIVx => add_i_vx,
        Opcode::FontVx => font_vx,
        Opcode::BcdVx => bcd_vx,
        Opcode::StrV0Vx => str_v0_vx,
        Opcode::LdV0Vx => ld_v0_vx,
        Opcode::Invalid => operations::invalid,
    }
}
