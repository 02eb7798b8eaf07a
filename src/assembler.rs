use crate::instruction::{parse_hex, Instruction};

/// The output of `compile_program`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileResult {
    /// One word per input line; lines that failed to compile are `0x0000`.
    pub program: Vec<u16>,
    /// 0-based indices of the lines that failed to compile.
    pub failures: Vec<usize>,
}

impl CompileResult {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// The program as big-endian bytes, ready to be loaded as a ROM.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.program.iter().flat_map(|word| word.to_be_bytes()).collect()
    }
}

/// Assembles each line into one instruction word.
///
/// A line is either an instruction (`add v1, 0x02`) or a hex constant of up to 16 bits (`1A2B` or
/// `0x1A2B`). Any other line compiles to `0x0000` and is reported in `failures`; compilation always
/// runs to the end.
pub fn compile_program<S: AsRef<str>>(lines: &[S]) -> CompileResult {
    let mut result = CompileResult::default();
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        match compile_line(line) {
            Some(word) => result.program.push(word),
            None => {
                log::debug!("line {}: unable to compile `{}`", idx, line);
                result.program.push(0);
                result.failures.push(idx);
            }
        }
    }
    result
}

fn compile_line(line: &str) -> Option<u16> {
    line.parse::<Instruction>()
        .map(u16::from)
        .ok()
        .or_else(|| parse_hex(line.trim(), u16::MAX))
}
