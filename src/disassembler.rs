use crate::instruction::Instruction;
use crate::opcode::Opcode;

/// The output of `decompile_program`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecompileResult {
    /// One line per instruction slot, plus one for a trailing odd byte.
    pub program: Vec<String>,
    /// Indices of the words that don't decode to an instruction.
    pub failures: Vec<usize>,
}

/// Disassembles a ROM two bytes at a time.
///
/// Words that don't decode are written out as hex constants so the listing still assembles back
/// into the same ROM.
pub fn decompile_program(rom: &[u8]) -> DecompileResult {
    let mut result = DecompileResult::default();
    let mut words = rom.chunks_exact(2);
    for (idx, pair) in words.by_ref().enumerate() {
        let instruction = Instruction::from_bytes(pair[0], pair[1]);
        if instruction.opcode == Opcode::Invalid {
            log::debug!("word {}: {:#06X} is not an instruction", idx, instruction.word());
            result.failures.push(idx);
        }
        result.program.push(instruction.to_string());
    }
    if let [byte] = words.remainder() {
        result.program.push(format!("0x{:02X}", byte));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompiles_instructions() {
        let result = decompile_program(&[0x60, 0x05, 0x70, 0x01, 0xD0, 0x15]);
        assert_eq!(
            result.program,
            vec!["mov v0, 0x05", "add v0, 0x01", "drw v0, v1, 0x5"]
        );
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_invalid_words_become_constants() {
        let result = decompile_program(&[0x00, 0xE0, 0x81, 0x2F, 0xF0, 0x00]);
        assert_eq!(result.program, vec!["cls", "0x812F", "0xF000"]);
        assert_eq!(result.failures, vec![1, 2]);
    }

    #[test]
    fn test_trailing_odd_byte() {
        let result = decompile_program(&[0x00, 0xEE, 0xAB]);
        assert_eq!(result.program, vec!["ret", "0xAB"]);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_empty_rom() {
        assert_eq!(decompile_program(&[]), DecompileResult::default());
    }
}
