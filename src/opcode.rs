/// # Operands
///
/// Chip-8 instructions are 16 bits each. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all instructions
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
pub trait Operands {
    /// Returns the instruction's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The least significant byte.
    /// `[__nn]`
    fn nn(&self) -> u8;

    /// Everything but the most significant nibble.
    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Operands for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (((self & 0xF000) >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

/// An operand slot in an instruction's assembly syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    /// Register named by the x nibble.
    Vx,
    /// Register named by the y nibble.
    Vy,
    /// The literal register `v0`.
    V0,
    /// The literal address register `i`.
    I,
    N,
    Nn,
    Nnn,
}

/// # Opcodes
/// The CHIP-8 instruction set with the operands abstracted away.
///
/// Each variant's discriminant is the instruction word with every operand bit cleared, so
/// `opcode as u16 | operands` re-assembles a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Opcode {
    SysNnn = 0x0000,
    Cls = 0x00E0,
    Ret = 0x00EE,
    JmpNnn = 0x1000,
    CallNnn = 0x2000,
    SeVxNn = 0x3000,
    SneVxNn = 0x4000,
    SeVxVy = 0x5000,
    MovVxNn = 0x6000,
    AddVxNn = 0x7000,
    MovVxVy = 0x8000,
    OrVxVy = 0x8001,
    AndVxVy = 0x8002,
    XorVxVy = 0x8003,
    AddVxVy = 0x8004,
    SubVxVy = 0x8005,
    ShrVx = 0x8006,
    SubnVxVy = 0x8007,
    ShlVx = 0x800E,
    SneVxVy = 0x9000,
    MovINnn = 0xA000,
    JmpV0Nnn = 0xB000,
    RndVxNn = 0xC000,
    DrwVxVyN = 0xD000,
    SkpVx = 0xE09E,
    SknpVx = 0xE0A1,
    GdlyVx = 0xF007,
    KeyVx = 0xF00A,
    SdlyVx = 0xF015,
    SsndVx = 0xF018,
    AddIVx = 0xF01E,
    FontVx = 0xF029,
    BcdVx = 0xF033,
    StrV0Vx = 0xF055,
    LdV0Vx = 0xF065,
    Invalid = 0xFFFF,
}

impl Opcode {
    /// Every valid opcode, in instruction word order.
    pub const ALL: [Opcode; 35] = [
        Opcode::SysNnn,
        Opcode::Cls,
        Opcode::Ret,
        Opcode::JmpNnn,
        Opcode::CallNnn,
        Opcode::SeVxNn,
        Opcode::SneVxNn,
        Opcode::SeVxVy,
        Opcode::MovVxNn,
        Opcode::AddVxNn,
        Opcode::MovVxVy,
        Opcode::OrVxVy,
        Opcode::AndVxVy,
        Opcode::XorVxVy,
        Opcode::AddVxVy,
        Opcode::SubVxVy,
        Opcode::ShrVx,
        Opcode::SubnVxVy,
        Opcode::ShlVx,
        Opcode::SneVxVy,
        Opcode::MovINnn,
        Opcode::JmpV0Nnn,
        Opcode::RndVxNn,
        Opcode::DrwVxVyN,
        Opcode::SkpVx,
        Opcode::SknpVx,
        Opcode::GdlyVx,
        Opcode::KeyVx,
        Opcode::SdlyVx,
        Opcode::SsndVx,
        Opcode::AddIVx,
        Opcode::FontVx,
        Opcode::BcdVx,
        Opcode::StrV0Vx,
        Opcode::LdV0Vx,
    ];

    /// Classifies an instruction word.
    ///
    /// Total over every `u16`: words that don't name an instruction become `Opcode::Invalid`.
    pub fn decode(word: u16) -> Opcode {
        match word.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Opcode::Cls,
            (0x0, 0x0, 0xE, 0xE) => Opcode::Ret,
            (0x0, ..) => Opcode::SysNnn,
            (0x1, ..) => Opcode::JmpNnn,
            (0x2, ..) => Opcode::CallNnn,
            (0x3, ..) => Opcode::SeVxNn,
            (0x4, ..) => Opcode::SneVxNn,
            (0x5, ..) => Opcode::SeVxVy,
            (0x6, ..) => Opcode::MovVxNn,
            (0x7, ..) => Opcode::AddVxNn,
            (0x8, .., 0x0) => Opcode::MovVxVy,
            (0x8, .., 0x1) => Opcode::OrVxVy,
            (0x8, .., 0x2) => Opcode::AndVxVy,
            (0x8, .., 0x3) => Opcode::XorVxVy,
            (0x8, .., 0x4) => Opcode::AddVxVy,
            (0x8, .., 0x5) => Opcode::SubVxVy,
            (0x8, .., 0x6) => Opcode::ShrVx,
            (0x8, .., 0x7) => Opcode::SubnVxVy,
            (0x8, .., 0xE) => Opcode::ShlVx,
            (0x9, ..) => Opcode::SneVxVy,
            (0xA, ..) => Opcode::MovINnn,
            (0xB, ..) => Opcode::JmpV0Nnn,
            (0xC, ..) => Opcode::RndVxNn,
            (0xD, ..) => Opcode::DrwVxVyN,
            (0xE, _, 0x9, 0xE) => Opcode::SkpVx,
            (0xE, _, 0xA, 0x1) => Opcode::SknpVx,
            (0xF, _, 0x0, 0x7) => Opcode::GdlyVx,
            (0xF, _, 0x0, 0xA) => Opcode::KeyVx,
            (0xF, _, 0x1, 0x5) => Opcode::SdlyVx,
            (0xF, _, 0x1, 0x8) => Opcode::SsndVx,
            (0xF, _, 0x1, 0xE) => Opcode::AddIVx,
            (0xF, _, 0x2, 0x9) => Opcode::FontVx,
            (0xF, _, 0x3, 0x3) => Opcode::BcdVx,
            (0xF, _, 0x5, 0x5) => Opcode::StrV0Vx,
            (0xF, _, 0x6, 0x5) => Opcode::LdV0Vx,
            _ => Opcode::Invalid,
        }
    }

    /// The instruction word with all operand bits cleared.
    pub fn base(self) -> u16 {
        self as u16
    }

    /// Bits of the instruction word that hold operands rather than select the opcode.
    pub fn operand_mask(self) -> u16 {
        match self {
            Opcode::Cls | Opcode::Ret | Opcode::Invalid => 0x0000,
            Opcode::SysNnn
            | Opcode::JmpNnn
            | Opcode::CallNnn
            | Opcode::MovINnn
            | Opcode::JmpV0Nnn
            | Opcode::SeVxNn
            | Opcode::SneVxNn
            | Opcode::MovVxNn
            | Opcode::AddVxNn
            | Opcode::RndVxNn
            | Opcode::DrwVxVyN => 0x0FFF,
            Opcode::SeVxVy
            | Opcode::SneVxVy
            | Opcode::MovVxVy
            | Opcode::OrVxVy
            | Opcode::AndVxVy
            | Opcode::XorVxVy
            | Opcode::AddVxVy
            | Opcode::SubVxVy
            | Opcode::ShrVx
            | Opcode::SubnVxVy
            | Opcode::ShlVx => 0x0FF0,
            Opcode::SkpVx
            | Opcode::SknpVx
            | Opcode::GdlyVx
            | Opcode::KeyVx
            | Opcode::SdlyVx
            | Opcode::SsndVx
            | Opcode::AddIVx
            | Opcode::FontVx
            | Opcode::BcdVx
            | Opcode::StrV0Vx
            | Opcode::LdV0Vx => 0x0F00,
        }
    }

    /// The assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::SysNnn => "sys",
            Opcode::Cls => "cls",
            Opcode::Ret => "ret",
            Opcode::JmpNnn | Opcode::JmpV0Nnn => "jmp",
            Opcode::CallNnn => "call",
            Opcode::SeVxNn | Opcode::SeVxVy => "se",
            Opcode::SneVxNn | Opcode::SneVxVy => "sne",
            Opcode::MovVxNn | Opcode::MovVxVy | Opcode::MovINnn => "mov",
            Opcode::AddVxNn | Opcode::AddVxVy | Opcode::AddIVx => "add",
            Opcode::OrVxVy => "or",
            Opcode::AndVxVy => "and",
            Opcode::XorVxVy => "xor",
            Opcode::SubVxVy => "sub",
            Opcode::ShrVx => "shr",
            Opcode::SubnVxVy => "subn",
            Opcode::ShlVx => "shl",
            Opcode::RndVxNn => "rnd",
            Opcode::DrwVxVyN => "drw",
            Opcode::SkpVx => "skp",
            Opcode::SknpVx => "sknp",
            Opcode::GdlyVx => "gdly",
            Opcode::KeyVx => "key",
            Opcode::SdlyVx => "sdly",
            Opcode::SsndVx => "ssnd",
            Opcode::FontVx => "font",
            Opcode::BcdVx => "bcd",
            Opcode::StrV0Vx => "str",
            Opcode::LdV0Vx => "ld",
            Opcode::Invalid => "invalid",
        }
    }

    /// The full operand list, in the order it is written in assembly.
    ///
    /// `shr`/`shl` may also be written with only `vx` and `str`/`ld` without the `v0`;
    /// the parser handles those short forms.
    pub fn args(self) -> &'static [Arg] {
        use Arg::*;
        match self {
            Opcode::Cls | Opcode::Ret | Opcode::Invalid => &[],
            Opcode::SysNnn | Opcode::JmpNnn | Opcode::CallNnn => &[Nnn],
            Opcode::SeVxNn | Opcode::SneVxNn | Opcode::MovVxNn | Opcode::AddVxNn => &[Vx, Nn],
            Opcode::RndVxNn => &[Vx, Nn],
            Opcode::SeVxVy
            | Opcode::SneVxVy
            | Opcode::MovVxVy
            | Opcode::OrVxVy
            | Opcode::AndVxVy
            | Opcode::XorVxVy
            | Opcode::AddVxVy
            | Opcode::SubVxVy
            | Opcode::ShrVx
            | Opcode::SubnVxVy
            | Opcode::ShlVx => &[Vx, Vy],
            Opcode::MovINnn => &[I, Nnn],
            Opcode::JmpV0Nnn => &[V0, Nnn],
            Opcode::DrwVxVyN => &[Vx, Vy, N],
            Opcode::SkpVx
            | Opcode::SknpVx
            | Opcode::GdlyVx
            | Opcode::KeyVx
            | Opcode::SdlyVx
            | Opcode::SsndVx
            | Opcode::FontVx
            | Opcode::BcdVx => &[Vx],
            Opcode::AddIVx => &[I, Vx],
            Opcode::StrV0Vx | Opcode::LdV0Vx => &[V0, Vx],
        }
    }

    pub fn is_valid(self) -> bool {
        self != Opcode::Invalid
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode::decode(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        let op: u16 = 0xABCD;
        assert_eq!(op.x(), 0xB);
    }

    #[test]
    fn test_y() {
        let op: u16 = 0xABCD;
        assert_eq!(op.y(), 0xC);
    }

    #[test]
    fn test_n() {
        let op: u16 = 0xABCD;
        assert_eq!(op.n(), 0xD);
    }

    #[test]
    fn test_nn() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nn(), 0xCD);
    }

    #[test]
    fn test_nnn() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nnn(), 0x0BCD);
    }

    #[test]
    fn test_decode_system_page() {
        assert_eq!(Opcode::decode(0x00E0), Opcode::Cls);
        assert_eq!(Opcode::decode(0x00EE), Opcode::Ret);
        assert_eq!(Opcode::decode(0x0123), Opcode::SysNnn);
        // cls/ret only match when the x nibble is zero
        assert_eq!(Opcode::decode(0x01E0), Opcode::SysNnn);
        assert_eq!(Opcode::decode(0x0000), Opcode::SysNnn);
    }

    #[test]
    fn test_decode_alu_page() {
        assert_eq!(Opcode::decode(0x8120), Opcode::MovVxVy);
        assert_eq!(Opcode::decode(0x8127), Opcode::SubnVxVy);
        assert_eq!(Opcode::decode(0x812E), Opcode::ShlVx);
        for n in 0x8..=0xD {
            assert_eq!(Opcode::decode(0x8120 | n), Opcode::Invalid);
        }
        assert_eq!(Opcode::decode(0x812F), Opcode::Invalid);
    }

    #[test]
    fn test_decode_key_page() {
        assert_eq!(Opcode::decode(0xE39E), Opcode::SkpVx);
        assert_eq!(Opcode::decode(0xE3A1), Opcode::SknpVx);
        assert_eq!(Opcode::decode(0xE3A2), Opcode::Invalid);
    }

    #[test]
    fn test_decode_misc_page() {
        assert_eq!(Opcode::decode(0xF00A), Opcode::KeyVx);
        assert_eq!(Opcode::decode(0xFA65), Opcode::LdV0Vx);
        assert_eq!(Opcode::decode(0xF0FF), Opcode::Invalid);
        assert_eq!(Opcode::decode(0xFFFF), Opcode::Invalid);
    }

    #[test]
    fn test_decode_unconditional_families() {
        assert_eq!(Opcode::decode(0x5121), Opcode::SeVxVy);
        assert_eq!(Opcode::decode(0x9125), Opcode::SneVxVy);
        assert_eq!(Opcode::decode(0xDABF), Opcode::DrwVxVyN);
    }

    #[test]
    fn test_every_base_decodes_to_itself() {
        for op in Opcode::ALL.iter() {
            assert_eq!(Opcode::decode(op.base()), *op, "{:?}", op);
        }
    }

    #[test]
    fn test_operand_mask_leaves_selector_bits() {
        for op in Opcode::ALL.iter() {
            assert_eq!(op.base() & op.operand_mask(), 0, "{:?}", op);
            let filled = op.base() | op.operand_mask();
            // Cls/Ret have no operands and sys 0xFFF is still sys
            assert_eq!(Opcode::decode(filled), *op, "{:?}", op);
        }
    }
}
