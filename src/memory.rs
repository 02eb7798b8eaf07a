use crate::constants::{FONT, MEMORY_SIZE};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - `0x000..0x050` holds the built-in font and cannot be written by programs
/// - `0x200..` is where ROMs are loaded
///
/// Every access is total: addresses wrap around at the end of memory.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: Box::new([0; MEMORY_SIZE]),
        };
        memory.clear();
        memory
    }

    /// Zeroes everything except the font.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
        self.bytes[..FONT.len()].copy_from_slice(&FONT);
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[Self::index(addr)]
    }

    /// Writes a byte, unless `addr` falls in the font region.
    ///
    /// Returns whether the write happened.
    pub fn write(&mut self, addr: u16, value: u8) -> bool {
        let idx = Self::index(addr);
        if idx < FONT.len() {
            log::warn!("refused write of {:#04X} to font memory at {:#05X}", value, idx);
            return false;
        }
        self.bytes[idx] = value;
        true
    }

    /// The big-endian word at `addr`.
    pub fn word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    /// Copies `data` in starting at `offset`; the caller guarantees it fits.
    pub(crate) fn load(&mut self, offset: usize, data: &[u8]) {
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }

    pub fn len(&self) -> usize {
        MEMORY_SIZE
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    fn index(addr: u16) -> usize {
        addr as usize % MEMORY_SIZE
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ROM_START;

    #[test]
    fn test_memory_zeroed_after_font() {
        let m = Memory::new();
        assert_eq!(m.as_slice()[..FONT.len()], FONT[..]);
        assert!(m.as_slice()[FONT.len()..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_write_and_read() {
        let mut m = Memory::new();
        assert!(m.write(0x300, 0xAB));
        assert_eq!(m.read(0x300), 0xAB);
    }

    #[test]
    fn test_font_is_read_only() {
        let mut m = Memory::new();
        assert!(!m.write(0x000, 0x00));
        assert!(!m.write(0x04F, 0x00));
        assert_eq!(m.read(0x000), 0xF0);
        assert!(m.write(0x050, 0x11));
    }

    #[test]
    fn test_addresses_wrap() {
        let mut m = Memory::new();
        assert!(m.write(0x1300, 0x42));
        assert_eq!(m.read(0x300), 0x42);
    }

    #[test]
    fn test_read_word() {
        let mut m = Memory::new();
        m.load(ROM_START, &[0xAA, 0xBB]);
        assert_eq!(m.word(ROM_START as u16), 0xAABB);
    }

    #[test]
    fn test_clear_restores_font() {
        let mut m = Memory::new();
        m.load(0, &[0; 16]);
        m.load(ROM_START, &[1, 2, 3]);
        m.clear();
        assert_eq!(m.as_slice()[..FONT.len()], FONT[..]);
        assert_eq!(m.read(ROM_START as u16), 0);
    }
}
