use crate::constants::KEY_COUNT;

/// A register waiting to receive the next key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyWait {
    pub register: u8,
}

/// A key press that fulfilled a pending `KeyWait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub register: u8,
    pub key: u8,
}

/// # Input
/// The state of the 16-key hexadecimal keypad.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// At most one register can be waiting for a key press at a time; a new wait replaces the old one.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pressed_keys: [bool; KEY_COUNT],
    waiting: Option<KeyWait>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases every key and drops any pending wait.
    pub fn reset(&mut self) {
        self.pressed_keys = [false; KEY_COUNT];
        self.waiting = None;
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad value 0x0..0xF; only the low nibble is used
    /// * `pressed` whether the key is now down
    ///
    /// Returns the fulfilled wait if this press completes one.
    pub fn set_key_state(&mut self, key: u8, pressed: bool) -> Option<KeyPress> {
        let key = key & 0xF;
        let was_pressed = std::mem::replace(&mut self.pressed_keys[key as usize], pressed);
        if pressed && !was_pressed {
            self.waiting
                .take()
                .map(|wait| KeyPress { register: wait.register, key })
        } else {
            None
        }
    }

    /// Keys beyond 0xF are never pressed.
    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.pressed_keys
            .get(key as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Registers `register` to receive the next key press.
    pub fn await_keypress(&mut self, register: u8) {
        self.waiting = Some(KeyWait { register });
    }

    pub fn waiting(&self) -> Option<KeyWait> {
        self.waiting
    }

    pub fn pressed_keys(&self) -> &[bool; KEY_COUNT] {
        &self.pressed_keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_key_presses() {
        let mut input = Input::new();
        input.set_key_state(0xE, true);
        assert!(input.is_key_pressed(0xE));
        input.set_key_state(0xE, false);
        assert!(!input.is_key_pressed(0xE));
    }

    #[test]
    fn test_out_of_range_key_is_not_pressed() {
        let input = Input::new();
        assert!(!input.is_key_pressed(0x10));
        assert!(!input.is_key_pressed(0xFF));
    }

    #[test]
    fn test_press_fulfils_wait_once() {
        let mut input = Input::new();
        input.await_keypress(0x3);
        assert_eq!(
            input.set_key_state(0x7, true),
            Some(KeyPress { register: 0x3, key: 0x7 })
        );
        assert_eq!(input.waiting(), None);
        input.set_key_state(0x7, false);
        assert_eq!(input.set_key_state(0x7, true), None);
    }

    #[test]
    fn test_release_does_not_fulfil_wait() {
        let mut input = Input::new();
        input.await_keypress(0x1);
        assert_eq!(input.set_key_state(0x2, false), None);
        assert_eq!(input.waiting(), Some(KeyWait { register: 0x1 }));
    }

    #[test]
    fn test_held_key_does_not_fulfil_wait() {
        let mut input = Input::new();
        input.set_key_state(0x2, true);
        input.await_keypress(0x1);
        assert_eq!(input.set_key_state(0x2, true), None);
        assert_eq!(input.set_key_state(0x4, true), Some(KeyPress { register: 0x1, key: 0x4 }));
    }

    #[test]
    fn test_last_wait_wins() {
        let mut input = Input::new();
        input.await_keypress(0x1);
        input.await_keypress(0x2);
        assert_eq!(input.set_key_state(0x0, true), Some(KeyPress { register: 0x2, key: 0x0 }));
    }

    #[test]
    fn test_reset() {
        let mut input = Input::new();
        input.set_key_state(0x5, true);
        input.await_keypress(0x1);
        input.reset();
        assert!(!input.is_key_pressed(0x5));
        assert_eq!(input.waiting(), None);
    }
}
