use crate::constants::{BACKGROUND_COLOR, DISPLAY_HEIGHT, DISPLAY_WIDTH, FOREGROUND_COLOR};

/// The CHIP-8 screen.
pub type Screen = Display<DISPLAY_WIDTH, DISPLAY_HEIGHT>;

/// # Display
/// A `WIDTH`x`HEIGHT` monochrome framebuffer.
///
/// Pixels are stored as packed RGBA colors rather than on/off bits so they can be handed to a
/// renderer as-is. A pixel is "on" when it holds the foreground color and "off" when it holds
/// the background color; changing either color repaints the pixels that held the old one.
///
/// The buffer is indexed as `[y * WIDTH + x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display<const WIDTH: usize, const HEIGHT: usize> {
    pixels: Vec<u32>,
    foreground: u32,
    background: u32,
    wrapping: bool,
    dirty: bool,
}

impl<const WIDTH: usize, const HEIGHT: usize> Display<WIDTH, HEIGHT> {
    pub fn new() -> Self {
        Display {
            pixels: vec![BACKGROUND_COLOR; WIDTH * HEIGHT],
            foreground: FOREGROUND_COLOR,
            background: BACKGROUND_COLOR,
            wrapping: true,
            dirty: true,
        }
    }

    /// Turns the pixel on.
    pub fn draw(&mut self, x: usize, y: usize) {
        let color = self.foreground;
        if let Some(pixel) = self.pixel_mut(x, y) {
            *pixel = color;
            self.dirty = true;
        }
    }

    /// Turns the pixel off.
    pub fn erase(&mut self, x: usize, y: usize) {
        let color = self.background;
        if let Some(pixel) = self.pixel_mut(x, y) {
            *pixel = color;
            self.dirty = true;
        }
    }

    /// Toggles the pixel.
    ///
    /// Returns true if the pixel was turned off, which is how sprite collisions are detected.
    /// Out of range coordinates on a non-wrapping display are ignored.
    pub fn flip(&mut self, x: usize, y: usize) -> bool {
        let (foreground, background) = (self.foreground, self.background);
        let erased = match self.pixel_mut(x, y) {
            Some(pixel) if *pixel == background => {
                *pixel = foreground;
                false
            }
            Some(pixel) => {
                *pixel = background;
                true
            }
            None => return false,
        };
        self.dirty = true;
        erased
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        let color = self.background;
        self.pixels.fill(color);
        self.dirty = true;
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .map(|idx| self.pixels[idx] != self.background)
            .unwrap_or(false)
    }

    pub fn wrapping(&self) -> bool {
        self.wrapping
    }

    /// When wrapping, coordinates past an edge continue from the opposite edge.
    pub fn set_wrapping(&mut self, wrapping: bool) {
        self.wrapping = wrapping;
    }

    pub fn background_color(&self) -> u32 {
        self.background
    }

    pub fn set_background_color(&mut self, color: u32) {
        let old = self.background;
        self.repaint(old, color);
        self.background = color;
    }

    pub fn foreground_color(&self) -> u32 {
        self.foreground
    }

    pub fn set_foreground_color(&mut self, color: u32) {
        let old = self.foreground;
        self.repaint(old, color);
        self.foreground = color;
    }

    pub fn width(&self) -> usize {
        WIDTH
    }

    pub fn height(&self) -> usize {
        HEIGHT
    }

    /// Number of pixels; `width() * height()`.
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    /// The pixel colors, row by row.
    pub fn data(&self) -> &[u32] {
        &self.pixels
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn repaint(&mut self, from: u32, to: u32) {
        self.pixels
            .iter_mut()
            .filter(|pixel| **pixel == from)
            .for_each(|pixel| *pixel = to);
        self.dirty = true;
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        let (x, y) = if self.wrapping {
            (x % WIDTH, y % HEIGHT)
        } else {
            (x, y)
        };
        if x < WIDTH && y < HEIGHT {
            Some(y * WIDTH + x)
        } else {
            None
        }
    }

    fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut u32> {
        let idx = self.index(x, y)?;
        self.pixels.get_mut(idx)
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> Default for Display<WIDTH, HEIGHT> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_display_is_blank() {
        let display = Screen::new();
        assert_eq!(display.size(), 64 * 32);
        assert!(display.data().iter().all(|p| *p == BACKGROUND_COLOR));
    }

    #[test]
    fn test_draw_and_erase() {
        let mut display = Screen::new();
        display.draw(3, 4);
        assert!(display.is_on(3, 4));
        assert_eq!(display.data()[4 * 64 + 3], FOREGROUND_COLOR);
        display.erase(3, 4);
        assert!(!display.is_on(3, 4));
    }

    #[test]
    fn test_flip_reports_erasure() {
        let mut display = Screen::new();
        assert!(!display.flip(10, 10));
        assert!(display.is_on(10, 10));
        assert!(display.flip(10, 10));
        assert!(!display.is_on(10, 10));
    }

    #[test]
    fn test_flip_wraps() {
        let mut display = Screen::new();
        display.flip(64, 32);
        assert!(display.is_on(0, 0));
        display.flip(63 + 64, 31);
        assert!(display.is_on(63, 31));
    }

    #[test]
    fn test_no_wrap_ignores_out_of_range() {
        let mut display = Screen::new();
        display.set_wrapping(false);
        assert!(!display.flip(64, 0));
        display.draw(0, 32);
        assert!(display.data().iter().all(|p| *p == BACKGROUND_COLOR));
    }

    #[test]
    fn test_clear() {
        let mut display = Display::<8, 4>::new();
        display.draw(1, 1);
        display.draw(7, 3);
        display.clear();
        assert!(display.data().iter().all(|p| *p == BACKGROUND_COLOR));
    }

    #[test]
    fn test_palette_swap_keeps_picture() {
        let mut display = Display::<8, 4>::new();
        display.draw(2, 2);
        display.set_foreground_color(0x00FF_00FF);
        display.set_background_color(0x1111_11FF);
        assert_eq!(display.data()[2 * 8 + 2], 0x00FF_00FF);
        assert_eq!(display.data()[0], 0x1111_11FF);
        assert!(display.is_on(2, 2));
        // flipping still toggles between the new colors
        assert!(display.flip(2, 2));
        assert_eq!(display.data()[2 * 8 + 2], 0x1111_11FF);
    }

    #[test]
    fn test_take_dirty() {
        let mut display = Screen::new();
        assert!(display.take_dirty());
        assert!(!display.take_dirty());
        display.flip(0, 0);
        assert!(display.take_dirty());
    }
}
