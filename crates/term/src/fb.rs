//! Framebuffer of styled glyphs.
//!
//! Coordinates here are screen coordinates: `(col, line)`, origin top-left.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const fn plain(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub const fn glyph(self, ch: char) -> Glyph {
        Glyph { ch, style: self }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::plain(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// One terminal cell: a character and how to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Default for Glyph {
    fn default() -> Self {
        Style::default().glyph(' ')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when it is large enough.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.glyphs
            .resize(width as usize * height as usize, Glyph::default());
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    #[inline(always)]
    fn idx(&self, col: u16, line: u16) -> Option<usize> {
        if col >= self.width || line >= self.height {
            return None;
        }
        Some(line as usize * self.width as usize + col as usize)
    }

    pub fn get(&self, col: u16, line: u16) -> Option<Glyph> {
        self.idx(col, line).map(|i| self.glyphs[i])
    }

    /// Write one glyph; writes outside the buffer are dropped.
    pub fn set(&mut self, col: u16, line: u16, glyph: Glyph) {
        if let Some(i) = self.idx(col, line) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    pub fn put_char(&mut self, col: u16, line: u16, ch: char, style: Style) {
        self.set(col, line, style.glyph(ch));
    }

    /// Write `s` left to right, clipped at the right edge. Returns the column
    /// after the last character.
    pub fn put_str(&mut self, col: u16, line: u16, s: &str, style: Style) -> u16 {
        let mut c = col;
        for ch in s.chars() {
            if c >= self.width {
                break;
            }
            self.put_char(c, line, ch, style);
            c += 1;
        }
        c
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, col: u16, line: u16, value: u32, style: Style) -> u16 {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }

        let mut c = col;
        for &d in digits[..len].iter().rev() {
            if c >= self.width {
                break;
            }
            self.put_char(c, line, d as char, style);
            c += 1;
        }
        c
    }

    pub fn fill_rect(&mut self, col: u16, line: u16, w: u16, h: u16, ch: char, style: Style) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(col.saturating_add(dx), line.saturating_add(dy), ch, style);
            }
        }
    }

    /// Characters of one line, for tests and debugging.
    pub fn line_text(&self, line: u16) -> String {
        (0..self.width)
            .filter_map(|c| self.get(c, line))
            .map(|g| g.ch)
            .collect()
    }

    /// Whether any line contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|line| self.line_text(line).contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_u32_writes_digits() {
        let mut fb = FrameBuffer::new(12, 1);
        let end = fb.put_u32(1, 0, 40960, Style::default());
        assert_eq!(end, 6);
        assert_eq!(fb.line_text(0), " 40960      ");

        fb.put_u32(8, 0, 0, Style::default());
        assert_eq!(fb.get(8, 0).map(|g| g.ch), Some('0'));
    }

    #[test]
    fn writes_are_clipped() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(2, 1, "HOLD", Style::default());
        fb.set(9, 9, Style::default().glyph('x'));
        assert_eq!(fb.line_text(1), "  HO");
        assert!(fb.contains_text("HO"));
        assert!(!fb.contains_text("x"));
    }

    #[test]
    fn resize_keeps_length_consistent() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.resize(5, 2);
        assert_eq!(fb.glyphs().len(), 10);
        assert_eq!((fb.width(), fb.height()), (5, 2));
    }
}
